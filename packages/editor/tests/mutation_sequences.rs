//! Tests for sequences of mutations
//!
//! This tests:
//! - JSON edit scripts replayed through an editor
//! - Undo/redo across several operations
//! - Batched operations
//! - Document integrity after failed operations

use blocktree_editor::{
    BlockEditor, BlockId, EditorError, IdGenerator, Mutation, PartialBlock, Placement, Schema,
    SchemaConverter,
};

fn editor(blocks: &[PartialBlock]) -> BlockEditor {
    let converter = SchemaConverter::new(Schema::default(), IdGenerator::from_seed("seq".to_string()));
    BlockEditor::from_blocks(blocks, converter).unwrap()
}

fn p(id: &str) -> PartialBlock {
    PartialBlock::paragraph(id.to_uppercase()).with_id(id)
}

fn outline(editor: &BlockEditor) -> Vec<String> {
    editor.tree().block_ids().into_iter().map(BlockId::to_string).collect()
}

#[test]
fn test_replay_json_script() {
    let mut editor = editor(&[p("a"), p("b"), p("c")]);
    let script: Vec<Mutation> = serde_json::from_str(
        r#"[
            { "op": "insertBlocks", "blocks": [{ "id": "n", "content": "nested" }], "reference": "a", "placement": "nested" },
            { "op": "updateBlock", "block": "b", "update": { "type": "heading", "props": { "level": 2 } } },
            { "op": "removeBlocks", "blocks": ["c"] },
            { "op": "replaceBlocks", "remove": [{ "id": "n" }], "insert": [{ "id": "m", "type": "bulletListItem" }] }
        ]"#,
    )
    .unwrap();

    for mutation in &script {
        editor.apply(mutation).unwrap();
    }

    assert_eq!(outline(&editor), vec!["a", "m", "b"]);
    assert_eq!(editor.version(), 4);

    let b = editor.get_block("b").unwrap();
    assert_eq!(b.block_type, "heading");
    assert_eq!(b.props["level"], 2);
    assert_eq!(b.content, "B");

    let a = editor.get_block("a").unwrap();
    assert_eq!(a.children[0].block_type, "bulletListItem");
}

#[test]
fn test_failed_mutation_in_sequence_keeps_previous_state() {
    let mut editor = editor(&[p("a"), p("b")]);

    editor
        .apply(&Mutation::RemoveBlocks {
            blocks: vec!["a".into()],
        })
        .unwrap();
    let snapshot = editor.tree().clone();

    let failed = editor.apply(&Mutation::InsertBlocks {
        blocks: vec![p("x")],
        reference: "a".into(),
        placement: Placement::After,
    });
    assert_eq!(failed, Err(EditorError::NotFound(BlockId::new("a"))));
    assert_eq!(editor.tree(), &snapshot);
    assert_eq!(editor.version(), 1);
}

#[test]
fn test_validate_then_apply() {
    let editor_state = editor(&[p("a"), p("b")]);
    let mutation = Mutation::ReplaceBlocks {
        remove: vec!["b".into(), "zz".into()],
        insert: vec![p("x")],
    };

    let validated = mutation.validate(editor_state.tree(), editor_state.converter());
    assert_eq!(validated, Err(EditorError::BlocksNotFound(vec![BlockId::new("zz")])));

    let mut editor = editor_state;
    assert_eq!(editor.apply(&mutation).map(|_| ()), validated);
    assert_eq!(outline(&editor), vec!["a", "b"]);
}

#[test]
fn test_undo_redo_sequence() {
    let mut editor = editor(&[p("a"), p("b"), p("c")]);
    let v0 = editor.tree().clone();

    editor.remove_blocks(["b"]).unwrap();
    let v1 = editor.tree().clone();
    editor
        .insert_blocks(&[p("x")], "c", Placement::Nested)
        .unwrap();
    let v2 = editor.tree().clone();
    editor.update_block("a", PartialBlock::default().with_content("changed")).unwrap();

    assert_eq!(editor.history().undo_levels(), 3);
    assert_eq!(editor.history().undo_description(), Some("update a"));

    assert!(editor.undo());
    assert_eq!(editor.tree(), &v2);
    assert!(editor.undo());
    assert_eq!(editor.tree(), &v1);
    assert!(editor.undo());
    assert_eq!(editor.tree(), &v0);
    assert!(!editor.undo());

    assert!(editor.redo());
    assert_eq!(editor.tree(), &v1);

    // A new operation drops the remaining redo steps
    editor.remove_blocks(["a"]).unwrap();
    assert!(!editor.history().can_redo());
    assert_eq!(outline(&editor), vec!["c"]);
}

#[test]
fn test_batched_operations_undo_together() {
    let mut editor = editor(&[p("a"), p("b")]);
    let v0 = editor.tree().clone();

    editor.begin_batch("Outline");
    editor.insert_blocks(&[p("x"), p("y")], "a", Placement::Nested).unwrap();
    editor.replace_blocks(["b"], &[p("z")]).unwrap();
    editor.end_batch();

    let batched = editor.tree().clone();
    assert_eq!(outline(&editor), vec!["a", "x", "y", "z"]);
    assert_eq!(editor.history().undo_levels(), 1);

    assert!(editor.undo());
    assert_eq!(editor.tree(), &v0);
    assert!(editor.redo());
    assert_eq!(editor.tree(), &batched);
}

#[test]
fn test_undo_levels_are_bounded() {
    let mut editor = editor(&[p("a")]).with_undo_levels(2);

    for id in ["b", "c", "d"] {
        editor.insert_blocks(&[p(id)], "a", Placement::After).unwrap();
    }

    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(outline(&editor), vec!["a", "b"]);
}

#[test]
fn test_generated_ids_continue_across_operations() {
    let mut editor = editor(&[p("a")]);

    editor
        .insert_blocks(&[PartialBlock::paragraph("one"), PartialBlock::paragraph("two")], "a", Placement::After)
        .unwrap();
    editor.replace_blocks(["seq-1"], &[PartialBlock::paragraph("three")]).unwrap();

    assert_eq!(outline(&editor), vec!["a", "seq-3", "seq-2"]);
}

#[test]
fn test_script_with_explicit_generated_style_ids() {
    let mut editor = editor(&[p("a")]);
    let script: Vec<Mutation> = serde_json::from_str(
        r#"[
            { "op": "insertBlocks", "blocks": [{ "id": "seq-1" }], "reference": "a", "placement": "after" },
            { "op": "insertBlocks", "blocks": [{ "content": "generated" }], "reference": "seq-1", "placement": "after" }
        ]"#,
    )
    .unwrap();

    for mutation in &script {
        editor.apply(mutation).unwrap();
    }

    assert_eq!(outline(&editor), vec!["a", "seq-1", "seq-2"]);
}
