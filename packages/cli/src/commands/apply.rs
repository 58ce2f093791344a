use super::{document_json, load_document, resolve};
use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use blocktree_editor::{BlockEditor, Mutation};
use clap::Args;
use colored::Colorize;
use std::fs;
use tracing::info;

#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// Document to edit
    pub document: String,

    /// JSON array of mutations to replay
    pub script: String,

    /// Run the script without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Write the result here instead of over the document
    #[arg(short, long)]
    pub out: Option<String>,

    /// Print the result to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

pub fn apply(args: ApplyArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let document_path = resolve(cwd, &args.document);
    let mut editor = load_document(&document_path, &config)?;

    let script_path = resolve(cwd, &args.script);
    let content = fs::read_to_string(&script_path)
        .with_context(|| format!("Cannot read {}", script_path.display()))?;
    let script: Vec<Mutation> = serde_json::from_str(&content)
        .with_context(|| format!("Invalid script {}", script_path.display()))?;

    run_script(&mut editor, &script, !args.stdout)?;

    if args.dry_run {
        println!(
            "{} {} mutation(s) valid, nothing written",
            "✓".green(),
            script.len()
        );
        return Ok(());
    }

    let output = document_json(&editor)?;
    if args.stdout {
        println!("{}", output);
        return Ok(());
    }

    let out_path = match &args.out {
        Some(out) => resolve(cwd, out),
        None => document_path,
    };
    fs::write(&out_path, output)?;
    info!(path = %out_path.display(), version = editor.version(), "document written");

    println!(
        "{} Wrote {} (version {})",
        "✓".green(),
        out_path.display(),
        editor.version()
    );
    Ok(())
}

/// Apply every mutation in order, stopping at the first failure
pub(crate) fn run_script(editor: &mut BlockEditor, script: &[Mutation], verbose: bool) -> Result<()> {
    for (index, mutation) in script.iter().enumerate() {
        let result = editor
            .apply(mutation)
            .map_err(|err| anyhow!("Mutation #{} ({}) failed: {}", index + 1, mutation.name(), err))?;

        if verbose {
            println!(
                "  {} {} {}",
                "✓".green(),
                mutation.describe(),
                format!("(version {}, size {})", result.version, result.size).dimmed()
            );
        }
    }

    Ok(())
}
