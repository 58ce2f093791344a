//! # Blocktree Model
//!
//! Immutable block tree addressed as a flat span of positions, plus the
//! transaction type used to edit it.
//!
//! ```text
//! group ─┬─ container(id) ─┬─ content
//!        │                 └─ group ─ container(id) ─ content
//!        └─ container(id) ─── content
//! ```
//!
//! Every node occupies `size()` position units. Containers and groups spend
//! one unit on each boundary; content nodes spend one unit per character of
//! their text plus their two boundaries. The root group's own boundaries are
//! not addressable, so the first top-level block starts at position 0.

pub mod error;
pub mod id_generator;
pub mod node;
pub mod transaction;
pub mod tree;

pub use error::{TransactionError, TransactionResult};
pub use id_generator::{get_document_seed, IdGenerator};
pub use node::{BlockId, Content, Node, NodeKind, Props, Visit};
pub use transaction::{Step, Transaction};
pub use tree::Tree;
