//! The directive syntax tree
//!
//! Submodules:
//! - [`node`]: the closed node-kind sum type, clause kinds, and the
//!   capability/context model
//! - [`tree`]: the arena, parent links, and the mutation API
//! - [`list`]: list-node operations (separator-preserving insert/remove)
//! - [`visitor`]: the double-dispatch traversal protocol
//! - [`query`]: typed subtree search
//! - [`render`]: lossless text reconstruction
//! - [`snapshot`]: serializable tree snapshots for tooling

pub mod list;
pub mod node;
pub mod query;
pub mod render;
pub mod snapshot;
pub mod tree;
pub mod visitor;

pub use node::{
    Capability, ClauseKind, ClauseShape, ContextSet, DirectiveContext, FieldRef, ListCell,
    ListElemType, NodeData, NodeId, NodeKind, SlotType,
};
pub use tree::{Ast, MutationError};
pub use visitor::{accept, visit_children, Visitor};
