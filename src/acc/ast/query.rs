//! Typed subtree search
//!
//! All downward searches use the one canonical traversal order (pre-order,
//! in field-index order), so results are deterministic and reproducible
//! across calls on an unmutated tree.

use crate::acc::ast::node::{NodeId, NodeKind};
use crate::acc::ast::tree::Ast;

fn walk(ast: &Ast, from: NodeId, kind: NodeKind, out: &mut Vec<NodeId>) {
    if ast.kind(from) == kind {
        out.push(from);
    }
    for child in ast.node(from).child_ids() {
        walk(ast, child, kind, out);
    }
}

/// All nodes of `kind` under (and including) `from`, in pre-order.
pub fn find_all(ast: &Ast, from: NodeId, kind: NodeKind) -> Vec<NodeId> {
    let mut out = Vec::new();
    walk(ast, from, kind, &mut out);
    out
}

/// First node of `kind` in pre-order, `from` included.
pub fn find_first(ast: &Ast, from: NodeId, kind: NodeKind) -> Option<NodeId> {
    if ast.kind(from) == kind {
        return Some(from);
    }
    for child in ast.node(from).child_ids() {
        if let Some(found) = find_first(ast, child, kind) {
            return Some(found);
        }
    }
    None
}

/// Last node of `kind` in pre-order, `from` included.
pub fn find_last(ast: &Ast, from: NodeId, kind: NodeKind) -> Option<NodeId> {
    find_all(ast, from, kind).pop()
}

/// Nearest strict ancestor of `from` with the given kind.
pub fn find_nearest_ancestor(ast: &Ast, from: NodeId, kind: NodeKind) -> Option<NodeId> {
    let mut current = ast.parent(from);
    while let Some(id) = current {
        if ast.kind(id) == kind {
            return Some(id);
        }
        current = ast.parent(id);
    }
    None
}
