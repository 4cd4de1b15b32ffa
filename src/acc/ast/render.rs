//! Lossless text reconstruction
//!
//! Rendering is a depth-first walk in field-index order, concatenating the
//! full textual extent of every token reached. Before any mutation this
//! reproduces the parsed source byte-for-byte; after a mutation, only the
//! edited subtree's bytes differ.

use crate::acc::ast::node::{FieldRef, NodeId};
use crate::acc::ast::tree::Ast;

fn render_into(ast: &Ast, id: NodeId, out: &mut String) {
    for field in ast.node(id).fields() {
        match field {
            FieldRef::Token(token) => token.render_into(out),
            FieldRef::Child(child) => render_into(ast, child, out),
        }
    }
}

/// Render the whole tree from the root.
pub fn render(ast: &Ast) -> String {
    render_node(ast, ast.root())
}

/// Render one subtree.
pub fn render_node(ast: &Ast, id: NodeId) -> String {
    let mut out = String::new();
    render_into(ast, id, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preserves_original_spacing() {
        let source = "#pragma acc parallel   copyin( a ,b )  num_gangs(8)";
        let ast = Ast::parse_pragma(source).unwrap();
        assert_eq!(render(&ast), source);
    }

    #[test]
    fn test_render_subtree_is_a_substring() {
        let source = "#pragma acc kernels copyout(x[0:n])";
        let ast = Ast::parse_pragma(source).unwrap();
        let clause = crate::acc::ast::query::find_first(
            &ast,
            ast.root(),
            crate::acc::ast::node::NodeKind::VarListClause,
        )
        .unwrap();
        let text = render_node(&ast, clause);
        assert!(source.contains(&text), "{:?} not in {:?}", text, source);
    }
}
