//! List node operations
//!
//! Clause lists, data item lists, and expression lists are all the same
//! list node; these operations keep the alternating element/separator
//! structure well formed across positional inserts and removals, so the
//! token-concatenation invariant holds without special cases in rendering.

use crate::acc::ast::node::{ListCell, NodeData, NodeId, SlotType};
use crate::acc::ast::tree::{Ast, MutationError};
use crate::acc::token::{Token, TokenKind};

fn element_slot(ast: &Ast, list: NodeId) -> Result<SlotType, MutationError> {
    match ast.node(list) {
        NodeData::List(node) => Ok(match node.elem_type {
            crate::acc::ast::node::ListElemType::Clauses(ctx) => SlotType::Clause(ctx),
            crate::acc::ast::node::ListElemType::DataItems => SlotType::DataItem,
            crate::acc::ast::node::ListElemType::Expressions => SlotType::Expression,
        }),
        other => Err(MutationError::NotAList { found: other.kind() }),
    }
}

fn cell_index_of(ast: &Ast, list: NodeId, element: NodeId) -> Result<usize, MutationError> {
    match ast.node(list) {
        NodeData::List(node) => node
            .cells
            .iter()
            .position(|cell| matches!(cell, ListCell::Node(id) if *id == element))
            .ok_or(MutationError::NotAChild),
        _ => Err(MutationError::NotAChild),
    }
}

fn separator() -> Token {
    let mut token = Token::synthetic(TokenKind::Comma, ",");
    token.trailing = " ".to_string();
    token
}

/// The element node ids of a list, separators skipped, in order.
pub fn list_elements(ast: &Ast, list: NodeId) -> Vec<NodeId> {
    match ast.node(list) {
        NodeData::List(node) => node.elements(),
        _ => Vec::new(),
    }
}

/// Append an element, synthesizing a separator after the current last
/// element if one exists. Type-checks the element against the list's
/// declared element type before touching anything.
pub fn list_append(ast: &mut Ast, list: NodeId, element: NodeId) -> Result<(), MutationError> {
    let slot = element_slot(ast, list)?;
    ast.check_slot(element, slot)?;
    ast.detach(element)?;
    let needs_separator = match ast.node(list) {
        NodeData::List(node) => matches!(node.cells.last(), Some(ListCell::Node(_))),
        _ => false,
    };
    if let NodeData::List(node) = ast.node_mut(list) {
        if needs_separator {
            node.cells.push(ListCell::Separator(separator()));
        }
        node.cells.push(ListCell::Node(element));
    }
    ast.set_parent(element, Some(list));
    Ok(())
}

/// Insert `element` immediately before `anchor`, synthesizing the separator
/// that keeps the list's rendering well formed.
pub fn list_insert_before(
    ast: &mut Ast,
    list: NodeId,
    anchor: NodeId,
    element: NodeId,
) -> Result<(), MutationError> {
    let slot = element_slot(ast, list)?;
    ast.check_slot(element, slot)?;
    let index = cell_index_of(ast, list, anchor)?;
    ast.detach(element)?;
    if let NodeData::List(node) = ast.node_mut(list) {
        node.cells.insert(index, ListCell::Separator(separator()));
        node.cells.insert(index, ListCell::Node(element));
    }
    ast.set_parent(element, Some(list));
    Ok(())
}

/// Insert `element` immediately after `anchor`.
pub fn list_insert_after(
    ast: &mut Ast,
    list: NodeId,
    anchor: NodeId,
    element: NodeId,
) -> Result<(), MutationError> {
    let slot = element_slot(ast, list)?;
    ast.check_slot(element, slot)?;
    let index = cell_index_of(ast, list, anchor)?;
    ast.detach(element)?;
    if let NodeData::List(node) = ast.node_mut(list) {
        node.cells.insert(index + 1, ListCell::Node(element));
        node.cells.insert(index + 1, ListCell::Separator(separator()));
    }
    ast.set_parent(element, Some(list));
    Ok(())
}

/// Remove a list member together with its associated separator (the one
/// before it, or the one after it for the first element).
pub fn remove_list_member(
    ast: &mut Ast,
    list: NodeId,
    element: NodeId,
) -> Result<(), MutationError> {
    let index = cell_index_of(ast, list, element)?;
    if let NodeData::List(node) = ast.node_mut(list) {
        node.cells.remove(index);
        if index > 0 && matches!(node.cells.get(index - 1), Some(ListCell::Separator(_))) {
            node.cells.remove(index - 1);
        } else if matches!(node.cells.get(index), Some(ListCell::Separator(_))) {
            node.cells.remove(index);
        }
    }
    ast.set_parent(element, None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acc::ast::query::find_first;
    use crate::acc::ast::render::render_node;
    use crate::acc::ast::node::NodeKind;

    fn items_list(ast: &Ast) -> NodeId {
        let clause = find_first(ast, ast.root(), NodeKind::VarListClause).unwrap();
        match ast.node(clause) {
            NodeData::VarListClause(c) => c.items.unwrap(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_append_synthesizes_separator() {
        let mut ast = Ast::parse_pragma("#pragma acc data copyin(a)").unwrap();
        let list = items_list(&ast);
        let item = ast.create_data_item("b").unwrap();
        list_append(&mut ast, list, item).unwrap();
        assert_eq!(render_node(&ast, list), "a, b");
    }

    #[test]
    fn test_insert_before_first_element() {
        let mut ast = Ast::parse_pragma("#pragma acc data copyin(a)").unwrap();
        let list = items_list(&ast);
        let anchor = list_elements(&ast, list)[0];
        let item = ast.create_data_item("b").unwrap();
        list_insert_before(&mut ast, list, anchor, item).unwrap();
        assert_eq!(render_node(&ast, list), "b, a");
    }

    #[test]
    fn test_remove_keeps_list_well_formed() {
        let mut ast = Ast::parse_pragma("#pragma acc data copyin(a, b, c)").unwrap();
        let list = items_list(&ast);
        let middle = list_elements(&ast, list)[1];
        remove_list_member(&mut ast, list, middle).unwrap();
        assert_eq!(render_node(&ast, list), "a, c");
        assert_eq!(list_elements(&ast, list).len(), 2);
    }

    #[test]
    fn test_remove_first_takes_following_separator() {
        let mut ast = Ast::parse_pragma("#pragma acc data copyin(a, b)").unwrap();
        let list = items_list(&ast);
        let first = list_elements(&ast, list)[0];
        remove_list_member(&mut ast, list, first).unwrap();
        assert_eq!(render_node(&ast, list), " b");
    }
}
