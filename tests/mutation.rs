//! Mutation API tests: edits are localized to the edited subtree,
//! destination slots are type-checked before anything changes, and parent
//! links stay consistent after every successful edit.

use acctree::acc::ast::list::{list_append, list_elements, list_insert_before};
use acctree::acc::ast::node::{Capability, DirectiveContext, NodeData, NodeKind};
use acctree::acc::ast::query::{find_all, find_first};
use acctree::acc::ast::render::{render, render_node};
use acctree::acc::ast::{Ast, MutationError, NodeId};
use rstest::rstest;

fn clause_list(ast: &Ast) -> NodeId {
    match ast.node(ast.root()) {
        NodeData::AccParallel(d) => d.clauses.unwrap(),
        NodeData::AccParallelLoop(d) => d.clauses.unwrap(),
        NodeData::AccKernels(d) => d.clauses.unwrap(),
        NodeData::AccKernelsLoop(d) => d.clauses.unwrap(),
        NodeData::AccLoop(d) => d.clauses.unwrap(),
        NodeData::AccData(d) => d.clauses.unwrap(),
        NodeData::AccDeclare(d) => d.clauses.unwrap(),
        other => panic!("no clause list on {:?}", other.kind()),
    }
}

fn assert_parent_links_consistent(ast: &Ast) {
    let mut seen = Vec::new();
    let mut stack = vec![ast.root()];
    while let Some(id) = stack.pop() {
        assert!(!seen.contains(&id), "node reachable twice");
        seen.push(id);
        for child in ast.node(id).child_ids() {
            assert_eq!(ast.parent(child), Some(id));
            stack.push(child);
        }
    }
}

#[test]
fn edit_changes_only_the_edited_subtree() {
    let mut ast = Ast::parse_pragma("#pragma acc parallel copyin(a, b) async(1)").unwrap();
    let items = find_all(&ast, ast.root(), NodeKind::DataItem);
    let b = items[1];
    assert_eq!(render_node(&ast, b), " b");

    ast.replace_with_text(b, " c[0:n]").unwrap();
    assert_eq!(render(&ast), "#pragma acc parallel copyin(a, c[0:n]) async(1)");
    assert_parent_links_consistent(&ast);
}

#[test]
fn expression_slot_accepts_reparsed_text() {
    let mut ast = Ast::parse_pragma("#pragma acc parallel num_gangs(2*n)").unwrap();
    let expr = find_first(&ast, ast.root(), NodeKind::BinaryExpression).unwrap();
    ast.replace_with_text(expr, "n + 1").unwrap();
    assert_eq!(render(&ast), "#pragma acc parallel num_gangs(n + 1)");
    assert_parent_links_consistent(&ast);
}

#[rstest]
#[case("#pragma acc parallel copyin(x)")]
#[case("#pragma acc parallel loop copyin(x)")]
#[case("#pragma acc kernels copyin(x)")]
#[case("#pragma acc kernels loop copyin(x)")]
#[case("#pragma acc data copyin(x)")]
#[case("#pragma acc declare copyin(x)")]
fn deviceptr_is_accepted_by_its_contexts(#[case] source: &str) {
    let mut ast = Ast::parse_pragma(source).unwrap();
    let list = clause_list(&ast);
    let clause = ast.create_clause("deviceptr(p)").unwrap();
    list_append(&mut ast, list, clause).unwrap();
    assert_eq!(render(&ast), format!("{}, deviceptr(p)", source));
    assert_parent_links_consistent(&ast);
}

#[test]
fn deviceptr_is_rejected_under_loop() {
    let source = "#pragma acc loop seq";
    let mut ast = Ast::parse_pragma(source).unwrap();
    let list = clause_list(&ast);
    let clause = ast.create_clause("deviceptr(p)").unwrap();

    let err = list_append(&mut ast, list, clause).unwrap_err();
    assert!(matches!(err, MutationError::TypeMismatch { .. }));
    assert_eq!(render(&ast), source);
    assert_eq!(ast.parent(clause), None);

    // Same gate on positional insertion.
    let anchor = list_elements(&ast, list)[0];
    let err = list_insert_before(&mut ast, list, anchor, clause).unwrap_err();
    assert!(matches!(err, MutationError::TypeMismatch { .. }));
    assert_eq!(render(&ast), source);
}

#[test]
fn deviceptr_capability_set_matches_its_contexts() {
    let ast = Ast::parse_pragma("#pragma acc data deviceptr(p)").unwrap();
    let clause = find_first(&ast, ast.root(), NodeKind::VarListClause).unwrap();
    let capabilities = ast.capabilities(clause);
    assert_eq!(capabilities.len(), 6);
    for context in [
        DirectiveContext::Parallel,
        DirectiveContext::ParallelLoop,
        DirectiveContext::Kernels,
        DirectiveContext::KernelsLoop,
        DirectiveContext::Data,
        DirectiveContext::Declare,
    ] {
        assert!(capabilities.contains(&Capability::ClauseFor(context)));
    }
    assert!(!capabilities.contains(&Capability::ClauseFor(DirectiveContext::Loop)));

    // The context set gates the literal-splice path too.
    let mut loop_ast = Ast::parse_pragma("#pragma acc loop private(x)").unwrap();
    let private = find_first(&loop_ast, loop_ast.root(), NodeKind::VarListClause).unwrap();
    let err = loop_ast.replace_with_text(private, "deviceptr(p)").unwrap_err();
    assert!(matches!(err, MutationError::TypeMismatch { .. }));
    assert_eq!(render(&loop_ast), "#pragma acc loop private(x)");
}

#[test]
fn invalid_literal_text_leaves_tree_untouched() {
    let source = "#pragma acc parallel copyin(a) async(1)";
    let mut ast = Ast::parse_pragma(source).unwrap();
    let clause = find_first(&ast, ast.root(), NodeKind::VarListClause).unwrap();

    let err = ast.replace_with_text(clause, "not a valid clause(").unwrap_err();
    assert!(matches!(err, MutationError::Reparse(_)));
    assert_eq!(render(&ast), source);
    assert_parent_links_consistent(&ast);
}

#[test]
fn replace_with_fails_on_the_root() {
    let mut ast = Ast::parse_pragma("#pragma acc parallel").unwrap();
    let root = ast.root();
    let clause = ast.create_clause("async").unwrap();
    assert_eq!(ast.replace_with(root, clause), Err(MutationError::NoParent));
}

#[test]
fn replace_child_requires_a_direct_child() {
    let mut ast = Ast::parse_pragma("#pragma acc data copyin(a)").unwrap();
    let root = ast.root();
    // The identifier is a descendant, not a direct child of the directive.
    let ident = find_first(&ast, root, NodeKind::Identifier).unwrap();
    let replacement = ast.create_identifier("b").unwrap();
    assert_eq!(
        ast.replace_child(root, ident, replacement),
        Err(MutationError::NotAChild)
    );
}

#[test]
fn reattaching_a_node_detaches_it_first() {
    let mut ast = Ast::parse_pragma("#pragma acc data copy(a, b)").unwrap();
    let items = find_all(&ast, ast.root(), NodeKind::DataItem);
    let (a, b) = (items[0], items[1]);

    // b moves out of its list cell and into a's slot in one step.
    ast.replace_with(a, b).unwrap();
    assert_eq!(render(&ast), "#pragma acc data copy( b)");
    assert_eq!(ast.parent(a), None);
    assert_parent_links_consistent(&ast);
}

#[test]
fn removing_a_clause_takes_its_separator() {
    let mut ast = Ast::parse_pragma("#pragma acc parallel copyin(a) async(1)").unwrap();
    let clause = find_first(&ast, ast.root(), NodeKind::ExprClause).unwrap();
    ast.remove_from_tree(clause).unwrap();
    assert_eq!(render(&ast), "#pragma acc parallel copyin(a)");
    assert_parent_links_consistent(&ast);
}

#[test]
fn list_operations_reject_non_list_targets() {
    let source = "#pragma acc data copyin(a)";
    let mut ast = Ast::parse_pragma(source).unwrap();
    let clause = find_first(&ast, ast.root(), NodeKind::VarListClause).unwrap();
    let item = ast.create_data_item("b").unwrap();

    let err = list_append(&mut ast, clause, item).unwrap_err();
    assert_eq!(
        err,
        MutationError::NotAList {
            found: NodeKind::VarListClause
        }
    );

    let anchor = find_all(&ast, ast.root(), NodeKind::DataItem)[0];
    let err = list_insert_before(&mut ast, clause, anchor, item).unwrap_err();
    assert!(matches!(err, MutationError::NotAList { .. }));

    assert_eq!(render(&ast), source);
    assert_eq!(ast.parent(item), None);
}

#[test]
fn created_fragments_start_detached() {
    let mut ast = Ast::parse_pragma("#pragma acc parallel").unwrap();
    let clause = ast.create_clause("num_workers(4)").unwrap();
    let item = ast.create_data_item("x[0:n]").unwrap();
    let expr = ast.create_expression("a + b").unwrap();
    for id in [clause, item, expr] {
        assert_eq!(ast.parent(id), None);
    }
    // Detached nodes are invisible to rendering.
    assert_eq!(render(&ast), "#pragma acc parallel");
}
