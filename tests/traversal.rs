//! Traversal tests: deterministic typed queries and the double-dispatch
//! visitor protocol.

use acctree::acc::ast::node::NodeKind;
use acctree::acc::ast::query::{find_all, find_first, find_last, find_nearest_ancestor};
use acctree::acc::ast::render::render_node;
use acctree::acc::ast::{accept, visit_children, Ast, NodeId, Visitor};

#[test]
fn find_all_is_preorder_and_stable() {
    let ast = Ast::parse_pragma("#pragma acc wait(a + b, c * d)").unwrap();
    let exprs = find_all(&ast, ast.root(), NodeKind::BinaryExpression);
    assert_eq!(exprs.len(), 2);
    assert_eq!(render_node(&ast, exprs[0]), "a + b");
    assert_eq!(render_node(&ast, exprs[1]), " c * d");

    // Unmutated tree: repeated queries return identical results.
    assert_eq!(exprs, find_all(&ast, ast.root(), NodeKind::BinaryExpression));
    assert_eq!(find_first(&ast, ast.root(), NodeKind::BinaryExpression), Some(exprs[0]));
    assert_eq!(find_last(&ast, ast.root(), NodeKind::BinaryExpression), Some(exprs[1]));
}

#[test]
fn nearest_ancestor_walks_strictly_upward() {
    let ast = Ast::parse_pragma("#pragma acc data copyin(a[0:n])").unwrap();
    let ident = find_first(&ast, ast.root(), NodeKind::Identifier).unwrap();
    assert_eq!(
        find_nearest_ancestor(&ast, ident, NodeKind::DataItem),
        find_first(&ast, ast.root(), NodeKind::DataItem)
    );
    assert_eq!(
        find_nearest_ancestor(&ast, ident, NodeKind::AccData),
        Some(ast.root())
    );
    assert_eq!(find_nearest_ancestor(&ast, ident, NodeKind::AccLoop), None);
}

#[derive(Default)]
struct Recorder {
    calls: Vec<&'static str>,
}

#[test]
fn directive_dispatch_hits_construct_interface() {
    impl Visitor for Recorder {
        fn visit_acc_parallel(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("parallel");
        }
        fn visit_acc_construct(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("construct");
        }
        fn visit_node(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("node");
        }
    }

    let ast = Ast::parse_pragma("#pragma acc parallel").unwrap();
    let mut recorder = Recorder::default();
    accept(&ast, ast.root(), &mut recorder);
    assert_eq!(recorder.calls, vec!["parallel", "construct", "node"]);
}

#[derive(Default)]
struct ExprRecorder {
    calls: Vec<&'static str>,
}

#[test]
fn expression_dispatch_order_is_concrete_capabilities_base() {
    impl Visitor for ExprRecorder {
        fn visit_identifier(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("identifier");
        }
        fn visit_expression(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("expression");
        }
        fn visit_assignment_target(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("assignment target");
        }
        fn visit_constant_expression(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("constant expression");
        }
        fn visit_node(&mut self, _: &Ast, _: NodeId) {
            self.calls.push("node");
        }
    }

    let mut ast = Ast::parse_pragma("#pragma acc parallel").unwrap();
    let ident = ast.create_expression("x").unwrap();
    let mut recorder = ExprRecorder::default();
    accept(&ast, ident, &mut recorder);
    assert_eq!(
        recorder.calls,
        vec![
            "identifier",
            "expression",
            "assignment target",
            "constant expression",
            "node"
        ]
    );
}

#[derive(Default)]
struct IdentifierCounter {
    names: Vec<String>,
}

#[test]
fn visit_children_reaches_every_descendant() {
    impl Visitor for IdentifierCounter {
        fn visit_identifier(&mut self, ast: &Ast, id: NodeId) {
            self.names.push(render_node(ast, id).trim().to_string());
        }
    }

    let ast = Ast::parse_pragma("#pragma acc data copyin(a, b) deviceptr(p)").unwrap();
    let mut counter = IdentifierCounter::default();
    visit_children(&ast, ast.root(), &mut counter);
    assert_eq!(counter.names, vec!["a", "b", "p"]);
}
