//! Error recovery tests
//!
//! Malformed clause lists must still produce a tree: skipped tokens land in
//! token runs, each junk run records one syntax error, and the rendering
//! stays byte-for-byte lossless so tooling can keep working on broken
//! pragmas.

use acctree::acc::ast::node::{NodeData, NodeKind};
use acctree::acc::ast::query::{find_all, find_first};
use acctree::acc::ast::render::render;
use acctree::acc::ast::Ast;

#[test]
fn junk_before_loop_upgrades_to_combined_construct() {
    let source = "#pragma acc parallel ,,, loop";
    let ast = Ast::parse_pragma(source).unwrap();

    assert_eq!(ast.kind(ast.root()), NodeKind::AccParallelLoop);
    assert_eq!(ast.errors().len(), 1);
    assert_eq!(render(&ast), source);

    // The skipped commas hang off the combined construct itself.
    let run = find_first(&ast, ast.root(), NodeKind::TokenRun).unwrap();
    assert_eq!(ast.parent(run), Some(ast.root()));

    // A loop-bearing construct is findable despite the junk.
    assert_eq!(
        find_first(&ast, ast.root(), NodeKind::AccParallelLoop),
        Some(ast.root())
    );
}

#[test]
fn kernels_upgrade_keeps_following_clauses() {
    let source = "#pragma acc kernels ??? loop independent";
    let ast = Ast::parse_pragma(source).unwrap();

    assert_eq!(ast.kind(ast.root()), NodeKind::AccKernelsLoop);
    assert!(!ast.errors().is_empty());
    // `independent` parses as a clause of the combined form.
    assert!(find_first(&ast, ast.root(), NodeKind::BareClause).is_some());
    assert_eq!(render(&ast), source);
}

#[test]
fn loop_after_a_clause_does_not_upgrade() {
    let source = "#pragma acc parallel copyin(a) loop";
    let ast = Ast::parse_pragma(source).unwrap();

    assert_eq!(ast.kind(ast.root()), NodeKind::AccParallel);
    assert_eq!(ast.errors().len(), 1);
    assert!(find_first(&ast, ast.root(), NodeKind::TokenRun).is_some());
    assert_eq!(render(&ast), source);
}

#[test]
fn junk_between_clauses_is_isolated() {
    let source = "#pragma acc parallel copyin(a) @ $ async(1)";
    let ast = Ast::parse_pragma(source).unwrap();

    assert_eq!(ast.errors().len(), 1);
    assert_eq!(find_all(&ast, ast.root(), NodeKind::TokenRun).len(), 1);
    // Both real clauses survive around the junk run.
    assert!(find_first(&ast, ast.root(), NodeKind::VarListClause).is_some());
    assert!(find_first(&ast, ast.root(), NodeKind::ExprClause).is_some());
    assert_eq!(render(&ast), source);
}

#[test]
fn recovered_error_points_at_the_first_skipped_token() {
    let source = "#pragma acc parallel copyin(a) @ async(1)";
    let ast = Ast::parse_pragma(source).unwrap();
    let error = &ast.errors()[0];
    let token = error.token.as_ref().unwrap();
    assert_eq!(token.text, "@");
    assert_eq!(token.offset, source.find('@').unwrap());
}

#[test]
fn token_run_preserves_the_skipped_text() {
    let source = "#pragma acc loop deviceptr(p) seq";
    let ast = Ast::parse_pragma(source).unwrap();

    let run = find_first(&ast, ast.root(), NodeKind::TokenRun).unwrap();
    match ast.node(run) {
        NodeData::TokenRun(run) => {
            let texts: Vec<&str> = run.tokens.iter().map(|t| t.text.as_str()).collect();
            assert_eq!(texts, vec!["deviceptr", "(", "p", ")"]);
        }
        _ => unreachable!(),
    }
    assert_eq!(render(&ast), source);
}

#[test]
fn failures_outside_clause_lists_still_propagate() {
    // No directive keyword at all: nothing to recover into.
    assert!(Ast::parse_pragma("#pragma acc").is_err());
    // Wrong second keyword for the two-word directives.
    assert!(Ast::parse_pragma("#pragma acc enter copyin(a)").is_err());
}
