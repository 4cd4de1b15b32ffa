//! Property-based tests for the pragma parser
//!
//! Two properties over generated input: well-formed pragmas round-trip
//! byte-for-byte, and arbitrary trailing garbage never panics the parser;
//! when recovery produces a tree, that tree still renders losslessly.

use acctree::acc::ast::render::render;
use acctree::acc::ast::Ast;
use proptest::prelude::*;

/// Identifiers that cannot collide with `sizeof` or a directive keyword.
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[ab][a-z0-9_]{0,5}"
}

proptest! {
    #[test]
    fn test_data_pragma_roundtrips(names in prop::collection::vec(identifier_strategy(), 1..5)) {
        let source = format!("#pragma acc data copyin({})", names.join(", "));
        let ast = Ast::parse_pragma(&source).unwrap();
        prop_assert!(ast.errors().is_empty());
        prop_assert_eq!(render(&ast), source);
    }

    #[test]
    fn test_subarray_bounds_roundtrip(
        name in identifier_strategy(),
        lower in 0u32..1000,
        count in 1u32..1000,
    ) {
        let source = format!("#pragma acc enter data create({}[{}:{}])", name, lower, count);
        let ast = Ast::parse_pragma(&source).unwrap();
        prop_assert!(ast.errors().is_empty());
        prop_assert_eq!(render(&ast), source);
    }

    #[test]
    fn test_wait_expressions_roundtrip(values in prop::collection::vec(0u32..100, 1..4)) {
        let args: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        let source = format!("#pragma acc wait({})", args.join(", "));
        let ast = Ast::parse_pragma(&source).unwrap();
        prop_assert!(ast.errors().is_empty());
        prop_assert_eq!(render(&ast), source);
    }

    #[test]
    fn test_recovery_never_panics_and_stays_lossless(garbage in "[a-z0-9(),:+*\\[\\] ]{0,40}") {
        let source = format!("#pragma acc parallel {}", garbage);
        // Top-level failures are allowed; a recovered tree must be lossless.
        if let Ok(ast) = Ast::parse_pragma(&source) {
            prop_assert_eq!(render(&ast), source);
        }
    }
}
