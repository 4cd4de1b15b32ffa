//! # acctree
//!
//! A strongly-typed, mutable, round-trippable syntax tree for OpenACC
//! directive pragmas.
//!
//! The tree keeps every source token, whitespace included, so re-rendering
//! an unmutated tree reproduces the input byte-for-byte and a mutation
//! changes only the bytes of the edited subtree. Refactoring tooling built
//! on top locates nodes with the typed query API, walks them with the
//! visitor protocol, and edits them with the type-checked mutation API.
//!
//! ```ignore
//! let mut ast = Ast::parse_pragma("#pragma acc parallel copyin(a)")?;
//! let clause = query::find_first(&ast, ast.root(), NodeKind::VarListClause).unwrap();
//! ast.replace_with_text(clause, "copyout(b[0:n])")?;
//! assert_eq!(render(&ast), "#pragma acc parallel copyout(b[0:n])");
//! ```

pub mod acc;
