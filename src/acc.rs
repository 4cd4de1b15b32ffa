//! OpenACC pragma parsing and tree manipulation
//!
//! Pipeline: [`lexer`] turns pragma text into a lossless token stream,
//! [`parser`] builds the directive tree, [`ast`] holds the node model, the
//! mutation API, traversal, and rendering.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Ast, MutationError};
pub use parser::SyntaxError;
