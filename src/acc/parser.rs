//! Recursive-descent parser for OpenACC pragmas
//!
//! One production per directive keyword, clause-list productions
//! parameterized by directive context, and precedence-climbing expression
//! productions. The parser never drops a token: clause lists recover from
//! unexpected input by recording a [`SyntaxError`] and keeping the skipped
//! tokens in a token-run node, so the built tree always renders back to the
//! input byte-for-byte.
//!
//! Productions are split across submodules: [`directives`], [`clauses`],
//! and [`expressions`].

pub mod clauses;
pub mod directives;
pub mod expressions;

use crate::acc::ast::node::{NodeData, NodeId, TokenRun};
use crate::acc::ast::tree::Ast;
use crate::acc::lexer::tokenize;
use crate::acc::token::{Token, TokenKind};
use std::fmt;

/// A structured syntax error: the offending token (or end of input) and a
/// description of the terminals that would have been accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// The unexpected token; `None` at end of input.
    pub token: Option<Token>,
    /// Human-readable expected-terminal set.
    pub expected: Vec<String>,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected = self.expected.join(", ");
        match &self.token {
            Some(token) => write!(
                f,
                "syntax error at offset {}: unexpected `{}`; expected {}",
                token.offset, token.text, expected
            ),
            None => write!(
                f,
                "syntax error: unexpected end of input; expected {}",
                expected
            ),
        }
    }
}

impl std::error::Error for SyntaxError {}

/// The production to use when re-parsing literal text into a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentRule {
    Clause,
    Expression,
    Identifier,
    DataItem,
}

/// Parser state over one token stream. Nodes are allocated directly into
/// the target [`Ast`] arena as productions succeed.
pub(crate) struct Parser<'a> {
    ast: &'a mut Ast,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    /// Parse a whole pragma; the returned node is the directive construct.
    pub(crate) fn parse_pragma_into(ast: &mut Ast, text: &str) -> Result<NodeId, SyntaxError> {
        let tokens = tokenize(text);
        let mut parser = Parser { ast, tokens, pos: 0 };
        let root = parser.parse_directive()?;
        if !parser.at_end() {
            return Err(parser.unexpected(&["end of pragma"]));
        }
        Ok(root)
    }

    /// Parse an isolated fragment with the given production. The whole text
    /// must be consumed; trailing tokens are a syntax error.
    pub(crate) fn parse_fragment_into(
        ast: &mut Ast,
        text: &str,
        rule: FragmentRule,
    ) -> Result<NodeId, SyntaxError> {
        let tokens = tokenize(text);
        let mut parser = Parser { ast, tokens, pos: 0 };
        let node = match rule {
            FragmentRule::Clause => parser.parse_clause_fragment()?,
            FragmentRule::Expression => parser.parse_expression()?,
            FragmentRule::Identifier => parser.parse_identifier_node()?,
            FragmentRule::DataItem => parser.parse_data_item()?,
        };
        if !parser.at_end() {
            return Err(parser.unexpected(&["end of input"]));
        }
        Ok(node)
    }

    // ------------------------------------------------------------------
    // Token stream access
    // ------------------------------------------------------------------

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    pub(crate) fn peek_is_keyword(&self, word: &str) -> bool {
        matches!(
            self.peek(),
            Some(token) if token.kind == TokenKind::Identifier && token.text == word
        )
    }

    /// Consume the current token. Callers check via `peek` first; the
    /// stream position never points past the end when this runs.
    pub(crate) fn eat(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        self.pos += 1;
        token
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, SyntaxError> {
        match self.peek() {
            Some(token) if token.kind == kind => Ok(self.eat()),
            _ => Err(self.unexpected(&[expected])),
        }
    }

    pub(crate) fn expect_keyword(&mut self, word: &str) -> Result<Token, SyntaxError> {
        if self.peek_is_keyword(word) {
            Ok(self.eat())
        } else {
            Err(self.unexpected(&[word]))
        }
    }

    pub(crate) fn unexpected(&self, expected: &[&str]) -> SyntaxError {
        SyntaxError {
            token: self.peek().cloned(),
            expected: expected.iter().map(|s| s.to_string()).collect(),
        }
    }

    // ------------------------------------------------------------------
    // Node construction
    // ------------------------------------------------------------------

    /// Allocate a node and set the parent links of every child id already
    /// stored in its fields.
    pub(crate) fn emit(&mut self, data: NodeData) -> NodeId {
        let id = self.ast.alloc(data);
        self.ast.adopt_children(id);
        id
    }

    pub(crate) fn record_error(&mut self, error: SyntaxError) {
        self.ast.record_error(error);
    }

    /// Wrap skipped tokens into a token-run node, if any.
    pub(crate) fn make_token_run(&mut self, tokens: Vec<Token>) -> Option<NodeId> {
        if tokens.is_empty() {
            None
        } else {
            Some(self.emit(NodeData::TokenRun(TokenRun { tokens })))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_with_token() {
        let error = SyntaxError {
            token: Some(Token::new(TokenKind::Comma, "", ",", 21)),
            expected: vec!["clause".to_string(), "end of pragma".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "syntax error at offset 21: unexpected `,`; expected clause, end of pragma"
        );
    }

    #[test]
    fn test_syntax_error_display_at_end() {
        let error = SyntaxError {
            token: None,
            expected: vec!["identifier".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "syntax error: unexpected end of input; expected identifier"
        );
    }
}
