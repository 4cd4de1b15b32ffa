//! Lexical tokens for OpenACC pragmas
//!
//! Token kinds are produced by the logos lexer in [`crate::acc::lexer`].
//! A [`Token`] carries, besides its kind and text, the verbatim inter-token
//! text (`leading`) that preceded it in the source, so that concatenating
//! every token reachable from a tree reproduces the input byte-for-byte.

use logos::Logos;

/// Token kinds recognized inside an OpenACC pragma.
///
/// `#pragma acc` is a single terminal, matching the grammar's `pragmaAcc`
/// token. Directive and clause keywords are not reserved here; they lex as
/// `Identifier` and are recognized by the parser, which keeps expression
/// parsing free of keyword conflicts (an identifier named `copy` is legal
/// inside an expression).
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\\]+")]
pub enum TokenKind {
    #[regex(r"#[ \t]*pragma[ \t]+acc")]
    PragmaAcc,

    #[token("sizeof")]
    Sizeof,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,

    #[regex(r"[0-9]+[uUlL]*")]
    #[regex(r"0[xX][0-9a-fA-F]+[uUlL]*")]
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?[fFlL]?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    StringLiteral,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,

    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("~")]
    Tilde,
    #[token("!")]
    Bang,

    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    /// Any character the lexer does not otherwise recognize. Kept as a
    /// token (never dropped) so error recovery stays lossless.
    #[regex(r"[^ \t\r\n\\]", priority = 0)]
    Unknown,
}

/// One lexical unit of a pragma, with enough context to reproduce the
/// source text exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Verbatim text (whitespace, line continuations) between the previous
    /// token and this one.
    pub leading: String,
    /// The token's own text.
    pub text: String,
    /// Verbatim text after this token; empty except on the last token of a
    /// stream, which absorbs trailing whitespace.
    pub trailing: String,
    /// Byte offset of `text` in the original source.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, leading: &str, text: &str, offset: usize) -> Token {
        Token {
            kind,
            leading: leading.to_string(),
            text: text.to_string(),
            trailing: String::new(),
            offset,
        }
    }

    /// A token fabricated during mutation (e.g. a separator comma); it has no
    /// source offset of its own.
    pub fn synthetic(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            leading: String::new(),
            text: text.to_string(),
            trailing: String::new(),
            offset: 0,
        }
    }

    /// Append the token's full textual extent (leading + text + trailing).
    pub fn render_into(&self, out: &mut String) {
        out.push_str(&self.leading);
        out.push_str(&self.text);
        out.push_str(&self.trailing);
    }
}
