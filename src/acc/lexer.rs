//! Tokenization of pragma text
//!
//! The raw tokenization is handled entirely by logos. On top of it, this
//! module recovers the text logos skipped (whitespace, line continuations)
//! from the gaps between token spans and attaches it to the following token,
//! so that the token stream as a whole preserves every byte of the input.

use crate::acc::token::{Token, TokenKind};
use logos::Logos;

/// Tokenize pragma source text.
///
/// Unrecognized characters become `TokenKind::Unknown` tokens instead of
/// failing, so malformed input still produces a stream the parser can
/// recover over. Trailing whitespace is attached to the last token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens: Vec<Token> = Vec::new();
    let mut prev_end = 0usize;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => TokenKind::Unknown,
        };
        tokens.push(Token::new(
            kind,
            &source[prev_end..span.start],
            &source[span.start..span.end],
            span.start,
        ));
        prev_end = span.end;
    }

    if prev_end < source.len() {
        if let Some(last) = tokens.last_mut() {
            last.trailing.push_str(&source[prev_end..]);
        }
    }

    tokens
}

/// Concatenate a token slice back into source text.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.render_into(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pragma_acc_is_one_token() {
        let tokens = tokenize("#pragma acc parallel");
        assert_eq!(tokens[0].kind, TokenKind::PragmaAcc);
        assert_eq!(tokens[0].text, "#pragma acc");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "parallel");
        assert_eq!(tokens[1].leading, " ");
    }

    #[test]
    fn test_lossless_with_odd_spacing() {
        let source = "#pragma acc   copyin( a ,b[0 : n] )  \n";
        assert_eq!(render_tokens(&tokenize(source)), source);
    }

    #[test]
    fn test_unknown_characters_are_kept() {
        let source = "#pragma acc parallel @@";
        let tokens = tokenize(source);
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Unknown));
        assert_eq!(render_tokens(&tokens), source);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_operator_maximal_munch() {
        let tokens = tokenize("#pragma acc wait(x<<2)");
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert!(kinds.contains(&TokenKind::Shl));
        assert!(!kinds.contains(&TokenKind::Lt));
    }
}
