use super::ast::{Lexeme, Token};
use crate::common::Sign;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,

    #[regex(r"[^+\-\s]+")]
    Body,

    #[regex(r"\s+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_sign(&self) -> Option<Sign> {
        match self {
            Self::Plus => Some(Sign::Pos),
            Self::Minus => Some(Sign::Neg),
            _ => None,
        }
    }
}

/// Splits `s` into sign tokens and term bodies.
///
/// Whitespace separates nothing: the pieces of a body interrupted by spaces
/// are joined back together, so `"2 d 6"` is the single body `2d6`.
pub fn tokenize(s: &str) -> Vec<Token> {
    let mut lexer = lexer(s);
    let mut tokens: Vec<Token> = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        if let Some(sign) = kind.as_sign() {
            tokens.push(Token::sign(sign, span));
            continue;
        }

        // `Error` only covers input the body pattern rejects; keep it as term text
        // so the parser reports it with the rest of the term.
        let slice = lexer.slice();
        match tokens.last_mut() {
            Some(Token {
                kind: Lexeme::Body(body),
                span: last,
            }) => {
                body.push_str(slice);
                last.end = span.end;
            }
            _ => tokens.push(Token::body(slice, span)),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<Lexeme> {
        tokenize(s).into_iter().map(|t| t.kind).collect()
    }

    fn body(s: &str) -> Lexeme {
        Lexeme::Body(s.to_string())
    }

    #[test]
    fn test_tokenize_terms_and_signs() {
        assert_eq!(
            kinds("2d6+1d20-3"),
            vec![
                body("2d6"),
                Lexeme::Sign(Sign::Pos),
                body("1d20"),
                Lexeme::Sign(Sign::Neg),
                body("3"),
            ]
        );
        assert_eq!(kinds("-d%"), vec![Lexeme::Sign(Sign::Neg), body("d%")]);
    }

    #[test]
    fn test_tokenize_drops_whitespace() {
        assert_eq!(
            kinds("  4d6 dl1 +\t2 "),
            vec![body("4d6dl1"), Lexeme::Sign(Sign::Pos), body("2")]
        );
        assert_eq!(kinds(" \n "), vec![]);
        assert_eq!(kinds(""), vec![]);
    }

    #[test]
    fn test_tokenize_does_not_validate() {
        assert_eq!(
            kinds("++x"),
            vec![
                Lexeme::Sign(Sign::Pos),
                Lexeme::Sign(Sign::Pos),
                body("x"),
            ]
        );
        assert_eq!(kinds("1d6-"), vec![body("1d6"), Lexeme::Sign(Sign::Neg)]);
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("1 d6 + 2");
        assert_eq!(tokens[0].span, 0..4);
        assert_eq!(tokens[1].span, 5..6);
        assert_eq!(tokens[2].span, 7..8);
    }
}
