pub mod ast;
mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::tokenize;
pub use parser::{parse_term, TermRule, TERM_RULES};

/// Tokenizes `s`, checks the sign/term sequence and parses every term.
pub fn parse(s: &str) -> Result<ast::Expression, ParseError> {
    parser::Parser::new(s).parse()
}
