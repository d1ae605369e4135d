use crate::common::UInt;
use thiserror::Error;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    #[error("expression is empty")]
    EmptyExpression,
    #[error("expression ends with a sign")]
    TrailingSign,
    #[error("two signs in a row at token {position}")]
    ConsecutiveSigns { position: usize },
    #[error("term is empty")]
    EmptyTerm,
    #[error("{term:?}: must roll at least one die")]
    InvalidDiceCount { term: String },
    #[error("{term:?}: a die needs at least two sides")]
    InvalidSideCount { term: String },
    #[error("{term:?}: cannot drop {drop} of {num} dice; at least one must be kept")]
    InvalidDropCount { term: String, drop: UInt, num: UInt },
    #[error("{0:?}: unrecognized term")]
    UnrecognizedTerm(String),
    #[error("{0:?}: number is too large")]
    NumberTooLarge(String),
}
