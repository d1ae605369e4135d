use crate::common::*;
use std::fmt;
use std::ops::Range;

/// One segment of a raw expression, as produced by [`tokenize`](super::tokenize).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Token {
    pub kind: Lexeme,
    pub span: Range<usize>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Lexeme {
    Sign(Sign),
    /// Term text with whitespace removed; never empty.
    Body(String),
}

impl Token {
    pub(crate) fn sign(sign: Sign, span: Range<usize>) -> Self {
        Self {
            kind: Lexeme::Sign(sign),
            span,
        }
    }

    pub(crate) fn body(body: impl Into<String>, span: Range<usize>) -> Self {
        Self {
            kind: Lexeme::Body(body.into()),
            span,
        }
    }

    pub fn is_sign(&self) -> bool {
        matches!(self.kind, Lexeme::Sign(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub terms: NonEmpty<Term>,
}

impl Expression {
    pub(crate) fn new(terms: NonEmpty<Term>) -> Self {
        Self { terms }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Term {
    Dice(DiceTerm),
    Flat(FlatTerm),
}

impl Term {
    pub fn sign(&self) -> Sign {
        match self {
            Self::Dice(d) => d.sign,
            Self::Flat(f) => f.sign,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice(d) => fmt::Display::fmt(d, f),
            Self::Flat(x) => fmt::Display::fmt(x, f),
        }
    }
}

/// `NdM`, optionally with an inline drop-lowest suffix (`NdMdlK`).
///
/// Always satisfies `num >= 1`, `sides >= 2` and `inline_drop < num`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceTerm {
    pub sign: Sign,
    pub num: UInt,
    pub sides: UInt,
    pub inline_drop: UInt,
}

impl DiceTerm {
    pub fn new(sign: Sign, num: UInt, sides: UInt) -> Self {
        Self {
            sign,
            num,
            sides,
            inline_drop: 0,
        }
    }

    pub fn with_inline_drop(mut self, inline_drop: UInt) -> Self {
        self.inline_drop = inline_drop;
        self
    }
}

impl fmt::Display for DiceTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}d{}", self.sign, self.num, self.sides)?;
        if self.inline_drop > 0 {
            write!(f, "dl{}", self.inline_drop)?;
        }
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FlatTerm {
    pub sign: Sign,
    pub value: UInt,
}

impl FlatTerm {
    pub fn new(sign: Sign, value: UInt) -> Self {
        Self { sign, value }
    }
}

impl fmt::Display for FlatTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign, self.value)
    }
}
