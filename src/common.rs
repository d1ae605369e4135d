use std::fmt::{self, Write};
pub use vec1::vec1;

/// Signed totals and per-term sums.
pub type Int = i64;
/// Dice counts, die faces and rolled values.
pub type UInt = u32;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Sign {
    #[default]
    Pos,
    Neg,
}

impl Sign {
    pub fn apply(self, x: Int) -> Int {
        match self {
            Self::Pos => x,
            Self::Neg => -x,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Pos),
            '-' => Some(Self::Neg),
            _ => None,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::Pos => '+',
            Self::Neg => '-',
        };
        f.write_char(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(Sign::Pos.apply(4), 4);
        assert_eq!(Sign::Neg.apply(4), -4);
        assert_eq!(Sign::from_char('-'), Some(Sign::Neg));
        assert_eq!(Sign::from_char('d'), None);
        assert_eq!(Sign::default().to_string(), "+");
    }
}
