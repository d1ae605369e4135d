//! Evaluation options applied to every dice term of an expression.

use crate::common::UInt;
use crate::roll::RollError;
use std::fmt;
use std::str::FromStr;

/// Modifiers applied to every dice term of one evaluation.
///
/// Every field is optional and absence means "no effect". Built with the
/// chaining setters:
///
/// ```
/// use dice_tally::{Explode, Options};
///
/// let options = Options::new().drop_lowest(1).explode(Explode::max().cap(3));
/// assert_eq!(options.drop_lowest, Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Extra lowest values dropped after the inline `dl` suffix.
    pub drop_lowest: Option<usize>,
    /// Highest values dropped after both lowest-drop stages.
    pub drop_highest: Option<usize>,
    pub reroll: Option<Reroll>,
    pub explode: Option<Explode>,
    pub advantage: Option<Selection>,
    pub disadvantage: Option<Selection>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drop_lowest(mut self, count: usize) -> Self {
        self.drop_lowest = Some(count);
        self
    }

    pub fn drop_highest(mut self, count: usize) -> Self {
        self.drop_highest = Some(count);
        self
    }

    pub fn reroll(mut self, lte: UInt) -> Self {
        self.reroll = Some(Reroll { lte });
        self
    }

    pub fn explode(mut self, explode: Explode) -> Self {
        self.explode = Some(explode);
        self
    }

    pub fn advantage(mut self, sides: UInt, times: usize) -> Self {
        self.advantage = Some(Selection { sides, times });
        self
    }

    pub fn disadvantage(mut self, sides: UInt, times: usize) -> Self {
        self.disadvantage = Some(Selection { sides, times });
        self
    }

    /// Checks the values a caller can get wrong.
    ///
    /// The roll pipeline does not depend on this: it simply ignores an
    /// advantage or disadvantage with fewer than two samples.
    ///
    /// # Errors
    /// Returns [`RollError::InvalidOption`] for an advantage or disadvantage
    /// with `times < 2` or `sides < 2`, and for an explosion threshold of 0.
    pub fn validate(&self) -> Result<(), RollError> {
        for (name, sel) in [("advantage", self.advantage), ("disadvantage", self.disadvantage)] {
            if let Some(sel) = sel {
                if sel.times < 2 {
                    return Err(RollError::invalid_option(format!(
                        "{} needs at least 2 rolls, got {}",
                        name, sel.times
                    )));
                }
                if sel.sides < 2 {
                    return Err(RollError::invalid_option(format!(
                        "{} targets a d{}, which cannot be rolled",
                        name, sel.sides
                    )));
                }
            }
        }

        if let Some(explode) = self.explode {
            if explode.threshold == Threshold::Value(0) {
                return Err(RollError::invalid_option(
                    "explosion threshold must be at least 1",
                ));
            }
            if explode.is_unbounded_hazard() {
                log::warn!(
                    "explosion at {} with no cap re-rolls every die forever",
                    explode.threshold
                );
            }
        }

        Ok(())
    }
}

/// Reroll, once, every value at or below `lte`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Reroll {
    pub lte: UInt,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Explode {
    pub threshold: Threshold,
    /// Longest chain of extra dice per original die; 0 means unbounded.
    pub cap: usize,
}

impl Explode {
    pub fn max() -> Self {
        Self::new(Threshold::Max)
    }

    pub fn at(value: UInt) -> Self {
        Self::new(Threshold::Value(value))
    }

    pub fn new(threshold: Threshold) -> Self {
        Self { threshold, cap: 0 }
    }

    pub fn cap(mut self, cap: usize) -> Self {
        self.cap = cap;
        self
    }

    /// Every roll meets a threshold of 1, so an uncapped chain never ends.
    pub(crate) fn is_unbounded_hazard(&self) -> bool {
        self.cap == 0 && matches!(self.threshold, Threshold::Value(x) if x <= 1)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Threshold {
    /// The die's highest face.
    Max,
    Value(UInt),
}

impl Threshold {
    pub fn is_met(self, value: UInt, sides: UInt) -> bool {
        match self {
            Self::Max => value >= sides,
            Self::Value(x) => value >= x,
        }
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max => f.write_str("max"),
            Self::Value(x) => fmt::Display::fmt(x, f),
        }
    }
}

impl FromStr for Threshold {
    type Err = ParseThresholdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("max") {
            Ok(Self::Max)
        } else {
            s.parse()
                .map(Self::Value)
                .map_err(|_| ParseThresholdError(s.to_string()))
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[error("expected 'max' or a number, found {0:?}")]
pub struct ParseThresholdError(String);

/// Advantage or disadvantage on single dice with `sides` faces.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Selection {
    pub sides: UInt,
    pub times: usize,
}

impl Selection {
    pub(crate) fn applies_to(&self, num: UInt, sides: UInt) -> bool {
        num == 1 && sides == self.sides && self.times >= 2
    }
}
