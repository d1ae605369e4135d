use crate::common::UInt;
use rand::Rng;

/// Source of uniformly distributed dice values.
///
/// Implemented for every [`rand::Rng`], including `&mut R`, so callers can
/// lend a generator they keep using afterwards.
pub trait Roller {
    /// A value in `low..=high`.
    fn roll_range(&mut self, low: UInt, high: UInt) -> UInt;

    fn roll(&mut self, sides: UInt) -> UInt {
        self.roll_range(1, sides)
    }
}

impl<R: Rng> Roller for R {
    fn roll_range(&mut self, low: UInt, high: UInt) -> UInt {
        self.gen_range(low..=high)
    }
}

#[cfg(test)]
pub(crate) use scripted::{RecordingRoller, ScriptedRoller};
