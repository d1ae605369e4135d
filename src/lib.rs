//! Dice expressions such as `2d6 + 1d20 - 3` or `4d6dl1`, rolled through a
//! fixed modifier pipeline and reported as a total plus one formatted
//! breakdown per term.
//!
//! ```
//! use dice_tally::Options;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let (total, parts) =
//!     dice_tally::evaluate("2d6 + 3", &Options::new(), StdRng::seed_from_u64(7)).unwrap();
//! assert_eq!(parts.len(), 2);
//! assert!((5..=15).contains(&total));
//! ```

mod common;
mod error;
mod options;
pub mod parse;
pub mod roll;

#[cfg(test)]
mod test_strategies;

pub use common::{Int, Sign, UInt};
pub use error::{Error, Result};
pub use options::{Explode, Options, ParseThresholdError, Reroll, Selection, Threshold};
pub use roll::{
    MarkdownStringifier, Roll, RollContext, RollError, Roller, SimpleStringifier, Stringify,
};

/// Parses and rolls `expression`, returning the total and one formatted
/// string per term.
///
/// The first error aborts the evaluation; no partial total is produced.
pub fn evaluate<R: Roller>(
    expression: &str,
    options: &Options,
    roller: R,
) -> Result<(Int, Vec<String>)> {
    let roll = RollContext::new_unbounded(roller).roll_str(expression, options)?;
    Ok((roll.total(), roll.parts()))
}

/// Rolls `expression` with the thread-local RNG.
pub fn roll(expression: &str, options: &Options) -> Result<Roll> {
    RollContext::default().roll_str(expression, options)
}
