use super::{error::RollError, pipeline, roller::Roller, tree::*, RResult};
use crate::common::*;
use crate::options::Options;
use crate::parse::ast::{Expression, Term};

pub type DefaultRoller = rand::prelude::ThreadRng;

/// Evaluates parsed expressions with one roller.
///
/// The roll budget, when set, counts every die drawn during one
/// [`eval`](Self::eval), explosions and advantage samples included.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    pub fn roller(&self) -> &R {
        &self.roller
    }

    pub fn into_roller(self) -> R {
        self.roller
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls += n;
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    pub fn roll_one(&mut self, sides: UInt) -> RResult<UInt> {
        self.count_rolls(1)?;
        Ok(self.roller.roll(sides))
    }

    pub fn roll_n(&mut self, num: usize, sides: UInt) -> RResult<Vec<UInt>> {
        self.count_rolls(num)?;
        Ok((0..num).map(|_| self.roller.roll(sides)).collect())
    }

    pub fn eval(&mut self, expr: &Expression, options: &Options) -> RResult<Roll> {
        self.rolls = 0;
        log::debug!("evaluating {} term(s)", expr.terms.len());

        let terms = expr.terms.try_mapped_ref(|term| match *term {
            Term::Dice(dice) => pipeline::roll_dice(self, dice, options).map(TermRoll::from),
            Term::Flat(flat) => Ok(TermRoll::from(flat)),
        })?;

        let roll = Roll::new(terms);
        log::debug!("total {} after {} roll(s)", roll.total(), self.rolls);
        Ok(roll)
    }

    /// Parses `s` and evaluates it.
    pub fn roll_str(&mut self, s: &str, options: &Options) -> crate::Result<Roll> {
        let expr = crate::parse::parse(s)?;
        Ok(self.eval(&expr, options)?)
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new_unbounded(rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Explode;
    use crate::roll::roller::ScriptedRoller;

    fn check(s: &str, options: &Options, script: &[UInt], expected: Int) {
        let mut ctx = RollContext::new_unbounded(ScriptedRoller::new(script.iter().copied()));
        let actual = ctx.roll_str(s, options).unwrap();
        assert_eq!(actual.total(), expected);
        assert_eq!(ctx.roller().remaining(), 0);
    }

    #[test]
    fn test_eval_flat() {
        check("2", &Options::new(), &[], 2);
        check("-2", &Options::new(), &[], -2);
        check("2 + 3 - 10", &Options::new(), &[], -5);
    }

    #[test]
    fn test_eval_dice() {
        check("1d20 + 4", &Options::new(), &[10], 14);
        check("2d4 - d6", &Options::new(), &[2, 3, 6], -1);
        check("-4d6dl1", &Options::new(), &[3, 5, 1, 3], -11);
    }

    #[test]
    fn test_eval_options_apply_to_every_dice_term() {
        let options = Options::new().drop_lowest(1);
        check("2d6 + 2d8 + 1", &options, &[1, 6, 3, 8], 6 + 8 + 1);
    }

    #[test]
    fn test_budget() {
        let mut ctx = RollContext::new_bounded(3, ScriptedRoller::new([1, 2, 3]));
        assert_eq!(ctx.roll_str("3d6", &Options::new()).unwrap().total(), 6);

        let mut ctx = RollContext::new_bounded(3, ScriptedRoller::new([1, 2, 3, 4]));
        assert_eq!(
            ctx.roll_str("2d6+2d6", &Options::new()).unwrap_err(),
            crate::Error::Roll(RollError::TooManyRolls)
        );
    }

    #[test]
    fn test_budget_stops_unbounded_explosions() {
        let options = Options::new().explode(Explode::at(1));
        let mut ctx = RollContext::new_bounded(50, rand::thread_rng());
        assert_eq!(
            ctx.roll_str("1d6", &options).unwrap_err(),
            crate::Error::Roll(RollError::TooManyRolls)
        );
    }

    #[test]
    fn test_budget_resets_per_eval() {
        let mut ctx = RollContext::new_bounded(2, ScriptedRoller::new([1, 2, 3, 4]));
        assert!(ctx.roll_str("2d6", &Options::new()).is_ok());
        assert!(ctx.roll_str("2d6", &Options::new()).is_ok());
    }

    #[test]
    fn test_parse_errors_roll_nothing() {
        let mut ctx = RollContext::new_unbounded(ScriptedRoller::new([]));
        assert!(ctx.roll_str("2d6 + 2x", &Options::new()).is_err());
    }
}
