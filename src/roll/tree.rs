use super::stringify::{SimpleStringifier, Stringify};
use crate::common::*;
use crate::options::Threshold;
use crate::parse::ast::{DiceTerm, FlatTerm};
use std::collections::BTreeMap;
use std::fmt;

#[enum_dispatch::enum_dispatch]
pub trait Eval {
    fn sign(&self) -> Sign;

    /// Unsigned value of the term: the kept sum for dice, the constant otherwise.
    fn number(&self) -> Int;

    fn total(&self) -> Int {
        self.sign().apply(self.number())
    }
}

/// The evaluated form of a whole expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Roll {
    pub terms: NonEmpty<TermRoll>,
}

impl Roll {
    pub(crate) fn new(terms: NonEmpty<TermRoll>) -> Self {
        Self { terms }
    }

    pub fn total(&self) -> Int {
        self.terms.iter().map(Eval::total).sum()
    }

    /// One formatted string per term, in source order.
    pub fn parts(&self) -> Vec<String> {
        SimpleStringifier::new().parts(self)
    }
}

impl fmt::Display for Roll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier::new().stringify(self))
    }
}

#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Eval)]
pub enum TermRoll {
    Dice(DiceRoll),
    Flat(FlatTerm),
}

impl Eval for FlatTerm {
    fn sign(&self) -> Sign {
        self.sign
    }

    fn number(&self) -> Int {
        self.value.into()
    }
}

/// A rolled dice term.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceRoll {
    pub term: DiceTerm,
    /// Every value in roll order, explosions included.
    pub values: NonEmpty<UInt>,
    pub dropped: DropSet,
    /// What was applied to this term, in display order.
    pub modifiers: Vec<Modifier>,
}

impl DiceRoll {
    /// Each value in roll order, paired with whether it was kept.
    ///
    /// Among equal values the earliest occurrences are the dropped ones.
    pub fn annotated(&self) -> Vec<(UInt, bool)> {
        let mut remaining = self.dropped.clone();
        self.values
            .iter()
            .map(|&v| (v, !remaining.take(v)))
            .collect()
    }

    pub fn kept(&self) -> Vec<UInt> {
        self.dropped.kept(&self.values)
    }
}

impl Eval for DiceRoll {
    fn sign(&self) -> Sign {
        self.term.sign
    }

    fn number(&self) -> Int {
        let all: Int = self.values.iter().map(|&v| Int::from(v)).sum();
        all - self.dropped.sum()
    }
}

/// Dropped values as a value → occurrences multiset.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct DropSet(BTreeMap<UInt, usize>);

impl DropSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, value: UInt) {
        *self.0.entry(value).or_insert(0) += 1;
    }

    pub fn count(&self, value: UInt) -> usize {
        self.0.get(&value).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum(&self) -> Int {
        self.0
            .iter()
            .map(|(&v, &n)| Int::from(v) * n as Int)
            .sum()
    }

    /// Removes one occurrence of `value`, returning whether there was one.
    fn take(&mut self, value: UInt) -> bool {
        match self.0.get_mut(&value) {
            Some(n) => {
                *n -= 1;
                if *n == 0 {
                    self.0.remove(&value);
                }
                true
            }
            None => false,
        }
    }

    /// The values of `rolls` this set does not account for.
    pub fn kept(&self, rolls: &[UInt]) -> Vec<UInt> {
        let mut remaining = self.clone();
        rolls.iter().copied().filter(|&v| !remaining.take(v)).collect()
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum AdvType {
    Adv,
    Dis,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Modifier {
    DropLowest(usize),
    DropHighest(usize),
    Reroll { lte: UInt, count: usize },
    Explode { threshold: Threshold, count: usize },
    Selected(AdvType),
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DropLowest(n) => write!(f, "DL{}", n),
            Self::DropHighest(n) => write!(f, "DH{}", n),
            Self::Reroll { lte, count } => write!(f, "rr<={} x{}", lte, count),
            Self::Explode { threshold, count } => write!(f, "explode@{} x{}", threshold, count),
            Self::Selected(_) => f.write_str("adv/dis"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dice_roll(values: NonEmpty<UInt>, dropped: &[UInt]) -> DiceRoll {
        let mut set = DropSet::new();
        for &v in dropped {
            set.insert(v);
        }
        DiceRoll {
            term: DiceTerm::new(Sign::Pos, values.len() as UInt, 6),
            values,
            dropped: set,
            modifiers: vec![],
        }
    }

    #[test]
    fn test_drop_set() {
        let mut set = DropSet::new();
        set.insert(3);
        set.insert(3);
        set.insert(5);
        assert_eq!(set.count(3), 2);
        assert_eq!(set.count(4), 0);
        assert_eq!(set.len(), 3);
        assert_eq!(set.sum(), 11);
        assert_eq!(set.kept(&[3, 5, 3, 3, 6]), vec![3, 6]);
    }

    #[test]
    fn test_annotated_duplicates() {
        let roll = dice_roll(vec1![3, 3, 5], &[3]);
        assert_eq!(roll.annotated(), vec![(3, false), (3, true), (5, true)]);
        assert_eq!(roll.kept(), vec![3, 5]);
        assert_eq!(roll.number(), 8);
    }

    #[test]
    fn test_term_totals() {
        let mut roll = dice_roll(vec1![4, 6], &[]);
        roll.term.sign = Sign::Neg;
        assert_eq!(roll.total(), -10);

        let flat = TermRoll::from(FlatTerm::new(Sign::Neg, 3));
        assert_eq!(flat.total(), -3);

        let roll = Roll::new(vec1![TermRoll::from(roll), flat]);
        assert_eq!(roll.total(), -13);
    }

    #[test]
    fn test_modifier_display() {
        assert_eq!(Modifier::DropLowest(1).to_string(), "DL1");
        assert_eq!(Modifier::DropHighest(2).to_string(), "DH2");
        assert_eq!(Modifier::Reroll { lte: 2, count: 1 }.to_string(), "rr<=2 x1");
        assert_eq!(
            Modifier::Explode {
                threshold: Threshold::Max,
                count: 3
            }
            .to_string(),
            "explode@max x3"
        );
        assert_eq!(Modifier::Selected(AdvType::Dis).to_string(), "adv/dis");
    }
}
