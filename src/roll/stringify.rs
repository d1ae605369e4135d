use super::tree::{DiceRoll, Eval, Roll, TermRoll};
use crate::common::UInt;
use crate::parse::ast::FlatTerm;

/// Renders a [`Roll`]. Each method handles one level of the result and has a
/// default that produces the plain breakdown; renderers override the pieces
/// they style differently.
pub trait Stringify {
    fn str_roll(&mut self, roll: &Roll) -> String {
        format!("{} = {}", self.parts(roll).join(" "), roll.total())
    }

    fn parts(&mut self, roll: &Roll) -> Vec<String> {
        roll.terms.iter().map(|t| self.str_term(t)).collect()
    }

    fn str_term(&mut self, term: &TermRoll) -> String {
        match term {
            TermRoll::Dice(dice) => self.str_dice(dice),
            TermRoll::Flat(flat) => self.str_flat(flat),
        }
    }

    fn str_flat(&mut self, flat: &FlatTerm) -> String {
        flat.to_string()
    }

    fn str_dice(&mut self, dice: &DiceRoll) -> String {
        let mut head = dice.term.to_string();
        for modifier in &dice.modifiers {
            head.push(' ');
            head.push_str(&modifier.to_string());
        }

        let values = dice
            .annotated()
            .into_iter()
            .map(|(v, kept)| self.str_value(v, kept))
            .collect::<Vec<_>>()
            .join(self.value_separator());
        format!("{} [{}]={}", head, values, dice.number())
    }

    fn str_value(&mut self, value: UInt, kept: bool) -> String {
        if kept {
            value.to_string()
        } else {
            format!("({})", value)
        }
    }

    fn value_separator(&self) -> &'static str {
        ","
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify(&mut self, roll: &Roll) -> String {
        Stringify::str_roll(self, roll)
    }
}

impl Stringify for SimpleStringifier {}

/// Chat-friendly output: dropped values are struck through and the total is
/// set in code.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify(&mut self, roll: &Roll) -> String {
        Stringify::str_roll(self, roll)
    }
}

impl Stringify for MarkdownStringifier {
    fn str_roll(&mut self, roll: &Roll) -> String {
        format!("{} = `{}`", self.parts(roll).join(" "), roll.total())
    }

    fn str_value(&mut self, value: UInt, kept: bool) -> String {
        if kept {
            value.to_string()
        } else {
            format!("~~{}~~", value)
        }
    }

    fn value_separator(&self) -> &'static str {
        ", "
    }
}
