use crate::common::*;
use crate::options::{Explode, Options, Threshold};
use crate::parse::ast::DiceTerm;
use proptest::prelude::*;

pub(crate) fn sign_strategy() -> impl Strategy<Value = Sign> {
    prop_oneof![Just(Sign::Pos), Just(Sign::Neg)]
}

pub(crate) fn dice_term_strategy() -> impl Strategy<Value = DiceTerm> {
    (sign_strategy(), 1..=10u32, 2..=20u32).prop_flat_map(|(sign, num, sides)| {
        (0..num).prop_map(move |drop| DiceTerm::new(sign, num, sides).with_inline_drop(drop))
    })
}

/// Explosions are always capped so every generated configuration terminates.
pub(crate) fn explode_strategy() -> impl Strategy<Value = Explode> {
    let threshold = prop_oneof![Just(Threshold::Max), (1..=20u32).prop_map(Threshold::Value)];
    (threshold, 1..=4usize).prop_map(|(threshold, cap)| Explode::new(threshold).cap(cap))
}

pub(crate) fn options_strategy() -> impl Strategy<Value = Options> {
    (
        proptest::option::of(0..4usize),
        proptest::option::of(0..4usize),
        proptest::option::of(1..=6u32),
        proptest::option::of(explode_strategy()),
        proptest::option::of((2..=20u32, 2..=4usize)),
        proptest::option::of((2..=20u32, 2..=4usize)),
    )
        .prop_map(|(lowest, highest, reroll, explode, adv, dis)| {
            let mut options = Options::new();
            options.drop_lowest = lowest;
            options.drop_highest = highest;
            if let Some(lte) = reroll {
                options = options.reroll(lte);
            }
            options.explode = explode;
            if let Some((sides, times)) = adv {
                options = options.advantage(sides, times);
            }
            if let Some((sides, times)) = dis {
                options = options.disadvantage(sides, times);
            }
            options
        })
}

fn term_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0..1000u32).prop_map(|n| n.to_string()),
        (1..=10u32, 2..=100u32).prop_map(|(n, m)| format!("{}d{}", n, m)),
        (2..=100u32).prop_map(|m| format!("d{}", m)),
        (2..=10u32, 2..=20u32).prop_flat_map(|(n, m)| {
            (1..n).prop_map(move |k| format!("{}d{}dl{}", n, m, k))
        }),
        Just("d%".to_string()),
    ]
}

/// Well-formed expressions such as `2d6 - d% + 3`.
pub(crate) fn expression_strategy() -> impl Strategy<Value = String> {
    (
        sign_strategy(),
        proptest::bool::ANY,
        term_string_strategy(),
        proptest::collection::vec((sign_strategy(), term_string_strategy()), 0..4),
    )
        .prop_map(|(sign, explicit, first, rest)| {
            let mut s = String::new();
            if explicit || sign == Sign::Neg {
                s.push_str(&sign.to_string());
            }
            s.push_str(&first);
            for (sign, term) in rest {
                s.push_str(&format!(" {} {}", sign, term));
            }
            s
        })
}
