//! The per-term modifier pipeline.
//!
//! Stages run in a fixed order: initial roll (with advantage or
//! disadvantage), reroll, explosion, inline drop-lowest, global drop-lowest,
//! global drop-highest. Each stage sees the output of the one before it, so
//! the order decides which values can be dropped.

use super::tree::{AdvType, DiceRoll, DropSet, Modifier};
use super::{roller::Roller, RResult, RollContext};
use crate::common::*;
use crate::options::{Explode, Options, Reroll, Selection};
use crate::parse::ast::DiceTerm;

pub(crate) fn roll_dice<R: Roller>(
    ctx: &mut RollContext<R>,
    term: DiceTerm,
    options: &Options,
) -> RResult<DiceRoll> {
    let (mut values, selected) = initial_roll(ctx, &term, options)?;
    let rerolled = match options.reroll {
        Some(reroll) => self::reroll(ctx, &term, &mut values, reroll)?,
        None => 0,
    };
    let exploded = match options.explode {
        Some(explode) => self::explode(ctx, &term, &mut values, explode)?,
        None => 0,
    };

    let mut dropped = DropSet::new();
    drop_lowest(&values, &mut dropped, term.inline_drop as usize);
    let global_lowest = options.drop_lowest.unwrap_or(0);
    drop_lowest(&values, &mut dropped, global_lowest);
    let global_highest = options.drop_highest.unwrap_or(0);
    drop_highest(&values, &mut dropped, global_highest);

    let mut modifiers = Vec::new();
    if global_lowest > 0 {
        modifiers.push(Modifier::DropLowest(global_lowest));
    }
    if global_highest > 0 {
        modifiers.push(Modifier::DropHighest(global_highest));
    }
    if let Some(Reroll { lte }) = options.reroll.filter(|_| rerolled > 0) {
        modifiers.push(Modifier::Reroll {
            lte,
            count: rerolled,
        });
    }
    if let Some(Explode { threshold, .. }) = options.explode.filter(|_| exploded > 0) {
        modifiers.push(Modifier::Explode {
            threshold,
            count: exploded,
        });
    }
    if let Some(adv) = selected {
        modifiers.push(Modifier::Selected(adv));
    }

    log::debug!("rolled {}: {:?}, dropped {:?}", term, values, dropped);
    Ok(DiceRoll {
        term,
        values,
        dropped,
        modifiers,
    })
}

/// Picks advantage (checked first) or disadvantage when either targets
/// this term.
fn selection(term: &DiceTerm, options: &Options) -> Option<(AdvType, Selection)> {
    let adv = options
        .advantage
        .filter(|sel| sel.applies_to(term.num, term.sides))
        .map(|sel| (AdvType::Adv, sel));
    adv.or_else(|| {
        options
            .disadvantage
            .filter(|sel| sel.applies_to(term.num, term.sides))
            .map(|sel| (AdvType::Dis, sel))
    })
}

fn initial_roll<R: Roller>(
    ctx: &mut RollContext<R>,
    term: &DiceTerm,
    options: &Options,
) -> RResult<(NonEmpty<UInt>, Option<AdvType>)> {
    if let Some((adv, sel)) = selection(term, options) {
        let first = ctx.roll_one(term.sides)?;
        let rest = ctx.roll_n(sel.times - 1, term.sides)?;
        let chosen = rest.iter().copied().fold(first, |a, b| match adv {
            AdvType::Adv => a.max(b),
            AdvType::Dis => a.min(b),
        });
        log::trace!("{:?} on {}: {} {:?} -> {}", adv, term, first, rest, chosen);
        return Ok((vec1![chosen], Some(adv)));
    }

    let first = ctx.roll_one(term.sides)?;
    let mut values = vec1![first];
    for x in ctx.roll_n(term.num as usize - 1, term.sides)? {
        values.push(x);
    }
    Ok((values, None))
}

/// Rerolls each value at or below the threshold exactly once; the
/// replacement is never checked again.
fn reroll<R: Roller>(
    ctx: &mut RollContext<R>,
    term: &DiceTerm,
    values: &mut NonEmpty<UInt>,
    reroll: Reroll,
) -> RResult<usize> {
    let mut count = 0;
    for value in values.iter_mut() {
        if *value <= reroll.lte {
            *value = ctx.roll_one(term.sides)?;
            count += 1;
        }
    }
    log::trace!("rerolled {} value(s) at or below {}", count, reroll.lte);
    Ok(count)
}

/// Appends a chain of extra dice for every value meeting the trigger.
/// Chains stop at the first value that misses it, or after `cap` extra dice
/// when `cap > 0`.
fn explode<R: Roller>(
    ctx: &mut RollContext<R>,
    term: &DiceTerm,
    values: &mut NonEmpty<UInt>,
    explode: Explode,
) -> RResult<usize> {
    if explode.is_unbounded_hazard() {
        log::warn!(
            "{} explodes at {} with no cap; every die keeps exploding",
            term,
            explode.threshold
        );
    }

    let originals: Vec<UInt> = values.to_vec();
    let mut count = 0;
    for original in originals {
        let mut last = original;
        let mut chain = 0;
        while explode.threshold.is_met(last, term.sides) && (explode.cap == 0 || chain < explode.cap)
        {
            last = ctx.roll_one(term.sides)?;
            values.push(last);
            chain += 1;
        }
        count += chain;
    }
    log::trace!("{} exploded {} time(s)", term, count);
    Ok(count)
}

/// Drops the `n` lowest values still kept.
fn drop_lowest(values: &[UInt], dropped: &mut DropSet, n: usize) {
    if n == 0 {
        return;
    }
    let mut kept = dropped.kept(values);
    kept.sort_unstable();
    for v in kept.into_iter().take(n) {
        dropped.insert(v);
    }
}

/// Drops the `n` highest values still kept.
fn drop_highest(values: &[UInt], dropped: &mut DropSet, n: usize) {
    if n == 0 {
        return;
    }
    let mut kept = dropped.kept(values);
    kept.sort_unstable_by(|a, b| b.cmp(a));
    for v in kept.into_iter().take(n) {
        dropped.insert(v);
    }
}
