//! Currency totals derived from a roster and the user's toggle state.
//!
//! [`compute_totals`] is a pure function: it reads the roster and flag maps, never
//! fails, and gives the same answer for any ordering of the roster.

use serde::Serialize;

use crate::data::player::Brawler;

pub mod flags;
pub mod parse;

pub use flags::{Buffies, BuffyFlags, BuffyKind, HyperchargeFlags, UpgradeFlags};
pub use parse::parse_int;

pub const MAX_POWER_GOLD: i64 = 7765;
pub const MAX_POWER_POWER_POINTS: i64 = 3740;
pub const GADGET_GOLD: i64 = 1000;
pub const STAR_POWER_GOLD: i64 = 2000;
pub const GEAR_GOLD: i64 = 1000;
pub const HYPERCHARGE_GOLD: i64 = 5000;
pub const BUFFY_GOLD: i64 = 1000;
pub const BUFFY_POWER_POINTS: i64 = 2000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub gold: i64,
    pub power_points: i64,
}

impl Totals {
    fn add(&mut self, gold: i64, power_points: i64) {
        self.gold = self.gold.saturating_add(gold);
        self.power_points = self.power_points.saturating_add(power_points);
    }

    pub fn gold_display(&self) -> String {
        format_thousands(self.gold)
    }

    pub fn power_points_display(&self) -> String {
        format_thousands(self.power_points)
    }
}

/// Contribution of a single brawler, excluding the base inputs.
pub fn brawler_contribution(
    brawler: &Brawler,
    hypercharges: &HyperchargeFlags,
    buffies: &BuffyFlags,
) -> Totals {
    let mut totals = Totals::default();

    if brawler.is_max_power() {
        totals.add(MAX_POWER_GOLD, MAX_POWER_POWER_POINTS);
    }
    totals.add(count(brawler.gadgets.len()).saturating_mul(GADGET_GOLD), 0);
    totals.add(count(brawler.star_powers.len()).saturating_mul(STAR_POWER_GOLD), 0);
    totals.add(count(brawler.gears.len()).saturating_mul(GEAR_GOLD), 0);

    if hypercharges.is_set(brawler.id) {
        totals.add(HYPERCHARGE_GOLD, 0);
    }

    let buffy_count = i64::from(buffies.get(brawler.id).count());
    totals.add(buffy_count * BUFFY_GOLD, buffy_count * BUFFY_POWER_POINTS);

    totals
}

pub fn compute_totals(
    roster: &[Brawler],
    hypercharges: &HyperchargeFlags,
    buffies: &BuffyFlags,
    current_gold: &str,
    current_power_points: &str,
) -> Totals {
    let mut totals = Totals {
        gold: parse_int(current_gold),
        power_points: parse_int(current_power_points),
    };
    for brawler in roster {
        let contribution = brawler_contribution(brawler, hypercharges, buffies);
        totals.add(contribution.gold, contribution.power_points);
    }
    totals
}

fn count(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}

/// Comma-grouped decimal, sign preserved: `-1234567` -> `-1,234,567`.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
