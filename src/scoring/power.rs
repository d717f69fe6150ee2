//! Effect resolution over segments.
//!
//! Each occupied cell contributes its primary amount. `Synergy` and
//! `Fragile` read the whole segment the cell sits in, and their bonus is
//! credited to the cell's primary category. The result is a pure function of
//! grid contents.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::segments::find_segments;
use crate::board::{Cell, Grid};
use crate::runes::{RuneColor, RuneEffect, Token};

/// Output category of a rune's primary effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    Damage,
    Healing,
    Armor,
    Fortune,
    Ward,
}

/// Power split by category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerBreakdown {
    pub damage: u32,
    pub healing: u32,
    pub armor: u32,
    pub fortune: u32,
    /// Overload mitigation, in percent.
    pub ward: u32,
}

impl PowerBreakdown {
    /// Scalar power: the sum over every category.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.damage + self.healing + self.armor + self.fortune + self.ward
    }

    pub fn add(&mut self, kind: PowerKind, amount: u32) {
        let slot = match kind {
            PowerKind::Damage => &mut self.damage,
            PowerKind::Healing => &mut self.healing,
            PowerKind::Armor => &mut self.armor,
            PowerKind::Fortune => &mut self.fortune,
            PowerKind::Ward => &mut self.ward,
        };
        *slot = slot.saturating_add(amount);
    }

    pub fn merge(&mut self, other: &PowerBreakdown) {
        self.damage = self.damage.saturating_add(other.damage);
        self.healing = self.healing.saturating_add(other.healing);
        self.armor = self.armor.saturating_add(other.armor);
        self.fortune = self.fortune.saturating_add(other.fortune);
        self.ward = self.ward.saturating_add(other.ward);
    }
}

/// One scored segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub cells: Vec<Cell>,
    pub power: PowerBreakdown,
}

impl Segment {
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Full scoring result for a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridScore {
    pub segments: Vec<Segment>,
    pub total: PowerBreakdown,
}

/// Resolve a single cell against its segment's color counts.
fn resolve_cell(token: &Token, counts: &FxHashMap<RuneColor, u32>, out: &mut PowerBreakdown) {
    let mut primary: Option<PowerKind> = None;
    let mut bonus = 0u32;

    for effect in &token.effects {
        let kind = match *effect {
            RuneEffect::Damage(amount) => Some((PowerKind::Damage, amount)),
            RuneEffect::Healing(amount) => Some((PowerKind::Healing, amount)),
            RuneEffect::Armor(amount) => Some((PowerKind::Armor, amount)),
            RuneEffect::Fortune(amount) => Some((PowerKind::Fortune, amount)),
            RuneEffect::Ward(amount) => Some((PowerKind::Ward, amount)),
            RuneEffect::Synergy { color, amount } => {
                let matching = counts.get(&color).copied().unwrap_or(0);
                bonus = bonus.saturating_add(amount.saturating_mul(matching));
                None
            }
            RuneEffect::Fragile { breaks, amount } => {
                if counts.get(&breaks).copied().unwrap_or(0) == 0 {
                    bonus = bonus.saturating_add(amount);
                }
                None
            }
            // Fires on staging, never on the grid.
            RuneEffect::Channel(_) => None,
        };

        if let Some((kind, amount)) = kind {
            out.add(kind, amount);
            primary.get_or_insert(kind);
        }
    }

    // Bonus-only runes have nothing to amplify but still hit.
    out.add(primary.unwrap_or(PowerKind::Damage), bonus);
}

/// Power of the segment made of `cells`.
#[must_use]
pub fn score_segment(grid: &Grid, cells: &[Cell]) -> PowerBreakdown {
    let tokens: Vec<&Token> = cells
        .iter()
        .filter_map(|&(row, col)| grid.get(row, col))
        .collect();

    let mut counts: FxHashMap<RuneColor, u32> = FxHashMap::default();
    for token in &tokens {
        *counts.entry(token.color).or_default() += 1;
    }

    let mut power = PowerBreakdown::default();
    for token in tokens {
        resolve_cell(token, &counts, &mut power);
    }
    power
}

/// Score every segment of `grid`.
///
/// ```
/// use rune_forge::board::Grid;
/// use rune_forge::scoring::score_grid;
///
/// assert_eq!(score_grid(&Grid::new(5)).total.total(), 0);
/// ```
#[must_use]
pub fn score_grid(grid: &Grid) -> GridScore {
    let mut score = GridScore::default();
    for cells in find_segments(grid) {
        let power = score_segment(grid, &cells);
        score.total.merge(&power);
        score.segments.push(Segment { cells, power });
    }
    score
}
