//! Inbound actions.
//!
//! Every externally triggered change to a match is one `Action` applied by
//! one participant. Actions are plain data: they serialize into the action
//! history and replay identically.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use crate::runes::RuneColor;

/// Pool a draft takes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftSource {
    /// Index into the match's forge list.
    Forge(usize),
    Center,
}

/// Take every rune of `color` from `source`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DraftAction {
    pub source: DraftSource,
    pub color: RuneColor,
}

impl DraftAction {
    #[must_use]
    pub const fn forge(index: usize, color: RuneColor) -> Self {
        Self {
            source: DraftSource::Forge(index),
            color,
        }
    }

    #[must_use]
    pub const fn center(color: RuneColor) -> Self {
        Self {
            source: DraftSource::Center,
            color,
        }
    }
}

/// Where a held selection goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementTarget {
    /// Staging line by 1-based index.
    Line(usize),
    /// Straight into the penalty area.
    Penalty,
}

/// Resolution of a pending targeted effect against the opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetAction {
    /// Remove the most recently staged rune of the opponent's line.
    Destroy { line: usize },
    /// Lock the opponent's line for the rest of the round.
    Freeze { line: usize },
    Skip,
}

/// A complete inbound action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Draft(DraftAction),
    Place(PlacementTarget),
    CancelSelection,
    ResolveTarget(TargetAction),
    /// Perform the current scoring phase's work and move on.
    AdvanceScoring,
    /// Leave `ScoringComplete` for the next round.
    StartNextRound,
    /// Continue a solo run after an encounter is cleared.
    StartNextEncounter,
}

impl Action {
    /// True for actions only the acting participant may take.
    #[must_use]
    pub const fn is_turn_bound(&self) -> bool {
        matches!(
            self,
            Action::Draft(_) | Action::Place(_) | Action::CancelSelection | Action::ResolveTarget(_)
        )
    }
}

impl From<DraftAction> for Action {
    fn from(draft: DraftAction) -> Self {
        Action::Draft(draft)
    }
}

impl From<PlacementTarget> for Action {
    fn from(target: PlacementTarget) -> Self {
        Action::Place(target)
    }
}

impl From<TargetAction> for Action {
    fn from(target: TargetAction) -> Self {
        Action::ResolveTarget(target)
    }
}

/// An applied action with its position in the match.
///
/// Used for replay and debugging.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The participant who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Round number when the action was taken.
    pub round: u32,

    /// Position in the whole match history.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, round: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            round,
            sequence,
        }
    }
}
