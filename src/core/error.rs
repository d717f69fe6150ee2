//! Error taxonomy for rule transitions.
//!
//! - `IllegalMove`: recoverable; the transition is rejected and the state is
//!   untouched.
//! - `InvariantViolation`: the state is corrupt; callers must stop mutating it.
//! - `MatchTerminal`: an action arrived after the match ended; no-op.
//!
//! The engine never retries. Retry policy belongs to callers.

use thiserror::Error;

use super::player::PlayerId;
use crate::round::Phase;
use crate::runes::{RuneColor, TokenId};

pub type Result<T, E = RuleError> = std::result::Result<T, E>;

/// Top-level error returned by every transition.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] IllegalMove),
    #[error("invariant violated: {0}")]
    InvariantViolation(#[from] InvariantViolation),
    #[error("match is over")]
    MatchTerminal,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("snapshot codec failed: {0}")]
    Snapshot(String),
}

impl RuleError {
    /// True for errors that leave the state usable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RuleError::InvariantViolation(_))
    }
}

/// Reasons an action is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalMove {
    #[error("{actor} acted but it is {expected}'s turn")]
    OutOfTurn { actor: PlayerId, expected: PlayerId },
    #[error("action not allowed in phase {0:?}")]
    WrongPhase(Phase),
    #[error("no forge with index {0}")]
    UnknownForge(usize),
    #[error("forge {forge} belongs to {owner}")]
    ForgeNotOwned { forge: usize, owner: PlayerId },
    #[error("no {0} rune in the chosen pool")]
    ColorAbsent(RuneColor),
    #[error("the center is locked while own forges hold runes")]
    CenterLocked,
    #[error("a drafted selection must be placed or cancelled first")]
    SelectionHeld,
    #[error("nothing is drafted")]
    NoSelection,
    #[error("staging line {0} does not exist")]
    LineOutOfRange(usize),
    #[error("staging line {0} is frozen")]
    LineFrozen(usize),
    #[error("staging line {0} is full")]
    LineFull(usize),
    #[error("staging line {line} already holds {held}")]
    LineColorMismatch { line: usize, held: RuneColor },
    #[error("{color} already occupies row {line} of the grid")]
    ColorOnGrid { line: usize, color: RuneColor },
    #[error("no targeted effect is pending")]
    NoPendingTarget,
    #[error("a targeted effect must be resolved first")]
    TargetPending,
    #[error("target does not match the pending effect or holds nothing to hit")]
    InvalidTarget,
    #[error("only available in a solo run")]
    NotSolo,
    #[error("the current encounter has not been cleared")]
    EncounterNotCleared,
}

/// Corrupted-state detections.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("token census {found} differs from the match total {expected}")]
    TokenCount { expected: usize, found: usize },
    #[error("{0} appears in more than one place")]
    DuplicateToken(TokenId),
    #[error("grid cell ({row}, {col}) of {owner} holds a rune of the wrong color")]
    MisplacedCell { owner: PlayerId, row: usize, col: usize },
    #[error("staging line {line} of {owner} exceeds its capacity")]
    LineOverCapacity { owner: PlayerId, line: usize },
    #[error("staging line {line} of {owner} mixes colors")]
    LineMixedColors { owner: PlayerId, line: usize },
    #[error("{owner} has health {health} above max {max}")]
    HealthAboveMax { owner: PlayerId, health: u32, max: u32 },
    #[error("{0} is alive with zero health")]
    ZeroHealthAlive(PlayerId),
    #[error("participant layout does not match the configured mode")]
    SeatMismatch,
    #[error("{0:?} reached without a round tally")]
    MissingTally(Phase),
    #[error("board of {owner} does not match a {size}x{size} layout")]
    BoardShape { owner: PlayerId, size: usize },
    #[error("pending target does not fit phase {0:?}")]
    PendingOutOfPlace(Phase),
    #[error("selection held outside its owner's draft turn")]
    StraySelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err: RuleError = IllegalMove::LineFull(3).into();
        assert_eq!(err.to_string(), "illegal move: staging line 3 is full");

        let err: RuleError = InvariantViolation::TokenCount { expected: 10, found: 9 }.into();
        assert!(err.to_string().contains("differs"));
    }

    #[test]
    fn test_recoverability() {
        assert!(RuleError::from(IllegalMove::NoSelection).is_recoverable());
        assert!(RuleError::MatchTerminal.is_recoverable());
        assert!(!RuleError::from(InvariantViolation::SeatMismatch).is_recoverable());
    }
}
