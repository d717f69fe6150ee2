//! Round phases.

use serde::{Deserialize, Serialize};

/// Where a match stands within its round.
///
/// ```text
/// Draft ──▶ Targeting ──▶ Draft
///   │
///   ▼
/// ScoringMovingToWall ▶ ScoringClearingFloor ▶ ScoringHealing ▶ ScoringDamage
///                                                                  │
///                                     Draft (next round) ◀ ScoringComplete
///                                                                  │
///                                                              GameOver
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Participants draft from pools and commit to staging lines.
    #[default]
    Draft,
    /// A channel rune was staged; its owner must resolve or skip it.
    Targeting,
    ScoringMovingToWall,
    ScoringClearingFloor,
    ScoringHealing,
    ScoringDamage,
    ScoringComplete,
    /// Terminal for the match. A cleared solo encounter can still continue
    /// the run from here.
    GameOver,
}

impl Phase {
    /// True for the phases driven by `AdvanceScoring`.
    #[must_use]
    pub const fn is_scoring(self) -> bool {
        matches!(
            self,
            Phase::ScoringMovingToWall
                | Phase::ScoringClearingFloor
                | Phase::ScoringHealing
                | Phase::ScoringDamage
                | Phase::ScoringComplete
        )
    }

    /// Phase that follows a scoring phase when nothing ends the match.
    #[must_use]
    pub const fn next_scoring(self) -> Option<Phase> {
        match self {
            Phase::ScoringMovingToWall => Some(Phase::ScoringClearingFloor),
            Phase::ScoringClearingFloor => Some(Phase::ScoringHealing),
            Phase::ScoringHealing => Some(Phase::ScoringDamage),
            Phase::ScoringDamage => Some(Phase::ScoringComplete),
            Phase::ScoringComplete => Some(Phase::Draft),
            Phase::Draft | Phase::Targeting | Phase::GameOver => None,
        }
    }
}
