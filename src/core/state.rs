//! Match state: the single authoritative value transitions consume and return.
//!
//! ## Design
//!
//! Every container is an `im` persistent structure, so cloning a whole
//! `MatchState` is O(1). Transitions clone, mutate the clone, validate it and
//! hand it back; on any error the caller still holds the untouched original.
//!
//! The whole struct is serde-serializable. A snapshot taken after any
//! transition resumes bit-for-bit, including the RNG stream position.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::error;

use super::action::{ActionRecord, DraftSource};
use super::config::{GameMode, MatchConfig};
use super::error::{InvariantViolation, Result, RuleError};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{Encounter, Participant};
use crate::pools::{CenterPool, Forge};
use crate::round::{Phase, Strain};
use crate::runes::{ChannelKind, RuneColor, Token};
use crate::scoring::PowerBreakdown;

// =============================================================================
// Round bookkeeping
// =============================================================================

/// Drafted runes not yet placed, with enough provenance to undo the draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub owner: PlayerId,
    pub color: RuneColor,
    pub tokens: Vector<Token>,
    pub source: DraftSource,
    /// Forge contents before the draft (empty for center drafts).
    pub forge_before: Vector<Token>,
    /// Center contents before the draft.
    pub center_before: Vector<Token>,
}

impl Selection {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// A targeted effect its owner must resolve before the turn passes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingTarget {
    pub owner: PlayerId,
    pub kind: ChannelKind,
}

/// Values captured at the wall move; later scoring phases read only these.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTally {
    /// Penalty-area size before it is cleared.
    pub penalty: usize,
    pub power: PowerBreakdown,
    /// Strain in effect for this round.
    pub strain: u32,
}

// =============================================================================
// Outcome
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EliminationCause {
    /// Health reached zero.
    Health,
    /// Supply could not fill the next round's forges.
    SupplyExhausted,
}

/// How a match (or a solo encounter) ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner {
        player: PlayerId,
        cause: EliminationCause,
    },
    Draw {
        cause: EliminationCause,
    },
    /// Solo: the encounter fell; the run may continue.
    EncounterCleared,
    /// Solo: the run is over.
    RunEnded {
        cause: EliminationCause,
    },
}

impl MatchOutcome {
    /// Check if a participant won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, MatchOutcome::Winner { player: p, .. } if *p == player)
    }

    /// True unless a solo run can continue from here.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !matches!(self, MatchOutcome::EncounterCleared)
    }
}

// =============================================================================
// Match state
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub config: MatchConfig,
    /// 1-based; resets with every solo encounter.
    pub round: u32,
    pub phase: Phase,
    /// Participant whose turn it is.
    pub active: PlayerId,
    /// Participant who opened the current round.
    pub starting: PlayerId,
    pub participants: PlayerMap<Participant>,
    /// Owner-major: each participant's forges are contiguous.
    pub forges: Vector<Forge>,
    pub center: CenterPool,
    pub selection: Option<Selection>,
    pub pending: Option<PendingTarget>,
    pub strain: Strain,
    /// Present from the wall move until the round completes.
    pub tally: Option<PlayerMap<RoundTally>>,
    /// Solo only.
    pub encounter: Option<Encounter>,
    pub outcome: Option<MatchOutcome>,
    /// Runes in the closed system, fixed at match start.
    pub token_total: usize,
    pub rng: GameRng,
    pub history: Vector<ActionRecord>,
}

impl MatchState {
    /// Start a match. See [`crate::round::start`].
    pub fn start(config: MatchConfig, seed: u64) -> Result<crate::round::Step> {
        crate::round::start(config, seed)
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn participant(&self, player: PlayerId) -> &Participant {
        &self.participants[player]
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Indices of the forges `owner` drafts from.
    pub fn forges_of(&self, owner: PlayerId) -> impl Iterator<Item = (usize, &Forge)> + '_ {
        self.forges
            .iter()
            .enumerate()
            .filter(move |(_, forge)| forge.owner == owner)
    }

    /// True when every forge and the center are empty.
    #[must_use]
    pub fn pools_empty(&self) -> bool {
        self.center.is_empty() && self.forges.iter().all(Forge::is_empty)
    }

    /// Every rune in the closed system, in a stable order.
    pub fn census(&self) -> impl Iterator<Item = &Token> + '_ {
        self.participants
            .iter()
            .flat_map(|(_, p)| p.tokens())
            .chain(self.forges.iter().flat_map(|f| f.tokens.iter()))
            .chain(self.center.tokens.iter())
            .chain(self.selection.iter().flat_map(|s| s.tokens.iter()))
    }

    /// Verify the structural invariants of the match.
    ///
    /// A violation means the state is corrupt; it is logged and returned,
    /// never repaired.
    pub fn check_invariants(&self) -> Result<()> {
        self.find_violation().map_or(Ok(()), |violation| {
            error!(%violation, round = self.round, phase = ?self.phase, "match state corrupt");
            Err(RuleError::InvariantViolation(violation))
        })
    }

    fn find_violation(&self) -> Option<InvariantViolation> {
        let solo = self.mode() == GameMode::Solo;
        if self.participants.len() != self.config.participant_count()
            || self.encounter.is_some() != solo
        {
            return Some(InvariantViolation::SeatMismatch);
        }
        if !self.participants.contains(self.active)
            || !self.participants.contains(self.starting)
            || self.forges.iter().any(|f| !self.participants.contains(f.owner))
        {
            return Some(InvariantViolation::SeatMismatch);
        }

        // Shape first: the census walks the grids.
        let size = self.config.board_size;
        let size_ok = (MatchConfig::MIN_BOARD..=RuneColor::MAX).contains(&size);
        for (owner, participant) in self.participants.iter() {
            let lines_ok = participant.lines.len() == size
                && participant
                    .lines
                    .iter()
                    .enumerate()
                    .all(|(i, line)| line.capacity == i + 1);
            if !size_ok || !lines_ok || participant.grid.size() != size || !participant.grid.is_well_formed() {
                return Some(InvariantViolation::BoardShape { owner, size });
            }
        }

        if let Some(violation) = self.find_turn_violation() {
            return Some(violation);
        }

        let mut seen = FxHashSet::default();
        let mut found = 0;
        for token in self.census() {
            if !seen.insert(token.id) {
                return Some(InvariantViolation::DuplicateToken(token.id));
            }
            found += 1;
        }
        if found != self.token_total {
            return Some(InvariantViolation::TokenCount {
                expected: self.token_total,
                found,
            });
        }

        for (owner, participant) in self.participants.iter() {
            for ((row, col), token) in participant.grid.occupied() {
                if participant.grid.color_at(row, col) != Some(token.color) {
                    return Some(InvariantViolation::MisplacedCell { owner, row, col });
                }
            }

            for (i, line) in participant.lines.iter().enumerate() {
                if line.count() > line.capacity {
                    return Some(InvariantViolation::LineOverCapacity { owner, line: i + 1 });
                }
                if line.tokens.iter().any(|t| Some(t.color) != line.color()) {
                    return Some(InvariantViolation::LineMixedColors { owner, line: i + 1 });
                }
            }

            if participant.health > participant.max_health {
                return Some(InvariantViolation::HealthAboveMax {
                    owner,
                    health: participant.health,
                    max: participant.max_health,
                });
            }
            if !participant.is_alive() && self.outcome.is_none() {
                return Some(InvariantViolation::ZeroHealthAlive(owner));
            }
        }

        None
    }

    /// Phase bookkeeping: pending targets, held selections and the tally.
    fn find_turn_violation(&self) -> Option<InvariantViolation> {
        let targeting = self.phase == Phase::Targeting;
        match self.pending {
            None if targeting => return Some(InvariantViolation::PendingOutOfPlace(self.phase)),
            Some(pending)
                if !targeting || self.mode() == GameMode::Solo || pending.owner != self.active =>
            {
                return Some(InvariantViolation::PendingOutOfPlace(self.phase));
            }
            _ => {}
        }

        if let Some(selection) = &self.selection {
            if self.phase != Phase::Draft || selection.owner != self.active {
                return Some(InvariantViolation::StraySelection);
            }
        }

        let reads_tally = matches!(
            self.phase,
            Phase::ScoringClearingFloor | Phase::ScoringHealing | Phase::ScoringDamage
        );
        if reads_tally && self.tally.is_none() {
            return Some(InvariantViolation::MissingTally(self.phase));
        }
        None
    }
}
