//! Outbound notifications.
//!
//! Each transition reports what changed as a list of `MatchEvent`s, in the
//! order the changes happened. Events carry identities and amounts only;
//! presentation decides what to do with them.

use serde::{Deserialize, Serialize};

use super::action::DraftSource;
use super::player::PlayerId;
use super::state::MatchOutcome;
use crate::round::Phase;
use crate::runes::{ChannelKind, RuneColor, TokenId};

/// Who took damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageTarget {
    Participant(PlayerId),
    Encounter,
}

/// Why damage was dealt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageSource {
    /// Grid segments of the given participant.
    Segments(PlayerId),
    /// The target's own penalty area at the current strain.
    Overload,
    /// The solo encounter's attack.
    Encounter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEvent {
    RoundStarted {
        round: u32,
        first: PlayerId,
    },
    ForgesRefilled {
        drawn: usize,
    },
    TokensDrafted {
        player: PlayerId,
        source: DraftSource,
        color: RuneColor,
        tokens: Vec<TokenId>,
    },
    /// Forge leftovers moved to the center.
    TokensToCenter {
        forge: usize,
        tokens: Vec<TokenId>,
    },
    SelectionCancelled {
        player: PlayerId,
        source: DraftSource,
    },
    TokensStaged {
        player: PlayerId,
        line: usize,
        tokens: Vec<TokenId>,
    },
    TokensOverflowed {
        player: PlayerId,
        tokens: Vec<TokenId>,
    },
    TargetedEffectPending {
        player: PlayerId,
        kind: ChannelKind,
    },
    TokenDestroyed {
        owner: PlayerId,
        line: usize,
        token: TokenId,
    },
    LineFrozen {
        owner: PlayerId,
        line: usize,
    },
    TargetSkipped {
        player: PlayerId,
    },
    TurnPassed {
        from: PlayerId,
        to: PlayerId,
    },
    PhaseChanged {
        from: Phase,
        to: Phase,
    },
    TokenToGrid {
        owner: PlayerId,
        row: usize,
        col: usize,
        token: TokenId,
    },
    PenaltyCleared {
        owner: PlayerId,
        count: usize,
    },
    HealingApplied {
        owner: PlayerId,
        amount: u32,
    },
    ArmorGained {
        owner: PlayerId,
        amount: u32,
    },
    CurrencyGained {
        owner: PlayerId,
        amount: u32,
    },
    DamageApplied {
        target: DamageTarget,
        source: DamageSource,
        absorbed: u32,
        dealt: u32,
    },
    StrainEscalated {
        value: u32,
    },
    MatchEnded {
        outcome: MatchOutcome,
    },
}

impl MatchEvent {
    /// True for events that move runes between places.
    #[must_use]
    pub fn moves_tokens(&self) -> bool {
        matches!(
            self,
            MatchEvent::TokensDrafted { .. }
                | MatchEvent::TokensToCenter { .. }
                | MatchEvent::TokensStaged { .. }
                | MatchEvent::TokensOverflowed { .. }
                | MatchEvent::TokenDestroyed { .. }
                | MatchEvent::TokenToGrid { .. }
                | MatchEvent::PenaltyCleared { .. }
        )
    }
}
