//! Rune tokens - individually addressable, immutable once created.
//!
//! Two tokens of the same color and tier are still different tokens: pools
//! restore by identity, and the accounting checks reject duplicate ids.

use serde::{Deserialize, Serialize};

use super::color::{EffectTier, RuneColor};
use super::effect::{effect_payload, ChannelKind, RuneEffect, RuneEffects};

/// Unique identifier of a token within a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u32);

impl TokenId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rune({})", self.0)
    }
}

/// A rune token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub color: RuneColor,
    pub tier: EffectTier,
    pub effects: RuneEffects,
}

impl Token {
    /// Create a token with the fixed payload for its color and tier.
    #[must_use]
    pub fn new(id: TokenId, color: RuneColor, tier: EffectTier, board_size: usize) -> Self {
        Self {
            id,
            color,
            tier,
            effects: effect_payload(color, tier, board_size),
        }
    }

    /// Create a token with an explicit effect list.
    #[must_use]
    pub fn with_effects(
        id: TokenId,
        color: RuneColor,
        tier: EffectTier,
        effects: impl IntoIterator<Item = RuneEffect>,
    ) -> Self {
        Self {
            id,
            color,
            tier,
            effects: effects.into_iter().collect(),
        }
    }

    /// The targeted obligation this token triggers when staged, if any.
    #[must_use]
    pub fn channel(&self) -> Option<ChannelKind> {
        self.effects.iter().find_map(|effect| match effect {
            RuneEffect::Channel(kind) => Some(*kind),
            _ => None,
        })
    }
}

/// Hands out fresh token ids while supplies are built.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenIdAllocator {
    next: u32,
}

impl TokenIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    pub fn alloc(&mut self) -> TokenId {
        let id = TokenId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
