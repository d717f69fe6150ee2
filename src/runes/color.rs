//! Rune colors and rarity tiers.

use serde::{Deserialize, Serialize};

/// Color class of a rune. Order is fixed: it drives the grid rotation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuneColor {
    Fire,
    Frost,
    Life,
    Void,
    Wind,
    Storm,
}

impl RuneColor {
    /// All colors in index order.
    pub const ALL: [RuneColor; 6] = [
        RuneColor::Fire,
        RuneColor::Frost,
        RuneColor::Life,
        RuneColor::Void,
        RuneColor::Wind,
        RuneColor::Storm,
    ];

    /// Largest supported board.
    pub const MAX: usize = Self::ALL.len();

    /// Fixed index of this color (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color at `index`, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The colors in play on a board of `board_size`.
    #[must_use]
    pub fn in_play(board_size: usize) -> &'static [RuneColor] {
        &Self::ALL[..board_size.min(Self::MAX)]
    }

    /// Next color in play, wrapping. Receives this color's synergy bonus.
    #[must_use]
    pub fn partner(self, board_size: usize) -> Self {
        Self::ALL[(self.index() + 1) % board_size]
    }

    /// Previous color in play, wrapping. Breaks this color's fragile bonus.
    #[must_use]
    pub fn rival(self, board_size: usize) -> Self {
        Self::ALL[(self.index() + board_size - 1) % board_size]
    }
}

impl std::fmt::Display for RuneColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RuneColor::Fire => "fire",
            RuneColor::Frost => "frost",
            RuneColor::Life => "life",
            RuneColor::Void => "void",
            RuneColor::Wind => "wind",
            RuneColor::Storm => "storm",
        };
        f.write_str(name)
    }
}

/// Rarity tier. Selects the fixed effect payload of a rune.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EffectTier {
    Common,
    Uncommon,
    Rare,
    Epic,
}

impl EffectTier {
    pub const ALL: [EffectTier; 4] = [
        EffectTier::Common,
        EffectTier::Uncommon,
        EffectTier::Rare,
        EffectTier::Epic,
    ];

    /// Amount carried by the primary effect of this tier.
    #[must_use]
    pub const fn base_amount(self) -> u32 {
        match self {
            EffectTier::Common | EffectTier::Uncommon => 1,
            EffectTier::Rare => 2,
            EffectTier::Epic => 3,
        }
    }
}
