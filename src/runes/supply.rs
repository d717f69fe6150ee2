//! Supply decks - the private rune pool each participant drafts from.

use serde::{Deserialize, Serialize};

use super::color::{EffectTier, RuneColor};
use super::token::{Token, TokenIdAllocator};

/// One line of a supply recipe: `count` runes of `color` at `tier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyEntry {
    pub color: RuneColor,
    pub tier: EffectTier,
    pub count: u32,
}

/// Recipe for a participant's starting supply.
///
/// `Standard` expands to 4 common, 2 uncommon, 1 rare and 1 epic rune per
/// color in play.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupplySpec {
    #[default]
    Standard,
    Custom(Vec<SupplyEntry>),
}

impl SupplySpec {
    /// Expand the recipe into entries for a board of `board_size`.
    #[must_use]
    pub fn entries(&self, board_size: usize) -> Vec<SupplyEntry> {
        match self {
            SupplySpec::Standard => RuneColor::in_play(board_size)
                .iter()
                .flat_map(|&color| {
                    [
                        (EffectTier::Common, 4),
                        (EffectTier::Uncommon, 2),
                        (EffectTier::Rare, 1),
                        (EffectTier::Epic, 1),
                    ]
                    .into_iter()
                    .map(move |(tier, count)| SupplyEntry { color, tier, count })
                })
                .collect(),
            SupplySpec::Custom(entries) => entries.clone(),
        }
    }

    /// Total runes this recipe produces.
    #[must_use]
    pub fn size(&self, board_size: usize) -> usize {
        self.entries(board_size).iter().map(|e| e.count as usize).sum()
    }

    /// Mint the tokens of this recipe in recipe order (unshuffled).
    pub fn build(&self, board_size: usize, ids: &mut TokenIdAllocator) -> Vec<Token> {
        self.entries(board_size)
            .into_iter()
            .flat_map(|entry| std::iter::repeat(entry).take(entry.count as usize))
            .map(|entry| Token::new(ids.alloc(), entry.color, entry.tier, board_size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_size() {
        assert_eq!(SupplySpec::Standard.size(5), 40);
        assert_eq!(SupplySpec::Standard.size(3), 24);
    }

    #[test]
    fn test_build_assigns_unique_ids() {
        let mut ids = TokenIdAllocator::new();
        let tokens = SupplySpec::Standard.build(4, &mut ids);

        assert_eq!(tokens.len(), 32);
        let mut raw: Vec<_> = tokens.iter().map(|t| t.id.raw()).collect();
        raw.dedup();
        assert_eq!(raw.len(), 32);
        assert_eq!(ids.allocated(), 32);
    }

    #[test]
    fn test_custom_entries() {
        let spec = SupplySpec::Custom(vec![SupplyEntry {
            color: RuneColor::Storm,
            tier: EffectTier::Rare,
            count: 3,
        }]);
        let mut ids = TokenIdAllocator::new();
        let tokens = spec.build(6, &mut ids);

        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.color == RuneColor::Storm && t.tier == EffectTier::Rare));
    }
}
