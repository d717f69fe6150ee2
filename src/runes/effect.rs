//! Rune effect payloads.
//!
//! Every rune carries a short list of [`RuneEffect`]s derived from its color
//! and tier. The set of effects is closed: scoring resolves them with an
//! exhaustive `match`, so adding a variant forces every consumer to decide
//! what it means.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::color::{EffectTier, RuneColor};

/// Single-use obligation a channel rune imposes when staged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Destroy one token from an opponent's staging line.
    Destroy,
    /// Freeze one of the opponent's staging lines for the rest of the round.
    Freeze,
}

/// An atomic rune effect.
///
/// Amounts are per grid cell; `Synergy` and `Fragile` are evaluated over
/// the whole segment the cell belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuneEffect {
    /// Damage dealt to the opposition.
    Damage(u32),
    /// Health restored, capped at max health.
    Healing(u32),
    /// Armor gained; absorbs damage before health.
    Armor(u32),
    /// Currency gained.
    Fortune(u32),
    /// Percent of overload damage mitigated.
    Ward(u32),
    /// `+amount` per segment cell of `color`.
    Synergy { color: RuneColor, amount: u32 },
    /// `+amount` if the segment holds no cell of `breaks`.
    Fragile { breaks: RuneColor, amount: u32 },
    /// Targeted obligation triggered on staging (versus only).
    Channel(ChannelKind),
}

/// Effect list carried by a token. Inline up to three entries.
pub type RuneEffects = SmallVec<[RuneEffect; 3]>;

/// Primary effect of `color` with the given amount.
#[must_use]
pub fn primary_effect(color: RuneColor, amount: u32) -> RuneEffect {
    match color {
        RuneColor::Fire | RuneColor::Storm => RuneEffect::Damage(amount),
        RuneColor::Frost => RuneEffect::Armor(amount),
        RuneColor::Life => RuneEffect::Healing(amount),
        RuneColor::Void => RuneEffect::Ward(amount * 10),
        RuneColor::Wind => RuneEffect::Fortune(amount),
    }
}

/// Fixed payload for a rune of `color` and `tier` on a board of `board_size`.
///
/// ```
/// use rune_forge::runes::{effect_payload, EffectTier, RuneColor, RuneEffect};
///
/// let payload = effect_payload(RuneColor::Fire, EffectTier::Common, 5);
/// assert_eq!(payload.as_slice(), &[RuneEffect::Damage(1)]);
/// ```
#[must_use]
pub fn effect_payload(color: RuneColor, tier: EffectTier, board_size: usize) -> RuneEffects {
    let primary = primary_effect(color, tier.base_amount());
    let partner = color.partner(board_size);

    match tier {
        EffectTier::Common => smallvec![primary],
        EffectTier::Uncommon => smallvec![
            primary,
            RuneEffect::Synergy { color: partner, amount: 1 },
        ],
        EffectTier::Rare => smallvec![
            primary,
            RuneEffect::Fragile { breaks: color.rival(board_size), amount: 3 },
        ],
        EffectTier::Epic => {
            let channel = if color.index() % 2 == 0 {
                ChannelKind::Destroy
            } else {
                ChannelKind::Freeze
            };
            smallvec![
                primary,
                RuneEffect::Synergy { color: partner, amount: 2 },
                RuneEffect::Channel(channel),
            ]
        }
    }
}
