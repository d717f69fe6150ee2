//! Rune model: colors, rarity tiers, effect payloads, tokens and supplies.
//!
//! ## Key Types
//!
//! - `RuneColor`: Color class; drives the grid column rotation
//! - `EffectTier`: Rarity; selects the fixed effect payload
//! - `RuneEffect`: Closed tagged union of everything a rune can do
//! - `Token`: An individually addressable rune
//! - `SupplySpec`: Recipe for a participant's private supply deck

pub mod color;
pub mod effect;
pub mod supply;
pub mod token;

pub use color::{EffectTier, RuneColor};
pub use effect::{effect_payload, primary_effect, ChannelKind, RuneEffect, RuneEffects};
pub use supply::{SupplyEntry, SupplySpec};
pub use token::{Token, TokenId, TokenIdAllocator};
