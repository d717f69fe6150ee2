//! Strain: the escalating multiplier on overload.
//!
//! `overload = penalty × strain`, reduced by the ward percentage a grid
//! provides (capped by configuration, never above 100 so overload can't turn
//! into healing). Strain is multiplied by a fixed factor at every round end.

use serde::{Deserialize, Serialize};

use crate::core::config::StrainConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Strain {
    pub value: u32,
    pub multiplier: u32,
}

impl Strain {
    #[must_use]
    pub fn new(config: &StrainConfig) -> Self {
        Self {
            value: config.base,
            multiplier: config.multiplier,
        }
    }

    /// Apply the round-end multiplier. Returns the new value.
    pub fn escalate(&mut self) -> u32 {
        self.value = self.value.saturating_mul(self.multiplier);
        self.value
    }

    /// Overload damage for `penalty` runes at this strain.
    ///
    /// `ward` is the mitigation percent the grid provides, clamped to `cap`
    /// and to 100. The mitigated amount rounds down.
    #[must_use]
    pub fn overload_damage(&self, penalty: usize, ward: u32, cap: u32) -> u32 {
        let penalty = u32::try_from(penalty).unwrap_or(u32::MAX);
        let raw = penalty.saturating_mul(self.value);
        let mitigation = ward.min(cap).min(100);
        let kept = u64::from(raw) * u64::from(100 - mitigation) / 100;
        u32::try_from(kept).unwrap_or(u32::MAX)
    }
}
