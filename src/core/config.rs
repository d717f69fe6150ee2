//! Match configuration.
//!
//! Callers configure a match at startup by providing a `MatchConfig`.
//! Every field has a playable default; `with_*` setters customize it.
//! The struct is serde-serializable so callers can keep presets in files.

use serde::{Deserialize, Serialize};

use super::error::RuleError;
use crate::runes::{RuneColor, SupplySpec};

/// Match variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two participants damage each other.
    #[default]
    Versus,
    /// One participant fights a sequence of encounters in a persistent run.
    Solo,
}

impl GameMode {
    /// Participants seated in this mode.
    #[must_use]
    pub const fn participant_count(self) -> usize {
        match self {
            GameMode::Versus => 2,
            GameMode::Solo => 1,
        }
    }
}

/// Strain (overload) tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrainConfig {
    /// Strain in the first round.
    pub base: u32,
    /// Factor applied at the end of every round.
    pub multiplier: u32,
    /// Upper bound on ward mitigation, in percent (at most 100).
    pub max_mitigation_percent: u32,
}

impl Default for StrainConfig {
    fn default() -> Self {
        Self {
            base: 5,
            multiplier: 2,
            max_mitigation_percent: 100,
        }
    }
}

/// Solo encounter tuning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Health of the first encounter.
    pub health: u32,
    /// Damage the first encounter deals every round.
    pub attack: u32,
    /// Extra health per cleared encounter.
    pub health_growth: u32,
    /// Extra attack per cleared encounter.
    pub attack_growth: u32,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            health: 30,
            attack: 2,
            health_growth: 10,
            attack_growth: 1,
        }
    }
}

impl EncounterConfig {
    /// Health of the encounter at `index` (0-based).
    #[must_use]
    pub fn health_at(&self, index: u32) -> u32 {
        self.health.saturating_add(self.health_growth.saturating_mul(index))
    }

    /// Attack of the encounter at `index` (0-based).
    #[must_use]
    pub fn attack_at(&self, index: u32) -> u32 {
        self.attack.saturating_add(self.attack_growth.saturating_mul(index))
    }
}

/// Complete match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub mode: GameMode,
    /// Colors in play; also grid size and staging line count.
    pub board_size: usize,
    pub forges_per_participant: usize,
    pub tokens_per_forge: usize,
    pub starting_health: u32,
    pub max_health: u32,
    pub starting_armor: u32,
    pub strain: StrainConfig,
    pub supply: SupplySpec,
    pub encounter: EncounterConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Versus,
            board_size: 5,
            forges_per_participant: 2,
            tokens_per_forge: 4,
            starting_health: 40,
            max_health: 40,
            starting_armor: 0,
            strain: StrainConfig::default(),
            supply: SupplySpec::Standard,
            encounter: EncounterConfig::default(),
        }
    }
}

impl MatchConfig {
    /// Smallest supported board.
    pub const MIN_BOARD: usize = 3;

    /// Config for `mode` with defaults elsewhere.
    #[must_use]
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn with_forges(mut self, forges_per_participant: usize, tokens_per_forge: usize) -> Self {
        self.forges_per_participant = forges_per_participant;
        self.tokens_per_forge = tokens_per_forge;
        self
    }

    /// Set starting and max health together.
    #[must_use]
    pub fn with_health(mut self, health: u32) -> Self {
        self.starting_health = health;
        self.max_health = health;
        self
    }

    #[must_use]
    pub fn with_strain(mut self, base: u32, multiplier: u32) -> Self {
        self.strain.base = base;
        self.strain.multiplier = multiplier;
        self
    }

    #[must_use]
    pub fn with_supply(mut self, supply: SupplySpec) -> Self {
        self.supply = supply;
        self
    }

    #[must_use]
    pub fn with_encounter(mut self, encounter: EncounterConfig) -> Self {
        self.encounter = encounter;
        self
    }

    /// Participants seated by this config.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.mode.participant_count()
    }

    /// Reject configurations the engine cannot run.
    pub fn validate(&self) -> Result<(), RuleError> {
        let invalid = |reason: String| Err(RuleError::InvalidConfig(reason));

        if !(Self::MIN_BOARD..=RuneColor::MAX).contains(&self.board_size) {
            return invalid(format!(
                "board size {} outside {}..={}",
                self.board_size,
                Self::MIN_BOARD,
                RuneColor::MAX
            ));
        }
        if self.forges_per_participant == 0 || self.tokens_per_forge == 0 {
            return invalid("forges must hold at least one token".to_string());
        }
        if self.starting_health == 0 || self.starting_health > self.max_health {
            return invalid(format!(
                "starting health {} must be in 1..={}",
                self.starting_health, self.max_health
            ));
        }
        if self.strain.multiplier == 0 {
            return invalid("strain multiplier must be at least 1".to_string());
        }
        if self.strain.max_mitigation_percent > 100 {
            return invalid("mitigation cap above 100 percent".to_string());
        }
        let in_play = RuneColor::in_play(self.board_size);
        for entry in self.supply.entries(self.board_size) {
            if !in_play.contains(&entry.color) {
                return invalid(format!("supply color {} not in play", entry.color));
            }
        }
        Ok(())
    }
}
