//! Participants and solo encounters.
//!
//! A participant owns everything private to one seat: health and armor, the
//! supply deck, staging lines, grid, penalty area ("overload") and the spent
//! pile of retired runes.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::grid::Grid;
use super::line::StagingLine;
use crate::core::{MatchConfig, PlayerId};
use crate::runes::Token;

/// Outcome of applying damage to something with armor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage soaked by armor.
    pub absorbed: u32,
    /// Health actually lost.
    pub dealt: u32,
}

/// Unordered accumulation of overflow runes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyArea {
    pub tokens: Vector<Token>,
}

impl PenaltyArea {
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn add(&mut self, tokens: Vector<Token>) {
        self.tokens.append(tokens);
    }

    /// Remove and return everything.
    pub fn drain(&mut self) -> Vector<Token> {
        std::mem::take(&mut self.tokens)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: PlayerId,
    pub health: u32,
    pub max_health: u32,
    pub armor: u32,
    pub currency: u32,
    /// Private draw deck; refills draw from the front.
    pub supply: Vector<Token>,
    /// Line `N` lives at index `N - 1`.
    pub lines: Vector<StagingLine>,
    pub grid: Grid,
    pub penalty: PenaltyArea,
    /// Runes retired from play this run.
    pub spent: Vector<Token>,
}

impl Participant {
    /// Seat a participant with a (pre-shuffled) supply.
    #[must_use]
    pub fn new(id: PlayerId, config: &MatchConfig, supply: Vector<Token>) -> Self {
        Self {
            id,
            health: config.starting_health,
            max_health: config.max_health,
            armor: config.starting_armor,
            currency: 0,
            supply,
            lines: (1..=config.board_size).map(StagingLine::new).collect(),
            grid: Grid::new(config.board_size),
            penalty: PenaltyArea::default(),
            spent: Vector::new(),
        }
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Staging line by 1-based index.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&StagingLine> {
        index.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Staging line by 1-based index, mutably.
    pub fn line_mut(&mut self, index: usize) -> Option<&mut StagingLine> {
        match index.checked_sub(1) {
            Some(i) => self.lines.get_mut(i),
            None => None,
        }
    }

    /// Apply damage; armor absorbs first.
    pub fn take_damage(&mut self, amount: u32) -> DamageReport {
        let absorbed = amount.min(self.armor);
        self.armor -= absorbed;
        let dealt = (amount - absorbed).min(self.health);
        self.health -= dealt;
        DamageReport { absorbed, dealt }
    }

    /// Restore health up to max. Returns health actually restored.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_health.saturating_sub(self.health));
        self.health += healed;
        healed
    }

    /// Every rune held, in a stable order (supply, lines, grid, penalty, spent).
    pub fn tokens(&self) -> impl Iterator<Item = &Token> + '_ {
        self.supply
            .iter()
            .chain(self.lines.iter().flat_map(|l| l.tokens.iter()))
            .chain(self.grid.occupied().map(|(_, t)| t))
            .chain(self.penalty.tokens.iter())
            .chain(self.spent.iter())
    }
}

/// The foe of a solo run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encounter {
    /// 0-based position in the run.
    pub index: u32,
    pub health: u32,
    pub max_health: u32,
    /// Damage dealt to the participant every round.
    pub attack: u32,
}

impl Encounter {
    /// Encounter number `index` of a run configured by `config`.
    #[must_use]
    pub fn from_config(config: &MatchConfig, index: u32) -> Self {
        let health = config.encounter.health_at(index);
        Self {
            index,
            health,
            max_health: health,
            attack: config.encounter.attack_at(index),
        }
    }

    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Apply damage. Returns health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameMode;

    fn participant() -> Participant {
        let config = MatchConfig::default().with_health(20);
        Participant::new(PlayerId::new(0), &config, Vector::new())
    }

    #[test]
    fn test_new_participant_layout() {
        let p = participant();
        assert_eq!(p.lines.len(), 5);
        assert_eq!(p.line(1).map(|l| l.capacity), Some(1));
        assert_eq!(p.line(5).map(|l| l.capacity), Some(5));
        assert!(p.line(0).is_none());
        assert!(p.line(6).is_none());
        assert_eq!(p.grid.size(), 5);
    }

    #[test]
    fn test_armor_absorbs_before_health() {
        let mut p = participant();
        p.armor = 3;

        let report = p.take_damage(5);

        assert_eq!(report, DamageReport { absorbed: 3, dealt: 2 });
        assert_eq!(p.armor, 0);
        assert_eq!(p.health, 18);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut p = participant();
        let report = p.take_damage(100);
        assert_eq!(report.dealt, 20);
        assert!(!p.is_alive());
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut p = participant();
        p.take_damage(4);
        assert_eq!(p.heal(10), 4);
        assert_eq!(p.health, 20);
    }

    #[test]
    fn test_encounter_scaling_and_damage() {
        let config = MatchConfig::new(GameMode::Solo);
        let mut encounter = Encounter::from_config(&config, 1);

        assert_eq!(encounter.health, 40);
        assert_eq!(encounter.attack, 3);
        assert_eq!(encounter.take_damage(50), 40);
        assert!(encounter.is_defeated());
    }
}
