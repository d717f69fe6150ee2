//! # rune-forge
//!
//! Deterministic rule engine for a turn-based rune-drafting combat game:
//! participants draft runes from forges, stage them on capacity-limited
//! lines, move full lines onto a grid and fight with the power of the grid's
//! connected segments.
//!
//! ## Design Principles
//!
//! 1. **One authoritative value**: `MatchState` holds everything. Transitions
//!    take a state and return a new one plus events; nothing is global.
//!
//! 2. **Atomic transitions**: Persistent data structures (`im`) make cloning
//!    O(1), so an action is applied to a clone and rejected actions leave
//!    the input untouched.
//!
//! 3. **Externally pumped**: No timers. Scoring advances one phase per
//!    explicit call.
//!
//! 4. **Seat-agnostic**: Humans and policies are interchangeable
//!    `MoveSource`s; the engine never asks who is acting.
//!
//! ## Modules
//!
//! - `core`: Participants, RNG, configuration, errors, actions, events, state
//! - `runes`: Colors, tiers, effects, tokens and supply recipes
//! - `pools`: Forges and the center
//! - `board`: Staging lines, grid, penalty area, participants, encounters
//! - `scoring`: Segment flood fill and effect resolution
//! - `rules`: Legality checks and legal-move enumeration
//! - `round`: Phases, strain, transitions, snapshots, replay
//! - `agents`: Move sources and the match driver
//!
//! ## Example
//!
//! ```
//! use rune_forge::{round, MatchConfig, Phase};
//! use rune_forge::agents::{FirstLegal, MatchDriver, MoveSource, PumpStatus};
//!
//! let state = round::start(MatchConfig::default(), 42).unwrap().state;
//! let mut driver = MatchDriver::new(state);
//! let (mut a, mut b) = (FirstLegal, FirstLegal);
//!
//! let status = driver.pump(&mut [&mut a as &mut dyn MoveSource, &mut b]);
//! assert_eq!(status, PumpStatus::Scoring(Phase::ScoringMovingToWall));
//! ```

pub mod agents;
pub mod board;
pub mod core;
pub mod pools;
pub mod round;
pub mod rules;
pub mod runes;
pub mod scoring;

pub use crate::core::{
    Action, ActionRecord, DraftAction, DraftSource, GameMode, GameRng, IllegalMove,
    InvariantViolation, MatchConfig, MatchEvent, MatchOutcome, MatchState, PlacementTarget,
    PlayerId, PlayerMap, RuleError, TargetAction,
};

pub use crate::round::{Phase, Step, Strain};

pub use crate::runes::{EffectTier, RuneColor, RuneEffect, Token, TokenId};

pub use crate::scoring::{score_grid, GridScore, PowerBreakdown};
