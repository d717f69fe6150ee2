//! Core engine types: participants, RNG, configuration, errors, actions,
//! events and the match state.
//!
//! Everything else in the crate builds on these. Nothing here mutates a
//! match on its own; transitions live in `round`.

pub mod action;
pub mod config;
pub mod error;
pub mod event;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord, DraftAction, DraftSource, PlacementTarget, TargetAction};
pub use config::{EncounterConfig, GameMode, MatchConfig, StrainConfig};
pub use error::{IllegalMove, InvariantViolation, Result, RuleError};
pub use event::{DamageSource, DamageTarget, MatchEvent};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{EliminationCause, MatchOutcome, MatchState, PendingTarget, RoundTally, Selection};
