//! Per-participant board: staging lines, grid, penalty area.
//!
//! - `StagingLine`: Capacity-limited, single-color buffer with a cached anchor
//! - `Grid`: Square placement grid with the color→column rotation
//! - `PenaltyArea`: Overflow accumulation, cleared each round
//! - `Participant`: Health, armor, supply and all of the above
//! - `Encounter`: The foe of a solo run

pub mod grid;
pub mod line;
pub mod participant;

pub use grid::{Cell, Grid};
pub use line::StagingLine;
pub use participant::{DamageReport, Encounter, Participant, PenaltyArea};
