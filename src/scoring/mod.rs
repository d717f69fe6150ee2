//! Grid scoring.
//!
//! - `segments`: 4-connected components of occupied cells
//! - `power`: Effect resolution, per segment and per grid

pub mod power;
pub mod segments;

pub use power::{score_grid, score_segment, GridScore, PowerBreakdown, PowerKind, Segment};
pub use segments::find_segments;
