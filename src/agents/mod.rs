//! Move sources and the match driver.
//!
//! - `MoveSource`: Capability trait answering draft / placement / target
//! - `QueuedInput`: Human seat fed by a UI
//! - `FirstLegal`, `RandomPolicy`: Automated seats
//! - `MatchDriver`: Pumps sources against the round machine

pub mod auto;
pub mod driver;
pub mod human;
pub mod source;

pub use auto::{FirstLegal, RandomPolicy};
pub use driver::{MatchDriver, PumpStatus};
pub use human::QueuedInput;
pub use source::{Decision, MoveSource};
