//! Round state machine.
//!
//! - `phase`: The `Phase` enum and scoring order
//! - `strain`: Escalating overload multiplier
//! - `machine`: `start`, `apply` and the per-phase work
//! - `snapshot`: bincode encode / validated decode
//! - `replay`: Re-apply an action history
//!
//! The machine is the only code that changes round or phase.

pub mod machine;
pub mod phase;
pub mod replay;
pub mod snapshot;
pub mod strain;

pub use machine::{advance, apply, start, start_match, Step};
pub use phase::Phase;
pub use replay::replay;
pub use strain::Strain;
