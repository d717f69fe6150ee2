//! Draft pools: forges and the shared center.
//!
//! - `Forge`: Participant-owned pool, drafted whole
//! - `CenterPool`: Shared overflow pool, drafted by color
//! - `refill_forges`: Deterministic refill from owners' supplies

pub mod forge;

pub use forge::{distinct_colors, refill_forges, CenterPool, Forge};
