//! Legality checks and legal-move enumeration.
//!
//! - `draft`: Which pools a participant may draft from
//! - `placement`: Staging-line and penalty placement
//! - `targeting`: Destroy / freeze resolution against the opponent
//! - `legal`: Full enumeration per participant and phase
//!
//! Checks here never mutate. The round machine calls them before touching
//! a cloned state; move sources call the enumerations to pick an action.

pub mod draft;
pub mod legal;
pub mod placement;
pub mod targeting;

pub use draft::{check_draft, has_legal_draft, legal_drafts, own_forges_empty};
pub use legal::legal_actions;
pub use placement::{check_line, check_placement, legal_placements};
pub use targeting::{check_target, legal_targets};
