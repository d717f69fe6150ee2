//! The move-source capability.
//!
//! The round machine never asks who is acting. Whatever drives a seat, a UI
//! or a policy, implements `MoveSource` and answers the one question the
//! current phase poses.

use crate::core::{DraftAction, MatchState, PendingTarget, PlacementTarget, PlayerId, Selection, TargetAction};

/// Answer from a move source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision<T> {
    Act(T),
    /// No answer yet; ask again later.
    Waiting,
    /// The legal enumeration is empty.
    NoLegalAction,
}

impl<T> Decision<T> {
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decision<U> {
        match self {
            Decision::Act(value) => Decision::Act(f(value)),
            Decision::Waiting => Decision::Waiting,
            Decision::NoLegalAction => Decision::NoLegalAction,
        }
    }

    /// `Act` with the first candidate, or `NoLegalAction` if there is none.
    #[must_use]
    pub fn from_first(candidates: impl IntoIterator<Item = T>) -> Self {
        candidates
            .into_iter()
            .next()
            .map_or(Decision::NoLegalAction, Decision::Act)
    }
}

/// Supplies the next action for one seat.
///
/// Automated sources must return `Act` whenever a legal action exists and
/// `NoLegalAction` only when the enumeration is genuinely empty. Human
/// sources return `Waiting` until input arrives.
pub trait MoveSource: Send {
    fn choose_draft(&mut self, state: &MatchState, actor: PlayerId) -> Decision<DraftAction>;

    fn choose_placement(&mut self, state: &MatchState, selection: &Selection) -> Decision<PlacementTarget>;

    fn choose_target(&mut self, state: &MatchState, pending: &PendingTarget) -> Decision<TargetAction>;
}
