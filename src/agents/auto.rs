//! Automated move sources.
//!
//! Both pick from the exact legal enumeration in `rules`, so they never
//! stall while a legal action exists.

use super::source::{Decision, MoveSource};
use crate::core::{
    DraftAction, GameRng, MatchState, PendingTarget, PlacementTarget, PlayerId, Selection, TargetAction,
};
use crate::rules::{legal_drafts, legal_placements, legal_targets};

/// Always takes the first legal action.
///
/// Lines are tried in ascending order before the penalty area, and targets
/// before `Skip`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl MoveSource for FirstLegal {
    fn choose_draft(&mut self, state: &MatchState, actor: PlayerId) -> Decision<DraftAction> {
        Decision::from_first(legal_drafts(state, actor))
    }

    fn choose_placement(&mut self, state: &MatchState, selection: &Selection) -> Decision<PlacementTarget> {
        Decision::from_first(legal_placements(state.participant(selection.owner), selection.color))
    }

    fn choose_target(&mut self, state: &MatchState, pending: &PendingTarget) -> Decision<TargetAction> {
        Decision::from_first(legal_targets(state, pending))
    }
}

/// Uniform choice over legal actions from its own deterministic stream.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    rng: GameRng,
}

impl RandomPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    fn pick<T: Copy>(&mut self, candidates: &[T]) -> Decision<T> {
        self.rng
            .choose(candidates)
            .copied()
            .map_or(Decision::NoLegalAction, Decision::Act)
    }
}

impl MoveSource for RandomPolicy {
    fn choose_draft(&mut self, state: &MatchState, actor: PlayerId) -> Decision<DraftAction> {
        self.pick(&legal_drafts(state, actor))
    }

    fn choose_placement(&mut self, state: &MatchState, selection: &Selection) -> Decision<PlacementTarget> {
        self.pick(&legal_placements(state.participant(selection.owner), selection.color))
    }

    fn choose_target(&mut self, state: &MatchState, pending: &PendingTarget) -> Decision<TargetAction> {
        self.pick(&legal_targets(state, pending))
    }
}
