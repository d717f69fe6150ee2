//! Human-driven move source.
//!
//! A UI pushes choices as they are made. The source hands them out in order
//! and reports `Waiting` while the relevant queue is empty. It does not
//! check legality; the round machine rejects bad input.

use std::collections::VecDeque;

use super::source::{Decision, MoveSource};
use crate::core::{DraftAction, MatchState, PendingTarget, PlacementTarget, PlayerId, Selection, TargetAction};

#[derive(Clone, Debug, Default)]
pub struct QueuedInput {
    drafts: VecDeque<DraftAction>,
    placements: VecDeque<PlacementTarget>,
    targets: VecDeque<TargetAction>,
}

impl QueuedInput {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_draft(&mut self, draft: DraftAction) {
        self.drafts.push_back(draft);
    }

    pub fn push_placement(&mut self, target: PlacementTarget) {
        self.placements.push_back(target);
    }

    pub fn push_target(&mut self, target: TargetAction) {
        self.targets.push_back(target);
    }

    /// True when no input is queued.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.drafts.is_empty() && self.placements.is_empty() && self.targets.is_empty()
    }
}

fn pop<T>(queue: &mut VecDeque<T>) -> Decision<T> {
    queue.pop_front().map_or(Decision::Waiting, Decision::Act)
}

impl MoveSource for QueuedInput {
    fn choose_draft(&mut self, _state: &MatchState, _actor: PlayerId) -> Decision<DraftAction> {
        pop(&mut self.drafts)
    }

    fn choose_placement(&mut self, _state: &MatchState, _selection: &Selection) -> Decision<PlacementTarget> {
        pop(&mut self.placements)
    }

    fn choose_target(&mut self, _state: &MatchState, _pending: &PendingTarget) -> Decision<TargetAction> {
        pop(&mut self.targets)
    }
}
