//! Legal-move enumeration.
//!
//! The enumeration is exact: every action listed applies without an
//! `IllegalMove`, and an empty list means the participant genuinely has
//! nothing to do right now.

use super::draft::legal_drafts;
use super::placement::legal_placements;
use super::targeting::legal_targets;
use crate::core::{Action, MatchOutcome, MatchState, PlayerId};
use crate::round::Phase;

/// Every action `player` may apply to `state`.
#[must_use]
pub fn legal_actions(state: &MatchState, player: PlayerId) -> Vec<Action> {
    if !state.participants.contains(player) {
        return Vec::new();
    }

    match state.phase {
        Phase::Draft if player == state.active => match &state.selection {
            Some(selection) => legal_placements(state.participant(player), selection.color)
                .into_iter()
                .map(Action::Place)
                .chain(std::iter::once(Action::CancelSelection))
                .collect(),
            None => legal_drafts(state, player).into_iter().map(Action::Draft).collect(),
        },
        Phase::Targeting => match &state.pending {
            Some(pending) if pending.owner == player => legal_targets(state, pending)
                .into_iter()
                .map(Action::ResolveTarget)
                .collect(),
            _ => Vec::new(),
        },
        Phase::ScoringComplete => vec![Action::AdvanceScoring, Action::StartNextRound],
        phase if phase.is_scoring() => vec![Action::AdvanceScoring],
        Phase::GameOver if state.outcome == Some(MatchOutcome::EncounterCleared) => {
            vec![Action::StartNextEncounter]
        }
        _ => Vec::new(),
    }
}
