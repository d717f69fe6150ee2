//! Deterministic replay of recorded actions.

use crate::core::{ActionRecord, MatchState, Result};

use super::machine::apply;

/// Re-apply `records` to `initial`, stopping at the first rejected action.
///
/// Starting from the state a match began with, replaying its history
/// reproduces the final state exactly.
pub fn replay<'a>(
    initial: &MatchState,
    records: impl IntoIterator<Item = &'a ActionRecord>,
) -> Result<MatchState> {
    records
        .into_iter()
        .try_fold(initial.clone(), |state, record| {
            Ok(apply(&state, record.player, &record.action)?.state)
        })
}
