//! Targeted-effect legality.
//!
//! Targets are always the opponent's staging lines. `Skip` is always legal,
//! so an obligation can never deadlock the round.

use crate::core::{IllegalMove, MatchState, PendingTarget, TargetAction};
use crate::runes::ChannelKind;

/// Check `action` against the obligation `pending`.
pub fn check_target(state: &MatchState, pending: &PendingTarget, action: TargetAction) -> Result<(), IllegalMove> {
    let opponent = state.participant(pending.owner.opponent());
    match (pending.kind, action) {
        (_, TargetAction::Skip) => Ok(()),
        (ChannelKind::Destroy, TargetAction::Destroy { line }) => match opponent.line(line) {
            Some(staging) if !staging.is_empty() => Ok(()),
            _ => Err(IllegalMove::InvalidTarget),
        },
        (ChannelKind::Freeze, TargetAction::Freeze { line }) => match opponent.line(line) {
            Some(staging) if !staging.frozen => Ok(()),
            _ => Err(IllegalMove::InvalidTarget),
        },
        _ => Err(IllegalMove::InvalidTarget),
    }
}

/// Every legal resolution of `pending`; `Skip` comes last.
#[must_use]
pub fn legal_targets(state: &MatchState, pending: &PendingTarget) -> Vec<TargetAction> {
    let lines = state.participant(pending.owner.opponent()).lines.len();
    (1..=lines)
        .map(|line| match pending.kind {
            ChannelKind::Destroy => TargetAction::Destroy { line },
            ChannelKind::Freeze => TargetAction::Freeze { line },
        })
        .filter(|&action| check_target(state, pending, action).is_ok())
        .chain(std::iter::once(TargetAction::Skip))
        .collect()
}
