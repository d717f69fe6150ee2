//! Draft legality.
//!
//! In versus each participant drafts only from forges it owns. The center is
//! open to a participant only once all of its own forges are empty.

use crate::core::{DraftAction, DraftSource, IllegalMove, MatchState, PlayerId};

/// True when every forge `player` owns is empty.
#[must_use]
pub fn own_forges_empty(state: &MatchState, player: PlayerId) -> bool {
    state.forges_of(player).all(|(_, forge)| forge.is_empty())
}

/// Check that `player` may take `draft` right now, ignoring turn and phase.
pub fn check_draft(state: &MatchState, player: PlayerId, draft: &DraftAction) -> Result<(), IllegalMove> {
    if state.selection.is_some() {
        return Err(IllegalMove::SelectionHeld);
    }

    match draft.source {
        DraftSource::Forge(index) => {
            let forge = state.forges.get(index).ok_or(IllegalMove::UnknownForge(index))?;
            if forge.owner != player {
                return Err(IllegalMove::ForgeNotOwned {
                    forge: index,
                    owner: forge.owner,
                });
            }
            if !forge.has_color(draft.color) {
                return Err(IllegalMove::ColorAbsent(draft.color));
            }
        }
        DraftSource::Center => {
            if !own_forges_empty(state, player) {
                return Err(IllegalMove::CenterLocked);
            }
            if !state.center.tokens.iter().any(|t| t.color == draft.color) {
                return Err(IllegalMove::ColorAbsent(draft.color));
            }
        }
    }
    Ok(())
}

/// Every draft `player` could legally take, forges first, then the center.
#[must_use]
pub fn legal_drafts(state: &MatchState, player: PlayerId) -> Vec<DraftAction> {
    if state.selection.is_some() {
        return Vec::new();
    }

    let mut drafts: Vec<DraftAction> = state
        .forges_of(player)
        .flat_map(|(index, forge)| {
            forge
                .colors()
                .into_iter()
                .map(move |color| DraftAction::forge(index, color))
        })
        .collect();

    if drafts.is_empty() {
        drafts.extend(state.center.colors().into_iter().map(DraftAction::center));
    }
    drafts
}

#[must_use]
pub fn has_legal_draft(state: &MatchState, player: PlayerId) -> bool {
    state.forges_of(player).any(|(_, forge)| !forge.is_empty())
        || (!state.center.is_empty() && own_forges_empty(state, player))
}
