//! Compact snapshot codec for a whole `MatchState`.
//!
//! A decoded snapshot is accepted as-is: nothing is re-derived, only the
//! structural invariants are checked before it is handed back.

use crate::core::{MatchState, Result, RuleError};

/// Serialize `state` with bincode.
pub fn encode(state: &MatchState) -> Result<Vec<u8>> {
    bincode::serialize(state).map_err(|e| RuleError::Snapshot(e.to_string()))
}

/// Deserialize and validate a snapshot produced by [`encode`].
pub fn decode(bytes: &[u8]) -> Result<MatchState> {
    let state: MatchState =
        bincode::deserialize(bytes).map_err(|e| RuleError::Snapshot(e.to_string()))?;
    state.check_invariants()?;
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameMode, InvariantViolation, MatchConfig, PendingTarget, PlayerId};
    use crate::round::{self, Phase};
    use crate::runes::ChannelKind;

    fn decode_err(state: &MatchState) -> RuleError {
        decode(&encode(state).unwrap()).unwrap_err()
    }

    #[test]
    fn test_snapshot_roundtrip_preserves_state() {
        let state = round::start(MatchConfig::default(), 21).unwrap().state;
        let bytes = encode(&state).unwrap();
        assert_eq!(decode(&bytes).unwrap(), state);
    }

    #[test]
    fn test_solo_pending_target_is_rejected() {
        let mut state = round::start(MatchConfig::new(GameMode::Solo), 3).unwrap().state;
        state.phase = Phase::Targeting;
        state.pending = Some(PendingTarget {
            owner: PlayerId::new(0),
            kind: ChannelKind::Freeze,
        });

        assert_eq!(
            decode_err(&state),
            RuleError::InvariantViolation(InvariantViolation::PendingOutOfPlace(Phase::Targeting))
        );
    }

    #[test]
    fn test_phase_bookkeeping_is_checked() {
        let fresh = round::start(MatchConfig::default(), 4).unwrap().state;

        let mut targeting = fresh.clone();
        targeting.phase = Phase::Targeting;
        assert_eq!(
            decode_err(&targeting),
            RuleError::InvariantViolation(InvariantViolation::PendingOutOfPlace(Phase::Targeting))
        );

        let mut stray = fresh.clone();
        stray.pending = Some(PendingTarget {
            owner: stray.active,
            kind: ChannelKind::Destroy,
        });
        assert_eq!(
            decode_err(&stray),
            RuleError::InvariantViolation(InvariantViolation::PendingOutOfPlace(Phase::Draft))
        );

        let mut healing = fresh;
        healing.phase = Phase::ScoringHealing;
        assert_eq!(
            decode_err(&healing),
            RuleError::InvariantViolation(InvariantViolation::MissingTally(Phase::ScoringHealing))
        );
    }

    #[test]
    fn test_selection_outside_draft_is_rejected() {
        let state = round::start(MatchConfig::default(), 5).unwrap().state;
        let actor = state.active;
        let draft = crate::rules::legal_drafts(&state, actor)[0];
        let mut drafted = round::apply(&state, actor, &crate::Action::Draft(draft))
            .unwrap()
            .state;

        let mut wrong_owner = drafted.clone();
        wrong_owner.active = actor.opponent();
        assert_eq!(
            decode_err(&wrong_owner),
            RuleError::InvariantViolation(InvariantViolation::StraySelection)
        );

        drafted.phase = Phase::ScoringMovingToWall;
        assert_eq!(
            decode_err(&drafted),
            RuleError::InvariantViolation(InvariantViolation::StraySelection)
        );
    }

    #[test]
    fn test_board_shape_is_checked() {
        let state = round::start(MatchConfig::default(), 6).unwrap().state;
        let owner = PlayerId::new(1);
        let shape = RuleError::InvariantViolation(InvariantViolation::BoardShape { owner, size: 5 });

        let mut short_grid = state.clone();
        short_grid.participants.get_mut(owner).grid = crate::board::Grid::new(4);
        assert_eq!(decode_err(&short_grid), shape);

        let mut wide_line = state.clone();
        if let Some(line) = wide_line.participants.get_mut(owner).lines.get_mut(2) {
            line.capacity = 5;
        }
        assert_eq!(decode_err(&wide_line), shape);

        let mut missing_line = state;
        missing_line.participants.get_mut(owner).lines.pop_back();
        assert_eq!(decode_err(&missing_line), shape);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(decode(&[1, 2, 3]), Err(RuleError::Snapshot(_))));
    }
}
