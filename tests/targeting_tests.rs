//! Targeted-effect tests.
//!
//! Epic runes carry a channel effect. Committing one to a staging line in
//! versus obliges its owner to destroy or freeze something on the
//! opponent's board (or skip) before the turn passes.

use rune_forge::core::{
    GameMode, IllegalMove, MatchEvent, MatchState, PendingTarget, PlayerId, TargetAction,
};
use rune_forge::round::{self, Phase};
use rune_forge::rules::legal_targets;
use rune_forge::runes::{ChannelKind, EffectTier, RuneColor, SupplyEntry, SupplySpec};
use rune_forge::{Action, DraftAction, MatchConfig, PlacementTarget, RuleError};

/// Every rune is an epic of `color`, so every forge drafts whole.
fn epic_only(color: RuneColor) -> MatchConfig {
    MatchConfig::default().with_supply(SupplySpec::Custom(vec![SupplyEntry {
        color,
        tier: EffectTier::Epic,
        count: 16,
    }]))
}

fn apply(state: &MatchState, actor: PlayerId, action: Action) -> MatchState {
    round::apply(state, actor, &action).unwrap().state
}

fn p(id: u8) -> PlayerId {
    PlayerId::new(id)
}

/// Draft forge `forge` whole and stage it on `line`.
fn stage(state: &MatchState, actor: PlayerId, forge: usize, color: RuneColor, line: usize) -> MatchState {
    let drafted = apply(state, actor, Action::Draft(DraftAction::forge(forge, color)));
    apply(&drafted, actor, Action::Place(PlacementTarget::Line(line)))
}

/// The triggering participant keeps the turn until the effect resolves.
#[test]
fn test_channel_rune_blocks_turn_until_resolved() {
    let state = round::start(epic_only(RuneColor::Fire), 1).unwrap().state;

    let state = stage(&state, p(0), 0, RuneColor::Fire, 4);

    assert_eq!(state.phase, Phase::Targeting);
    assert_eq!(state.active, p(0));
    assert_eq!(
        state.pending,
        Some(PendingTarget {
            owner: p(0),
            kind: ChannelKind::Destroy
        })
    );

    // Nobody drafts while the obligation is open.
    let draft = Action::Draft(DraftAction::forge(2, RuneColor::Fire));
    assert_eq!(
        round::apply(&state, p(1), &draft),
        Err(RuleError::IllegalMove(IllegalMove::TargetPending))
    );
    let draft = Action::Draft(DraftAction::forge(1, RuneColor::Fire));
    assert_eq!(
        round::apply(&state, p(0), &draft),
        Err(RuleError::IllegalMove(IllegalMove::TargetPending))
    );

    // Only the owner resolves.
    let skip = Action::ResolveTarget(TargetAction::Skip);
    assert_eq!(
        round::apply(&state, p(1), &skip),
        Err(RuleError::IllegalMove(IllegalMove::OutOfTurn {
            actor: p(1),
            expected: p(0)
        }))
    );

    let step = round::apply(&state, p(0), &skip).unwrap();
    assert_eq!(step.state.phase, Phase::Draft);
    assert_eq!(step.state.active, p(1));
    assert!(step.events.contains(&MatchEvent::TargetSkipped { player: p(0) }));
}

/// Destroy removes the most recent rune of an opponent line.
#[test]
fn test_destroy_hits_opponent_line() {
    let state = round::start(epic_only(RuneColor::Fire), 2).unwrap().state;
    let state = stage(&state, p(0), 0, RuneColor::Fire, 4);

    // Opponent lines are empty: only skipping is possible.
    let pending = state.pending.unwrap();
    assert_eq!(legal_targets(&state, &pending), vec![TargetAction::Skip]);
    assert_eq!(
        round::apply(&state, p(0), &Action::ResolveTarget(TargetAction::Destroy { line: 4 })),
        Err(RuleError::IllegalMove(IllegalMove::InvalidTarget))
    );
    let state = apply(&state, p(0), Action::ResolveTarget(TargetAction::Skip));

    let state = stage(&state, p(1), 2, RuneColor::Fire, 5);
    let pending = state.pending.unwrap();
    assert_eq!(pending.owner, p(1));
    assert_eq!(
        legal_targets(&state, &pending),
        vec![TargetAction::Destroy { line: 4 }, TargetAction::Skip]
    );

    let victim = state.participant(p(0)).line(4).unwrap().tokens.last().cloned().unwrap();
    let step = round::apply(&state, p(1), &Action::ResolveTarget(TargetAction::Destroy { line: 4 })).unwrap();

    let line = step.state.participant(p(0)).line(4).unwrap();
    assert_eq!(line.count(), 3);
    assert!(line.anchor.is_some());
    assert_ne!(line.anchor.as_ref().map(|t| t.id), Some(victim.id));
    assert_eq!(step.state.participant(p(0)).spent.back(), Some(&victim));
    assert!(step.events.contains(&MatchEvent::TokenDestroyed {
        owner: p(0),
        line: 4,
        token: victim.id
    }));
    assert_eq!(step.state.active, p(0));
}

/// Freeze locks an opponent line until the round ends.
#[test]
fn test_freeze_locks_line_for_the_round() {
    let state = round::start(epic_only(RuneColor::Frost), 3).unwrap().state;
    let state = stage(&state, p(0), 0, RuneColor::Frost, 4);
    assert_eq!(state.pending.map(|p| p.kind), Some(ChannelKind::Freeze));

    let state = apply(&state, p(0), Action::ResolveTarget(TargetAction::Freeze { line: 5 }));
    assert!(state.participant(p(1)).line(5).unwrap().frozen);

    // The frozen line rejects placement.
    let drafted = apply(&state, p(1), Action::Draft(DraftAction::forge(2, RuneColor::Frost)));
    assert_eq!(
        round::apply(&drafted, p(1), &Action::Place(PlacementTarget::Line(5))),
        Err(RuleError::IllegalMove(IllegalMove::LineFrozen(5)))
    );
    let state = apply(&drafted, p(1), Action::Place(PlacementTarget::Line(4)));
    assert_eq!(
        round::apply(&state, p(1), &Action::ResolveTarget(TargetAction::Destroy { line: 4 })),
        Err(RuleError::IllegalMove(IllegalMove::InvalidTarget))
    );
    assert_eq!(
        round::apply(&state, p(1), &Action::ResolveTarget(TargetAction::Freeze { line: 9 })),
        Err(RuleError::IllegalMove(IllegalMove::InvalidTarget))
    );
    let mut state = apply(&state, p(1), Action::ResolveTarget(TargetAction::Skip));

    // Finish the round and check the lock is gone.
    while state.phase != Phase::ScoringComplete {
        if state.phase.is_scoring() {
            state = round::advance(&state).unwrap().state;
            continue;
        }
        let actor = state.active;
        if state.phase == Phase::Targeting {
            state = apply(&state, actor, Action::ResolveTarget(TargetAction::Skip));
            continue;
        }
        let draft = rune_forge::rules::legal_drafts(&state, actor)[0];
        let drafted = apply(&state, actor, Action::Draft(draft));
        state = apply(&drafted, actor, Action::Place(PlacementTarget::Penalty));
    }
    assert!(state.participant(p(1)).line(5).unwrap().frozen);

    let state = round::advance(&state).unwrap().state;
    assert_eq!(state.phase, Phase::Draft);
    assert!(!state.participant(p(1)).line(5).unwrap().frozen);
}

/// Channel runes do nothing in the penalty area or in solo.
#[test]
fn test_channel_ignored_outside_versus_lines() {
    let state = round::start(epic_only(RuneColor::Fire), 4).unwrap().state;
    let drafted = apply(&state, p(0), Action::Draft(DraftAction::forge(0, RuneColor::Fire)));
    let state = apply(&drafted, p(0), Action::Place(PlacementTarget::Penalty));
    assert_eq!(state.phase, Phase::Draft);
    assert!(state.pending.is_none());

    let solo = epic_only(RuneColor::Fire);
    let solo = MatchConfig {
        mode: GameMode::Solo,
        ..solo
    };
    let state = round::start(solo, 4).unwrap().state;
    let state = stage(&state, p(0), 0, RuneColor::Fire, 4);
    assert_eq!(state.phase, Phase::Draft);
    assert!(state.pending.is_none());
}
