//! Round state machine tests.
//!
//! These drive matches through the public transition functions and check
//! phase ordering, cancel, strain escalation, the scoring phases and
//! terminal short-circuits.

use im::Vector;
use rune_forge::core::{
    DamageSource, DamageTarget, EliminationCause, GameMode, MatchEvent, MatchOutcome, MatchState,
    PlayerId,
};
use rune_forge::round::{self, Phase, Step};
use rune_forge::rules::legal_drafts;
use rune_forge::runes::{EffectTier, RuneColor, SupplyEntry, SupplySpec};
use rune_forge::{Action, DraftAction, DraftSource, MatchConfig, PlacementTarget, RuleError};

fn only(color: RuneColor, count: u32) -> SupplySpec {
    SupplySpec::Custom(vec![SupplyEntry {
        color,
        tier: EffectTier::Common,
        count,
    }])
}

/// Twenty commons of each of four colors per participant.
fn mixed() -> SupplySpec {
    let entry = |color| SupplyEntry {
        color,
        tier: EffectTier::Common,
        count: 20,
    };
    SupplySpec::Custom(vec![
        entry(RuneColor::Fire),
        entry(RuneColor::Frost),
        entry(RuneColor::Life),
        entry(RuneColor::Wind),
    ])
}

/// Move `count` of `owner`'s supply runes of `color` onto staging `line`.
fn stage_from_supply(state: &mut MatchState, owner: PlayerId, color: RuneColor, line: usize, count: usize) {
    let participant = state.participants.get_mut(owner);
    let mut picked = Vector::new();
    for _ in 0..count {
        let at = participant.supply.iter().position(|t| t.color == color).unwrap();
        picked.push_back(participant.supply.remove(at));
    }
    let (_, overflow) = participant.line_mut(line).unwrap().stage(picked);
    assert!(overflow.is_empty());
}

/// A versus match on the mixed supply, drafted out and waiting at the wall move.
fn at_wall_move(seed: u64) -> MatchState {
    let config = MatchConfig::default().with_health(200).with_supply(mixed());
    let state = penalty_round(round::start(config, seed).unwrap().state, &mut Vec::new());
    assert_eq!(state.phase, Phase::ScoringMovingToWall);
    state
}

fn act(state: &MatchState, action: Action) -> Step {
    round::apply(state, state.active, &action).unwrap()
}

fn first_draft(state: &MatchState) -> Action {
    Action::Draft(legal_drafts(state, state.active)[0])
}

/// Draft and dump into the penalty area until the draft phase ends.
fn penalty_round(mut state: MatchState, events: &mut Vec<MatchEvent>) -> MatchState {
    while state.phase == Phase::Draft {
        let step = act(&state, first_draft(&state));
        let step = act(&step.state, Action::Place(PlacementTarget::Penalty));
        events.extend(step.events);
        state = step.state;
    }
    state
}

/// Advance scoring until the phase leaves the scoring chain.
fn score_round(mut state: MatchState, events: &mut Vec<MatchEvent>) -> MatchState {
    while state.phase.is_scoring() {
        let step = round::advance(&state).unwrap();
        events.extend(step.events);
        state = step.state;
    }
    state
}

/// With one forge and an empty center after a commit, scoring starts.
#[test]
fn test_round_end_trigger_with_single_forge() {
    let config = MatchConfig::new(GameMode::Solo).with_forges(1, 4);
    let mut state = round::start(config, 17).unwrap().state;

    loop {
        let drafted = act(&state, first_draft(&state)).state;
        assert_eq!(drafted.phase, Phase::Draft);

        state = act(&drafted, Action::Place(PlacementTarget::Penalty)).state;
        if state.pools_empty() {
            assert_eq!(state.phase, Phase::ScoringMovingToWall);
            break;
        }
        assert_eq!(state.phase, Phase::Draft);
    }
}

/// In versus the draft phase ends exactly when the last pool empties.
#[test]
fn test_versus_draft_ends_only_when_all_pools_empty() {
    let mut state = round::start(MatchConfig::default(), 23).unwrap().state;

    while state.phase == Phase::Draft {
        let drafted = act(&state, first_draft(&state)).state;
        state = act(&drafted, Action::Place(PlacementTarget::Penalty)).state;
        assert_eq!(state.pools_empty(), state.phase == Phase::ScoringMovingToWall);
    }
    assert_eq!(state.phase, Phase::ScoringMovingToWall);
}

/// Drafting from a forge then cancelling restores forge and center exactly.
#[test]
fn test_cancel_restores_forge_identity_and_order() {
    let state = round::start(MatchConfig::default(), 5).unwrap().state;
    let forges_before = state.forges.clone();
    let center_before = state.center.clone();

    let drafted = act(&state, first_draft(&state)).state;
    assert_ne!(drafted.forges, forges_before);

    let step = act(&drafted, Action::CancelSelection);

    assert_eq!(step.state.forges, forges_before);
    assert_eq!(step.state.center, center_before);
    assert!(step.state.selection.is_none());
    assert_eq!(step.state.active, state.active);
    assert!(matches!(step.events[0], MatchEvent::SelectionCancelled { .. }));
}

/// Cancelling a center draft puts the runes back in their original slots.
#[test]
fn test_cancel_restores_center_order() {
    let config = MatchConfig::new(GameMode::Solo);
    let mut state = round::start(config, 8).unwrap().state;
    for index in 0..state.forges.len() {
        let tokens = std::mem::take(&mut state.forges[index].tokens);
        state.center.receive(tokens);
    }
    let center_before = state.center.tokens.clone();
    let color = center_before[1].color;

    let drafted = act(&state, Action::Draft(DraftAction::center(color))).state;
    assert!(drafted.center.tokens.iter().all(|t| t.color != color));

    let restored = act(&drafted, Action::CancelSelection).state;
    assert_eq!(restored.center.tokens, center_before);
}

/// Base strain 5, multiplier 2: overload doubles in the second round.
#[test]
fn test_strain_escalates_between_rounds() {
    let config = MatchConfig::new(GameMode::Solo)
        .with_health(200)
        .with_supply(only(RuneColor::Fire, 24));
    let state = round::start(config, 1).unwrap().state;
    let mut events = Vec::new();

    let state = penalty_round(state, &mut events);
    let state = score_round(state, &mut events);
    assert_eq!(state.round, 2);
    assert_eq!(state.strain.value, 10);
    assert!(events.contains(&MatchEvent::StrainEscalated { value: 10 }));

    let overloads = |events: &[MatchEvent]| -> Vec<u32> {
        events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::DamageApplied {
                    source: DamageSource::Overload,
                    dealt,
                    ..
                } => Some(*dealt),
                _ => None,
            })
            .collect()
    };
    assert_eq!(overloads(&events), vec![40]);

    let mut second = Vec::new();
    let state = penalty_round(state, &mut second);
    let state = score_round(state, &mut second);
    assert_eq!(overloads(&second), vec![80]);
    // 200 - (2 + 40) - (2 + 80)
    assert_eq!(state.participant(PlayerId::new(0)).health, 76);
}

/// A lethal damage phase ends the match without a completion phase.
#[test]
fn test_lethal_damage_short_circuits_to_game_over() {
    let config = MatchConfig::new(GameMode::Solo).with_health(20);
    let state = round::start(config, 3).unwrap().state;
    let mut events = Vec::new();

    let mut state = penalty_round(state, &mut events);
    while state.phase != Phase::ScoringDamage {
        state = round::advance(&state).unwrap().state;
    }

    let step = round::advance(&state).unwrap();

    assert_eq!(step.state.phase, Phase::GameOver);
    assert_eq!(
        step.state.outcome,
        Some(MatchOutcome::RunEnded {
            cause: EliminationCause::Health
        })
    );
    assert!(!step.events.iter().any(|e| matches!(
        e,
        MatchEvent::PhaseChanged {
            to: Phase::ScoringComplete,
            ..
        }
    )));
    assert!(matches!(step.events.last(), Some(MatchEvent::MatchEnded { .. })));

    assert_eq!(
        round::apply(&step.state, PlayerId::new(0), &Action::StartNextRound),
        Err(RuleError::MatchTerminal)
    );
    assert_eq!(round::advance(&step.state), Err(RuleError::MatchTerminal));
}

/// In versus, the participant who falls loses; the other wins outright.
#[test]
fn test_versus_single_elimination_names_winner() {
    let state = round::start(MatchConfig::default(), 31).unwrap().state;
    let mut state = penalty_round(state, &mut Vec::new());
    assert_eq!(state.phase, Phase::ScoringMovingToWall);

    // Participant 1 moves eight more supply runes into its penalty area;
    // participant 0 retires its own.
    let loser = PlayerId::new(1);
    let winner = PlayerId::new(0);
    {
        let p = state.participants.get_mut(loser);
        let dumped = p.supply.slice(..8);
        p.penalty.add(dumped);
        p.health = 1;
    }
    {
        let p = state.participants.get_mut(winner);
        let cleared = p.penalty.drain();
        p.spent.append(cleared);
    }
    assert!(state.check_invariants().is_ok());

    while state.phase != Phase::GameOver {
        state = round::advance(&state).unwrap().state;
    }

    assert_eq!(
        state.outcome,
        Some(MatchOutcome::Winner {
            player: winner,
            cause: EliminationCause::Health
        })
    );
    assert!(state.participant(winner).is_alive());
}

/// Supply exhaustion at round completion ends a solo run.
#[test]
fn test_supply_exhaustion_ends_run() {
    let config = MatchConfig::new(GameMode::Solo)
        .with_health(500)
        .with_supply(only(RuneColor::Fire, 12));
    let state = round::start(config, 4).unwrap().state;
    let mut events = Vec::new();

    let state = penalty_round(state, &mut events);
    let state = score_round(state, &mut events);

    assert_eq!(state.phase, Phase::GameOver);
    assert_eq!(
        state.outcome,
        Some(MatchOutcome::RunEnded {
            cause: EliminationCause::SupplyExhausted
        })
    );
    assert_eq!(state.round, 1);
}

/// Scoring phases reject drafting and drafting phases reject advancing.
#[test]
fn test_phase_gates() {
    let state = round::start(MatchConfig::default(), 2).unwrap().state;
    assert!(round::advance(&state).is_err());
    assert!(round::apply(&state, state.active, &Action::StartNextRound).is_err());

    let mut events = Vec::new();
    let state = penalty_round(state, &mut events);
    let draft = Action::Draft(DraftAction {
        source: DraftSource::Center,
        color: RuneColor::Fire,
    });
    assert_eq!(
        round::apply(&state, state.active, &draft),
        Err(RuleError::IllegalMove(rune_forge::IllegalMove::WrongPhase(
            Phase::ScoringMovingToWall
        )))
    );
}

/// Healing is capped at max health; armor and fortune are credited in full.
#[test]
fn test_healing_phase_credits_power() {
    let mut state = at_wall_move(8);
    let (healer, banker) = (PlayerId::new(0), PlayerId::new(1));

    // Three isolated Life cells, one Frost and one Wind cell.
    stage_from_supply(&mut state, healer, RuneColor::Life, 1, 1);
    stage_from_supply(&mut state, healer, RuneColor::Life, 2, 2);
    stage_from_supply(&mut state, healer, RuneColor::Life, 3, 3);
    stage_from_supply(&mut state, banker, RuneColor::Frost, 1, 1);
    stage_from_supply(&mut state, banker, RuneColor::Wind, 2, 2);
    state.participants.get_mut(healer).health = 199;
    assert!(state.check_invariants().is_ok());

    while state.phase != Phase::ScoringHealing {
        state = round::advance(&state).unwrap().state;
    }
    let tally = state.tally.clone().unwrap();
    assert_eq!(tally[healer].power.healing, 3);
    assert_eq!(tally[banker].power.armor, 1);
    assert_eq!(tally[banker].power.fortune, 1);
    let before = state.participant(banker).clone();

    let step = round::advance(&state).unwrap();

    assert_eq!(step.state.phase, Phase::ScoringDamage);
    assert_eq!(step.state.participant(healer).health, 200);
    assert_eq!(step.state.participant(banker).armor, before.armor + 1);
    assert_eq!(step.state.participant(banker).currency, before.currency + 1);
    assert_eq!(step.state.participant(banker).health, before.health);
    assert!(step.events.contains(&MatchEvent::HealingApplied {
        owner: healer,
        amount: 1
    }));
    assert!(step.events.contains(&MatchEvent::ArmorGained {
        owner: banker,
        amount: 1
    }));
    assert!(step.events.contains(&MatchEvent::CurrencyGained {
        owner: banker,
        amount: 1
    }));
}

/// A line that is not full stays staged, anchor included, into the next round.
#[test]
fn test_partial_line_carries_over() {
    let mut state = at_wall_move(9);
    let owner = PlayerId::new(0);
    stage_from_supply(&mut state, owner, RuneColor::Life, 4, 2);
    let staged = state.participant(owner).line(4).unwrap().clone();
    assert!(staged.anchor.is_some());

    let state = score_round(state, &mut Vec::new());

    assert_eq!(state.phase, Phase::Draft);
    assert_eq!(state.round, 2);
    assert_eq!(state.participant(owner).line(4), Some(&staged));
    assert_eq!(state.participant(owner).grid.filled(), 0);
}

/// Damage reads the tally captured at the wall move, not the board as it
/// stands when the damage phase runs.
#[test]
fn test_damage_uses_wall_move_tally() {
    let mut state = at_wall_move(10);
    let (striker, target) = (PlayerId::new(0), PlayerId::new(1));
    stage_from_supply(&mut state, striker, RuneColor::Fire, 1, 1);

    state = round::advance(&state).unwrap().state;
    let tally = state.tally.clone().unwrap();
    assert_eq!(tally[striker].power.damage, 1);

    // A second Fire cell lands after the tally was taken.
    {
        let p = state.participants.get_mut(striker);
        let at = p.supply.iter().position(|t| t.color == RuneColor::Fire).unwrap();
        let extra = p.supply.remove(at);
        p.grid.place(1, extra).unwrap();
    }
    assert!(state.check_invariants().is_ok());

    let mut events = Vec::new();
    while state.phase != Phase::ScoringComplete {
        let step = round::advance(&state).unwrap();
        events.extend(step.events);
        state = step.state;
    }

    let hits = |source: DamageSource| -> u32 {
        events
            .iter()
            .filter_map(|e| match e {
                MatchEvent::DamageApplied {
                    target: DamageTarget::Participant(p),
                    source: s,
                    absorbed,
                    dealt,
                } if *p == target && *s == source => Some(absorbed + dealt),
                _ => None,
            })
            .sum()
    };
    assert_eq!(hits(DamageSource::Segments(striker)), 1);
    // The penalty area was emptied before damage; overload still uses its
    // size at the wall move.
    let penalty = u32::try_from(tally[target].penalty).unwrap();
    assert!(penalty > 0);
    assert_eq!(hits(DamageSource::Overload), penalty * 5);
}
