//! Transition functions: `(state, actor, action) -> Result<Step>`.
//!
//! ## Atomicity
//!
//! `apply` validates the input, clones it (O(1) with `im`), performs the
//! whole action on the clone and validates the result. Any error discards
//! the clone, so callers keep the untouched input.
//!
//! ## Externally pumped
//!
//! Nothing advances on its own. Scoring moves one phase per
//! `AdvanceScoring`, and each phase's work is done when leaving it:
//!
//! | leaving               | work                                              |
//! |-----------------------|---------------------------------------------------|
//! | `ScoringMovingToWall` | full lines → grid, round tally captured           |
//! | `ScoringClearingFloor`| penalty areas retired to spent piles              |
//! | `ScoringHealing`      | healing (capped), armor, fortune → currency       |
//! | `ScoringDamage`       | segment, encounter and overload damage            |
//! | `ScoringComplete`     | supply check, strain escalation, refill           |

use im::Vector;
use tracing::{debug, info, instrument};

use super::phase::Phase;
use super::strain::Strain;
use crate::board::{Encounter, Participant, StagingLine};
use crate::core::{
    Action, ActionRecord, DamageSource, DamageTarget, DraftAction, DraftSource, EliminationCause,
    GameMode, GameRng, IllegalMove, InvariantViolation, MatchConfig, MatchEvent, MatchOutcome,
    MatchState, PendingTarget, PlacementTarget, PlayerId, PlayerMap, Result, RoundTally, RuleError,
    Selection, TargetAction,
};
use crate::pools::{refill_forges, CenterPool, Forge};
use crate::rules::{check_draft, check_placement, check_target, has_legal_draft};
use crate::runes::{Token, TokenId, TokenIdAllocator};
use crate::scoring::score_grid;

/// Result of a successful transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub state: MatchState,
    /// What changed, in order.
    pub events: Vec<MatchEvent>,
}

fn token_ids(tokens: &Vector<Token>) -> Vec<TokenId> {
    tokens.iter().map(|t| t.id).collect()
}

fn set_phase(state: &mut MatchState, to: Phase, events: &mut Vec<MatchEvent>) {
    let from = state.phase;
    if from != to {
        state.phase = to;
        events.push(MatchEvent::PhaseChanged { from, to });
    }
}

/// Fill every forge from its owner's supply; draws nothing on failure.
fn refill(state: &mut MatchState) -> std::result::Result<usize, Vec<PlayerId>> {
    let tokens_per_forge = state.config.tokens_per_forge;
    let MatchState {
        forges,
        participants,
        ..
    } = state;
    refill_forges(
        forges,
        participants.iter_mut().map(|(id, p)| (id, &mut p.supply)),
        tokens_per_forge,
    )
}

// =============================================================================
// Match start
// =============================================================================

/// Seat participants, build and shuffle supplies, fill the first forges.
#[instrument(skip(config), fields(mode = ?config.mode, board = config.board_size))]
pub fn start(config: MatchConfig, seed: u64) -> Result<Step> {
    config.validate()?;

    let rng = GameRng::new(seed);
    let mut ids = TokenIdAllocator::new();
    let count = config.participant_count();

    let supplies: Vec<Vector<Token>> = PlayerId::all(count)
        .map(|player| {
            let mut tokens = config.supply.build(config.board_size, &mut ids);
            rng.for_context(&format!("supply-{}", player.index()))
                .shuffle(&mut tokens);
            tokens.into_iter().collect()
        })
        .collect();
    let token_total = supplies.iter().map(Vector::len).sum();

    let participants = PlayerMap::new(count, |id| {
        Participant::new(id, &config, supplies[id.index()].clone())
    });
    let forges: Vector<Forge> = PlayerId::all(count)
        .flat_map(|owner| std::iter::repeat(owner).take(config.forges_per_participant))
        .map(Forge::new)
        .collect();
    let encounter = (config.mode == GameMode::Solo).then(|| Encounter::from_config(&config, 0));
    let strain = Strain::new(&config.strain);

    let mut state = MatchState {
        config,
        round: 1,
        phase: Phase::Draft,
        active: PlayerId::new(0),
        starting: PlayerId::new(0),
        participants,
        forges,
        center: CenterPool::new(),
        selection: None,
        pending: None,
        strain,
        tally: None,
        encounter,
        outcome: None,
        token_total,
        rng,
        history: Vector::new(),
    };

    let drawn = refill(&mut state).map_err(|exhausted| {
        RuleError::InvalidConfig(format!(
            "supply of {exhausted:?} cannot fill the first round"
        ))
    })?;
    state.check_invariants()?;

    info!(token_total, participants = count, "match started");
    let events = vec![
        MatchEvent::ForgesRefilled { drawn },
        MatchEvent::RoundStarted {
            round: 1,
            first: state.active,
        },
    ];
    Ok(Step { state, events })
}

/// Start from the inbound `(mode, board size, participant count)` triple.
pub fn start_match(
    mode: GameMode,
    board_size: usize,
    participant_count: usize,
    seed: u64,
) -> Result<Step> {
    if participant_count != mode.participant_count() {
        return Err(RuleError::InvalidConfig(format!(
            "{mode:?} seats {} participants, not {participant_count}",
            mode.participant_count()
        )));
    }
    start(MatchConfig::new(mode).with_board_size(board_size), seed)
}

// =============================================================================
// Dispatch
// =============================================================================

/// Apply `action` by `actor` to `state`.
///
/// On success returns the next state and what changed. On error `state` is
/// unchanged and nothing is returned besides the error.
#[instrument(skip(state), fields(round = state.round, phase = ?state.phase))]
pub fn apply(state: &MatchState, actor: PlayerId, action: &Action) -> Result<Step> {
    state.check_invariants()?;

    if !state.participants.contains(actor) {
        return Err(IllegalMove::OutOfTurn {
            actor,
            expected: state.active,
        }
        .into());
    }
    let continues_run =
        *action == Action::StartNextEncounter && state.outcome.is_some_and(|o| !o.is_final());
    if state.is_terminal() && !continues_run {
        return Err(RuleError::MatchTerminal);
    }

    let mut next = state.clone();
    let mut events = Vec::new();

    match *action {
        Action::Draft(draft) => draft_tokens(&mut next, actor, draft, &mut events)?,
        Action::Place(target) => place_selection(&mut next, actor, target, &mut events)?,
        Action::CancelSelection => cancel_selection(&mut next, actor, &mut events)?,
        Action::ResolveTarget(target) => resolve_target(&mut next, actor, target, &mut events)?,
        Action::AdvanceScoring => advance_scoring(&mut next, &mut events)?,
        Action::StartNextRound => {
            if next.phase != Phase::ScoringComplete {
                return Err(IllegalMove::WrongPhase(next.phase).into());
            }
            complete_round(&mut next, &mut events);
        }
        Action::StartNextEncounter => start_next_encounter(&mut next, &mut events)?,
    }

    let sequence = u32::try_from(next.history.len()).unwrap_or(u32::MAX);
    next.history
        .push_back(ActionRecord::new(actor, *action, state.round, sequence));
    next.check_invariants()?;

    debug!(?action, %actor, events = events.len(), "applied");
    Ok(Step {
        state: next,
        events,
    })
}

/// Advance the current scoring phase.
pub fn advance(state: &MatchState) -> Result<Step> {
    apply(state, state.active, &Action::AdvanceScoring)
}

fn require_draft_turn(state: &MatchState, actor: PlayerId) -> Result<()> {
    match state.phase {
        Phase::Draft => {}
        Phase::Targeting => return Err(IllegalMove::TargetPending.into()),
        other => return Err(IllegalMove::WrongPhase(other).into()),
    }
    if actor != state.active {
        return Err(IllegalMove::OutOfTurn {
            actor,
            expected: state.active,
        }
        .into());
    }
    Ok(())
}

// =============================================================================
// Draft phase
// =============================================================================

fn draft_tokens(
    state: &mut MatchState,
    actor: PlayerId,
    draft: DraftAction,
    events: &mut Vec<MatchEvent>,
) -> Result<()> {
    require_draft_turn(state, actor)?;
    check_draft(state, actor, &draft)?;

    let center_before = state.center.tokens.clone();
    let (tokens, forge_before) = match draft.source {
        DraftSource::Forge(index) => {
            let forge = state
                .forges
                .get_mut(index)
                .ok_or(IllegalMove::UnknownForge(index))?;
            let before = forge.tokens.clone();
            let (drafted, leftover) = forge
                .draft(draft.color)
                .ok_or(IllegalMove::ColorAbsent(draft.color))?;
            if !leftover.is_empty() {
                events.push(MatchEvent::TokensToCenter {
                    forge: index,
                    tokens: token_ids(&leftover),
                });
                state.center.receive(leftover);
            }
            (drafted, before)
        }
        DraftSource::Center => {
            let taken = state
                .center
                .take_color(draft.color)
                .ok_or(IllegalMove::ColorAbsent(draft.color))?;
            (taken, Vector::new())
        }
    };

    debug!(%actor, color = %draft.color, count = tokens.len(), "drafted");
    events.push(MatchEvent::TokensDrafted {
        player: actor,
        source: draft.source,
        color: draft.color,
        tokens: token_ids(&tokens),
    });
    state.selection = Some(Selection {
        owner: actor,
        color: draft.color,
        tokens,
        source: draft.source,
        forge_before,
        center_before,
    });
    Ok(())
}

fn cancel_selection(state: &mut MatchState, actor: PlayerId, events: &mut Vec<MatchEvent>) -> Result<()> {
    require_draft_turn(state, actor)?;
    let selection = state.selection.take().ok_or(IllegalMove::NoSelection)?;

    if let DraftSource::Forge(index) = selection.source {
        let forge = state
            .forges
            .get_mut(index)
            .ok_or(IllegalMove::UnknownForge(index))?;
        forge.tokens = selection.forge_before;
    }
    state.center.tokens = selection.center_before;

    events.push(MatchEvent::SelectionCancelled {
        player: actor,
        source: selection.source,
    });
    Ok(())
}

fn place_selection(
    state: &mut MatchState,
    actor: PlayerId,
    target: PlacementTarget,
    events: &mut Vec<MatchEvent>,
) -> Result<()> {
    require_draft_turn(state, actor)?;
    let color = state
        .selection
        .as_ref()
        .ok_or(IllegalMove::NoSelection)?
        .color;
    check_placement(state.participant(actor), target, color)?;
    let selection = state.selection.take().ok_or(IllegalMove::NoSelection)?;

    let participant = state.participants.get_mut(actor);
    let channel = match target {
        PlacementTarget::Line(line) => {
            let staging = participant
                .line_mut(line)
                .ok_or(IllegalMove::LineOutOfRange(line))?;
            let (staged, overflow) = staging.stage(selection.tokens);
            events.push(MatchEvent::TokensStaged {
                player: actor,
                line,
                tokens: token_ids(&staged),
            });
            if !overflow.is_empty() {
                events.push(MatchEvent::TokensOverflowed {
                    player: actor,
                    tokens: token_ids(&overflow),
                });
                participant.penalty.add(overflow);
            }
            staged.iter().find_map(Token::channel)
        }
        PlacementTarget::Penalty => {
            events.push(MatchEvent::TokensOverflowed {
                player: actor,
                tokens: token_ids(&selection.tokens),
            });
            participant.penalty.add(selection.tokens);
            None
        }
    };

    match channel.filter(|_| state.mode() == GameMode::Versus) {
        Some(kind) => {
            debug!(%actor, ?kind, "targeted effect pending");
            state.pending = Some(PendingTarget { owner: actor, kind });
            set_phase(state, Phase::Targeting, events);
            events.push(MatchEvent::TargetedEffectPending {
                player: actor,
                kind,
            });
        }
        None => end_turn(state, events),
    }
    Ok(())
}

fn resolve_target(
    state: &mut MatchState,
    actor: PlayerId,
    action: TargetAction,
    events: &mut Vec<MatchEvent>,
) -> Result<()> {
    match state.phase {
        Phase::Targeting => {}
        Phase::Draft => return Err(IllegalMove::NoPendingTarget.into()),
        other => return Err(IllegalMove::WrongPhase(other).into()),
    }
    let pending = state.pending.ok_or(IllegalMove::NoPendingTarget)?;
    if actor != pending.owner {
        return Err(IllegalMove::OutOfTurn {
            actor,
            expected: pending.owner,
        }
        .into());
    }
    check_target(state, &pending, action)?;

    let foe = pending.owner.opponent();
    match action {
        TargetAction::Destroy { line } => {
            let opponent = state.participants.get_mut(foe);
            let token = opponent
                .line_mut(line)
                .and_then(StagingLine::remove_last)
                .ok_or(IllegalMove::InvalidTarget)?;
            events.push(MatchEvent::TokenDestroyed {
                owner: foe,
                line,
                token: token.id,
            });
            opponent.spent.push_back(token);
        }
        TargetAction::Freeze { line } => {
            let staging = state
                .participants
                .get_mut(foe)
                .line_mut(line)
                .ok_or(IllegalMove::InvalidTarget)?;
            staging.frozen = true;
            events.push(MatchEvent::LineFrozen { owner: foe, line });
        }
        TargetAction::Skip => events.push(MatchEvent::TargetSkipped { player: actor }),
    }

    state.pending = None;
    set_phase(state, Phase::Draft, events);
    end_turn(state, events);
    Ok(())
}

/// Pass the turn after a committed placement, or close the draft.
///
/// In versus the turn goes to the opponent if it can draft; otherwise the
/// same participant drafts again.
fn end_turn(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    if state.pools_empty() {
        info!(round = state.round, "pools empty, scoring");
        set_phase(state, Phase::ScoringMovingToWall, events);
        return;
    }

    let current = state.active;
    let next = match state.mode() {
        GameMode::Solo => current,
        GameMode::Versus if has_legal_draft(state, current.opponent()) => current.opponent(),
        GameMode::Versus => current,
    };
    if next != current {
        state.active = next;
        events.push(MatchEvent::TurnPassed {
            from: current,
            to: next,
        });
    }
}

// =============================================================================
// Scoring phases
// =============================================================================

fn advance_scoring(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Result<()> {
    match state.phase {
        Phase::ScoringMovingToWall => move_to_wall(state, events)?,
        Phase::ScoringClearingFloor => clear_floor(state, events),
        Phase::ScoringHealing => apply_healing(state, events)?,
        Phase::ScoringDamage => {
            if let Some(outcome) = apply_damage(state, events)? {
                finish(state, outcome, events);
                return Ok(());
            }
        }
        // Sets its own phase: the next round's draft, or game over.
        Phase::ScoringComplete => {
            complete_round(state, events);
            return Ok(());
        }
        Phase::Targeting => return Err(IllegalMove::TargetPending.into()),
        other => return Err(IllegalMove::WrongPhase(other).into()),
    }
    if let Some(next) = state.phase.next_scoring() {
        set_phase(state, next, events);
    }
    Ok(())
}

fn current_tally(state: &MatchState) -> Result<PlayerMap<RoundTally>> {
    state
        .tally
        .clone()
        .ok_or_else(|| InvariantViolation::MissingTally(state.phase).into())
}

fn move_to_wall(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Result<()> {
    let owners: Vec<PlayerId> = state.participants.player_ids().collect();
    for owner in owners {
        let participant = state.participants.get_mut(owner);
        for row in 0..participant.lines.len() {
            if !participant.lines[row].is_full() {
                continue;
            }
            let (anchor, rest) = participant.lines[row].clear();
            participant.spent.append(rest);
            let Some(anchor) = anchor else { continue };

            let token = anchor.id;
            let col = participant.grid.column_for(anchor.color, row);
            if participant.grid.place(row, anchor).is_err() {
                return Err(InvariantViolation::MisplacedCell { owner, row, col }.into());
            }
            events.push(MatchEvent::TokenToGrid {
                owner,
                row,
                col,
                token,
            });
        }
    }

    let strain = state.strain.value;
    let tally = PlayerMap::new(state.participant_count(), |id| {
        let participant = state.participant(id);
        RoundTally {
            penalty: participant.penalty.len(),
            power: score_grid(&participant.grid).total,
            strain,
        }
    });
    for (owner, entry) in tally.iter() {
        debug!(%owner, power = entry.power.total(), penalty = entry.penalty, "round tally");
    }
    state.tally = Some(tally);
    Ok(())
}

fn clear_floor(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    for (owner, participant) in state.participants.iter_mut() {
        let cleared = participant.penalty.drain();
        if cleared.is_empty() {
            continue;
        }
        events.push(MatchEvent::PenaltyCleared {
            owner,
            count: cleared.len(),
        });
        participant.spent.append(cleared);
    }
}

fn apply_healing(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Result<()> {
    let tally = current_tally(state)?;
    for (owner, entry) in tally.iter() {
        let participant = state.participants.get_mut(owner);
        let power = entry.power;

        let healed = participant.heal(power.healing);
        if healed > 0 {
            events.push(MatchEvent::HealingApplied {
                owner,
                amount: healed,
            });
        }
        if power.armor > 0 {
            participant.armor = participant.armor.saturating_add(power.armor);
            events.push(MatchEvent::ArmorGained {
                owner,
                amount: power.armor,
            });
        }
        if power.fortune > 0 {
            participant.currency = participant.currency.saturating_add(power.fortune);
            events.push(MatchEvent::CurrencyGained {
                owner,
                amount: power.fortune,
            });
        }
    }
    Ok(())
}

fn hit_participant(
    state: &mut MatchState,
    owner: PlayerId,
    amount: u32,
    source: DamageSource,
    events: &mut Vec<MatchEvent>,
) {
    if amount == 0 {
        return;
    }
    let report = state.participants.get_mut(owner).take_damage(amount);
    events.push(MatchEvent::DamageApplied {
        target: DamageTarget::Participant(owner),
        source,
        absorbed: report.absorbed,
        dealt: report.dealt,
    });
}

/// Apply the round's damage from the tally. Returns the outcome if anyone
/// fell.
fn apply_damage(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Result<Option<MatchOutcome>> {
    let tally = current_tally(state)?;
    let cap = state.config.strain.max_mitigation_percent;
    let overload = |entry: &RoundTally| {
        Strain {
            value: entry.strain,
            ..state.strain
        }
        .overload_damage(entry.penalty, entry.power.ward, cap)
    };
    let overloads: Vec<(PlayerId, u32)> = tally.iter().map(|(id, entry)| (id, overload(entry))).collect();

    match state.mode() {
        GameMode::Versus => {
            for (owner, overload) in overloads {
                let foe = owner.opponent();
                hit_participant(state, owner, tally[foe].power.damage, DamageSource::Segments(foe), events);
                hit_participant(state, owner, overload, DamageSource::Overload, events);
            }

            let fallen: Vec<PlayerId> = state
                .participants
                .iter()
                .filter(|(_, p)| !p.is_alive())
                .map(|(id, _)| id)
                .collect();
            Ok(match fallen.as_slice() {
                [] => None,
                [loser] => Some(MatchOutcome::Winner {
                    player: loser.opponent(),
                    cause: EliminationCause::Health,
                }),
                _ => Some(MatchOutcome::Draw {
                    cause: EliminationCause::Health,
                }),
            })
        }
        GameMode::Solo => {
            let owner = PlayerId::new(0);
            let power = tally[owner].power;

            let mut attack = 0;
            if let Some(encounter) = state.encounter.as_mut() {
                attack = encounter.attack;
                if power.damage > 0 {
                    let dealt = encounter.take_damage(power.damage);
                    events.push(MatchEvent::DamageApplied {
                        target: DamageTarget::Encounter,
                        source: DamageSource::Segments(owner),
                        absorbed: 0,
                        dealt,
                    });
                }
            }
            hit_participant(state, owner, attack, DamageSource::Encounter, events);
            for (owner, overload) in overloads {
                hit_participant(state, owner, overload, DamageSource::Overload, events);
            }

            let encounter_down = state.encounter.as_ref().is_some_and(Encounter::is_defeated);
            Ok(if !state.participant(owner).is_alive() {
                Some(MatchOutcome::RunEnded {
                    cause: EliminationCause::Health,
                })
            } else if encounter_down {
                Some(MatchOutcome::EncounterCleared)
            } else {
                None
            })
        }
    }
}

fn finish(state: &mut MatchState, outcome: MatchOutcome, events: &mut Vec<MatchEvent>) {
    info!(?outcome, round = state.round, "match ended");
    state.outcome = Some(outcome);
    state.tally = None;
    set_phase(state, Phase::GameOver, events);
    events.push(MatchEvent::MatchEnded { outcome });
}

/// Leave `ScoringComplete`: refill or end on exhausted supply.
fn complete_round(state: &mut MatchState, events: &mut Vec<MatchEvent>) {
    let drawn = match refill(state) {
        Ok(drawn) => drawn,
        Err(exhausted) => {
            let outcome = match (state.mode(), exhausted.as_slice()) {
                (GameMode::Solo, _) => MatchOutcome::RunEnded {
                    cause: EliminationCause::SupplyExhausted,
                },
                (GameMode::Versus, [loser]) => MatchOutcome::Winner {
                    player: loser.opponent(),
                    cause: EliminationCause::SupplyExhausted,
                },
                (GameMode::Versus, _) => MatchOutcome::Draw {
                    cause: EliminationCause::SupplyExhausted,
                },
            };
            finish(state, outcome, events);
            return;
        }
    };
    events.push(MatchEvent::ForgesRefilled { drawn });

    let strain = state.strain.escalate();
    events.push(MatchEvent::StrainEscalated { value: strain });

    for (_, participant) in state.participants.iter_mut() {
        for line in participant.lines.iter_mut() {
            line.frozen = false;
        }
    }
    state.tally = None;
    state.round += 1;
    if state.mode() == GameMode::Versus {
        state.starting = state.starting.opponent();
    }
    state.active = state.starting;

    info!(round = state.round, strain, first = %state.active, "round started");
    set_phase(state, Phase::Draft, events);
    events.push(MatchEvent::RoundStarted {
        round: state.round,
        first: state.active,
    });
}

// =============================================================================
// Solo run
// =============================================================================

/// Continue a solo run with the next, stronger encounter.
///
/// Health, armor, currency and the grid carry over. Every other rune goes
/// back into the supply, which is reshuffled.
fn start_next_encounter(state: &mut MatchState, events: &mut Vec<MatchEvent>) -> Result<()> {
    if state.mode() != GameMode::Solo {
        return Err(IllegalMove::NotSolo.into());
    }
    match state.outcome {
        Some(MatchOutcome::EncounterCleared) => {}
        Some(_) => return Err(RuleError::MatchTerminal),
        None => return Err(IllegalMove::EncounterNotCleared.into()),
    }

    let mut returned: Vec<Token> = Vec::new();
    for forge in state.forges.iter_mut() {
        returned.extend(std::mem::take(&mut forge.tokens));
    }
    returned.extend(std::mem::take(&mut state.center.tokens));
    if let Some(selection) = state.selection.take() {
        returned.extend(selection.tokens);
    }
    state.pending = None;

    let owner = PlayerId::new(0);
    let participant = state.participants.get_mut(owner);
    for line in participant.lines.iter_mut() {
        let (anchor, rest) = line.clear();
        returned.extend(anchor);
        returned.extend(rest);
        line.frozen = false;
    }
    returned.extend(participant.penalty.drain());
    returned.extend(std::mem::take(&mut participant.spent));
    returned.extend(std::mem::take(&mut participant.supply));

    state.rng.shuffle(&mut returned);
    state.participants.get_mut(owner).supply = returned.into_iter().collect();

    let index = state.encounter.as_ref().map_or(0, |e| e.index + 1);
    state.encounter = Some(Encounter::from_config(&state.config, index));
    state.strain = Strain::new(&state.config.strain);
    state.round = 1;
    state.tally = None;
    state.outcome = None;
    state.active = owner;
    state.starting = owner;
    set_phase(state, Phase::Draft, events);

    match refill(state) {
        Ok(drawn) => {
            info!(encounter = index, "encounter started");
            events.push(MatchEvent::ForgesRefilled { drawn });
            events.push(MatchEvent::RoundStarted {
                round: 1,
                first: owner,
            });
        }
        Err(_) => finish(
            state,
            MatchOutcome::RunEnded {
                cause: EliminationCause::SupplyExhausted,
            },
            events,
        ),
    }
    Ok(())
}
