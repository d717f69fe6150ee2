//! Match driver: asks move sources for decisions and applies them.
//!
//! The driver holds the current state and pumps drafting, placement and
//! targeting until something needs the caller: a scoring phase (the caller
//! decides when to `advance`), a source that is still waiting, or the end of
//! the match. A rejected choice is reported as-is; the driver never retries.

use tracing::{debug, warn};

use super::source::{Decision, MoveSource};
use crate::core::{Action, MatchEvent, MatchOutcome, MatchState, PlayerId, Result, RuleError};
use crate::round::{self, Phase};

/// Why `pump` returned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PumpStatus {
    /// A scoring phase is waiting for `advance`.
    Scoring(Phase),
    /// The seat's source has no answer yet.
    Waiting(PlayerId),
    /// The seat's source reported an empty legal enumeration.
    NoLegalAction(PlayerId),
    /// The source's choice was illegal; the state is unchanged.
    Rejected {
        actor: PlayerId,
        action: Action,
        error: RuleError,
    },
    Finished(MatchOutcome),
}

#[derive(Clone, Debug)]
pub struct MatchDriver {
    state: MatchState,
    events: Vec<MatchEvent>,
}

impl MatchDriver {
    #[must_use]
    pub fn new(state: MatchState) -> Self {
        Self {
            state,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn into_state(self) -> MatchState {
        self.state
    }

    /// Drain the events collected since the last call.
    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply an action directly, e.g. a cancel from the UI.
    pub fn apply(&mut self, actor: PlayerId, action: Action) -> Result<()> {
        let step = round::apply(&self.state, actor, &action)?;
        self.state = step.state;
        self.events.extend(step.events);
        Ok(())
    }

    /// Perform the current scoring phase. Returns the phase reached.
    pub fn advance(&mut self) -> Result<Phase> {
        self.apply(self.state.active, Action::AdvanceScoring)?;
        Ok(self.state.phase)
    }

    /// Seat whose source is consulted next.
    #[must_use]
    pub fn acting(&self) -> PlayerId {
        match (self.state.phase, self.state.pending) {
            (Phase::Targeting, Some(pending)) => pending.owner,
            _ => self.state.active,
        }
    }

    /// Ask sources for decisions until one of the stop conditions.
    ///
    /// `sources` is indexed by seat.
    pub fn pump(&mut self, sources: &mut [&mut dyn MoveSource]) -> PumpStatus {
        loop {
            if let Some(outcome) = self.state.outcome {
                return PumpStatus::Finished(outcome);
            }
            if self.state.phase.is_scoring() {
                return PumpStatus::Scoring(self.state.phase);
            }

            let actor = self.acting();
            let Some(source) = sources.get_mut(actor.index()) else {
                return PumpStatus::Waiting(actor);
            };

            let state = &self.state;
            let decision = match (state.phase, &state.selection, &state.pending) {
                (Phase::Targeting, _, Some(pending)) => {
                    source.choose_target(state, pending).map(Action::ResolveTarget)
                }
                (Phase::Draft, Some(selection), _) => {
                    source.choose_placement(state, selection).map(Action::Place)
                }
                (Phase::Draft, None, _) => source.choose_draft(state, actor).map(Action::Draft),
                _ => Decision::Waiting,
            };

            let action = match decision {
                Decision::Act(action) => action,
                Decision::Waiting => return PumpStatus::Waiting(actor),
                Decision::NoLegalAction => return PumpStatus::NoLegalAction(actor),
            };

            debug!(%actor, ?action, "source decided");
            if let Err(error) = self.apply(actor, action) {
                warn!(%actor, ?action, %error, "source chose an illegal action");
                return PumpStatus::Rejected {
                    actor,
                    action,
                    error,
                };
            }
        }
    }

    /// Pump and advance scoring until the match ends or a source stops.
    ///
    /// Solo runs stop at `EncounterCleared`; call
    /// `apply(_, Action::StartNextEncounter)` to continue.
    pub fn run(&mut self, sources: &mut [&mut dyn MoveSource]) -> PumpStatus {
        loop {
            match self.pump(sources) {
                PumpStatus::Scoring(_) => {
                    if let Err(error) = self.advance() {
                        return PumpStatus::Rejected {
                            actor: self.state.active,
                            action: Action::AdvanceScoring,
                            error,
                        };
                    }
                }
                status => return status,
            }
        }
    }
}
