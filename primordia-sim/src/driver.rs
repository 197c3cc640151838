//! Timer-driven mission driver.
//!
//! The simulation core is pull-based; this driver owns the single timeline
//! that sequences it: the 2 s transit tick, the 1.5 s duck presentation
//! delay, and the 1.5 s outcome presentation delay. Callers advance it with
//! wall-clock milliseconds — the core never reads ambient time — so tests
//! can replay any schedule deterministically.

use crate::archive::MissionArchive;
use crate::constants::{DUCK_TURN_DELAY_MS, OUTCOME_DELAY_MS, TRANSIT_TICK_MS};
use crate::encounter::{ActionOutcome, DroneAction, DuckTurnOutcome};
use crate::mission::{MissionError, MissionSession, MissionStatus};
use crate::transit::TransitTickOutcome;

/// Operator input accepted by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCommand {
    /// Resolve the pending travel event with the given option.
    ResolveEvent(usize),
    /// Trigger the transit nano-repair.
    Repair,
    /// Execute a drone action in the engagement phase.
    Act(DroneAction),
    /// Abandon the mission immediately.
    Abandon,
}

/// Observable driver transitions, in firing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverSignal {
    /// A transit tick advanced progress to the given percentage.
    TransitProgress(i32),
    /// A travel event was raised and awaits an operator decision.
    EventRaised,
    /// The transit repair system finished recharging.
    RepairReady,
    /// Transit completed; the engagement phase is open for orders.
    EngagementStarted,
    /// The duck resolved its turn; the drone may act again.
    DuckResolved,
    /// The terminal outcome is presented to the operator.
    OutcomePresented(MissionStatus),
}

/// Explicit timer state; exactly one timer is pending at any moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    /// Transit running; next tick due at the stored instant.
    TransitTick { next_ms: u64 },
    /// A travel event is pending; the tick timer is paused.
    EventWait,
    /// Engagement: waiting for the operator's order.
    AwaitingOrders,
    /// Engagement: duck turn due after the presentation delay.
    DuckTurn { due_ms: u64 },
    /// Terminal outcome reached; presentation due at the stored instant.
    Outcome { due_ms: u64, status: MissionStatus },
    /// Mission over and presented.
    Finished,
}

/// Finite-state driver binding a [`MissionSession`] to its timeline and the
/// Mission Archive.
#[derive(Debug)]
pub struct MissionDriver<A: MissionArchive> {
    session: MissionSession,
    archive: A,
    state: TimerState,
}

impl<A: MissionArchive> MissionDriver<A> {
    /// Start driving a freshly launched session.
    #[must_use]
    pub fn new(session: MissionSession, archive: A, now_ms: u64) -> Self {
        Self {
            session,
            archive,
            state: TimerState::TransitTick {
                next_ms: now_ms + TRANSIT_TICK_MS,
            },
        }
    }

    #[must_use]
    pub const fn session(&self) -> &MissionSession {
        &self.session
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        matches!(self.state, TimerState::Finished)
    }

    /// Fire every timer due up to `now_ms`, in order.
    pub fn advance(&mut self, now_ms: u64) -> Vec<DriverSignal> {
        let mut signals = Vec::new();
        loop {
            match self.state {
                TimerState::TransitTick { next_ms } if next_ms <= now_ms => {
                    if self.session.poll_repair_notice(next_ms) {
                        signals.push(DriverSignal::RepairReady);
                    }
                    self.fire_transit_tick(next_ms, &mut signals);
                }
                TimerState::DuckTurn { due_ms } if due_ms <= now_ms => {
                    self.fire_duck_turn(due_ms, &mut signals);
                }
                TimerState::Outcome { due_ms, status } if due_ms <= now_ms => {
                    signals.push(DriverSignal::OutcomePresented(status));
                    self.state = TimerState::Finished;
                }
                _ => break,
            }
        }
        signals
    }

    /// Apply an operator command at the given instant.
    ///
    /// # Errors
    ///
    /// Propagates session-level rejections (wrong phase, invalid event
    /// option, mission already over).
    pub fn command(
        &mut self,
        command: OperatorCommand,
        now_ms: u64,
    ) -> Result<Vec<DriverSignal>, MissionError> {
        let mut signals = Vec::new();
        match command {
            OperatorCommand::Abandon => {
                if self.is_finished() {
                    return Err(MissionError::MissionOver);
                }
                self.session.abandon();
                self.enter_outcome(MissionStatus::Abandoned, now_ms);
            }
            OperatorCommand::ResolveEvent(choice) => {
                if self.state != TimerState::EventWait {
                    return Err(MissionError::PhaseMismatch);
                }
                self.session.resolve_transit_event(choice, now_ms)?;
                if let Some(outcome) = self.session.outcome() {
                    let status = outcome.status;
                    self.enter_outcome(status, now_ms);
                } else {
                    // Resume the tick cadence from the decision instant.
                    self.state = TimerState::TransitTick {
                        next_ms: now_ms + TRANSIT_TICK_MS,
                    };
                }
            }
            OperatorCommand::Repair => {
                if !matches!(
                    self.state,
                    TimerState::TransitTick { .. } | TimerState::EventWait
                ) {
                    return Err(MissionError::PhaseMismatch);
                }
                let _ = self.session.transit_repair(now_ms)?;
            }
            OperatorCommand::Act(action) => {
                if self.state != TimerState::AwaitingOrders {
                    return Err(MissionError::PhaseMismatch);
                }
                match self.session.drone_action(action, now_ms)? {
                    ActionOutcome::TurnTaken => {
                        self.state = TimerState::DuckTurn {
                            due_ms: now_ms + DUCK_TURN_DELAY_MS,
                        };
                    }
                    ActionOutcome::Terminal(status) => {
                        self.enter_outcome(status, now_ms);
                    }
                    ActionOutcome::TurnRetained | ActionOutcome::Rejected => {}
                }
            }
        }
        signals.extend(self.advance(now_ms));
        Ok(signals)
    }

    fn fire_transit_tick(&mut self, due_ms: u64, signals: &mut Vec<DriverSignal>) {
        match self.session.transit_tick(due_ms) {
            Ok(TransitTickOutcome::Advanced) => {
                let progress = self.session.transit().map_or(100, |t| t.progress());
                signals.push(DriverSignal::TransitProgress(progress));
                self.state = TimerState::TransitTick {
                    next_ms: due_ms + TRANSIT_TICK_MS,
                };
            }
            Ok(TransitTickOutcome::EventRaised | TransitTickOutcome::EventPending) => {
                signals.push(DriverSignal::EventRaised);
                self.state = TimerState::EventWait;
            }
            Ok(TransitTickOutcome::Arrived) => {
                if self.session.begin_engagement(due_ms).is_err() {
                    self.state = TimerState::Finished;
                } else if let Some(outcome) = self.session.outcome() {
                    // Arrived with depleted reserves: terminal on the spot.
                    let status = outcome.status;
                    self.enter_outcome(status, due_ms);
                } else {
                    signals.push(DriverSignal::EngagementStarted);
                    self.state = TimerState::AwaitingOrders;
                }
            }
            Ok(TransitTickOutcome::Failed(status)) => {
                self.enter_outcome(status, due_ms);
            }
            Err(_) => self.state = TimerState::Finished,
        }
    }

    fn fire_duck_turn(&mut self, due_ms: u64, signals: &mut Vec<DriverSignal>) {
        match self.session.duck_turn(due_ms) {
            Ok(DuckTurnOutcome::Terminal(status)) => {
                self.enter_outcome(status, due_ms);
            }
            Ok(DuckTurnOutcome::Acted | DuckTurnOutcome::Skipped) => {
                signals.push(DriverSignal::DuckResolved);
                self.state = TimerState::AwaitingOrders;
            }
            Err(_) => self.state = TimerState::Finished,
        }
    }

    /// Terminal handoff: archive immediately, present after the fixed delay.
    fn enter_outcome(&mut self, status: MissionStatus, now_ms: u64) {
        let _ = self.session.archive_outcome(&self.archive);
        self.state = TimerState::Outcome {
            due_ms: now_ms + OUTCOME_DELAY_MS,
            status,
        };
    }
}
