//! Mission session: phase sequencing, terminal resolution, archive handoff.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::archive::{MissionArchive, MissionRecord};
use crate::catalog::{BaseRecord, TargetRecord};
use crate::constants::{
    LOG_ABANDONED, LOG_ARCHIVE_FAILED, LOG_MARK_CAPTURED_FAILED, LOG_MARK_CAPTURED_OK,
};
use crate::drone::{DroneStats, Loadout, SupportDrone};
use crate::encounter::{ActionOutcome, DroneAction, DuckState, DuckTurnOutcome, EngagementState};
use crate::log::MissionLog;
use crate::rng::RngBundle;
use crate::transit::{TransitError, TransitPhase, TransitTickOutcome};
use crate::weapons::{BASELINE_LASER_ID, WeaponSpec, weapon_by_id};

/// Terminal status of a mission, in the archive's wire vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MissionStatus {
    #[serde(rename = "Sucesso - Pato Capturado")]
    Captured,
    #[serde(rename = "Falha - Drone Destruído")]
    DroneDestroyed,
    #[serde(rename = "Falha - Bateria Esgotada")]
    BatteryDepleted,
    #[serde(rename = "Falha - Alvo Fugiu")]
    TargetFled,
    #[serde(rename = "Falha - Alvo Escapou (Derrotado)")]
    TargetDestroyed,
    #[serde(rename = "Falha - Campo Estase")]
    StasisFailed,
    #[serde(rename = "Falha - Combustível Esgotado")]
    FuelExhausted,
    #[serde(rename = "Falha - Abandono")]
    Abandoned,
}

impl MissionStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Captured => "Sucesso - Pato Capturado",
            Self::DroneDestroyed => "Falha - Drone Destruído",
            Self::BatteryDepleted => "Falha - Bateria Esgotada",
            Self::TargetFled => "Falha - Alvo Fugiu",
            Self::TargetDestroyed => "Falha - Alvo Escapou (Derrotado)",
            Self::StasisFailed => "Falha - Campo Estase",
            Self::FuelExhausted => "Falha - Combustível Esgotado",
            Self::Abandoned => "Falha - Abandono",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Captured)
    }
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Final result handed to the Mission Archive exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionOutcome {
    pub status: MissionStatus,
    pub duration_seconds: u64,
    pub final_log: String,
}

/// Pre-launch configuration errors; rejected before any phase starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissionConfigError {
    #[error("limite de módulos excedido: {selected} selecionados (máximo 2)")]
    LoadoutLimitExceeded { selected: usize },
    #[error("arma especial desconhecida: {0}")]
    UnknownWeapon(String),
    #[error("{0} não é uma arma especial")]
    NotASpecialWeapon(String),
    #[error("alvo {0} já consta como capturado")]
    TargetAlreadyCaptured(String),
}

/// Runtime misuse of the session API.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MissionError {
    #[error("operação inválida para a fase atual")]
    PhaseMismatch,
    #[error("a missão já foi encerrada")]
    MissionOver,
    #[error(transparent)]
    Transit(#[from] TransitError),
}

/// Operator choices fixed before launch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissionPlan {
    pub target: TargetRecord,
    pub base: BaseRecord,
    #[serde(default)]
    pub loadout: Loadout,
    #[serde(default)]
    pub special_weapon: Option<String>,
    #[serde(default)]
    pub support: Option<SupportDrone>,
}

impl MissionPlan {
    /// Validate the plan and resolve the mounted special weapon.
    ///
    /// # Errors
    ///
    /// Rejects over-limit loadouts, unknown weapon ids, attempts to mount
    /// the baseline laser as the special slot, and already-captured targets.
    pub fn resolve(&self) -> Result<Option<&'static WeaponSpec>, MissionConfigError> {
        if !self.loadout.within_limit() {
            return Err(MissionConfigError::LoadoutLimitExceeded {
                selected: self.loadout.selected_count(),
            });
        }
        if self.target.captured {
            return Err(MissionConfigError::TargetAlreadyCaptured(
                self.target.id.clone(),
            ));
        }
        match &self.special_weapon {
            None => Ok(None),
            Some(id) if id == BASELINE_LASER_ID => {
                Err(MissionConfigError::NotASpecialWeapon(id.clone()))
            }
            Some(id) => weapon_by_id(id)
                .map(Some)
                .ok_or_else(|| MissionConfigError::UnknownWeapon(id.clone())),
        }
    }
}

/// Which phase the session is in, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionPhaseKind {
    Transit,
    Engagement,
    Complete,
}

#[derive(Debug, Clone)]
enum PhaseState {
    Transit(TransitPhase),
    Engagement(EngagementState),
    Complete,
}

/// One active mission from launch to terminal outcome.
///
/// Exactly one session is active at a time; both phases mutate the same
/// drone resource state and mission log. All stochastic branches draw from
/// the session's seeded [`RngBundle`].
#[derive(Debug, Clone)]
pub struct MissionSession {
    target: TargetRecord,
    base: BaseRecord,
    loadout: Loadout,
    weapon: Option<&'static WeaponSpec>,
    support: Option<SupportDrone>,
    seed: u64,
    rng: RngBundle,
    drone: DroneStats,
    log: MissionLog,
    phase: PhaseState,
    transit_arrived: bool,
    launched_at_ms: u64,
    engagement_started_at_ms: Option<u64>,
    outcome: Option<MissionOutcome>,
    archived: bool,
}

impl MissionSession {
    /// Validate the plan and launch into the transit phase.
    ///
    /// # Errors
    ///
    /// Returns a [`MissionConfigError`] if the plan is invalid.
    pub fn launch(plan: MissionPlan, seed: u64, now_ms: u64) -> Result<Self, MissionConfigError> {
        let weapon = plan.resolve()?;
        let MissionPlan {
            target,
            base,
            loadout,
            support,
            ..
        } = plan;

        let mut log = MissionLog::new();
        let drone = DroneStats::for_launch(loadout, &mut log);
        let transit = TransitPhase::new(&target, &base, &mut log);

        Ok(Self {
            target,
            base,
            loadout,
            weapon,
            support,
            seed,
            rng: RngBundle::from_user_seed(seed),
            drone,
            log,
            phase: PhaseState::Transit(transit),
            transit_arrived: false,
            launched_at_ms: now_ms,
            engagement_started_at_ms: None,
            outcome: None,
            archived: false,
        })
    }

    /// Advance the transit phase by one tick.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in transit or already over.
    pub fn transit_tick(&mut self, now_ms: u64) -> Result<TransitTickOutcome, MissionError> {
        self.ensure_open()?;
        let loadout = self.loadout;
        let PhaseState::Transit(transit) = &mut self.phase else {
            return Err(MissionError::PhaseMismatch);
        };
        if self.transit_arrived {
            return Ok(TransitTickOutcome::Arrived);
        }
        let outcome = transit.tick(&mut self.drone, loadout, &self.rng, &mut self.log);
        match outcome {
            TransitTickOutcome::Arrived => self.transit_arrived = true,
            TransitTickOutcome::Failed(status) => self.complete(status, None, now_ms),
            _ => {}
        }
        Ok(outcome)
    }

    /// Resolve the pending travel event with the chosen option.
    ///
    /// # Errors
    ///
    /// Fails when no event is pending or the option index is invalid.
    pub fn resolve_transit_event(
        &mut self,
        choice: usize,
        now_ms: u64,
    ) -> Result<(), MissionError> {
        self.ensure_open()?;
        let PhaseState::Transit(transit) = &mut self.phase else {
            return Err(MissionError::PhaseMismatch);
        };
        if let Some(status) = transit.resolve_event(choice, &mut self.drone, &mut self.log)? {
            self.complete(status, None, now_ms);
        }
        Ok(())
    }

    /// Trigger the transit nano-repair; returns whether it ran.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in transit.
    pub fn transit_repair(&mut self, now_ms: u64) -> Result<bool, MissionError> {
        self.ensure_open()?;
        let loadout = self.loadout;
        let PhaseState::Transit(transit) = &mut self.phase else {
            return Err(MissionError::PhaseMismatch);
        };
        Ok(transit.repair(&mut self.drone, loadout, now_ms, &mut self.log))
    }

    /// Surface the repair-ready notice once its wall-clock cooldown elapses.
    pub fn poll_repair_notice(&mut self, now_ms: u64) -> bool {
        match &mut self.phase {
            PhaseState::Transit(transit) => transit.poll_repair_ready(now_ms, &mut self.log),
            _ => false,
        }
    }

    /// Hand off from a completed transit into the engagement phase.
    ///
    /// # Errors
    ///
    /// Fails unless the transit phase has reached 100% progress.
    pub fn begin_engagement(&mut self, now_ms: u64) -> Result<(), MissionError> {
        self.ensure_open()?;
        if !matches!(self.phase, PhaseState::Transit(_)) || !self.transit_arrived {
            return Err(MissionError::PhaseMismatch);
        }
        let mut engagement = EngagementState::new(
            &self.target,
            self.weapon,
            self.support,
            &self.rng,
            &mut self.log,
        );
        self.engagement_started_at_ms = Some(now_ms);
        // A transit that drained the battery to zero fails on arrival.
        let terminal = engagement.resolve_terminal(&self.drone, &mut self.log);
        let final_log = engagement.final_log().map(str::to_owned);
        self.phase = PhaseState::Engagement(engagement);
        if let Some(status) = terminal {
            self.complete(status, final_log, now_ms);
        }
        Ok(())
    }

    /// Execute one drone action in the engagement phase.
    ///
    /// # Errors
    ///
    /// Fails when the session is not in the engagement phase or already over.
    pub fn drone_action(
        &mut self,
        action: DroneAction,
        now_ms: u64,
    ) -> Result<ActionOutcome, MissionError> {
        self.ensure_open()?;
        let loadout = self.loadout;
        let PhaseState::Engagement(engagement) = &mut self.phase else {
            return Err(MissionError::PhaseMismatch);
        };
        let outcome =
            engagement.drone_action(action, &mut self.drone, loadout, &self.rng, &mut self.log);
        if let ActionOutcome::Terminal(status) = outcome {
            let final_log = engagement.final_log().map(str::to_owned);
            self.complete(status, final_log, now_ms);
        }
        Ok(outcome)
    }

    /// Resolve the duck's turn (after the presentation delay).
    ///
    /// # Errors
    ///
    /// Fails when the session is not in the engagement phase or already over.
    pub fn duck_turn(&mut self, now_ms: u64) -> Result<DuckTurnOutcome, MissionError> {
        self.ensure_open()?;
        let PhaseState::Engagement(engagement) = &mut self.phase else {
            return Err(MissionError::PhaseMismatch);
        };
        let outcome = engagement.duck_turn(&mut self.drone, &self.rng, &mut self.log);
        if let DuckTurnOutcome::Terminal(status) = outcome {
            let final_log = engagement.final_log().map(str::to_owned);
            self.complete(status, final_log, now_ms);
        }
        Ok(outcome)
    }

    /// Abandon the mission at any point before a terminal outcome.
    ///
    /// Modeled as an immediate forced failure with a zero-second duration,
    /// going through the same archive path as every other ending.
    pub fn abandon(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        self.log.push(LOG_ABANDONED);
        self.outcome = Some(MissionOutcome {
            status: MissionStatus::Abandoned,
            duration_seconds: 0,
            final_log: LOG_ABANDONED.to_string(),
        });
        self.phase = PhaseState::Complete;
    }

    fn complete(&mut self, status: MissionStatus, final_log: Option<String>, now_ms: u64) {
        if self.outcome.is_some() {
            return;
        }
        // Duration counts from the engagement handoff; transit-only failures
        // fall back to time since launch.
        let started = self.engagement_started_at_ms.unwrap_or(self.launched_at_ms);
        let duration_seconds = now_ms.saturating_sub(started) / 1_000;
        let final_log = final_log
            .or_else(|| self.log.entries().last().cloned())
            .unwrap_or_default();
        self.outcome = Some(MissionOutcome {
            status,
            duration_seconds,
            final_log,
        });
        self.phase = PhaseState::Complete;
    }

    /// Hand the terminal outcome to the Mission Archive.
    ///
    /// Write-once: repeated calls after the first attempt are no-ops, so the
    /// terminal path can never double-write. An archive failure is non-fatal
    /// and surfaces as a distinct log line.
    pub fn archive_outcome<A: MissionArchive>(&mut self, archive: &A) -> bool {
        let Some(outcome) = self.outcome.clone() else {
            return false;
        };
        if self.archived {
            return false;
        }
        self.archived = true;

        if outcome.status.is_success() {
            match archive.mark_captured(&self.target.id) {
                Ok(()) => self.log.push(LOG_MARK_CAPTURED_OK),
                Err(_) => self.log.push(LOG_MARK_CAPTURED_FAILED),
            }
        }

        let record = MissionRecord {
            target_id: self.target.id.clone(),
            base_id: self.base.id.clone(),
            target_country: self.target.location.country.clone(),
            target_city: self.target.location.city.clone(),
            base_name: self.base.name.clone(),
            status: outcome.status.as_str().to_string(),
            duration_seconds: outcome.duration_seconds,
            log: self.log.entries().to_vec(),
        };
        match archive.record_mission(&record) {
            Ok(()) => true,
            Err(_) => {
                self.log.push(LOG_ARCHIVE_FAILED);
                false
            }
        }
    }

    fn ensure_open(&self) -> Result<(), MissionError> {
        if self.outcome.is_some() {
            return Err(MissionError::MissionOver);
        }
        Ok(())
    }

    #[must_use]
    pub const fn drone(&self) -> &DroneStats {
        &self.drone
    }

    #[must_use]
    pub const fn log(&self) -> &MissionLog {
        &self.log
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub const fn target(&self) -> &TargetRecord {
        &self.target
    }

    #[must_use]
    pub const fn base(&self) -> &BaseRecord {
        &self.base
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<&MissionOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub const fn phase_kind(&self) -> MissionPhaseKind {
        match self.phase {
            PhaseState::Transit(_) => MissionPhaseKind::Transit,
            PhaseState::Engagement(_) => MissionPhaseKind::Engagement,
            PhaseState::Complete => MissionPhaseKind::Complete,
        }
    }

    #[must_use]
    pub const fn transit(&self) -> Option<&TransitPhase> {
        match &self.phase {
            PhaseState::Transit(transit) => Some(transit),
            _ => None,
        }
    }

    #[must_use]
    pub const fn engagement(&self) -> Option<&EngagementState> {
        match &self.phase {
            PhaseState::Engagement(engagement) => Some(engagement),
            _ => None,
        }
    }

    /// The live duck state once the engagement has started.
    #[must_use]
    pub const fn duck(&self) -> Option<&DuckState> {
        match &self.phase {
            PhaseState::Engagement(engagement) => Some(engagement.duck()),
            _ => None,
        }
    }
}
