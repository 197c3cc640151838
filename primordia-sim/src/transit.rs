//! Transit phase: timed travel toward the target with random events.
//!
//! The phase is driven by an external tick cadence (see [`crate::driver`]);
//! each tick consumes fuel, may wear the hull, and may raise a travel event
//! that pauses progress until the operator resolves it. The nano-repair
//! action is the core's only wall-clock cooldown and is tracked here in
//! caller-supplied milliseconds.

use rand::Rng;
use thiserror::Error;

use crate::catalog::{BaseRecord, TargetRecord};
use crate::constants::{
    AI_ROUTE_FUEL_FACTOR, AI_ROUTE_PROGRESS_BONUS, ARMOR_FUEL_FACTOR, EXTRA_TANK_FUEL_FACTOR,
    GUARANTEED_EVENT_FIRST_PROGRESS, GUARANTEED_EVENT_SECOND_PROGRESS, LOG_REPAIR_ACTIVATED,
    LOG_REPAIR_LOW_BATTERY, LOG_REPAIR_READY, LOG_TRANSIT_ARRIVED, LOG_TRANSIT_FUEL_CRITICAL,
    LOG_TRANSIT_HULL_CRITICAL, RANDOM_EVENT_CHANCE, RANDOM_EVENT_CHANCE_CAMOUFLAGE,
    RANDOM_EVENT_MAX_PROGRESS, RANDOM_EVENT_MIN_PROGRESS, THRUSTER_FUEL_FACTOR,
    THRUSTER_INTEGRITY_WEAR, THRUSTER_PROGRESS_FACTOR, TICK_FUEL_BASE, TICK_PROGRESS_BASE,
    TRANSIT_EVENT_CAP, TRANSIT_REPAIR_BATTERY_COST, TRANSIT_REPAIR_COOLDOWN_MS,
    TRANSIT_REPAIR_INTEGRITY_GAIN,
};
use crate::drone::{DroneStats, Loadout};
use crate::events::{TRANSIT_EVENTS, TransitEvent};
use crate::geo::haversine_km;
use crate::log::MissionLog;
use crate::mission::MissionStatus;
use crate::numbers::{round_f64_to_i32, round_to_tenth};
use crate::rng::RngBundle;

/// Errors raised by invalid event interactions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitError {
    #[error("nenhum evento ativo para resolver")]
    NoActiveEvent,
    #[error("opção de evento inválida: {0}")]
    InvalidOption(usize),
}

/// Result of a single transit tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitTickOutcome {
    /// An unresolved event is pending; the tick did nothing.
    EventPending,
    /// Resources consumed and progress advanced.
    Advanced,
    /// An event fired; progress is paused until it is resolved.
    EventRaised,
    /// Progress reached 100%; hand off to the engagement phase.
    Arrived,
    /// Fuel or hull depleted mid-flight.
    Failed(MissionStatus),
}

/// State machine for the travel segment of a mission.
#[derive(Debug, Clone)]
pub struct TransitPhase {
    progress: i32,
    distance_km: i32,
    active_event: Option<&'static TransitEvent>,
    guaranteed_fired: u8,
    total_events: u8,
    repair_ready_at_ms: u64,
    repair_notice_pending: bool,
}

impl TransitPhase {
    /// Open the phase, computing the route distance and logging the departure.
    #[must_use]
    pub fn new(target: &TargetRecord, base: &BaseRecord, log: &mut MissionLog) -> Self {
        let distance = haversine_km(
            base.latitude,
            base.longitude,
            target.location.latitude,
            target.location.longitude,
        );
        let distance_km = round_f64_to_i32(distance);
        log.push(format!(
            "Iniciando voo. Distância total: {distance_km} km."
        ));
        Self {
            progress: 0,
            distance_km,
            active_event: None,
            guaranteed_fired: 0,
            total_events: 0,
            repair_ready_at_ms: 0,
            repair_notice_pending: false,
        }
    }

    #[must_use]
    pub const fn progress(&self) -> i32 {
        self.progress
    }

    #[must_use]
    pub const fn distance_km(&self) -> i32 {
        self.distance_km
    }

    #[must_use]
    pub const fn active_event(&self) -> Option<&'static TransitEvent> {
        self.active_event
    }

    #[must_use]
    pub const fn events_occurred(&self) -> u8 {
        self.total_events
    }

    /// Advance the phase by one tick.
    pub fn tick(
        &mut self,
        drone: &mut DroneStats,
        loadout: Loadout,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> TransitTickOutcome {
        if self.active_event.is_some() {
            return TransitTickOutcome::EventPending;
        }

        let (progress_delta, fuel_delta, integrity_delta) = tick_deltas(loadout);
        drone.add_fuel(-fuel_delta);
        drone.add_integrity(-integrity_delta);

        if let Some(status) = depletion_failure(drone, log) {
            return TransitTickOutcome::Failed(status);
        }

        if self.try_raise_event(loadout, rng, log) {
            return TransitTickOutcome::EventRaised;
        }

        self.progress = (self.progress + progress_delta).min(100);
        if self.progress >= 100 {
            log.push(LOG_TRANSIT_ARRIVED);
            return TransitTickOutcome::Arrived;
        }
        TransitTickOutcome::Advanced
    }

    /// Apply the chosen option of the pending event and clear it.
    ///
    /// # Errors
    ///
    /// Returns an error if no event is pending or the option index is out of
    /// range for it.
    pub fn resolve_event(
        &mut self,
        choice: usize,
        drone: &mut DroneStats,
        log: &mut MissionLog,
    ) -> Result<Option<MissionStatus>, TransitError> {
        let event = self.active_event.ok_or(TransitError::NoActiveEvent)?;
        let option = event
            .options
            .get(choice)
            .ok_or(TransitError::InvalidOption(choice))?;

        log.push(option.log);
        for delta in option.effects {
            drone.apply_delta(*delta);
        }
        self.active_event = None;
        Ok(depletion_failure(drone, log))
    }

    /// Trigger the mid-flight nano-repair. Returns whether it ran.
    ///
    /// Requires the repair module, 20% battery, hull below its cap, and the
    /// 15-second wall-clock cooldown to have elapsed.
    pub fn repair(
        &mut self,
        drone: &mut DroneStats,
        loadout: Loadout,
        now_ms: u64,
        log: &mut MissionLog,
    ) -> bool {
        if !loadout.repair || now_ms < self.repair_ready_at_ms {
            return false;
        }
        if drone.battery() < TRANSIT_REPAIR_BATTERY_COST {
            log.push(LOG_REPAIR_LOW_BATTERY);
            return false;
        }
        if drone.integrity() >= drone.max_integrity() {
            return false;
        }

        log.push(LOG_REPAIR_ACTIVATED);
        drone.add_battery(-TRANSIT_REPAIR_BATTERY_COST);
        drone.add_integrity(TRANSIT_REPAIR_INTEGRITY_GAIN);
        self.repair_ready_at_ms = now_ms + TRANSIT_REPAIR_COOLDOWN_MS;
        self.repair_notice_pending = true;
        true
    }

    /// Emit the "repair ready" notice once the cooldown has elapsed.
    pub fn poll_repair_ready(&mut self, now_ms: u64, log: &mut MissionLog) -> bool {
        if self.repair_notice_pending && now_ms >= self.repair_ready_at_ms {
            self.repair_notice_pending = false;
            log.push(LOG_REPAIR_READY);
            return true;
        }
        false
    }

    fn try_raise_event(&mut self, loadout: Loadout, rng: &RngBundle, log: &mut MissionLog) -> bool {
        if self.total_events >= TRANSIT_EVENT_CAP {
            return false;
        }

        let guaranteed_total = guaranteed_event_count(loadout);
        if self.guaranteed_fired < guaranteed_total {
            let due = (self.guaranteed_fired == 0
                && self.progress >= i32::from(GUARANTEED_EVENT_FIRST_PROGRESS))
                || (guaranteed_total == 2
                    && self.guaranteed_fired == 1
                    && self.progress >= i32::from(GUARANTEED_EVENT_SECOND_PROGRESS));
            if due {
                let event = draw_event(rng);
                log.push(format!("ALERTA: {}", event.title));
                self.active_event = Some(event);
                self.guaranteed_fired += 1;
                self.total_events += 1;
                return true;
            }
        }

        let chance = if loadout.camouflage {
            RANDOM_EVENT_CHANCE_CAMOUFLAGE
        } else {
            RANDOM_EVENT_CHANCE
        };
        let in_window = self.progress > i32::from(RANDOM_EVENT_MIN_PROGRESS)
            && self.progress < i32::from(RANDOM_EVENT_MAX_PROGRESS);
        if in_window && rng.event().gen_bool(chance) {
            let event = draw_event(rng);
            log.push(format!("ALERTA (Aleatório): {}", event.title));
            self.active_event = Some(event);
            self.total_events += 1;
            return true;
        }
        false
    }
}

/// Per-tick resource deltas after loadout multipliers, in application order:
/// AI route, armor, extra tank, thrusters.
fn tick_deltas(loadout: Loadout) -> (i32, f64, f64) {
    let mut progress = TICK_PROGRESS_BASE;
    let mut fuel = TICK_FUEL_BASE;
    let mut integrity = 0.0;

    if loadout.ai_route {
        fuel *= AI_ROUTE_FUEL_FACTOR;
        progress += AI_ROUTE_PROGRESS_BONUS;
    }
    if loadout.armor {
        fuel *= ARMOR_FUEL_FACTOR;
    }
    if loadout.extra_tank {
        fuel *= EXTRA_TANK_FUEL_FACTOR;
    }
    if loadout.thrusters {
        progress *= THRUSTER_PROGRESS_FACTOR;
        fuel *= THRUSTER_FUEL_FACTOR;
        integrity = THRUSTER_INTEGRITY_WEAR;
    }

    (round_f64_to_i32(progress), round_to_tenth(fuel), integrity)
}

/// Guaranteed events owed for the loadout: camouflage suppresses them all,
/// speed modules cut them to one, the stock configuration owes two.
const fn guaranteed_event_count(loadout: Loadout) -> u8 {
    if loadout.camouflage {
        0
    } else if loadout.ai_route || loadout.thrusters {
        1
    } else {
        2
    }
}

fn draw_event(rng: &RngBundle) -> &'static TransitEvent {
    let idx = rng.event().gen_range(0..TRANSIT_EVENTS.len());
    &TRANSIT_EVENTS[idx]
}

fn depletion_failure(drone: &DroneStats, log: &mut MissionLog) -> Option<MissionStatus> {
    if drone.integrity_depleted() {
        log.push(LOG_TRANSIT_HULL_CRITICAL);
        return Some(MissionStatus::DroneDestroyed);
    }
    if drone.fuel_depleted() {
        log.push(LOG_TRANSIT_FUEL_CRITICAL);
        return Some(MissionStatus::FuelExhausted);
    }
    None
}
