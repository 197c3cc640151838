//! Drone resource state and pre-mission loadout.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ARMOR_MAX_INTEGRITY, EXTRA_TANK_MAX_FUEL, LAUNCH_AI_BATTERY_COST,
    LAUNCH_ARMOR_FUEL_COST, LAUNCH_ARMOR_INTEGRITY_GAIN, LAUNCH_CAMOUFLAGE_BATTERY_COST,
    LAUNCH_CARGO_BATTERY_COST, LAUNCH_REPAIR_BATTERY_COST, LAUNCH_TANK_FUEL_GAIN,
    LAUNCH_TANK_INTEGRITY_COST, LOADOUT_MODULE_LIMIT, LOG_EQUIP_AI_ROUTE, LOG_EQUIP_ARMOR,
    LOG_EQUIP_CAMOUFLAGE, LOG_EQUIP_CARGO, LOG_EQUIP_EXTRA_TANK, LOG_EQUIP_REPAIR,
    STAT_MAX_DEFAULT,
};
use crate::events::{StatDelta, StatKind};
use crate::log::MissionLog;

/// Optional modules mounted on the drone before launch.
///
/// At most [`LOADOUT_MODULE_LIMIT`] modules may be selected; the limit is
/// enforced when a mission plan is validated, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    #[serde(default)]
    pub extra_tank: bool,
    #[serde(default)]
    pub armor: bool,
    #[serde(default)]
    pub cargo_drone: bool,
    #[serde(default)]
    pub camouflage: bool,
    #[serde(default)]
    pub repair: bool,
    #[serde(default)]
    pub ai_route: bool,
    #[serde(default)]
    pub thrusters: bool,
}

impl Loadout {
    /// Number of modules selected.
    #[must_use]
    pub const fn selected_count(self) -> usize {
        self.extra_tank as usize
            + self.armor as usize
            + self.cargo_drone as usize
            + self.camouflage as usize
            + self.repair as usize
            + self.ai_route as usize
            + self.thrusters as usize
    }

    /// Whether the selection respects the module limit.
    #[must_use]
    pub const fn within_limit(self) -> bool {
        self.selected_count() <= LOADOUT_MODULE_LIMIT
    }
}

/// One-shot tactical support chosen before launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportDrone {
    /// +20% battery.
    Battery,
    /// +25% integrity.
    Repair,
    /// +15% fuel.
    Refuel,
}

impl SupportDrone {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Battery => "energia",
            Self::Repair => "integridade",
            Self::Refuel => "combustivel",
        }
    }
}

/// Mutable drone resource state shared by both mission phases.
///
/// Fields are private so every mutation goes through a clamping accessor;
/// no caller can observe a stat outside `[0, max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneStats {
    integrity: f64,
    battery: f64,
    fuel: f64,
    max_integrity: f64,
    max_battery: f64,
    max_fuel: f64,
}

impl Default for DroneStats {
    fn default() -> Self {
        Self {
            integrity: STAT_MAX_DEFAULT,
            battery: STAT_MAX_DEFAULT,
            fuel: STAT_MAX_DEFAULT,
            max_integrity: STAT_MAX_DEFAULT,
            max_battery: STAT_MAX_DEFAULT,
            max_fuel: STAT_MAX_DEFAULT,
        }
    }
}

impl DroneStats {
    /// Build launch-ready stats: loadout raises the caps, applies the
    /// equipment stat deltas and logs each equipped module.
    #[must_use]
    pub fn for_launch(loadout: Loadout, log: &mut MissionLog) -> Self {
        let mut stats = Self::default();
        if loadout.armor {
            stats.max_integrity = ARMOR_MAX_INTEGRITY;
        }
        if loadout.extra_tank {
            stats.max_fuel = EXTRA_TANK_MAX_FUEL;
        }

        log.push(crate::constants::LOG_LAUNCH);
        if loadout.extra_tank {
            stats.add_fuel(LAUNCH_TANK_FUEL_GAIN);
            stats.add_integrity(-LAUNCH_TANK_INTEGRITY_COST);
            log.push(LOG_EQUIP_EXTRA_TANK);
        }
        if loadout.armor {
            stats.add_integrity(LAUNCH_ARMOR_INTEGRITY_GAIN);
            stats.add_fuel(-LAUNCH_ARMOR_FUEL_COST);
            log.push(LOG_EQUIP_ARMOR);
        }
        if loadout.cargo_drone {
            stats.add_battery(-LAUNCH_CARGO_BATTERY_COST);
            log.push(LOG_EQUIP_CARGO);
        }
        if loadout.camouflage {
            stats.add_battery(-LAUNCH_CAMOUFLAGE_BATTERY_COST);
            log.push(LOG_EQUIP_CAMOUFLAGE);
        }
        if loadout.repair {
            stats.add_battery(-LAUNCH_REPAIR_BATTERY_COST);
            log.push(LOG_EQUIP_REPAIR);
        }
        if loadout.ai_route {
            stats.add_battery(-LAUNCH_AI_BATTERY_COST);
            log.push(LOG_EQUIP_AI_ROUTE);
        }
        stats
    }

    #[must_use]
    pub const fn integrity(&self) -> f64 {
        self.integrity
    }

    #[must_use]
    pub const fn battery(&self) -> f64 {
        self.battery
    }

    #[must_use]
    pub const fn fuel(&self) -> f64 {
        self.fuel
    }

    #[must_use]
    pub const fn max_integrity(&self) -> f64 {
        self.max_integrity
    }

    #[must_use]
    pub const fn max_battery(&self) -> f64 {
        self.max_battery
    }

    #[must_use]
    pub const fn max_fuel(&self) -> f64 {
        self.max_fuel
    }

    /// Adjust integrity, clamped to `[0, max]`.
    pub fn add_integrity(&mut self, delta: f64) {
        self.integrity = (self.integrity + delta).clamp(0.0, self.max_integrity);
    }

    /// Adjust battery, clamped to `[0, max]`.
    pub fn add_battery(&mut self, delta: f64) {
        self.battery = (self.battery + delta).clamp(0.0, self.max_battery);
    }

    /// Adjust fuel, clamped to `[0, max]`.
    pub fn add_fuel(&mut self, delta: f64) {
        self.fuel = (self.fuel + delta).clamp(0.0, self.max_fuel);
    }

    /// Apply one travel-event stat delta.
    pub fn apply_delta(&mut self, delta: StatDelta) {
        match delta.stat {
            StatKind::Integrity => self.add_integrity(delta.amount),
            StatKind::Battery => self.add_battery(delta.amount),
            StatKind::Fuel => self.add_fuel(delta.amount),
        }
    }

    /// Force the exact post-drain levels of the stasis field, clamped.
    pub fn set_levels(&mut self, integrity: f64, battery: f64, fuel: f64) {
        self.integrity = integrity.clamp(0.0, self.max_integrity);
        self.battery = battery.clamp(0.0, self.max_battery);
        self.fuel = fuel.clamp(0.0, self.max_fuel);
    }

    #[must_use]
    pub fn integrity_depleted(&self) -> bool {
        self.integrity <= 0.0
    }

    #[must_use]
    pub fn battery_depleted(&self) -> bool {
        self.battery <= 0.0
    }

    #[must_use]
    pub fn fuel_depleted(&self) -> bool {
        self.fuel <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutations_clamp_at_both_bounds() {
        let mut stats = DroneStats::default();
        stats.add_battery(50.0);
        assert!((stats.battery() - 100.0).abs() < f64::EPSILON);
        stats.add_battery(-250.0);
        assert!((stats.battery() - 0.0).abs() < f64::EPSILON);
        stats.add_integrity(-40.0);
        stats.add_integrity(1_000.0);
        assert!((stats.integrity() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn armor_and_tank_raise_caps() {
        let loadout = Loadout {
            armor: true,
            extra_tank: true,
            ..Loadout::default()
        };
        let mut log = MissionLog::new();
        let stats = DroneStats::for_launch(loadout, &mut log);
        assert!((stats.max_integrity() - 120.0).abs() < f64::EPSILON);
        assert!((stats.max_fuel() - 130.0).abs() < f64::EPSILON);
        // +30 fuel then -10 from armor, on a 130 cap.
        assert!((stats.fuel() - 120.0).abs() < f64::EPSILON);
        // -5 from tank then +20 from armor, on a 120 cap.
        assert!((stats.integrity() - 115.0).abs() < f64::EPSILON);
        assert_eq!(log.entries()[0], "Drone Mk-II lançado!");
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn battery_cap_is_never_raised() {
        let loadout = Loadout {
            ai_route: true,
            camouflage: true,
            ..Loadout::default()
        };
        let mut log = MissionLog::new();
        let stats = DroneStats::for_launch(loadout, &mut log);
        assert!((stats.max_battery() - 100.0).abs() < f64::EPSILON);
        assert!((stats.battery() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn loadout_limit_counts_every_module() {
        let loadout = Loadout {
            extra_tank: true,
            armor: true,
            thrusters: true,
            ..Loadout::default()
        };
        assert_eq!(loadout.selected_count(), 3);
        assert!(!loadout.within_limit());
        assert!(Loadout::default().within_limit());
    }
}
