//! Scripted operator policies used to drive headless missions.

use clap::ValueEnum;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use primordia_sim::{
    BodyLocation, CaptureMethod, DroneAction, EncounterDormancy, MissionSession, TransitEvent,
};

/// How the scripted operator plays the engagement.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OperatorStyle {
    /// Scan first, capture dormant targets early, avoid risky moves.
    Cautious,
    /// Soften the target with weapons before netting it.
    Aggressive,
    /// Uniformly random aim and frequent improvisation.
    Erratic,
}

/// A deterministic scripted operator for one mission run.
pub struct Operator {
    style: OperatorStyle,
    rng: SmallRng,
}

impl Operator {
    #[must_use]
    pub fn new(style: OperatorStyle, seed: u64) -> Self {
        Self {
            style,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Pick the travel-event option: cautious operators take the last
    /// (usually shielded) option, the rest roll for it.
    pub fn event_choice(&mut self, event: &TransitEvent) -> usize {
        match self.style {
            OperatorStyle::Cautious => event.options.len() - 1,
            OperatorStyle::Aggressive => 0,
            OperatorStyle::Erratic => self.rng.gen_range(0..event.options.len()),
        }
    }

    /// Pick the next drone order. Total: always returns an order that the
    /// engagement will accept given the session's visible state, so the
    /// drive loop cannot spin on rejections.
    pub fn next_action(&mut self, session: &MissionSession) -> DroneAction {
        let Some(duck) = session.duck() else {
            return DroneAction::Scan;
        };
        let drone = session.drone();
        let engagement = session.engagement().expect("engagement running");

        // Keep the lights on before anything else.
        if drone.battery() < 16.0 && drone.fuel() >= 25.0 {
            return DroneAction::BurnFuel;
        }

        match self.style {
            OperatorStyle::Cautious => {
                if !duck.scan_locked()
                    && duck.discovered_weak_points().len() < 3
                    && drone.battery() >= 10.0
                {
                    return DroneAction::Scan;
                }
                if duck.dormancy().is_dormant() && drone.battery() >= 15.0 {
                    return DroneAction::Capture(CaptureMethod::CryoNet);
                }
                if engagement.titanium_charges() > 0
                    && drone.battery() >= 15.0
                    && duck.hp() < 20
                {
                    return DroneAction::Capture(CaptureMethod::TitaniumNet);
                }
                self.aimed_laser(duck.discovered_weak_points().first().map(|wp| wp.location))
            }
            OperatorStyle::Aggressive => {
                if let Some(weapon) = engagement.weapon()
                    && engagement.weapon_cooldown() == 0
                    && drone.battery() >= weapon.battery_cost
                    && duck.hp() >= 40
                {
                    return DroneAction::SpecialWeapon {
                        target: self.aim(duck.discovered_weak_points().first().map(|wp| wp.location)),
                    };
                }
                if engagement.titanium_charges() > 0
                    && drone.battery() >= 15.0
                    && duck.hp() < 40
                    && !duck.dormancy().is_dormant()
                {
                    return DroneAction::Capture(CaptureMethod::TitaniumNet);
                }
                if duck.dormancy() == EncounterDormancy::Trance && drone.battery() >= 20.0 {
                    return DroneAction::Capture(CaptureMethod::SonicPulse);
                }
                self.aimed_laser(duck.discovered_weak_points().first().map(|wp| wp.location))
            }
            OperatorStyle::Erratic => {
                if duck.dormancy().is_dormant()
                    && drone.battery() >= 20.0
                    && self.rng.gen_bool(0.5)
                {
                    let method = if self.rng.gen_bool(0.5) {
                        CaptureMethod::CryoNet
                    } else {
                        CaptureMethod::SonicPulse
                    };
                    return DroneAction::Capture(method);
                }
                self.aimed_laser(None)
            }
        }
    }

    fn aim(&mut self, preferred: Option<BodyLocation>) -> BodyLocation {
        match self.style {
            OperatorStyle::Erratic => {
                BodyLocation::ALL[self.rng.gen_range(0..BodyLocation::ALL.len())]
            }
            _ => preferred.unwrap_or(BodyLocation::Chest),
        }
    }

    fn aimed_laser(&mut self, preferred: Option<BodyLocation>) -> DroneAction {
        DroneAction::BasicLaser {
            target: self.aim(preferred),
        }
    }
}
