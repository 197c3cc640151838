//! Drone action handlers for the engagement phase.
//!
//! Every action is resource-gated: a rejected action spends nothing, logs at
//! most a blocked notice, and leaves the turn with the drone.

use rand::Rng;

use crate::constants::{
    ABSORB_COOLDOWN_TURNS, BASIC_LASER_BATTERY_COST, BASIC_LASER_DAMAGE, BURN_BATTERY_GAIN,
    BURN_FUEL_COST, DEFENSE_GEN_BATTERY_COST, DEFENSE_GEN_COOLDOWN_TURNS, LOG_ABSORB_POSTURE,
    LOG_ABSORB_RECHARGING, LOG_BURN_FUEL, LOG_BURN_LOW_FUEL, LOG_DEFENSE_ALREADY_ARMED,
    LOG_DEFENSE_LOW_BATTERY, LOG_DEFENSE_RECHARGING, LOG_DESTRUCTIVE_ESCAPE, LOG_EVADED,
    LOG_HP_DEPLETED, LOG_MISCALIBRATED, LOG_NANO_ACTIVATED, LOG_NANO_RESTORED,
    LOG_SCAN_BLOCKED, LOG_SCAN_CAP_REACHED, LOG_SCAN_LIMIT, LOG_SCAN_LOCKED_OUT,
    LOG_SCAN_LOW_BATTERY, LOG_SCAN_STARTED, LOG_SHIELD_UP, LOG_STRAFE_LOW_INTEGRITY,
    LOG_STRAFE_STUNNED, LOG_SUPPORT_USED, MISCALIBRATION_CHANCE, MISCALIBRATION_FACTOR,
    NANO_BATTERY_COST, NANO_COOLDOWN_TURNS, NANO_INTEGRITY_GAIN, SCAN_BASE_CHANCE,
    SCAN_BATTERY_COST, SCAN_FAILURE_LOCK, SCAN_MUTATION_CAP, SCAN_MUTATION_PENALTY,
    SHIELD_BATTERY_COST, STRAFE_DAMAGE, STRAFE_INTEGRITY_COST, STRAFE_STUN_CHANCE,
    STRAFE_STUN_TURNS, SUPPORT_BATTERY_GAIN, SUPPORT_FUEL_GAIN, SUPPORT_INTEGRITY_GAIN,
    WEAK_POINT_COUNT, WEAPON_EFFECTIVE_FACTOR,
};
use crate::countermeasures::{bucket_label, countermeasure_pair};
use crate::drone::{DroneStats, Loadout, SupportDrone};
use crate::log::MissionLog;
use crate::mission::MissionStatus;
use crate::numbers::{round_f64_to_i32, u32_to_f64};
use crate::rng::RngBundle;

use super::{BodyLocation, CaptureMethod, EncounterDormancy, EngagementState, Side, WeakPoint};

/// One operator order for the drone's turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DroneAction {
    BasicLaser { target: BodyLocation },
    SpecialWeapon { target: BodyLocation },
    Strafe,
    Scan,
    Shield,
    BurnFuel,
    Absorb,
    NanoRepair,
    DefenseGenerator,
    SupportDrone,
    Capture(CaptureMethod),
}

/// How the drone's action round resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran and the turn passed to the duck.
    TurnTaken,
    /// The action ran but the drone keeps the turn (capture-failure paths).
    TurnRetained,
    /// A terminal condition was reached.
    Terminal(MissionStatus),
    /// The action was rejected; nothing was spent and no turn consumed.
    Rejected,
}

/// Attack category driving dormancy escalation on a non-fatal hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackCategory {
    /// Baseline laser.
    Basic,
    /// Mounted special weapon.
    Weapon,
    /// Strafing run.
    Physical,
}

/// Whether a drone attack landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DamageResult {
    Evaded,
    Hit,
    Destroyed,
}

impl EngagementState {
    /// Execute one drone action. The single entry point for the drone side.
    pub fn drone_action(
        &mut self,
        action: DroneAction,
        drone: &mut DroneStats,
        loadout: Loadout,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if self.outcome().is_some() || self.turn() != Side::Drone {
            return ActionOutcome::Rejected;
        }

        match action {
            DroneAction::BasicLaser { target } => self.basic_laser(target, drone, rng, log),
            DroneAction::SpecialWeapon { target } => self.special_weapon(target, drone, rng, log),
            DroneAction::Strafe => self.strafe(drone, rng, log),
            DroneAction::Scan => self.scan(drone, rng, log),
            DroneAction::Shield => self.shield(drone, log),
            DroneAction::BurnFuel => self.burn_fuel(drone, log),
            DroneAction::Absorb => self.absorb(log),
            DroneAction::NanoRepair => self.nano_repair(drone, loadout, log),
            DroneAction::DefenseGenerator => self.defense_generator(drone, rng, log),
            DroneAction::SupportDrone => self.support_drone(drone, log),
            DroneAction::Capture(method) => self.attempt_capture(method, drone, rng, log),
        }
    }

    fn basic_laser(
        &mut self,
        target: BodyLocation,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if drone.battery() < BASIC_LASER_BATTERY_COST {
            return ActionOutcome::Rejected;
        }
        log.push(format!("Drone usa Laser Padrão mirando em {target}..."));
        drone.add_battery(-BASIC_LASER_BATTERY_COST);
        let result = self.damage_duck(
            BASIC_LASER_DAMAGE,
            AttackCategory::Basic,
            Some(target),
            false,
            rng,
            log,
        );
        self.close_attack_round(result, drone, log)
    }

    fn special_weapon(
        &mut self,
        target: BodyLocation,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        let Some(weapon) = self.weapon else {
            return ActionOutcome::Rejected;
        };
        if self.weapon_cooldown > 0 || drone.battery() < weapon.battery_cost {
            return ActionOutcome::Rejected;
        }

        log.push(format!("Drone usa {} mirando em {target}...", weapon.name));
        drone.add_battery(-weapon.battery_cost);
        self.weapon_cooldown = weapon.cooldown_turns + 1;

        // A miscalibrated targeting solution wastes the matchup bonus and
        // halves the shot instead.
        let effective = self
            .duck
            .power_kind()
            .is_some_and(|kind| weapon.is_effective_against(kind));
        let miscalibrated = effective && rng.combat().gen_bool(MISCALIBRATION_CHANCE);
        if miscalibrated {
            log.push(LOG_MISCALIBRATED);
        }
        let base = if miscalibrated {
            (f64::from(weapon.base_damage) * MISCALIBRATION_FACTOR).floor() as i32
        } else {
            weapon.base_damage
        };

        let result = self.damage_duck(
            base,
            AttackCategory::Weapon,
            Some(target),
            miscalibrated,
            rng,
            log,
        );
        self.close_attack_round(result, drone, log)
    }

    fn strafe(
        &mut self,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if drone.integrity() <= STRAFE_INTEGRITY_COST {
            log.push(LOG_STRAFE_LOW_INTEGRITY);
            return ActionOutcome::Rejected;
        }

        log.push(format!(
            "Drone executa Ataque Rasante (-{}% Integridade)...",
            STRAFE_INTEGRITY_COST as i32
        ));
        drone.add_integrity(-STRAFE_INTEGRITY_COST);

        let result = self.damage_duck(
            STRAFE_DAMAGE,
            AttackCategory::Physical,
            None,
            false,
            rng,
            log,
        );
        if result != DamageResult::Destroyed && rng.combat().gen_bool(STRAFE_STUN_CHANCE) {
            log.push(LOG_STRAFE_STUNNED);
            self.duck.stun_turns = STRAFE_STUN_TURNS;
            if self.duck.dormancy == EncounterDormancy::Awake {
                self.duck.dormancy = EncounterDormancy::Stunned;
            }
        }
        self.close_attack_round(result, drone, log)
    }

    fn scan(
        &mut self,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if self.duck.scan_locked {
            log.push(LOG_SCAN_BLOCKED);
            return ActionOutcome::Rejected;
        }
        if self.duck.discovered_weak_points.len() >= WEAK_POINT_COUNT {
            log.push(LOG_SCAN_LIMIT);
            return ActionOutcome::Rejected;
        }
        if drone.battery() < SCAN_BATTERY_COST {
            log.push(LOG_SCAN_LOW_BATTERY);
            return ActionOutcome::Rejected;
        }

        log.push(LOG_SCAN_STARTED);
        drone.add_battery(-SCAN_BATTERY_COST);

        let clamped = u32_to_f64(self.duck.mutation_count.min(SCAN_MUTATION_CAP));
        let chance = round_f64_to_i32(SCAN_BASE_CHANCE - SCAN_MUTATION_PENALTY * clamped);
        let success = rng.combat().gen_range(0.0..100.0) < f64::from(chance);

        if success {
            self.duck.scan_failures = 0;
            let undiscovered = self.duck.undiscovered();
            if undiscovered.is_empty() {
                log.push("Scan: Todos os 3 pontos fracos já foram descobertos. Scan bloqueado.");
                self.duck.scan_locked = true;
            } else {
                let revealed: WeakPoint =
                    undiscovered[rng.combat().gen_range(0..undiscovered.len())];
                self.duck.discovered_weak_points.push(revealed);
                log.push(format!(
                    "SCAN SUCESSO! Ponto Fraco encontrado: {} ({})!",
                    revealed.location, revealed.tier
                ));
                if self.duck.discovered_weak_points.len() >= WEAK_POINT_COUNT {
                    log.push(LOG_SCAN_CAP_REACHED);
                    self.duck.scan_locked = true;
                }
            }
        } else {
            self.duck.scan_failures += 1;
            log.push(format!("SCAN FALHOU! (Chance era {chance}%)"));
            if self.duck.scan_failures >= SCAN_FAILURE_LOCK {
                log.push(LOG_SCAN_LOCKED_OUT);
                self.duck.scan_locked = true;
            }
        }

        self.end_turn(log);
        self.terminal_or(ActionOutcome::TurnTaken, drone, log)
    }

    fn shield(&mut self, drone: &mut DroneStats, log: &mut MissionLog) -> ActionOutcome {
        if self.shield_active || drone.battery() < SHIELD_BATTERY_COST {
            return ActionOutcome::Rejected;
        }
        log.push(LOG_SHIELD_UP);
        drone.add_battery(-SHIELD_BATTERY_COST);
        self.shield_active = true;
        self.shield_raised_this_turn = true;
        self.end_turn(log);
        self.terminal_or(ActionOutcome::TurnTaken, drone, log)
    }

    fn burn_fuel(&mut self, drone: &mut DroneStats, log: &mut MissionLog) -> ActionOutcome {
        if drone.fuel() < BURN_FUEL_COST {
            log.push(LOG_BURN_LOW_FUEL);
            return ActionOutcome::Rejected;
        }
        log.push(LOG_BURN_FUEL);
        drone.add_fuel(-BURN_FUEL_COST);
        drone.add_battery(BURN_BATTERY_GAIN);
        self.end_turn(log);
        self.terminal_or(ActionOutcome::TurnTaken, drone, log)
    }

    fn absorb(&mut self, log: &mut MissionLog) -> ActionOutcome {
        if self.absorb_cooldown > 0 {
            log.push(LOG_ABSORB_RECHARGING);
            return ActionOutcome::Rejected;
        }
        if self.absorbing || !self.duck.has_power() {
            return ActionOutcome::Rejected;
        }
        log.push(LOG_ABSORB_POSTURE);
        self.absorbing = true;
        self.absorb_cooldown = ABSORB_COOLDOWN_TURNS;
        self.end_turn(log);
        ActionOutcome::TurnTaken
    }

    fn nano_repair(
        &mut self,
        drone: &mut DroneStats,
        loadout: Loadout,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if !loadout.repair || self.nano_cooldown > 0 || drone.battery() < NANO_BATTERY_COST {
            return ActionOutcome::Rejected;
        }
        log.push(LOG_NANO_ACTIVATED);
        drone.add_battery(-NANO_BATTERY_COST);
        drone.add_integrity(NANO_INTEGRITY_GAIN);
        log.push(LOG_NANO_RESTORED);
        self.nano_cooldown = NANO_COOLDOWN_TURNS;
        self.end_turn(log);
        self.terminal_or(ActionOutcome::TurnTaken, drone, log)
    }

    fn defense_generator(
        &mut self,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if self.defense_cooldown > 0 {
            log.push(LOG_DEFENSE_RECHARGING);
            return ActionOutcome::Rejected;
        }
        if self.armed_defense.is_some() {
            log.push(LOG_DEFENSE_ALREADY_ARMED);
            return ActionOutcome::Rejected;
        }
        if drone.battery() < DEFENSE_GEN_BATTERY_COST {
            log.push(LOG_DEFENSE_LOW_BATTERY);
            return ActionOutcome::Rejected;
        }

        log.push(format!(
            "🎲 Ativando Sistema Gerador de Defesas Aleatórias (-{}% Bateria)...",
            DEFENSE_GEN_BATTERY_COST as i32
        ));
        drone.add_battery(-DEFENSE_GEN_BATTERY_COST);

        // The countermeasure is tuned to the power type only once the duck
        // is awake and identified; otherwise the general bucket applies.
        let kind = if self.duck.dormancy == EncounterDormancy::Awake {
            self.duck.power_kind()
        } else {
            None
        };
        let pair = countermeasure_pair(kind);
        let chosen = pair[rng.combat().gen_range(0..pair.len())];
        log.push(format!(
            "🛡️ SGDA Preparado: {chosen} (Contra {}). Aguardando próximo ataque de poder.",
            bucket_label(kind)
        ));

        self.armed_defense = Some(chosen);
        self.defense_cooldown = DEFENSE_GEN_COOLDOWN_TURNS;
        self.end_turn(log);
        self.terminal_or(ActionOutcome::TurnTaken, drone, log)
    }

    fn support_drone(&mut self, drone: &mut DroneStats, log: &mut MissionLog) -> ActionOutcome {
        let Some(support) = self.support else {
            return ActionOutcome::Rejected;
        };
        if self.support_used {
            log.push(LOG_SUPPORT_USED);
            return ActionOutcome::Rejected;
        }

        log.push(format!(
            "Solicitando Drone de Apoio ({})...",
            support.as_str()
        ));
        match support {
            SupportDrone::Battery => {
                drone.add_battery(SUPPORT_BATTERY_GAIN);
                log.push("✅ Suporte de Bateria recebido! +20% Bateria.");
            }
            SupportDrone::Repair => {
                drone.add_integrity(SUPPORT_INTEGRITY_GAIN);
                log.push("✅ Suporte de Reparo recebido! +25% Integridade.");
            }
            SupportDrone::Refuel => {
                drone.add_fuel(SUPPORT_FUEL_GAIN);
                log.push("✅ Suporte de Reabastecimento recebido! +15% Combustível.");
            }
        }
        self.support_used = true;
        self.end_turn(log);
        ActionOutcome::TurnTaken
    }

    /// Apply drone-sourced damage to the duck: evasion roll, effectiveness
    /// and weak-point multipliers, hp floor, destructive escape, and the
    /// dormancy escalation a surviving duck suffers from being hit.
    pub(crate) fn damage_duck(
        &mut self,
        base_damage: i32,
        category: AttackCategory,
        target: Option<BodyLocation>,
        miscalibrated: bool,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> DamageResult {
        if f64::from(self.duck.evasion_pct) > rng.combat().gen_range(0.0..100.0) {
            log.push(LOG_EVADED);
            return DamageResult::Evaded;
        }

        let mut damage = f64::from(base_damage);
        let mut bonus = String::new();

        if category == AttackCategory::Weapon && !miscalibrated {
            let effective = self
                .weapon
                .zip(self.duck.power_kind())
                .is_some_and(|(weapon, kind)| weapon.is_effective_against(kind));
            if effective {
                damage *= WEAPON_EFFECTIVE_FACTOR;
                bonus.push_str(&format!(" (ARMA EFICAZ x{WEAPON_EFFECTIVE_FACTOR}!)"));
            }
        }

        if let Some(location) = target
            && let Some(tier) = self.duck.discovered_tier(location)
        {
            damage *= tier.multiplier();
            bonus.push_str(&format!(
                " (PONTO FRACO {} x{}!)",
                tier.as_str().to_uppercase(),
                tier.multiplier()
            ));
        }

        let damage = round_f64_to_i32(damage);
        self.duck.hp = (self.duck.hp - damage).max(0);

        let struck = target.map_or_else(
            || String::from("o Pato"),
            |location| format!("o(a) {location}"),
        );
        log.push(format!(
            "⚔️ Drone atingiu {struck} causando {damage} de dano!{bonus} HP Pato: {}/{}",
            self.duck.hp, self.duck.max_hp
        ));

        if self.duck.hp <= 0 {
            log.push(LOG_HP_DEPLETED);
            log.push(LOG_DESTRUCTIVE_ESCAPE);
            self.finish(MissionStatus::TargetDestroyed, LOG_DESTRUCTIVE_ESCAPE);
            return DamageResult::Destroyed;
        }

        self.escalate_from_hit(category, rng, log);
        DamageResult::Hit
    }

    /// A surviving hit may rouse the duck; special weapons always wake it.
    fn escalate_from_hit(
        &mut self,
        category: AttackCategory,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) {
        match self.duck.dormancy {
            EncounterDormancy::Hibernating => match category {
                AttackCategory::Weapon => {
                    self.escalate_dormancy(EncounterDormancy::Awake, rng, log);
                }
                AttackCategory::Physical => {
                    if rng.combat().gen_bool(0.5) {
                        self.escalate_dormancy(EncounterDormancy::Trance, rng, log);
                    } else {
                        self.escalate_dormancy(EncounterDormancy::Awake, rng, log);
                    }
                }
                AttackCategory::Basic => {
                    self.escalate_dormancy(EncounterDormancy::Trance, rng, log);
                }
            },
            EncounterDormancy::Trance => match category {
                AttackCategory::Weapon => {
                    self.escalate_dormancy(EncounterDormancy::Awake, rng, log);
                }
                AttackCategory::Physical => {
                    if rng.combat().gen_bool(0.8) {
                        self.escalate_dormancy(EncounterDormancy::Awake, rng, log);
                    }
                }
                AttackCategory::Basic => {
                    if rng.combat().gen_bool(0.5) {
                        self.escalate_dormancy(EncounterDormancy::Awake, rng, log);
                    }
                }
            },
            _ => {}
        }
    }

    /// Shared epilogue of an attack action: destroyed targets end the
    /// mission, anything else ends the turn and re-checks the terminals.
    fn close_attack_round(
        &mut self,
        result: DamageResult,
        drone: &DroneStats,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        if result == DamageResult::Destroyed {
            return ActionOutcome::Terminal(
                self.outcome().unwrap_or(MissionStatus::TargetDestroyed),
            );
        }
        self.end_turn(log);
        self.terminal_or(ActionOutcome::TurnTaken, drone, log)
    }

    /// Re-check terminal conditions, otherwise return the given outcome.
    pub(crate) fn terminal_or(
        &mut self,
        fallback: ActionOutcome,
        drone: &DroneStats,
        log: &mut MissionLog,
    ) -> ActionOutcome {
        match self.resolve_terminal(drone, log) {
            Some(status) => ActionOutcome::Terminal(status),
            None => fallback,
        }
    }
}
