//! The duck's autonomous turn and incoming-damage resolution.

use rand::Rng;

use crate::constants::{
    ABSORB_BATTERY_GAIN, ABSORB_INTEGRITY_COST, CHARGED_DAMAGE_MAX, CHARGED_DAMAGE_MIN,
    CHARGE_CHANCE, FLEE_CHANCE, FLEE_HP_THRESHOLD, LOG_ABSORB_CONVERTED,
    LOG_ABSORB_FAILED_PHYSICAL, LOG_DEFENSE_NEGATED, LOG_DRONE_TURN, LOG_DUCK_CHARGING,
    LOG_DUCK_FLED, LOG_DUCK_HIBERNATING, LOG_DUCK_IN_TRANCE, LOG_DUCK_PHYSICAL,
    LOG_DUCK_RECOVERED, LOG_DUCK_RECOVERING, LOG_DUCK_STUNNED, LOG_SHIELD_SOFTENED,
    PHYSICAL_DAMAGE_MAX, PHYSICAL_DAMAGE_MIN, POWER_ATTACK_CHANCE, POWER_DAMAGE_MAX,
    POWER_DAMAGE_MIN, SHIELD_DAMAGE_FACTOR, STUN_RECOVERY_CHANCE, TRANCE_AWAKEN_CHANCE,
};
use crate::drone::DroneStats;
use crate::log::MissionLog;
use crate::mission::MissionStatus;
use crate::rng::RngBundle;

use super::{EncounterDormancy, EngagementState, Side};

/// How the duck's turn resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuckTurnOutcome {
    /// The duck acted (or deliberately stayed put) and the turn returned to
    /// the drone.
    Acted,
    /// The duck was stunned and skipped the turn.
    Skipped,
    /// The turn produced a terminal condition.
    Terminal(MissionStatus),
}

impl EngagementState {
    /// Resolve the duck's turn. The driver calls this after the fixed
    /// presentation delay.
    pub fn duck_turn(
        &mut self,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> DuckTurnOutcome {
        if let Some(status) = self.outcome() {
            return DuckTurnOutcome::Terminal(status);
        }
        if self.turn() != Side::Duck || self.duck.dormancy.is_terminal() {
            return DuckTurnOutcome::Skipped;
        }

        if self.duck.stun_turns > 0 {
            log.push(LOG_DUCK_STUNNED);
            self.end_turn(log);
            return DuckTurnOutcome::Skipped;
        }

        match self.duck.dormancy {
            EncounterDormancy::Hibernating => {
                log.push(LOG_DUCK_HIBERNATING);
                self.end_turn(log);
                DuckTurnOutcome::Acted
            }
            EncounterDormancy::Trance => {
                if rng.duck().gen_bool(TRANCE_AWAKEN_CHANCE) {
                    self.escalate_dormancy(EncounterDormancy::Awake, rng, log);
                } else {
                    log.push(LOG_DUCK_IN_TRANCE);
                }
                self.end_turn(log);
                DuckTurnOutcome::Acted
            }
            EncounterDormancy::Stunned => {
                log.push(LOG_DUCK_RECOVERING);
                if rng.duck().gen_bool(STUN_RECOVERY_CHANCE) {
                    // The single sanctioned dormancy recovery.
                    self.duck.dormancy = EncounterDormancy::Awake;
                    log.push(LOG_DUCK_RECOVERED);
                }
                self.end_turn(log);
                DuckTurnOutcome::Acted
            }
            EncounterDormancy::Awake => {
                if self.duck.hp < FLEE_HP_THRESHOLD && rng.duck().gen_bool(FLEE_CHANCE) {
                    log.push(LOG_DUCK_FLED);
                    self.duck.dormancy = EncounterDormancy::Fleeing;
                    self.finish(MissionStatus::TargetFled, LOG_DUCK_FLED);
                    return DuckTurnOutcome::Terminal(MissionStatus::TargetFled);
                }

                self.duck_attack_sequence(drone, rng, log);
                if let Some(status) = self.resolve_terminal(drone, log) {
                    return DuckTurnOutcome::Terminal(status);
                }
                log.push(LOG_DRONE_TURN);
                self.end_turn(log);
                DuckTurnOutcome::Acted
            }
            EncounterDormancy::Captured | EncounterDormancy::Fleeing => DuckTurnOutcome::Skipped,
        }
    }

    /// The duck answers a botched capture immediately, bypassing the normal
    /// turn cadence; the turn stays with the drone.
    pub(crate) fn instant_power_release(
        &mut self,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) {
        self.duck_attack_sequence(drone, rng, log);
    }

    /// The Awake duck's attack decision tree.
    ///
    /// Two independent nested rolls: 40% to start charging, then 60% for a
    /// normal power attack, leaving ~24% for the physical fallback. This
    /// mirrors the tuned behavior and must not be "fixed" into a clean
    /// three-way partition.
    fn duck_attack_sequence(
        &mut self,
        drone: &mut DroneStats,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) {
        if self.duck.charging_power {
            if self.duck.has_power() {
                let damage = rng.duck().gen_range(CHARGED_DAMAGE_MIN..=CHARGED_DAMAGE_MAX);
                self.resolve_power_damage(drone, damage, true, log);
            }
            self.duck.charging_power = false;
            return;
        }

        if self.duck.has_power() && rng.duck().gen_bool(CHARGE_CHANCE) {
            log.push(LOG_DUCK_CHARGING);
            self.duck.charging_power = true;
        } else if self.duck.has_power() && rng.duck().gen_bool(POWER_ATTACK_CHANCE) {
            let damage = rng.duck().gen_range(POWER_DAMAGE_MIN..=POWER_DAMAGE_MAX);
            self.resolve_power_damage(drone, damage, false, log);
        } else {
            let damage = rng.duck().gen_range(PHYSICAL_DAMAGE_MIN..=PHYSICAL_DAMAGE_MAX);
            self.resolve_physical_damage(drone, damage, log);
        }
    }

    /// Incoming power damage, resolved in priority order: armed random
    /// defense negates, absorb converts, shield halves, otherwise full
    /// damage to integrity.
    fn resolve_power_damage(
        &mut self,
        drone: &mut DroneStats,
        damage: i32,
        charged: bool,
        log: &mut MissionLog,
    ) {
        if self.armed_defense.is_some() {
            log.push(LOG_DEFENSE_NEGATED);
            self.armed_defense = None;
            return;
        }
        if self.absorbing {
            log.push(LOG_ABSORB_CONVERTED);
            drone.add_battery(ABSORB_BATTERY_GAIN);
            drone.add_integrity(-ABSORB_INTEGRITY_COST);
            self.absorbing = false;
            return;
        }

        let mut final_damage = damage;
        if self.shield_active {
            final_damage = (f64::from(damage) * SHIELD_DAMAGE_FACTOR).floor() as i32;
            log.push(LOG_SHIELD_SOFTENED);
        }
        if charged {
            log.push(format!(
                "💥 PATO LIBERA PODER CARREGADO: {}!",
                self.duck.power_display_name()
            ));
        } else {
            log.push(format!(
                "⚡ PATO ATACA: Usando {}!",
                self.duck.power_display_name()
            ));
        }
        drone.add_integrity(-f64::from(final_damage));
        log.push(format!("🤖 Drone sofreu {final_damage} de dano!"));
    }

    /// Incoming physical damage: absorb self-cancels without effect, a
    /// shield still halves.
    fn resolve_physical_damage(&mut self, drone: &mut DroneStats, damage: i32, log: &mut MissionLog) {
        if self.absorbing {
            log.push(LOG_ABSORB_FAILED_PHYSICAL);
            self.absorbing = false;
        }

        let mut final_damage = damage;
        if self.shield_active {
            final_damage = (f64::from(damage) * SHIELD_DAMAGE_FACTOR).floor() as i32;
            log.push(LOG_SHIELD_SOFTENED);
        }
        log.push(LOG_DUCK_PHYSICAL);
        drone.add_integrity(-f64::from(final_damage));
        log.push(format!("🤖 Drone sofreu {final_damage} de dano!"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DormancyStatus, PowerType};
    use crate::encounter::tests::fixture_target;

    fn duck_side_state(
        dormancy: DormancyStatus,
        seed: u64,
    ) -> (EngagementState, DroneStats, MissionLog, RngBundle) {
        let target = fixture_target(dormancy);
        let rng = RngBundle::from_user_seed(seed);
        let mut log = MissionLog::new();
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);
        state.end_turn(&mut log); // hand the opening turn to the duck
        (state, DroneStats::default(), log, rng)
    }

    #[test]
    fn hibernating_duck_never_attacks() {
        for seed in 0..32 {
            let (mut state, mut drone, mut log, rng) =
                duck_side_state(DormancyStatus::DeepHibernation, seed);
            let outcome = state.duck_turn(&mut drone, &rng, &mut log);
            assert_eq!(outcome, DuckTurnOutcome::Acted);
            assert!((drone.integrity() - 100.0).abs() < f64::EPSILON);
            assert_eq!(state.turn(), Side::Drone);
        }
    }

    #[test]
    fn stunned_duck_skips_and_counter_decrements() {
        let (mut state, mut drone, mut log, rng) =
            duck_side_state(DormancyStatus::DeepHibernation, 3);
        state.duck.stun_turns = 1;
        let outcome = state.duck_turn(&mut drone, &rng, &mut log);
        assert_eq!(outcome, DuckTurnOutcome::Skipped);
        assert_eq!(state.duck().stun_turns(), 0);
        assert!(log.entries().iter().any(|l| l == LOG_DUCK_STUNNED));
    }

    #[test]
    fn trance_duck_sometimes_wakes() {
        let mut woke = 0;
        let mut stayed = 0;
        for seed in 0..64 {
            let (mut state, mut drone, mut log, rng) =
                duck_side_state(DormancyStatus::Trance, seed);
            let _ = state.duck_turn(&mut drone, &rng, &mut log);
            match state.duck().dormancy() {
                EncounterDormancy::Awake => woke += 1,
                EncounterDormancy::Trance => stayed += 1,
                other => panic!("unexpected dormancy {other:?}"),
            }
        }
        assert!(woke > 0, "15% awaken branch never hit in 64 seeds");
        assert!(stayed > woke, "awakening should be the rare branch");
    }

    #[test]
    fn awake_powerless_duck_always_attacks_physically() {
        for seed in 0..32 {
            let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, seed);
            let outcome = state.duck_turn(&mut drone, &rng, &mut log);
            assert_eq!(outcome, DuckTurnOutcome::Acted, "seed {seed}");
            assert!(
                drone.integrity() < 100.0,
                "physical fallback must land damage (seed {seed})"
            );
            assert!(log.entries().iter().any(|l| l == LOG_DUCK_PHYSICAL));
        }
    }

    #[test]
    fn charged_release_lands_in_range() {
        let mut saw_release = false;
        for seed in 0..64 {
            let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, seed);
            state.duck.awakened_kind = Some(PowerType::Belico);
            state.duck.charging_power = true;
            let _ = state.duck_turn(&mut drone, &rng, &mut log);
            if log.entries().iter().any(|l| l.contains("PODER CARREGADO")) {
                saw_release = true;
                let damage = 100.0 - drone.integrity();
                assert!(
                    (20.0..=44.0).contains(&damage),
                    "charged damage {damage} out of range"
                );
                assert!(!state.duck().is_charging());
                break;
            }
        }
        assert!(saw_release);
    }

    #[test]
    fn armed_defense_negates_one_power_attack() {
        let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, 4);
        state.duck.awakened_kind = Some(PowerType::Caotico);
        state.duck.charging_power = true;
        state.armed_defense = Some("Campo de Estabilização Probabilística");
        let _ = state.duck_turn(&mut drone, &rng, &mut log);
        assert!((drone.integrity() - 100.0).abs() < f64::EPSILON);
        assert!(state.armed_defense.is_none(), "defense is one-shot");
        assert!(log.entries().iter().any(|l| l == LOG_DEFENSE_NEGATED));
    }

    #[test]
    fn absorb_converts_power_but_fails_against_physical() {
        // Charged release into an absorbing drone converts to battery.
        let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, 9);
        state.duck.awakened_kind = Some(PowerType::Sonico);
        state.duck.charging_power = true;
        state.absorbing = true;
        drone.add_battery(-50.0);
        let _ = state.duck_turn(&mut drone, &rng, &mut log);
        assert!((drone.battery() - 65.0).abs() < f64::EPSILON);
        assert!((drone.integrity() - 80.0).abs() < f64::EPSILON);
        assert!(!state.absorbing);

        // A powerless duck always falls back to the physical attack, which
        // self-cancels the posture with no conversion.
        let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, 2);
        state.absorbing = true;
        let _ = state.duck_turn(&mut drone, &rng, &mut log);
        assert!(log.entries().iter().any(|l| l == LOG_ABSORB_FAILED_PHYSICAL));
        assert!(!state.absorbing);
        assert!(drone.integrity() < 100.0);
    }

    #[test]
    fn shield_halves_incoming_damage() {
        let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, 9);
        state.shield_active = true;
        let _ = state.duck_turn(&mut drone, &rng, &mut log);
        let damage = 100.0 - drone.integrity();
        // Physical range 5..=12 halved and floored: at most 6.
        assert!(damage <= 6.0, "shielded damage {damage} too high");
        assert!(log.entries().iter().any(|l| l == LOG_SHIELD_SOFTENED));
    }

    #[test]
    fn wounded_duck_sometimes_flees_and_mission_fails() {
        let mut fled = false;
        for seed in 0..64 {
            let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, seed);
            state.duck.hp = 20;
            let outcome = state.duck_turn(&mut drone, &rng, &mut log);
            if outcome == DuckTurnOutcome::Terminal(MissionStatus::TargetFled) {
                fled = true;
                assert_eq!(state.duck().dormancy(), EncounterDormancy::Fleeing);
                assert!(log.entries().iter().any(|l| l == LOG_DUCK_FLED));
                break;
            }
        }
        assert!(fled, "30% flee branch never hit in 64 seeds");
    }

    #[test]
    fn power_attack_that_zeroes_integrity_is_immediately_terminal() {
        let mut destroyed = false;
        for seed in 0..64 {
            let (mut state, mut drone, mut log, rng) = duck_side_state(DormancyStatus::Awake, seed);
            state.duck.awakened_kind = Some(PowerType::Belico);
            state.duck.charging_power = true;
            drone.add_integrity(-80.0); // 20 left; charged minimum is 20
            let outcome = state.duck_turn(&mut drone, &rng, &mut log);
            if drone.integrity_depleted() {
                destroyed = true;
                assert_eq!(
                    outcome,
                    DuckTurnOutcome::Terminal(MissionStatus::DroneDestroyed)
                );
                break;
            }
        }
        assert!(destroyed, "charged release never destroyed the weakened drone");
    }
}
