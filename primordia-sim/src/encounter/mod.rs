//! Engagement phase: the turn-based battle/capture state machine.
//!
//! Two actors alternate strict turns, drone first. All mutable battle state
//! is consolidated here so every mutation flows through one reducer surface;
//! the submodules implement the drone action handlers, the capture methods,
//! and the duck's autonomous turn.

use rand::Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

use crate::catalog::{DormancyStatus, Power, PowerType, TargetRecord};
use crate::constants::{
    AWAKE_BPM_BASE, AWAKE_EVASION_BONUS, AWAKE_EVASION_CAP, DUCK_BASE_EVASION, DUCK_BASE_HP,
    DUCK_EVASION_CAP, HEAVY_TARGET_HP_BONUS, HEAVY_TARGET_WEIGHT_G, LOG_AWAKE_ALERT,
    LOG_BATTERY_DEPLETED, LOG_CAPTURED, LOG_DRONE_DESTROYED, LOG_ENGAGEMENT_OPENED,
    LOG_SHIELD_DOWN, MUTATION_EVASION_DIVISOR, MUTATION_HP_FACTOR, MUTATION_HP_THRESHOLD,
    TALL_TARGET_HEIGHT_CM, TALL_TARGET_HP_BONUS, TITANIUM_CHARGES, TRANCE_BPM_BASE,
    WEAK_POINT_COUNT,
};
use crate::drone::{DroneStats, SupportDrone};
use crate::log::MissionLog;
use crate::mission::MissionStatus;
use crate::rng::RngBundle;
use crate::weapons::WeaponSpec;

pub mod actions;
pub mod capture;
pub mod duck;

pub use actions::{ActionOutcome, AttackCategory, DroneAction};
pub use capture::CaptureMethod;
pub use duck::DuckTurnOutcome;

/// Which actor holds the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Drone,
    Duck,
}

/// Alertness tier of the duck during an engagement.
///
/// Transitions only escalate (`rank` is non-decreasing) with the single
/// recovery exception `Stunned -> Awake`. `Captured` and `Fleeing` are
/// terminal: once reached, no further mutation occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterDormancy {
    #[serde(rename = "Hibernação Profunda")]
    Hibernating,
    #[serde(rename = "Em Transe")]
    Trance,
    #[serde(rename = "Desperto")]
    Awake,
    #[serde(rename = "Atordoado")]
    Stunned,
    #[serde(rename = "Capturado")]
    Captured,
    #[serde(rename = "Fugindo")]
    Fleeing,
}

impl EncounterDormancy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hibernating => "Hibernação Profunda",
            Self::Trance => "Em Transe",
            Self::Awake => "Desperto",
            Self::Stunned => "Atordoado",
            Self::Captured => "Capturado",
            Self::Fleeing => "Fugindo",
        }
    }

    /// Hibernating and Trance count as dormant for capture gear.
    #[must_use]
    pub const fn is_dormant(self) -> bool {
        matches!(self, Self::Hibernating | Self::Trance)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Captured | Self::Fleeing)
    }

    const fn rank(self) -> u8 {
        match self {
            Self::Hibernating => 0,
            Self::Trance => 1,
            Self::Awake => 2,
            Self::Stunned => 3,
            Self::Captured | Self::Fleeing => 4,
        }
    }
}

impl fmt::Display for EncounterDormancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DormancyStatus> for EncounterDormancy {
    fn from(value: DormancyStatus) -> Self {
        match value {
            DormancyStatus::DeepHibernation => Self::Hibernating,
            DormancyStatus::Trance => Self::Trance,
            DormancyStatus::Awake => Self::Awake,
        }
    }
}

/// Targetable body locations; weak points hide among these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLocation {
    #[serde(rename = "Cabeça")]
    Head,
    #[serde(rename = "Bico")]
    Beak,
    #[serde(rename = "Asas")]
    Wings,
    #[serde(rename = "Cauda")]
    Tail,
    #[serde(rename = "Peito")]
    Chest,
    #[serde(rename = "Dorso")]
    Back,
    #[serde(rename = "Pés")]
    Feet,
    #[serde(rename = "Olhos")]
    Eyes,
}

impl BodyLocation {
    pub const ALL: [Self; 8] = [
        Self::Head,
        Self::Beak,
        Self::Wings,
        Self::Tail,
        Self::Chest,
        Self::Back,
        Self::Feet,
        Self::Eyes,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Head => "Cabeça",
            Self::Beak => "Bico",
            Self::Wings => "Asas",
            Self::Tail => "Cauda",
            Self::Chest => "Peito",
            Self::Back => "Dorso",
            Self::Feet => "Pés",
            Self::Eyes => "Olhos",
        }
    }
}

impl fmt::Display for BodyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Damage multiplier tier of a hidden weak point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaknessTier {
    #[serde(rename = "Pouco Eficaz")]
    Slight,
    #[serde(rename = "Eficaz")]
    Effective,
    #[serde(rename = "Muito Eficaz")]
    VeryEffective,
}

impl WeaknessTier {
    pub const ALL: [Self; 3] = [Self::Slight, Self::Effective, Self::VeryEffective];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slight => "Pouco Eficaz",
            Self::Effective => "Eficaz",
            Self::VeryEffective => "Muito Eficaz",
        }
    }

    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Slight => 1.2,
            Self::Effective => 1.5,
            Self::VeryEffective => 1.8,
        }
    }
}

impl fmt::Display for WeaknessTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `(location, tier)` pair, hidden until revealed by a successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeakPoint {
    pub location: BodyLocation,
    pub tier: WeaknessTier,
}

type WeakPointSet = SmallVec<[WeakPoint; WEAK_POINT_COUNT]>;

/// Live battle state of the target duck, derived once at engagement start.
#[derive(Debug, Clone)]
pub struct DuckState {
    hp: i32,
    max_hp: i32,
    evasion_pct: i32,
    dormancy: EncounterDormancy,
    heart_rate_bpm: Option<u32>,
    stun_turns: u8,
    charging_power: bool,
    capture_failures: u8,
    scan_failures: u8,
    scan_locked: bool,
    hidden_weak_points: WeakPointSet,
    discovered_weak_points: WeakPointSet,
    catalog_power: Option<Power>,
    awakened_kind: Option<PowerType>,
    mutation_count: u32,
}

impl DuckState {
    /// Derive battle stats from the catalog record's static attributes.
    fn derive(target: &TargetRecord, rng: &RngBundle) -> Self {
        let mut hp = DUCK_BASE_HP;
        let mut evasion = DUCK_BASE_EVASION;

        if let Some(power) = &target.power {
            let bonus = power.rarity.hp_bonus();
            hp += bonus;
            evasion += bonus / 10;
        }
        if target.height_cm > TALL_TARGET_HEIGHT_CM {
            hp += TALL_TARGET_HP_BONUS;
        }
        if target.weight_g > HEAVY_TARGET_WEIGHT_G {
            hp += HEAVY_TARGET_HP_BONUS;
        }
        if target.mutation_count > MUTATION_HP_THRESHOLD {
            hp = hp.saturating_add(
                i32::try_from(target.mutation_count)
                    .unwrap_or(i32::MAX)
                    .saturating_mul(MUTATION_HP_FACTOR),
            );
            evasion +=
                i32::try_from(target.mutation_count / MUTATION_EVASION_DIVISOR).unwrap_or(0);
        }
        match target.dormancy {
            DormancyStatus::Awake => evasion += 15,
            DormancyStatus::Trance => evasion += 5,
            DormancyStatus::DeepHibernation => {}
        }

        Self {
            hp,
            max_hp: hp,
            evasion_pct: evasion.min(DUCK_EVASION_CAP),
            dormancy: target.dormancy.into(),
            heart_rate_bpm: target.heart_rate_bpm,
            stun_turns: 0,
            charging_power: false,
            capture_failures: 0,
            scan_failures: 0,
            scan_locked: false,
            hidden_weak_points: draw_weak_points(rng),
            discovered_weak_points: WeakPointSet::new(),
            catalog_power: target.power.clone(),
            awakened_kind: None,
            mutation_count: target.mutation_count,
        }
    }

    #[must_use]
    pub const fn hp(&self) -> i32 {
        self.hp
    }

    #[must_use]
    pub const fn max_hp(&self) -> i32 {
        self.max_hp
    }

    #[must_use]
    pub const fn evasion_pct(&self) -> i32 {
        self.evasion_pct
    }

    #[must_use]
    pub const fn dormancy(&self) -> EncounterDormancy {
        self.dormancy
    }

    #[must_use]
    pub const fn heart_rate_bpm(&self) -> Option<u32> {
        self.heart_rate_bpm
    }

    #[must_use]
    pub const fn stun_turns(&self) -> u8 {
        self.stun_turns
    }

    #[must_use]
    pub const fn is_charging(&self) -> bool {
        self.charging_power
    }

    #[must_use]
    pub const fn scan_locked(&self) -> bool {
        self.scan_locked
    }

    #[must_use]
    pub fn discovered_weak_points(&self) -> &[WeakPoint] {
        &self.discovered_weak_points
    }

    /// The power type steering effectiveness and countermeasures, if any.
    #[must_use]
    pub fn power_kind(&self) -> Option<PowerType> {
        self.catalog_power
            .as_ref()
            .map(|power| power.kind)
            .or(self.awakened_kind)
    }

    #[must_use]
    pub fn has_power(&self) -> bool {
        self.power_kind().is_some()
    }

    /// Operator-facing name of the active power.
    #[must_use]
    pub fn power_display_name(&self) -> String {
        match (&self.catalog_power, self.awakened_kind) {
            (Some(power), _) => power.name.clone(),
            (None, Some(kind)) => format!("Poder Desconhecido ({kind})"),
            (None, None) => String::from("Poder Desconhecido"),
        }
    }

    fn discovered_tier(&self, location: BodyLocation) -> Option<WeaknessTier> {
        self.discovered_weak_points
            .iter()
            .find(|wp| wp.location == location)
            .map(|wp| wp.tier)
    }

    fn undiscovered(&self) -> Vec<WeakPoint> {
        self.hidden_weak_points
            .iter()
            .filter(|wp| self.discovered_tier(wp.location).is_none())
            .copied()
            .collect()
    }
}

/// Draw the hidden weak points: locations without replacement, tiers uniform.
fn draw_weak_points(rng: &RngBundle) -> WeakPointSet {
    let mut points = WeakPointSet::new();
    while points.len() < WEAK_POINT_COUNT {
        let location = BodyLocation::ALL[rng.duck().gen_range(0..BodyLocation::ALL.len())];
        if points.iter().any(|wp: &WeakPoint| wp.location == location) {
            continue;
        }
        let tier = WeaknessTier::ALL[rng.duck().gen_range(0..WeaknessTier::ALL.len())];
        points.push(WeakPoint { location, tier });
    }
    points
}

/// Consolidated state of one engagement; the single mutation surface for
/// every battle reducer.
#[derive(Debug, Clone)]
pub struct EngagementState {
    duck: DuckState,
    turn: Side,
    weapon: Option<&'static WeaponSpec>,
    weapon_cooldown: u8,
    nano_cooldown: u8,
    absorb_cooldown: u8,
    defense_cooldown: u8,
    shield_active: bool,
    shield_raised_this_turn: bool,
    absorbing: bool,
    armed_defense: Option<&'static str>,
    titanium_charges: u8,
    stasis_used: bool,
    support: Option<SupportDrone>,
    support_used: bool,
    outcome: Option<MissionStatus>,
    final_log: Option<String>,
}

impl EngagementState {
    /// Open the engagement: derive the duck and log the opening summary.
    #[must_use]
    pub fn new(
        target: &TargetRecord,
        weapon: Option<&'static WeaponSpec>,
        support: Option<SupportDrone>,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) -> Self {
        let duck = DuckState::derive(target, rng);

        log.push(LOG_ENGAGEMENT_OPENED);
        log.push(format!(
            "Alvo: {} | Status: {}",
            target.location.country, target.dormancy
        ));
        log.push(format!(
            "HP do Pato: {} | Chance de Desvio: {}%",
            duck.hp, duck.evasion_pct
        ));
        if let Some(weapon) = weapon {
            log.push(format!("Arma Especial Selecionada: {}", weapon.name));
        } else {
            log.push("Arma Equipada: Laser Padrão Mk-I (Padrão)");
        }

        Self {
            duck,
            turn: Side::Drone,
            weapon,
            weapon_cooldown: 0,
            nano_cooldown: 0,
            absorb_cooldown: 0,
            defense_cooldown: 0,
            shield_active: false,
            shield_raised_this_turn: false,
            absorbing: false,
            armed_defense: None,
            titanium_charges: TITANIUM_CHARGES,
            stasis_used: false,
            support,
            support_used: false,
            outcome: None,
            final_log: None,
        }
    }

    #[must_use]
    pub const fn duck(&self) -> &DuckState {
        &self.duck
    }

    #[must_use]
    pub const fn turn(&self) -> Side {
        self.turn
    }

    #[must_use]
    pub const fn outcome(&self) -> Option<MissionStatus> {
        self.outcome
    }

    #[must_use]
    pub fn final_log(&self) -> Option<&str> {
        self.final_log.as_deref()
    }

    #[must_use]
    pub const fn titanium_charges(&self) -> u8 {
        self.titanium_charges
    }

    #[must_use]
    pub const fn shield_active(&self) -> bool {
        self.shield_active
    }

    #[must_use]
    pub const fn weapon(&self) -> Option<&'static WeaponSpec> {
        self.weapon
    }

    #[must_use]
    pub const fn weapon_cooldown(&self) -> u8 {
        self.weapon_cooldown
    }

    /// End the current turn: tick cooldowns down, drop a stale shield at the
    /// end of a drone turn, flip the active side.
    pub(crate) fn end_turn(&mut self, log: &mut MissionLog) {
        self.weapon_cooldown = self.weapon_cooldown.saturating_sub(1);
        self.nano_cooldown = self.nano_cooldown.saturating_sub(1);
        self.absorb_cooldown = self.absorb_cooldown.saturating_sub(1);
        self.defense_cooldown = self.defense_cooldown.saturating_sub(1);
        self.duck.stun_turns = self.duck.stun_turns.saturating_sub(1);

        if self.turn == Side::Drone {
            if self.shield_active && !self.shield_raised_this_turn {
                log.push(LOG_SHIELD_DOWN);
                self.shield_active = false;
            }
            self.shield_raised_this_turn = false;
        }

        self.turn = match self.turn {
            Side::Drone => Side::Duck,
            Side::Duck => Side::Drone,
        };
    }

    /// Move the duck to a higher dormancy tier, applying heart-rate and
    /// awakening side effects. Regressions are ignored; the only sanctioned
    /// recovery (`Stunned -> Awake`) bypasses this via the duck turn.
    pub(crate) fn escalate_dormancy(
        &mut self,
        to: EncounterDormancy,
        rng: &RngBundle,
        log: &mut MissionLog,
    ) {
        let from = self.duck.dormancy;
        if to == from || from.is_terminal() || to.rank() < from.rank() {
            return;
        }

        if to == EncounterDormancy::Trance && from == EncounterDormancy::Hibernating {
            let increase = rng.duck().gen_range(15..=30);
            let bpm = self.duck.heart_rate_bpm.unwrap_or(TRANCE_BPM_BASE) + increase;
            log.push(format!("BPM aumentou em {increase}! Novo BPM: {bpm}"));
            self.duck.heart_rate_bpm = Some(bpm);
        } else if to == EncounterDormancy::Awake
            && matches!(
                from,
                EncounterDormancy::Hibernating | EncounterDormancy::Trance
            )
        {
            let increase = rng.duck().gen_range(35..=100);
            let bpm = self.duck.heart_rate_bpm.unwrap_or(AWAKE_BPM_BASE) + increase;
            log.push(format!(
                "BPM aumentou drasticamente em {increase}! Novo BPM: {bpm}"
            ));
            self.duck.heart_rate_bpm = Some(bpm);
        }

        self.duck.dormancy = to;
        self.duck.capture_failures = 0;

        if to == EncounterDormancy::Awake {
            self.on_awakened(rng, log);
        }
    }

    fn on_awakened(&mut self, rng: &RngBundle, log: &mut MissionLog) {
        log.push(LOG_AWAKE_ALERT);
        self.duck.evasion_pct =
            (self.duck.evasion_pct + AWAKE_EVASION_BONUS).min(AWAKE_EVASION_CAP);

        if let Some(power) = &self.duck.catalog_power {
            log.push(format!(
                "Poder conhecido: {} ({})",
                power.name, power.kind
            ));
        } else if self.duck.awakened_kind.is_none() {
            let kind =
                PowerType::AWAKENABLE[rng.duck().gen_range(0..PowerType::AWAKENABLE.len())];
            self.duck.awakened_kind = Some(kind);
            log.push(format!(
                "⚡ Poder despertado catalogado: Poder Desconhecido ({kind})"
            ));
        }
    }

    /// Record a terminal outcome exactly once.
    pub(crate) fn finish(&mut self, status: MissionStatus, final_log: &str) {
        if self.outcome.is_none() {
            self.outcome = Some(status);
            self.final_log = Some(final_log.to_string());
        }
    }

    /// Check the terminal conditions in fixed priority order: captured beats
    /// destruction beats battery exhaustion beats flight. Idempotent; runs
    /// after every mutation.
    pub(crate) fn resolve_terminal(
        &mut self,
        drone: &DroneStats,
        log: &mut MissionLog,
    ) -> Option<MissionStatus> {
        if self.outcome.is_some() {
            return self.outcome;
        }

        if self.duck.dormancy == EncounterDormancy::Captured {
            log.push(LOG_CAPTURED);
            self.finish(MissionStatus::Captured, LOG_CAPTURED);
        } else if drone.integrity_depleted() {
            log.push(LOG_DRONE_DESTROYED);
            self.finish(MissionStatus::DroneDestroyed, LOG_DRONE_DESTROYED);
        } else if drone.battery_depleted() {
            log.push(LOG_BATTERY_DEPLETED);
            self.finish(MissionStatus::BatteryDepleted, LOG_BATTERY_DEPLETED);
        } else if self.duck.dormancy == EncounterDormancy::Fleeing {
            // Flight pushes its own log line at the point of escape.
            self.finish(MissionStatus::TargetFled, crate::constants::LOG_DUCK_FLED);
        }
        self.outcome
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{Location, PowerRarity};

    pub(crate) fn fixture_target(dormancy: DormancyStatus) -> TargetRecord {
        TargetRecord {
            id: "pato-01".into(),
            height_cm: 90.0,
            weight_g: 5_000.0,
            location: Location {
                city: "Manaus".into(),
                country: "Brasil".into(),
                latitude: -3.1,
                longitude: -60.0,
                landmark: None,
                terrain: None,
            },
            gps_accuracy_m: 3.0,
            dormancy,
            heart_rate_bpm: Some(25),
            mutation_count: 0,
            power: None,
            captured: false,
        }
    }

    fn legendary_power() -> Power {
        Power {
            name: "Eco Dimensional".into(),
            description: String::new(),
            kind: PowerType::Espacial,
            rarity: PowerRarity::Lendario,
            notes: None,
        }
    }

    #[test]
    fn plain_dormant_target_uses_base_pools() {
        let rng = RngBundle::from_user_seed(1);
        let duck = DuckState::derive(&fixture_target(DormancyStatus::DeepHibernation), &rng);
        assert_eq!(duck.hp(), 150);
        assert_eq!(duck.max_hp(), 150);
        assert_eq!(duck.evasion_pct(), 10);
        assert_eq!(duck.dormancy(), EncounterDormancy::Hibernating);
        assert!(!duck.has_power());
    }

    #[test]
    fn derivation_stacks_all_bonuses() {
        let mut target = fixture_target(DormancyStatus::Awake);
        target.power = Some(legendary_power());
        target.height_cm = 350.0;
        target.weight_g = 120_000.0;
        target.mutation_count = 12;
        let rng = RngBundle::from_user_seed(1);
        let duck = DuckState::derive(&target, &rng);
        // 150 + 100 rarity + 30 tall + 25 heavy + 24 mutations.
        assert_eq!(duck.max_hp(), 329);
        // 10 + 10 rarity + 4 mutations + 15 awake = 39.
        assert_eq!(duck.evasion_pct(), 39);
    }

    #[test]
    fn evasion_is_capped_at_fifty() {
        let mut target = fixture_target(DormancyStatus::Awake);
        target.power = Some(legendary_power());
        target.mutation_count = 60;
        let rng = RngBundle::from_user_seed(1);
        let duck = DuckState::derive(&target, &rng);
        assert_eq!(duck.evasion_pct(), 50);
    }

    #[test]
    fn weak_points_are_three_distinct_locations() {
        for seed in 0..64 {
            let rng = RngBundle::from_user_seed(seed);
            let points = draw_weak_points(&rng);
            assert_eq!(points.len(), 3);
            for (i, wp) in points.iter().enumerate() {
                assert!(points[i + 1..].iter().all(|o| o.location != wp.location));
            }
        }
    }

    #[test]
    fn dormancy_never_regresses() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::Trance);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);

        state.escalate_dormancy(EncounterDormancy::Hibernating, &rng, &mut log);
        assert_eq!(state.duck().dormancy(), EncounterDormancy::Trance);

        state.escalate_dormancy(EncounterDormancy::Awake, &rng, &mut log);
        assert_eq!(state.duck().dormancy(), EncounterDormancy::Awake);

        state.escalate_dormancy(EncounterDormancy::Trance, &rng, &mut log);
        assert_eq!(state.duck().dormancy(), EncounterDormancy::Awake);
    }

    #[test]
    fn awakening_raises_evasion_and_catalogs_a_power() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::DeepHibernation);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);

        state.escalate_dormancy(EncounterDormancy::Awake, &rng, &mut log);
        assert_eq!(state.duck().evasion_pct(), 25);
        assert!(state.duck().has_power(), "awakening assigns a power type");
        assert!(state.duck().heart_rate_bpm().unwrap() > 25);
        assert!(log.entries().iter().any(|l| l == LOG_AWAKE_ALERT));
    }

    #[test]
    fn escalation_resets_capture_failures() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::DeepHibernation);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);
        state.duck.capture_failures = 2;
        state.escalate_dormancy(EncounterDormancy::Trance, &rng, &mut log);
        assert_eq!(state.duck.capture_failures, 0);
    }

    #[test]
    fn end_turn_ticks_cooldowns_and_flips_sides() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::DeepHibernation);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);
        state.weapon_cooldown = 2;
        state.nano_cooldown = 1;
        state.duck.stun_turns = 2;

        state.end_turn(&mut log);
        assert_eq!(state.turn(), Side::Duck);
        assert_eq!(state.weapon_cooldown, 1);
        assert_eq!(state.nano_cooldown, 0);
        assert_eq!(state.duck().stun_turns(), 1);

        state.end_turn(&mut log);
        assert_eq!(state.turn(), Side::Drone);
        assert_eq!(state.weapon_cooldown, 0);
    }

    #[test]
    fn fresh_shield_survives_its_own_turn_then_expires() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::DeepHibernation);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);

        state.shield_active = true;
        state.shield_raised_this_turn = true;
        state.end_turn(&mut log);
        assert!(state.shield_active(), "shield holds through the duck turn");

        state.end_turn(&mut log); // duck's end-turn, no shield logic
        assert!(state.shield_active());

        state.end_turn(&mut log); // next drone end-turn drops it
        assert!(!state.shield_active());
        assert!(log.entries().iter().any(|l| l == LOG_SHIELD_DOWN));
    }

    #[test]
    fn terminal_priority_prefers_capture_over_destruction() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::DeepHibernation);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);
        let mut drone = DroneStats::default();
        drone.add_integrity(-200.0);
        state.duck.dormancy = EncounterDormancy::Captured;

        assert_eq!(
            state.resolve_terminal(&drone, &mut log),
            Some(MissionStatus::Captured)
        );
        // Idempotent: a second resolution returns the same status without
        // appending another final line.
        let len = log.len();
        assert_eq!(
            state.resolve_terminal(&drone, &mut log),
            Some(MissionStatus::Captured)
        );
        assert_eq!(log.len(), len);
    }

    #[test]
    fn integrity_failure_outranks_battery_failure() {
        let rng = RngBundle::from_user_seed(5);
        let mut log = MissionLog::new();
        let target = fixture_target(DormancyStatus::DeepHibernation);
        let mut state = EngagementState::new(&target, None, None, &rng, &mut log);
        let mut drone = DroneStats::default();
        drone.add_integrity(-200.0);
        drone.add_battery(-200.0);
        assert_eq!(
            state.resolve_terminal(&drone, &mut log),
            Some(MissionStatus::DroneDestroyed)
        );
    }
}
