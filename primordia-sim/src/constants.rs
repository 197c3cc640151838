//! Centralized balance and tuning constants for the mission simulator.
//!
//! These values define the deterministic math for both mission phases.
//! Keeping them together ensures the simulation can only be rebalanced via
//! code changes reviewed in version control.

// Fixed operator-facing log lines ------------------------------------------
pub(crate) const LOG_LAUNCH: &str = "Drone Mk-II lançado!";
pub(crate) const LOG_EQUIP_EXTRA_TANK: &str = "Tanque de combustível extra equipado.";
pub(crate) const LOG_EQUIP_ARMOR: &str = "Blindagem reforçada equipada.";
pub(crate) const LOG_EQUIP_CARGO: &str = "Drone de carga extra acoplado.";
pub(crate) const LOG_EQUIP_CAMOUFLAGE: &str = "Sistema de camuflagem ativado.";
pub(crate) const LOG_EQUIP_REPAIR: &str = "Nano-bots de reparo equipados.";
pub(crate) const LOG_EQUIP_AI_ROUTE: &str = "IA de otimização de rota ativada.";
pub(crate) const LOG_TRANSIT_ARRIVED: &str = "Alvo alcançado! Preparando para engajamento.";
pub(crate) const LOG_TRANSIT_FUEL_CRITICAL: &str = "NÍVEL DE COMBUSTÍVEL CRÍTICO. MISSÃO FALHOU.";
pub(crate) const LOG_TRANSIT_HULL_CRITICAL: &str =
    "INTEGRIDADE DO DRONE COMPROMETIDA. MISSÃO FALHOU.";
pub(crate) const LOG_REPAIR_ACTIVATED: &str = "Nano-bots de reparo ativados!";
pub(crate) const LOG_REPAIR_LOW_BATTERY: &str = "Bateria insuficiente para ativar nano-bots.";
pub(crate) const LOG_REPAIR_READY: &str = "Sistemas de reparo prontos.";
pub(crate) const LOG_ENGAGEMENT_OPENED: &str = "--- FASE DE ENCONTRO INICIADA ---";
pub(crate) const LOG_DRONE_TURN: &str = "--- Sua vez de agir ---";
pub(crate) const LOG_SHIELD_DOWN: &str = "Escudo desativado.";
pub(crate) const LOG_SHIELD_UP: &str = "🛡️ Escudo Energético Ativado (-10% Bateria)!";
pub(crate) const LOG_SHIELD_SOFTENED: &str = "🛡️ Escudo absorveu parte do dano!";
pub(crate) const LOG_EVADED: &str = "❌ Pato desviou do ataque!";
pub(crate) const LOG_HP_DEPLETED: &str = "❌ ALERTA: Integridade do alvo falhou!";
pub(crate) const LOG_DESTRUCTIVE_ESCAPE: &str =
    "💥 Pato libera explosão de energia e escapa! Missão falhou.";
pub(crate) const LOG_AWAKE_ALERT: &str = "🚨 ALERTA MÁXIMO! O PATO DESPERTOU!";
pub(crate) const LOG_SCAN_BLOCKED: &str =
    "SCAN BLOQUEADO: Limite de falhas ou pontos fracos atingido.";
pub(crate) const LOG_SCAN_LIMIT: &str = "SCAN BLOQUEADO: Máximo de 3 pontos fracos encontrados.";
pub(crate) const LOG_SCAN_LOW_BATTERY: &str = "Bateria insuficiente para Scan.";
pub(crate) const LOG_SCAN_STARTED: &str = "Iniciando Scan Tático (-10% Bateria)...";
pub(crate) const LOG_SCAN_CAP_REACHED: &str =
    "Limite de 3 pontos fracos atingido. Scan bloqueado.";
pub(crate) const LOG_SCAN_LOCKED_OUT: &str =
    "Scan falhou 2 vezes consecutivas. Scan bloqueado.";
pub(crate) const LOG_STRAFE_LOW_INTEGRITY: &str = "Integridade baixa demais para Ataque Rasante!";
pub(crate) const LOG_STRAFE_STUNNED: &str = "🌟 Ataque Rasante ATORDOOU o Pato por 1 turno!";
pub(crate) const LOG_BURN_LOW_FUEL: &str = "Combustível insuficiente para conversão!";
pub(crate) const LOG_BURN_FUEL: &str =
    "Injetando combustível nos geradores... (-25% Combustível, +15% Bateria)";
pub(crate) const LOG_ABSORB_RECHARGING: &str = "Sistema de absorção recarregando...";
pub(crate) const LOG_ABSORB_POSTURE: &str =
    "Drone assume postura para absorver ataque de energia...";
pub(crate) const LOG_ABSORB_CONVERTED: &str =
    "⚡ Drone absorve a energia do poder! (+15% Bat, -20% Int)";
pub(crate) const LOG_ABSORB_FAILED_PHYSICAL: &str = "❌ Absorção falhou contra ataque físico!";
pub(crate) const LOG_NANO_ACTIVATED: &str = "🔧 Nano-bots de Reparo Ativados (-10% Bateria)...";
pub(crate) const LOG_NANO_RESTORED: &str = "✅ +15% Integridade restaurada!";
pub(crate) const LOG_DEFENSE_RECHARGING: &str = "SGDA ainda está recarregando...";
pub(crate) const LOG_DEFENSE_ALREADY_ARMED: &str =
    "SGDA já está ativo, aguardando ataque do Pato.";
pub(crate) const LOG_DEFENSE_LOW_BATTERY: &str = "Bateria insuficiente para SGDA.";
pub(crate) const LOG_DEFENSE_NEGATED: &str = "🛡️ DEFESA SGDA ATIVADA! Ataque neutralizado!";
pub(crate) const LOG_SUPPORT_USED: &str = "Drone de apoio já foi utilizado nesta missão.";
pub(crate) const LOG_CAPTURE_LOW_BATTERY: &str =
    "Bateria insuficiente para esta ação de captura!";
pub(crate) const LOG_TITANIUM_EMPTY: &str = "Rede de Titânio sem cargas!";
pub(crate) const LOG_STASIS_USED: &str = "Campo de Estase já utilizado.";
pub(crate) const LOG_STASIS_NEEDS_AWAKE: &str = "Campo de Estase só funciona em alvos Despertos.";
pub(crate) const LOG_STASIS_NEEDS_TITANIUM: &str =
    "Use todas as cargas da Rede de Titânio primeiro.";
pub(crate) const LOG_STASIS_DRAIN: &str =
    "⚠️ ATIVANDO CAMPO DE ESTASE! Drenando todos os sistemas...";
pub(crate) const LOG_STASIS_FAILED: &str =
    "❌ Campo de Estase falhou em conter o alvo! Sistemas críticos drenados!";
pub(crate) const LOG_CAPTURE_ESCALATE_TRANCE: &str =
    "⚠️ Falhas repetidas! Pato entrou Em Transe!";
pub(crate) const LOG_CAPTURE_ESCALATE_AWAKE: &str = "🚨 Falhas repetidas! Pato DESPERTOU!";
pub(crate) const LOG_SONIC_TRANCE: &str =
    "⚠️ Pulso Sônico perturbou a hibernação! Pato entrou Em Transe!";
pub(crate) const LOG_SONIC_AWAKE: &str = "🚨 Pulso Sônico causou despertar abrupto!";
pub(crate) const LOG_TITANIUM_AWAKE: &str = "🚨 O barulho da Rede de Titânio DESPERTOU o Pato!";
pub(crate) const LOG_MISCALIBRATED: &str =
    "❌ Falha crítica! O scan incorreto comprometeu o ataque!";
pub(crate) const LOG_DUCK_STUNNED: &str = "😵 Pato está Atordoado e não pode agir!";
pub(crate) const LOG_DUCK_HIBERNATING: &str = "💤 Pato permanece em hibernação profunda.";
pub(crate) const LOG_DUCK_IN_TRANCE: &str = "😵 Pato permanece Em Transe.";
pub(crate) const LOG_DUCK_RECOVERING: &str = "😵 Pato está atordoado, recuperando...";
pub(crate) const LOG_DUCK_RECOVERED: &str = "⚡ O Pato se recuperou do atordoamento!";
pub(crate) const LOG_DUCK_FLED: &str = "💨 O PATO CONSEGUIU FUGIR! MISSÃO FALHOU.";
pub(crate) const LOG_DUCK_CHARGING: &str = "⚡ Pato está CARREGANDO SEU PODER!";
pub(crate) const LOG_DUCK_PHYSICAL: &str = "👊 PATO ATACA: Ataque Físico!";
pub(crate) const LOG_CAPTURED: &str = "🎉 ALVO CAPTURADO COM SUCESSO! Retornando à base...";
pub(crate) const LOG_DRONE_DESTROYED: &str =
    "💀 INTEGRIDADE DO DRONE COMPROMETIDA. MISSÃO FALHOU.";
pub(crate) const LOG_BATTERY_DEPLETED: &str = "🔋 BATERIA ESGOTADA. MISSÃO FALHOU.";
pub(crate) const LOG_ABANDONED: &str = "⚠️ MISSÃO ABANDONADA PELO OPERADOR.";
pub(crate) const LOG_ARCHIVE_FAILED: &str = "⚠️ Erro ao registrar missão no histórico.";
pub(crate) const LOG_MARK_CAPTURED_OK: &str =
    "✅ Status do Pato atualizado para 'Capturado' no catálogo.";
pub(crate) const LOG_MARK_CAPTURED_FAILED: &str =
    "⚠️ ERRO: Falha ao atualizar status do pato no catálogo.";

// Drone resource limits -----------------------------------------------------
pub(crate) const STAT_MAX_DEFAULT: f64 = 100.0;
pub(crate) const ARMOR_MAX_INTEGRITY: f64 = 120.0;
pub(crate) const EXTRA_TANK_MAX_FUEL: f64 = 130.0;
pub(crate) const LOADOUT_MODULE_LIMIT: usize = 2;

// Launch loadout deltas -----------------------------------------------------
pub(crate) const LAUNCH_TANK_FUEL_GAIN: f64 = 30.0;
pub(crate) const LAUNCH_TANK_INTEGRITY_COST: f64 = 5.0;
pub(crate) const LAUNCH_ARMOR_INTEGRITY_GAIN: f64 = 20.0;
pub(crate) const LAUNCH_ARMOR_FUEL_COST: f64 = 10.0;
pub(crate) const LAUNCH_CARGO_BATTERY_COST: f64 = 15.0;
pub(crate) const LAUNCH_CAMOUFLAGE_BATTERY_COST: f64 = 5.0;
pub(crate) const LAUNCH_REPAIR_BATTERY_COST: f64 = 10.0;
pub(crate) const LAUNCH_AI_BATTERY_COST: f64 = 15.0;

// Transit tuning ------------------------------------------------------------
pub(crate) const TICK_PROGRESS_BASE: f64 = 5.0;
pub(crate) const TICK_FUEL_BASE: f64 = 1.0;
pub(crate) const AI_ROUTE_FUEL_FACTOR: f64 = 0.70;
pub(crate) const AI_ROUTE_PROGRESS_BONUS: f64 = 2.0;
pub(crate) const ARMOR_FUEL_FACTOR: f64 = 1.1;
pub(crate) const EXTRA_TANK_FUEL_FACTOR: f64 = 1.05;
pub(crate) const THRUSTER_PROGRESS_FACTOR: f64 = 1.8;
pub(crate) const THRUSTER_FUEL_FACTOR: f64 = 2.0;
pub(crate) const THRUSTER_INTEGRITY_WEAR: f64 = 2.0;
pub(crate) const TRANSIT_EVENT_CAP: u8 = 4;
pub(crate) const RANDOM_EVENT_CHANCE: f64 = 0.20;
pub(crate) const RANDOM_EVENT_CHANCE_CAMOUFLAGE: f64 = 0.10;
pub(crate) const RANDOM_EVENT_MIN_PROGRESS: u8 = 10;
pub(crate) const RANDOM_EVENT_MAX_PROGRESS: u8 = 90;
pub(crate) const GUARANTEED_EVENT_FIRST_PROGRESS: u8 = 30;
pub(crate) const GUARANTEED_EVENT_SECOND_PROGRESS: u8 = 65;
pub(crate) const TRANSIT_REPAIR_BATTERY_COST: f64 = 20.0;
pub(crate) const TRANSIT_REPAIR_INTEGRITY_GAIN: f64 = 15.0;
pub(crate) const TRANSIT_REPAIR_COOLDOWN_MS: u64 = 15_000;

// Encounter derivation ------------------------------------------------------
pub(crate) const DUCK_BASE_HP: i32 = 150;
pub(crate) const DUCK_BASE_EVASION: i32 = 10;
pub(crate) const DUCK_EVASION_CAP: i32 = 50;
pub(crate) const AWAKE_EVASION_BONUS: i32 = 15;
pub(crate) const AWAKE_EVASION_CAP: i32 = 60;
pub(crate) const TALL_TARGET_HP_BONUS: i32 = 30;
pub(crate) const TALL_TARGET_HEIGHT_CM: f64 = 300.0;
pub(crate) const HEAVY_TARGET_HP_BONUS: i32 = 25;
pub(crate) const HEAVY_TARGET_WEIGHT_G: f64 = 100_000.0;
pub(crate) const MUTATION_HP_THRESHOLD: u32 = 10;
pub(crate) const MUTATION_HP_FACTOR: i32 = 2;
pub(crate) const MUTATION_EVASION_DIVISOR: u32 = 3;
pub(crate) const WEAK_POINT_COUNT: usize = 3;
pub(crate) const TRANCE_BPM_BASE: u32 = 30;
pub(crate) const AWAKE_BPM_BASE: u32 = 60;

// Drone action costs and effects --------------------------------------------
pub(crate) const BASIC_LASER_BATTERY_COST: f64 = 1.0;
pub(crate) const BASIC_LASER_DAMAGE: i32 = 10;
pub(crate) const STRAFE_INTEGRITY_COST: f64 = 10.0;
pub(crate) const STRAFE_DAMAGE: i32 = 10;
pub(crate) const STRAFE_STUN_CHANCE: f64 = 0.4;
pub(crate) const STRAFE_STUN_TURNS: u8 = 2;
pub(crate) const SCAN_BATTERY_COST: f64 = 10.0;
pub(crate) const SCAN_BASE_CHANCE: f64 = 95.0;
pub(crate) const SCAN_MUTATION_PENALTY: f64 = 2.8;
pub(crate) const SCAN_MUTATION_CAP: u32 = 25;
pub(crate) const SCAN_FAILURE_LOCK: u8 = 2;
pub(crate) const SHIELD_BATTERY_COST: f64 = 10.0;
pub(crate) const SHIELD_DAMAGE_FACTOR: f64 = 0.5;
pub(crate) const BURN_FUEL_COST: f64 = 25.0;
pub(crate) const BURN_BATTERY_GAIN: f64 = 15.0;
pub(crate) const ABSORB_COOLDOWN_TURNS: u8 = 3;
pub(crate) const ABSORB_BATTERY_GAIN: f64 = 15.0;
pub(crate) const ABSORB_INTEGRITY_COST: f64 = 20.0;
pub(crate) const NANO_BATTERY_COST: f64 = 10.0;
pub(crate) const NANO_INTEGRITY_GAIN: f64 = 15.0;
pub(crate) const NANO_COOLDOWN_TURNS: u8 = 3;
pub(crate) const DEFENSE_GEN_BATTERY_COST: f64 = 25.0;
pub(crate) const DEFENSE_GEN_COOLDOWN_TURNS: u8 = 4;
pub(crate) const SUPPORT_BATTERY_GAIN: f64 = 20.0;
pub(crate) const SUPPORT_INTEGRITY_GAIN: f64 = 25.0;
pub(crate) const SUPPORT_FUEL_GAIN: f64 = 15.0;
pub(crate) const WEAPON_EFFECTIVE_FACTOR: f64 = 2.0;
pub(crate) const MISCALIBRATION_CHANCE: f64 = 0.3;
pub(crate) const MISCALIBRATION_FACTOR: f64 = 0.5;

// Capture tuning ------------------------------------------------------------
pub(crate) const CRYO_BATTERY_COST: f64 = 15.0;
pub(crate) const SONIC_BATTERY_COST: f64 = 20.0;
pub(crate) const TITANIUM_BATTERY_COST: f64 = 15.0;
pub(crate) const TITANIUM_CHARGES: u8 = 3;
pub(crate) const CAPTURE_LOW_HP: i32 = 15;
pub(crate) const TITANIUM_LOW_HP: i32 = 20;
pub(crate) const CAPTURE_FAILURE_ESCALATION: u8 = 2;
pub(crate) const STASIS_DRAIN_INTEGRITY: f64 = 1.0;
pub(crate) const STASIS_DRAIN_BATTERY: f64 = 1.0;
pub(crate) const STASIS_DRAIN_FUEL: f64 = 5.0;
pub(crate) const SONIC_HIBERNATION_TRANCE_ROLL: f64 = 0.60;
pub(crate) const SONIC_HIBERNATION_AWAKE_ROLL: f64 = 0.85;

// Duck turn tuning ----------------------------------------------------------
pub(crate) const TRANCE_AWAKEN_CHANCE: f64 = 0.15;
pub(crate) const STUN_RECOVERY_CHANCE: f64 = 0.4;
pub(crate) const FLEE_HP_THRESHOLD: i32 = 30;
pub(crate) const FLEE_CHANCE: f64 = 0.3;
pub(crate) const CHARGE_CHANCE: f64 = 0.4;
pub(crate) const POWER_ATTACK_CHANCE: f64 = 0.6;
pub(crate) const CHARGED_DAMAGE_MIN: i32 = 20;
pub(crate) const CHARGED_DAMAGE_MAX: i32 = 44;
pub(crate) const POWER_DAMAGE_MIN: i32 = 10;
pub(crate) const POWER_DAMAGE_MAX: i32 = 24;
pub(crate) const PHYSICAL_DAMAGE_MIN: i32 = 5;
pub(crate) const PHYSICAL_DAMAGE_MAX: i32 = 12;

// Driver cadence ------------------------------------------------------------
pub(crate) const TRANSIT_TICK_MS: u64 = 2_000;
pub(crate) const DUCK_TURN_DELAY_MS: u64 = 1_500;
pub(crate) const OUTCOME_DELAY_MS: u64 = 1_500;
