//! Static drone armament table.
//!
//! The baseline laser is always equipped; at most one special weapon can be
//! mounted per mission on top of it.

use crate::catalog::PowerType;

/// Static definition of a drone weapon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponSpec {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effective_against: &'static [PowerType],
    pub battery_cost: f64,
    pub cooldown_turns: u8,
    pub base_damage: i32,
}

impl WeaponSpec {
    /// Whether the weapon's matchup bonus applies against the given power.
    #[must_use]
    pub fn is_effective_against(&self, kind: PowerType) -> bool {
        self.effective_against.contains(&kind)
    }
}

/// Identifier of the always-equipped baseline weapon.
pub const BASELINE_LASER_ID: &str = "laser_padrao";

/// Full armament catalog, baseline laser first.
pub const ARSENAL: &[WeaponSpec] = &[
    WeaponSpec {
        id: BASELINE_LASER_ID,
        name: "Laser Padrão Mk-I",
        description: "Disparo de energia focado. Arma básica sem especialização.",
        effective_against: &[],
        battery_cost: 5.0,
        cooldown_turns: 0,
        base_damage: 10,
    },
    WeaponSpec {
        id: "pulso_sonico",
        name: "Pulso Sônico Disruptor",
        description: "Onda sonora de alta frequência. Eficaz contra poderes mentais e sônicos.",
        effective_against: &[PowerType::Psiquico, PowerType::Sonico],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "canhao_crio",
        name: "Canhão Criogênico",
        description: "Rajada congelante. Eficaz contra poderes elementais e biológicos.",
        effective_against: &[PowerType::Elemental, PowerType::Biologico],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "disruptor_pem",
        name: "Disruptor PEM",
        description: "Pulso eletromagnético. Eficaz contra tecnologia e defesas.",
        effective_against: &[PowerType::Tecnologico, PowerType::Defensivo],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "lanca_toxina",
        name: "Lança-Toxina Neural",
        description: "Projétil com neurotoxina. Eficaz contra organismos biológicos.",
        effective_against: &[PowerType::Biologico],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "mina_grav",
        name: "Mina Gravitacional",
        description: "Anomalia gravitacional localizada. Eficaz contra manipuladores espaciais.",
        effective_against: &[PowerType::Espacial],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 30,
    },
    WeaponSpec {
        id: "nulificador",
        name: "Campo Nulificador Arcano",
        description: "Suprime energias místicas e caóticas.",
        effective_against: &[PowerType::Mistico, PowerType::Caotico],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "canhao_plasma",
        name: "Canhão de Plasma",
        description: "Disparo de plasma superaquecido. Alto dano bruto.",
        effective_against: &[PowerType::Belico, PowerType::Defensivo],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "ondas_telepaticas",
        name: "Emissor de Ondas Telepáticas",
        description: "Ondas que causam confusão mental. Eficaz contra poderes psíquicos.",
        effective_against: &[PowerType::Psiquico],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
    WeaponSpec {
        id: "explosivo_ressonante",
        name: "Explosivo Ressonante",
        description: "Explosão que ressoa com frequências específicas. Alto dano contra poderes \
                      sônicos e espaciais.",
        effective_against: &[PowerType::Sonico, PowerType::Espacial],
        battery_cost: 15.0,
        cooldown_turns: 1,
        base_damage: 25,
    },
];

/// Look up a weapon definition by its identifier.
#[must_use]
pub fn weapon_by_id(id: &str) -> Option<&'static WeaponSpec> {
    ARSENAL.iter().find(|weapon| weapon.id == id)
}

/// All mountable special weapons (everything except the baseline laser).
pub fn special_weapons() -> impl Iterator<Item = &'static WeaponSpec> {
    ARSENAL.iter().filter(|weapon| weapon.id != BASELINE_LASER_ID)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arsenal_ids_are_unique() {
        for (i, weapon) in ARSENAL.iter().enumerate() {
            assert!(
                ARSENAL[i + 1..].iter().all(|other| other.id != weapon.id),
                "duplicate weapon id {}",
                weapon.id
            );
        }
    }

    #[test]
    fn baseline_laser_has_no_specialization() {
        let laser = weapon_by_id(BASELINE_LASER_ID).unwrap();
        assert!(laser.effective_against.is_empty());
        assert_eq!(laser.cooldown_turns, 0);
        assert_eq!(special_weapons().count(), ARSENAL.len() - 1);
    }

    #[test]
    fn effectiveness_lookup_matches_table() {
        let crio = weapon_by_id("canhao_crio").unwrap();
        assert!(crio.is_effective_against(PowerType::Elemental));
        assert!(!crio.is_effective_against(PowerType::Espacial));
        assert!(weapon_by_id("arma_inexistente").is_none());
    }
}
