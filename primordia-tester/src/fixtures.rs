//! Built-in target and base presets for headless mission runs.

use primordia_sim::{
    BaseRecord, DormancyStatus, Loadout, Location, MissionPlan, Power, PowerRarity, PowerType,
    SupportDrone, TargetRecord, TerrainDifficulty,
};

/// A named mission setup the tester can run repeatedly.
pub struct MissionPreset {
    pub name: &'static str,
    pub description: &'static str,
    pub plan: fn() -> MissionPlan,
}

pub fn all_presets() -> Vec<MissionPreset> {
    vec![
        MissionPreset {
            name: "dormant-easy",
            description: "Hibernating lowland target, stock loadout, short hop",
            plan: dormant_easy,
        },
        MissionPreset {
            name: "trance-psychic",
            description: "Trance psychic with repair loadout and sonic disruptor",
            plan: trance_psychic,
        },
        MissionPreset {
            name: "awake-chaotic",
            description: "Awake legendary chaotic in extreme terrain, full kit",
            plan: awake_chaotic,
        },
        MissionPreset {
            name: "giant-longhaul",
            description: "Giant heavy target across the Atlantic, thrusters",
            plan: giant_longhaul,
        },
    ]
}

pub fn preset_by_name(name: &str) -> Option<MissionPreset> {
    all_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

fn headquarters() -> BaseRecord {
    BaseRecord {
        id: "base-sede".into(),
        name: "Sede DSIN".into(),
        country: "Brasil".into(),
        latitude: -23.55,
        longitude: -46.63,
        is_headquarters: true,
    }
}

fn dormant_easy() -> MissionPlan {
    MissionPlan {
        target: TargetRecord {
            id: "pato-dormente".into(),
            height_cm: 75.0,
            weight_g: 3_800.0,
            location: Location {
                city: "Registro".into(),
                country: "Brasil".into(),
                latitude: -24.49,
                longitude: -47.84,
                landmark: None,
                terrain: Some(TerrainDifficulty::Baixa),
            },
            gps_accuracy_m: 2.5,
            dormancy: DormancyStatus::DeepHibernation,
            heart_rate_bpm: Some(18),
            mutation_count: 1,
            power: None,
            captured: false,
        },
        base: headquarters(),
        loadout: Loadout::default(),
        special_weapon: None,
        support: None,
    }
}

fn trance_psychic() -> MissionPlan {
    MissionPlan {
        target: TargetRecord {
            id: "pato-psiquico".into(),
            height_cm: 160.0,
            weight_g: 22_000.0,
            location: Location {
                city: "Chapada dos Guimarães".into(),
                country: "Brasil".into(),
                latitude: -15.46,
                longitude: -55.75,
                landmark: Some("Mirante da Chapada".into()),
                terrain: Some(TerrainDifficulty::Moderada),
            },
            gps_accuracy_m: 7.0,
            dormancy: DormancyStatus::Trance,
            heart_rate_bpm: Some(84),
            mutation_count: 6,
            power: Some(Power {
                name: "Sussurro Mental".into(),
                description: "Projeção psíquica de curto alcance.".into(),
                kind: PowerType::Psiquico,
                rarity: PowerRarity::Incomum,
                notes: None,
            }),
            captured: false,
        },
        base: headquarters(),
        loadout: Loadout {
            repair: true,
            ai_route: true,
            ..Loadout::default()
        },
        special_weapon: Some("pulso_sonico".into()),
        support: Some(SupportDrone::Battery),
    }
}

fn awake_chaotic() -> MissionPlan {
    MissionPlan {
        target: TargetRecord {
            id: "pato-caotico".into(),
            height_cm: 320.0,
            weight_g: 180_000.0,
            location: Location {
                city: "Ushuaia".into(),
                country: "Argentina".into(),
                latitude: -54.8,
                longitude: -68.3,
                landmark: Some("Glaciar Martial".into()),
                terrain: Some(TerrainDifficulty::Extrema),
            },
            gps_accuracy_m: 26.0,
            dormancy: DormancyStatus::Awake,
            heart_rate_bpm: None,
            mutation_count: 14,
            power: Some(Power {
                name: "Maré da Entropia".into(),
                description: "Distorce probabilidades ao redor.".into(),
                kind: PowerType::Caotico,
                rarity: PowerRarity::Lendario,
                notes: Some("Espécime instável, alto risco.".into()),
            }),
            captured: false,
        },
        base: headquarters(),
        loadout: Loadout {
            armor: true,
            repair: true,
            ..Loadout::default()
        },
        special_weapon: Some("nulificador".into()),
        support: Some(SupportDrone::Repair),
    }
}

fn giant_longhaul() -> MissionPlan {
    MissionPlan {
        target: TargetRecord {
            id: "pato-gigante".into(),
            height_cm: 430.0,
            weight_g: 260_000.0,
            location: Location {
                city: "Luanda".into(),
                country: "Angola".into(),
                latitude: -8.84,
                longitude: 13.23,
                landmark: None,
                terrain: Some(TerrainDifficulty::Alta),
            },
            gps_accuracy_m: 12.0,
            dormancy: DormancyStatus::Trance,
            heart_rate_bpm: Some(105),
            mutation_count: 9,
            power: None,
            captured: false,
        },
        base: headquarters(),
        loadout: Loadout {
            thrusters: true,
            extra_tank: true,
            ..Loadout::default()
        },
        special_weapon: Some("canhao_plasma".into()),
        support: Some(SupportDrone::Refuel),
    }
}
