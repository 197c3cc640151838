//! Pre-mission target assessment.
//!
//! Pure scoring used to rank catalogued targets against a launch base before
//! a mission is configured. The engagement engine never consults it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::{BaseRecord, DormancyStatus, PowerRarity, PowerType, TargetRecord, TerrainDifficulty};
use crate::geo::haversine_km;
use crate::numbers::{round_f64_to_i32, u32_to_f64};

/// Operational cost bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CostTier {
    Baixo,
    Medio,
    Alto,
    Extremo,
}

/// Mission risk bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskTier {
    Baixo,
    Medio,
    Alto,
    Extremo,
}

/// Scientific value bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValueTier {
    Baixo,
    Medio,
    Alto,
    Inestimavel,
}

/// Overall difficulty bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DifficultyTier {
    Trivial,
    Baixa,
    Moderada,
    Alta,
    Extrema,
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Baixo => "Baixo",
            Self::Medio => "Médio",
            Self::Alto => "Alto",
            Self::Extremo => "Extremo",
        })
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Baixo => "Baixo",
            Self::Medio => "Médio",
            Self::Alto => "Alto",
            Self::Extremo => "Extremo",
        })
    }
}

impl fmt::Display for ValueTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Baixo => "Baixo",
            Self::Medio => "Médio",
            Self::Alto => "Alto",
            Self::Inestimavel => "Inestimável",
        })
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trivial => "Trivial",
            Self::Baixa => "Baixa",
            Self::Moderada => "Moderada",
            Self::Alta => "Alta",
            Self::Extrema => "Extrema",
        })
    }
}

/// Raw point totals behind the bucketed tiers, rounded for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorePoints {
    pub cost: i32,
    pub risk: i32,
    pub value: i32,
}

/// Complete pre-mission assessment of a target/base pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAssessment {
    pub distance_km: i32,
    pub cost: CostTier,
    pub risk: RiskTier,
    pub value: ValueTier,
    pub difficulty: DifficultyTier,
    pub points: ScorePoints,
}

/// Score a target against a launch base. Pure and side-effect free.
#[must_use]
pub fn assess(target: &TargetRecord, base: &BaseRecord) -> TargetAssessment {
    let distance_km = haversine_km(
        target.location.latitude,
        target.location.longitude,
        base.latitude,
        base.longitude,
    );

    let cost_pts = cost_points(target, distance_km);
    let risk_pts = risk_points(target);
    let value_pts = value_points(target);

    let difficulty_pts = risk_pts * 2.0 + cost_pts * 1.5 - value_pts * 0.5;

    TargetAssessment {
        distance_km: round_f64_to_i32(distance_km),
        cost: bucket_cost(cost_pts),
        risk: bucket_risk(risk_pts),
        value: bucket_value(value_pts),
        difficulty: bucket_difficulty(difficulty_pts),
        points: ScorePoints {
            cost: round_f64_to_i32(cost_pts),
            risk: round_f64_to_i32(risk_pts),
            value: round_f64_to_i32(value_pts),
        },
    }
}

fn cost_points(target: &TargetRecord, distance_km: f64) -> f64 {
    let mut pts = if distance_km > 9_000.0 {
        40.0
    } else if distance_km > 4_000.0 {
        25.0
    } else if distance_km > 1_500.0 {
        15.0
    } else if distance_km > 500.0 {
        5.0
    } else {
        1.0
    };

    // Cargo volume: meters of height times tens of kilograms.
    pts += (target.height_cm / 100.0) * (target.weight_g / 10_000.0);
    pts += u32_to_f64(target.mutation_count).powf(1.4);

    pts += match target.location.terrain {
        Some(TerrainDifficulty::Extrema) => 20.0,
        Some(TerrainDifficulty::Alta) => 12.0,
        Some(TerrainDifficulty::Moderada) => 6.0,
        Some(TerrainDifficulty::Baixa) => 3.0,
        None => 0.0,
    };

    pts
}

fn risk_points(target: &TargetRecord) -> f64 {
    let mut pts = match target.dormancy {
        DormancyStatus::Awake => 30.0,
        DormancyStatus::Trance => 10.0,
        DormancyStatus::DeepHibernation => 1.0,
    };

    if let Some(bpm) = target.heart_rate_bpm {
        match target.dormancy {
            DormancyStatus::Trance if bpm > 100 => pts += 15.0,
            DormancyStatus::Trance if bpm > 70 => pts += 5.0,
            DormancyStatus::DeepHibernation if bpm > 40 => pts += 10.0,
            _ => {}
        }
    }

    if let Some(power) = &target.power {
        pts += 5.0;
        pts += match power.kind {
            PowerType::Belico | PowerType::Caotico | PowerType::Espacial => 25.0,
            PowerType::Elemental | PowerType::Psiquico => 15.0,
            _ => 0.0,
        };
        if let Some(notes) = &power.notes {
            let notes = notes.to_lowercase();
            if notes.contains("alto risco") {
                pts += 10.0;
            }
            if notes.contains("instável") {
                pts += 15.0;
            }
        }
    }

    if target.location.landmark.is_some() {
        pts += 10.0;
    }

    pts += match target.location.terrain {
        Some(TerrainDifficulty::Extrema) => 15.0,
        Some(TerrainDifficulty::Alta) => 10.0,
        Some(TerrainDifficulty::Moderada) => 5.0,
        Some(TerrainDifficulty::Baixa) => 2.0,
        None => 0.0,
    };

    if target.gps_accuracy_m > 20.0 {
        pts += 15.0;
    } else if target.gps_accuracy_m > 5.0 {
        pts += 5.0;
    }

    pts
}

fn value_points(target: &TargetRecord) -> f64 {
    let mut pts = u32_to_f64(target.mutation_count) * 1.5;

    if let Some(power) = &target.power {
        pts += 10.0;
        pts += match power.rarity {
            PowerRarity::Lendario => 50.0,
            PowerRarity::Epico => 30.0,
            PowerRarity::Raro => 15.0,
            PowerRarity::Incomum | PowerRarity::Comum => 2.0,
        };
    }

    if target.height_cm > 400.0 || target.height_cm < 20.0 {
        pts += 15.0;
    }
    if target.weight_g > 150_000.0 {
        pts += 10.0;
    }

    match target.dormancy {
        DormancyStatus::Awake => pts += 15.0,
        DormancyStatus::DeepHibernation => pts += 10.0,
        DormancyStatus::Trance => {}
    }

    pts
}

fn bucket_cost(pts: f64) -> CostTier {
    if pts > 50.0 {
        CostTier::Extremo
    } else if pts > 25.0 {
        CostTier::Alto
    } else if pts > 10.0 {
        CostTier::Medio
    } else {
        CostTier::Baixo
    }
}

fn bucket_risk(pts: f64) -> RiskTier {
    if pts > 50.0 {
        RiskTier::Extremo
    } else if pts > 25.0 {
        RiskTier::Alto
    } else if pts > 10.0 {
        RiskTier::Medio
    } else {
        RiskTier::Baixo
    }
}

fn bucket_value(pts: f64) -> ValueTier {
    if pts > 50.0 {
        ValueTier::Inestimavel
    } else if pts > 25.0 {
        ValueTier::Alto
    } else if pts > 10.0 {
        ValueTier::Medio
    } else {
        ValueTier::Baixo
    }
}

fn bucket_difficulty(pts: f64) -> DifficultyTier {
    if pts > 80.0 {
        DifficultyTier::Extrema
    } else if pts > 50.0 {
        DifficultyTier::Alta
    } else if pts > 25.0 {
        DifficultyTier::Moderada
    } else if pts > 5.0 {
        DifficultyTier::Baixa
    } else {
        DifficultyTier::Trivial
    }
}
