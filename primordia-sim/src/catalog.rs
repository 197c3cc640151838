//! Read-only catalog record types consumed by the mission simulator.
//!
//! These mirror what the surrounding administration tool stores for targets
//! and launch bases. The simulator never writes them back; terminal results
//! flow through the [`crate::archive::MissionArchive`] collaborator instead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categorical tag of a target's special ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerType {
    #[serde(rename = "Bélico")]
    Belico,
    #[serde(rename = "Defensivo")]
    Defensivo,
    #[serde(rename = "Elemental")]
    Elemental,
    #[serde(rename = "Tecnológico")]
    Tecnologico,
    #[serde(rename = "Psíquico")]
    Psiquico,
    #[serde(rename = "Biológico")]
    Biologico,
    #[serde(rename = "Espacial")]
    Espacial,
    #[serde(rename = "Místico")]
    Mistico,
    #[serde(rename = "Sônico")]
    Sonico,
    #[serde(rename = "Caótico")]
    Caotico,
    #[serde(rename = "Outro")]
    Outro,
}

impl PowerType {
    /// The ten concrete types a dormant target can awaken into.
    /// "Outro" is a catalog catch-all, never rolled.
    pub const AWAKENABLE: [Self; 10] = [
        Self::Belico,
        Self::Defensivo,
        Self::Elemental,
        Self::Tecnologico,
        Self::Psiquico,
        Self::Biologico,
        Self::Espacial,
        Self::Mistico,
        Self::Sonico,
        Self::Caotico,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Belico => "Bélico",
            Self::Defensivo => "Defensivo",
            Self::Elemental => "Elemental",
            Self::Tecnologico => "Tecnológico",
            Self::Psiquico => "Psíquico",
            Self::Biologico => "Biológico",
            Self::Espacial => "Espacial",
            Self::Mistico => "Místico",
            Self::Sonico => "Sônico",
            Self::Caotico => "Caótico",
            Self::Outro => "Outro",
        }
    }
}

impl fmt::Display for PowerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PowerType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Bélico" => Ok(Self::Belico),
            "Defensivo" => Ok(Self::Defensivo),
            "Elemental" => Ok(Self::Elemental),
            "Tecnológico" => Ok(Self::Tecnologico),
            "Psíquico" => Ok(Self::Psiquico),
            "Biológico" => Ok(Self::Biologico),
            "Espacial" => Ok(Self::Espacial),
            "Místico" => Ok(Self::Mistico),
            "Sônico" => Ok(Self::Sonico),
            "Caótico" => Ok(Self::Caotico),
            "Outro" => Ok(Self::Outro),
            _ => Err(()),
        }
    }
}

/// Rarity tier of a catalogued power.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerRarity {
    #[serde(rename = "Comum")]
    Comum,
    #[serde(rename = "Incomum")]
    Incomum,
    #[serde(rename = "Raro")]
    Raro,
    #[serde(rename = "Épico")]
    Epico,
    #[serde(rename = "Lendário")]
    Lendario,
}

impl PowerRarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Comum => "Comum",
            Self::Incomum => "Incomum",
            Self::Raro => "Raro",
            Self::Epico => "Épico",
            Self::Lendario => "Lendário",
        }
    }

    /// Extra hit points granted to the encounter pool at derivation.
    #[must_use]
    pub const fn hp_bonus(self) -> i32 {
        match self {
            Self::Comum => 0,
            Self::Incomum => 20,
            Self::Raro => 40,
            Self::Epico => 60,
            Self::Lendario => 100,
        }
    }
}

impl fmt::Display for PowerRarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalogued special ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: PowerType,
    pub rarity: PowerRarity,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Persisted dormancy status of a catalogued target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DormancyStatus {
    #[serde(rename = "Hibernação Profunda")]
    DeepHibernation,
    #[serde(rename = "Em Transe")]
    Trance,
    #[serde(rename = "Desperto")]
    Awake,
}

impl DormancyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeepHibernation => "Hibernação Profunda",
            Self::Trance => "Em Transe",
            Self::Awake => "Desperto",
        }
    }
}

impl fmt::Display for DormancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terrain difficulty recorded for a sighting location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerrainDifficulty {
    #[serde(rename = "Baixa")]
    Baixa,
    #[serde(rename = "Moderada")]
    Moderada,
    #[serde(rename = "Alta")]
    Alta,
    #[serde(rename = "Extrema")]
    Extrema,
}

/// Geographic sighting location of a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub landmark: Option<String>,
    #[serde(default)]
    pub terrain: Option<TerrainDifficulty>,
}

/// Catalog record for a primordial duck target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRecord {
    pub id: String,
    pub height_cm: f64,
    pub weight_g: f64,
    pub location: Location,
    pub gps_accuracy_m: f64,
    pub dormancy: DormancyStatus,
    #[serde(default)]
    pub heart_rate_bpm: Option<u32>,
    pub mutation_count: u32,
    #[serde(default)]
    pub power: Option<Power>,
    #[serde(default)]
    pub captured: bool,
}

/// Catalog record for an operational launch base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecord {
    pub id: String,
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_headquarters: bool,
}
