//! Countermeasure lookup for the random defense generator.
//!
//! Each power type maps to two alternative countermeasure names; one is
//! drawn at random when the defense generator arms itself. Unknown or
//! unresolved power types fall back to the general-purpose pair.

use crate::catalog::PowerType;

/// The two countermeasures available against a given power type.
///
/// `None` (no known power) and [`PowerType::Outro`] both resolve to the
/// general-purpose pair.
#[must_use]
pub fn countermeasure_pair(kind: Option<PowerType>) -> [&'static str; 2] {
    match kind {
        Some(PowerType::Belico) => [
            "Campo de Amortecimento Cinético",
            "Contramedidas Chaff/Flare",
        ],
        Some(PowerType::Defensivo) => [
            "Pulso de Ressonância Harmônica",
            "Módulo de Ataque Fásico",
        ],
        Some(PowerType::Elemental) => [
            "Campo de Supressão Elemental",
            "Blindagem Ablativa Adaptativa",
        ],
        Some(PowerType::Tecnologico) => ["Surto Localizado PEM", "Emissor de Ruído Quântico"],
        Some(PowerType::Psiquico) => [
            "Gerador de Campo Estático Psíquico",
            "Projetor de Loop de Feedback Cognitivo",
        ],
        Some(PowerType::Biologico) => [
            "Enxame Neutralizador Nanobótico",
            "Campo de Estase Metabólica",
        ],
        Some(PowerType::Espacial) => [
            "Âncora de Realidade Quântica",
            "Emissor de Interferência Espaço-Temporal",
        ],
        Some(PowerType::Mistico) => [
            "Campo de Dissipação Arcana",
            "Indutor de Aterramento Energético",
        ],
        Some(PowerType::Sonico) => [
            "Emissor de Onda de Interferência Destrutiva",
            "Escudo de Amortecimento Acústico",
        ],
        Some(PowerType::Caotico) => [
            "Campo de Estabilização Probabilística",
            "Injetor de Entropia Controlada",
        ],
        Some(PowerType::Outro) | None => [
            "Campo de Amortecimento Energético Universal",
            "Salto de Micro-Dobra de Emergência",
        ],
    }
}

/// Display label for the countermeasure target bucket.
#[must_use]
pub fn bucket_label(kind: Option<PowerType>) -> &'static str {
    match kind {
        Some(PowerType::Outro) | None => "Geral",
        Some(other) => other.as_str(),
    }
}
