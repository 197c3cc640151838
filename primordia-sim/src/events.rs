//! Static travel-event catalog for the transit phase.

use serde::{Deserialize, Serialize};

/// Drone resource a travel-event option affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Integrity,
    Battery,
    Fuel,
}

/// A single percentage delta applied to one drone resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatDelta {
    pub stat: StatKind,
    pub amount: f64,
}

/// One operator choice inside a travel event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventOption {
    pub label: &'static str,
    pub effects: &'static [StatDelta],
    pub log: &'static str,
}

/// A travel event presented to the operator mid-transit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitEvent {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub options: &'static [EventOption],
}

const fn delta(stat: StatKind, amount: f64) -> StatDelta {
    StatDelta { stat, amount }
}

/// Full travel-event catalog; events are drawn uniformly at random.
pub const TRANSIT_EVENTS: &[TransitEvent] = &[
    TransitEvent {
        id: "EVT_001",
        title: "Tempestade Magnética Detectada",
        description: "Uma forte tempestade magnética está diretamente em nossa rota. Devemos \
                      contornar, atravessar ou reforçar os escudos?",
        options: &[
            EventOption {
                label: "Contornar (Custo Alto)",
                effects: &[delta(StatKind::Fuel, -25.0)],
                log: "Rota recalculada. Gasto pesado de combustível, mas chegamos em segurança.",
            },
            EventOption {
                label: "Atravessar (Risco Alto)",
                effects: &[delta(StatKind::Integrity, -30.0)],
                log: "Turbulência extrema! A blindagem sofreu danos severos!",
            },
            EventOption {
                label: "Reforçar Escudos e Atravessar",
                effects: &[delta(StatKind::Battery, -20.0), delta(StatKind::Integrity, -5.0)],
                log: "Escudos no máximo! Drenagem alta de bateria, mas o dano à integridade foi \
                      mínimo.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_002",
        title: "Sinal de Drone Aliado Caído",
        description: "Nossos sensores detectaram um sinal de socorro de outro drone DSIN Mk-II \
                      que caiu nas proximidades.",
        options: &[
            EventOption {
                label: "Saquear Célula de Bateria",
                effects: &[delta(StatKind::Battery, 20.0)],
                log: "Canibalizamos a célula de energia. Bateria extra adquirida.",
            },
            EventOption {
                label: "Saquear Placas de Blindagem",
                effects: &[delta(StatKind::Integrity, 20.0)],
                log: "Adaptamos placas de blindagem do drone caído. Integridade restaurada.",
            },
            EventOption {
                label: "Ignorar (Protocolo)",
                effects: &[],
                log: "Sinal ignorado. Foco total na missão principal.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_003",
        title: "Bando de Patos Comuns",
        description: "Um grande bando de patos comuns está bloqueando a passagem de um cânion \
                      estreito. Eles parecem agitados.",
        options: &[
            EventOption {
                label: "Usar Buzina Sônica",
                effects: &[delta(StatKind::Battery, -10.0)],
                log: "Buzina sônica ativada. Bando disperso, consumimos energia.",
            },
            EventOption {
                label: "Aguardar Passagem (Lento)",
                effects: &[delta(StatKind::Fuel, -15.0)],
                log: "Aguardando o bando passar... Rota em espera consumiu combustível.",
            },
            EventOption {
                label: "Manobra Arriscada (Voo Baixo)",
                effects: &[delta(StatKind::Integrity, -10.0)],
                log: "Roçamos uma árvore! Dano leve na fuselagem, mas passamos.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_004",
        title: "Rota de Voo Otimizada",
        description: "A IA identificou uma corrente de ar favorável que pode economizar \
                      combustível, mas ela passa por território aéreo instável.",
        options: &[
            EventOption {
                label: "Pegar Corrente (Econômico)",
                effects: &[delta(StatKind::Fuel, 20.0)],
                log: "Pegando a corrente de ar! Eficiência de combustível aumentada.",
            },
            EventOption {
                label: "Atalho Rápido (Pós-combustor)",
                effects: &[delta(StatKind::Battery, -15.0), delta(StatKind::Fuel, -10.0)],
                log: "Pós-combustores ativados! Ganhamos tempo, mas com alto custo de energia.",
            },
            EventOption {
                label: "Manter Rota Segura (Padrão)",
                effects: &[],
                log: "Rota segura mantida. Sem alterações.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_005",
        title: "Vazamento de Combustível",
        description: "Alerta! Um micro-meteoro perfurou uma linha de combustível secundária. \
                      Estamos perdendo combustível lentamente.",
        options: &[
            EventOption {
                label: "Desviar Energia para Selar",
                effects: &[delta(StatKind::Battery, -15.0), delta(StatKind::Fuel, -5.0)],
                log: "Selante de emergência ativado. Vazamento contido, mas drenou a bateria.",
            },
            EventOption {
                label: "Ignorar e Acelerar",
                effects: &[delta(StatKind::Fuel, -25.0)],
                log: "Acelerando ao máximo! Chegamos mais rápido, mas perdemos combustível no \
                      processo.",
            },
            EventOption {
                label: "Desligar Motor Afetado",
                effects: &[delta(StatKind::Fuel, -10.0), delta(StatKind::Integrity, -5.0)],
                log: "Motor 2 desligado. Sobrecarga no motor 1 causou dano leve. Vazamento parado.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_006",
        title: "Drone Corporativo Hostil",
        description: "Um drone não identificado se aproxima. Logotipos da 'PatoCorp' visíveis. \
                      Ele está em rota de interceptação!",
        options: &[
            EventOption {
                label: "Combate (Lasers)",
                effects: &[delta(StatKind::Battery, -10.0), delta(StatKind::Integrity, -10.0)],
                log: "Combate rápido! Afastamos o drone, mas sofremos danos e gastamos bateria.",
            },
            EventOption {
                label: "Evasão (Mergulhar)",
                effects: &[delta(StatKind::Fuel, -15.0)],
                log: "Manobra evasiva no limite! Despistamos o drone inimigo, mas a rota foi longa.",
            },
            EventOption {
                label: "Stealth (Desligar Tudo)",
                effects: &[delta(StatKind::Integrity, -10.0)],
                log: "Modo silencioso. Ele passou... mas ficamos vulneráveis e sofremos um tiro \
                      de raspão.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_007",
        title: "Sinal de Interferência Desconhecido",
        description: "Os sensores estão loucos. Uma fonte de interferência poderosa está \
                      bloqueando nossos mapas e o GPS.",
        options: &[
            EventOption {
                label: "Voar Cego (Acelerar)",
                effects: &[delta(StatKind::Integrity, -15.0)],
                log: "Voando sem sensores! Colidimos com um obstáculo, mas passamos a zona de \
                      interferência.",
            },
            EventOption {
                label: "Voar Baixo (Contorno)",
                effects: &[delta(StatKind::Fuel, -15.0)],
                log: "Descemos abaixo da interferência. Voo manual consumiu muito combustível.",
            },
            EventOption {
                label: "Triangular Fonte (Custo)",
                effects: &[delta(StatKind::Battery, -15.0)],
                log: "A IA triangulou a fonte e criou um filtro. Sensores online, mas com custo \
                      de bateria.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_008",
        title: "Transmissão de Mercenários",
        description: "Interceptamos uma transmissão não criptografada. Mercenários estão na \
                      área, parecem estar caçando... algo. Não fomos detectados.",
        options: &[
            EventOption {
                label: "Observar (Coletar Dados)",
                effects: &[delta(StatKind::Battery, -10.0)],
                log: "Modo de escuta. Obtivemos dados táticos, mas gastamos bateria.",
            },
            EventOption {
                label: "Desviar (Longo)",
                effects: &[delta(StatKind::Fuel, -20.0)],
                log: "Não vale o risco. Fizemos um desvio longo para evitar o contato.",
            },
            EventOption {
                label: "Furtividade (Lento)",
                effects: &[delta(StatKind::Fuel, -10.0), delta(StatKind::Battery, -10.0)],
                log: "Motores em modo silencioso. Passamos por eles sem sermos vistos. Consumiu \
                      bateria e combustível extra.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_009",
        title: "Depósito de Suprimentos Abandonado",
        description: "Nossos scanners de longo alcance encontraram uma assinatura de energia da \
                      DSIN. Parece ser um antigo depósito de suprimentos de emergência.",
        options: &[
            EventOption {
                label: "Pegar Células de Bateria",
                effects: &[delta(StatKind::Battery, 20.0), delta(StatKind::Fuel, -5.0)],
                log: "Bingo! Células de energia de reserva. O pequeno desvio valeu a pena.",
            },
            EventOption {
                label: "Pegar Kits de Reparo",
                effects: &[delta(StatKind::Integrity, 20.0), delta(StatKind::Fuel, -5.0)],
                log: "Encontramos nano-selante. Aplicamos reparos de emergência na blindagem.",
            },
            EventOption {
                label: "Ignorar (Risco de Armadilha)",
                effects: &[],
                log: "Pode ser uma armadilha da PatoCorp. Ignorando.",
            },
        ],
    },
    TransitEvent {
        id: "EVT_010",
        title: "Clima Adverso Súbito",
        description: "Uma frente fria / tempestade de areia / furacão se formou \
                      inesperadamente. A rota direta é perigosa.",
        options: &[
            EventOption {
                label: "Voar por Cima (Custo Alto)",
                effects: &[delta(StatKind::Fuel, -10.0), delta(StatKind::Battery, -10.0)],
                log: "Subindo para ar rarefeito. Gastamos combustível e bateria extra, mas \
                      passamos.",
            },
            EventOption {
                label: "Voar por Baixo (Risco Alto)",
                effects: &[delta(StatKind::Integrity, -20.0)],
                log: "Voando baixo contra o vento. A fuselagem foi castigada, mas passamos.",
            },
            EventOption {
                label: "Esperar a Frente Passar",
                effects: &[delta(StatKind::Fuel, -20.0)],
                log: "Pousamos e esperamos. A tempestade passou, mas manter os sistemas ligados \
                      gastou combustível.",
            },
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_shape_is_well_formed() {
        assert_eq!(TRANSIT_EVENTS.len(), 10);
        for event in TRANSIT_EVENTS {
            assert!(!event.options.is_empty(), "{} has no options", event.id);
            assert!(event.options.len() <= 3);
            for option in event.options {
                assert!(!option.log.is_empty());
            }
        }
    }

    #[test]
    fn event_ids_are_unique() {
        for (i, event) in TRANSIT_EVENTS.iter().enumerate() {
            assert!(TRANSIT_EVENTS[i + 1..].iter().all(|other| other.id != event.id));
        }
    }
}
