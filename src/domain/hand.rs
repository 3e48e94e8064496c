use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::AgentId;

/// Улица торговли.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

/// Фаза раздачи. Торговые фазы соответствуют улицам;
/// Showdown — пауза на показ результата, Complete — раздача закрыта.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Complete,
}

impl Phase {
    /// Улица, если фаза торговая.
    pub fn street(&self) -> Option<Street> {
        match self {
            Phase::Preflop => Some(Street::Preflop),
            Phase::Flop => Some(Street::Flop),
            Phase::Turn => Some(Street::Turn),
            Phase::River => Some(Street::River),
            Phase::Showdown | Phase::Complete => None,
        }
    }

    pub fn is_betting(&self) -> bool {
        self.street().is_some()
    }
}

impl From<Street> for Phase {
    fn from(street: Street) -> Self {
        match street {
            Street::Preflop => Phase::Preflop,
            Street::Flop => Phase::Flop,
            Street::Turn => Phase::Turn,
            Street::River => Phase::River,
        }
    }
}

/// Упакованный ранг руки: полный порядок по u32.
/// Схему кодирования заполняет eval.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandRank(pub u32);

/// Одна выплата по итогам раздачи (на каждый выигранный пот — своя запись).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerEntry {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub amount: Chips,
    /// Человекочитаемое имя комбинации ("Straight", "Two pair", ...).
    /// Для победы фолдом — "Last player standing".
    pub hand_name: String,
}
