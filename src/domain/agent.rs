use serde::{Deserialize, Serialize};

use crate::domain::AgentId;

/// Стратегия бота. Три профиля с качественно разным поведением.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BotStrategy {
    /// Loose-passive: почти всегда коллирует, почти не рейзит.
    Fish,
    /// Tight-aggressive: мало рук, но агрессивно.
    Tag,
    /// Loose-aggressive: много рук, много рейзов, блефы.
    Lag,
}

/// Кто управляет агентом: живой человек или бот-политика.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Human,
    Bot(BotStrategy),
}

impl AgentKind {
    pub fn is_bot(&self) -> bool {
        matches!(self, AgentKind::Bot(_))
    }
}

/// Идентичность игрока + накопительные счётчики за всё время жизни процесса.
///
/// Агенты принадлежат реестру GameManager; стол ссылается на них по id.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub kind: AgentKind,
    /// Сколько раздач агент отыграл (досидел до завершения).
    pub hands_played: u64,
    /// В скольких раздачах был в числе победителей.
    pub hands_won: u64,
    /// Накопленный профит по завершённым раздачам (может быть отрицательным).
    pub lifetime_profit: i64,
    /// Внешний кошелёк для escrow-расчётов (у ботов его нет).
    pub wallet_address: Option<String>,
}

impl Agent {
    pub fn new(id: AgentId, name: String, kind: AgentKind) -> Self {
        Self {
            id,
            name,
            kind,
            hands_played: 0,
            hands_won: 0,
            lifetime_profit: 0,
            wallet_address: None,
        }
    }

    pub fn with_wallet(mut self, wallet_address: Option<String>) -> Self {
        self.wallet_address = wallet_address;
        self
    }
}
