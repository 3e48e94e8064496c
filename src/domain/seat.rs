use serde::{Deserialize, Serialize};

use crate::domain::agent::AgentKind;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::AgentId;

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Статус места в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SeatStatus {
    /// Между раздачами либо сел во время чужой раздачи — в игру не входит.
    Waiting,
    /// Участвует в текущей раздаче и может действовать.
    Active,
    /// Сфолдил и больше не участвует в банке.
    Folded,
    /// В олл-ине — фишек для новых ставок нет.
    AllIn,
}

/// Состояние занятого места за столом: агент + его сессионные фишки.
///
/// Место принадлежит столу эксклюзивно; агент из реестра денормализован
/// сюда (id, имя, тип), чтобы рендер и выплаты не требовали второго лока.
/// `is_sitting_out` ортогонален раздаточному статусу: встать можно
/// и посреди раздачи, действует это со следующей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub kind: AgentKind,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Суммарный закуп: начальный buy-in плюс все rebuys.
    pub buy_in: Chips,
    /// Ставка в текущем раунде (для движка ставок).
    pub current_bet: Chips,
    pub status: SeatStatus,
    /// Не участвовать в следующих раздачах.
    pub is_sitting_out: bool,
    /// Карманные карты (0 или 2 для холдема).
    pub hole_cards: Vec<Card>,
    /// Кошелёк для escrow-расчётов, если агент играет на токены.
    pub wallet_address: Option<String>,
}

impl Seat {
    pub fn new(agent_id: AgentId, agent_name: String, kind: AgentKind, buy_in: Chips) -> Self {
        Self {
            agent_id,
            agent_name,
            kind,
            stack: buy_in,
            buy_in,
            current_bet: Chips::ZERO,
            status: SeatStatus::Waiting,
            is_sitting_out: false,
            hole_cards: Vec::new(),
            wallet_address: None,
        }
    }

    pub fn sitting_out(mut self, flag: bool) -> Self {
        self.is_sitting_out = flag;
        self
    }

    pub fn with_wallet(mut self, wallet_address: Option<String>) -> Self {
        self.wallet_address = wallet_address;
        self
    }

    pub fn is_bot(&self) -> bool {
        self.kind.is_bot()
    }

    /// Участвует ли место в текущей раздаче (ещё претендует на банк).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    /// Может ли место войти в следующую раздачу.
    pub fn can_be_dealt_in(&self) -> bool {
        !self.is_sitting_out && !self.stack.is_zero()
    }
}
