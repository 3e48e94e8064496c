use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::seat::SeatIndex;
use crate::domain::{AgentId, TableId};
use crate::engine::EngineError;

/// Класс ошибки для HTTP-слоя.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Неверный запрос; состояние не изменилось. 400.
    Validation,
    /// Стол/агент не найден. 404.
    Unavailable,
}

/// Ошибки публичных операций GameManager.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Агент {0} не найден за этим столом")]
    AgentNotSeated(AgentId),

    #[error("Место {0} не существует за столом")]
    NoSuchSeat(SeatIndex),

    #[error("Место {0} уже занято")]
    SeatTaken(SeatIndex),

    #[error("Свободных мест за столом нет")]
    NoFreeSeat,

    #[error("Buy-in {buy_in} вне диапазона стола [{min}, {max}]")]
    BuyInOutOfRange {
        buy_in: Chips,
        min: Chips,
        max: Chips,
    },

    #[error("Rebuy доступен только между раздачами")]
    RebuyDuringHand,

    #[error("Rebuy превысил бы максимальный закуп стола")]
    RebuyAboveMax,

    #[error("Сейчас нет активной раздачи")]
    NoHandInProgress,

    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl GameError {
    /// Класс ошибки: не найдено vs неверный запрос.
    /// Любой вариант без мутации состояния.
    pub fn class(&self) -> ErrorClass {
        match self {
            GameError::TableNotFound(_) | GameError::AgentNotSeated(_) => ErrorClass::Unavailable,
            _ => ErrorClass::Validation,
        }
    }
}
