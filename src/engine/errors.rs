use crate::domain::{AgentId, SeatIndex, TableId};

use thiserror::Error;

/// Ошибки движка раздачи.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("В этом месте нет игрока")]
    EmptySeat,

    #[error("Агент {0} не сидит за этим столом")]
    AgentNotAtTable(AgentId),

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход места {0}")]
    NotSeatsTurn(SeatIndex),

    #[error("Недопустимое действие в текущем состоянии раздачи")]
    IllegalAction,

    #[error("Недостаточно фишек для этой ставки")]
    NotEnoughChips,

    #[error("Размер рейза слишком мал")]
    RaiseTooSmall,

    #[error("Размер бета меньше большого блайнда")]
    BetTooSmall,

    #[error("Невозможно выполнить check — нужно хотя бы уравнять ставку")]
    CannotCheck,

    #[error("Невозможно выполнить call — нет ставки для уравнивания")]
    CannotCall,

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
