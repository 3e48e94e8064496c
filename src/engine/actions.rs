use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Тип действия игрока. Закрытый enum: разбор строк остаётся
/// на HTTP-границе, движок видит только варианты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    /// Bet на новой улице (когда ещё нет текущей ставки).
    Bet(Chips),
    /// Raise существующей ставки; значение — целевая сумма ставки
    /// за раунд ("raise to").
    Raise(Chips),
    /// All-in — поставить весь стек.
    #[serde(rename = "all-in")]
    AllIn,
}

impl ActionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Bet(_) => "bet",
            ActionKind::Raise(_) => "raise",
            ActionKind::AllIn => "all-in",
        }
    }
}
