use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{AgentId, SeatIndex};
use crate::engine::actions::ActionKind;

/// Тип записи в журнале действий раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuditKind {
    SmallBlind,
    BigBlind,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl From<ActionKind> for AuditKind {
    fn from(kind: ActionKind) -> Self {
        match kind {
            ActionKind::Fold => AuditKind::Fold,
            ActionKind::Check => AuditKind::Check,
            ActionKind::Call => AuditKind::Call,
            ActionKind::Bet(_) => AuditKind::Bet,
            ActionKind::Raise(_) => AuditKind::Raise,
            ActionKind::AllIn => AuditKind::AllIn,
        }
    }
}

/// Одна запись журнала: кто, что и при каком раундовом вкладе сделал.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuditEntry {
    /// Порядковый номер внутри раздачи.
    pub index: u32,
    pub street: Street,
    pub seat: SeatIndex,
    pub agent_id: AgentId,
    pub kind: AuditKind,
    /// Вклад места в текущем раунде после действия.
    pub amount: Chips,
    pub at: DateTime<Utc>,
}

/// Журнал действий раздачи. Append-only внутри раздачи,
/// неизменяемый после её завершения.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionLog {
    pub entries: Vec<AuditEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        street: Street,
        seat: SeatIndex,
        agent_id: AgentId,
        kind: AuditKind,
        amount: Chips,
        at: DateTime<Utc>,
    ) {
        let index = self.entries.len() as u32;
        self.entries.push(AuditEntry {
            index,
            street,
            seat,
            agent_id,
            kind,
            amount,
            at,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
