use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::seat::SeatIndex;
use crate::domain::{AgentId, TableId};
use crate::engine::game_loop::HandArchive;

/// Ошибка границы персистентности. Для движка всегда best-effort:
/// сбой записи логируется и не откатывает состояние в памяти.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Хранилище недоступно: {0}")]
    Unavailable(String),

    #[error("Некорректная запись: {0}")]
    Invalid(String),
}

/// Снапшот места на момент завершения раздачи — для строк hand_players.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub seat: SeatIndex,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub starting_stack: Chips,
    pub final_stack: Chips,
    pub hole_cards: Vec<Card>,
}

/// Полная запись завершённой раздачи для внешнего стора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompletedHandRecord {
    pub table_id: TableId,
    pub hand: HandArchive,
    pub seats: Vec<SeatSnapshot>,
}

/// Тип движения фишек (строка chip_transactions).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChipTxKind {
    BuyIn,
    CashOut,
    Rebuy,
    PotWin,
}

/// Одно движение фишек.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChipTransaction {
    pub table_id: TableId,
    pub agent_id: AgentId,
    pub kind: ChipTxKind,
    pub amount: Chips,
    pub at: DateTime<Utc>,
}

/// Абстракция внешнего хранилища истории.
///
/// Движок потребляет её узко: максимум номера раздачи на старте
/// (для монотонности hand_count) и fire-and-forget запись завершённых
/// раздач и движений фишек. Память процесса — авторитетное состояние
/// игры; store — только леджер истории.
pub trait HandStore: Send + Sync {
    /// Максимальный сохранённый номер раздачи по каждому столу.
    fn max_hand_numbers(&self) -> HashMap<TableId, u64>;

    fn persist_completed_hand(&self, record: &CompletedHandRecord) -> Result<(), StoreError>;

    fn persist_chip_tx(&self, tx: &ChipTransaction) -> Result<(), StoreError>;
}

/// In-memory реализация для тестов и dev-запуска.
#[derive(Debug, Default)]
pub struct InMemoryHandStore {
    hands: Mutex<Vec<CompletedHandRecord>>,
    chip_txs: Mutex<Vec<ChipTransaction>>,
}

impl InMemoryHandStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Заготовить номера раздач (имитация «пережившего рестарт» стора).
    pub fn with_hand_numbers(numbers: &[(TableId, u64)]) -> Self {
        let store = Self::default();
        // Номера представляем пустыми записями с нужным hand_number.
        let mut hands = store.hands.lock().unwrap();
        for &(table_id, n) in numbers {
            hands.push(CompletedHandRecord {
                table_id,
                hand: HandArchive {
                    id: uuid::Uuid::new_v4(),
                    hand_number: n,
                    board: Vec::new(),
                    pot: Chips::ZERO,
                    side_pots: Vec::new(),
                    actions: crate::engine::ActionLog::new(),
                    winners: Vec::new(),
                    dealer_seat: 0,
                    started_at: Utc::now(),
                    completed_at: None,
                },
                seats: Vec::new(),
            });
        }
        drop(hands);
        store
    }

    pub fn hand_count(&self) -> usize {
        self.hands.lock().unwrap().len()
    }

    pub fn chip_tx_count(&self) -> usize {
        self.chip_txs.lock().unwrap().len()
    }

    pub fn chip_txs(&self) -> Vec<ChipTransaction> {
        self.chip_txs.lock().unwrap().clone()
    }

    pub fn last_hand(&self) -> Option<CompletedHandRecord> {
        self.hands.lock().unwrap().last().cloned()
    }
}

impl HandStore for InMemoryHandStore {
    fn max_hand_numbers(&self) -> HashMap<TableId, u64> {
        let mut out: HashMap<TableId, u64> = HashMap::new();
        for rec in self.hands.lock().unwrap().iter() {
            let entry = out.entry(rec.table_id).or_insert(0);
            *entry = (*entry).max(rec.hand.hand_number);
        }
        out
    }

    fn persist_completed_hand(&self, record: &CompletedHandRecord) -> Result<(), StoreError> {
        self.hands.lock().unwrap().push(record.clone());
        Ok(())
    }

    fn persist_chip_tx(&self, tx: &ChipTransaction) -> Result<(), StoreError> {
        self.chip_txs.lock().unwrap().push(tx.clone());
        Ok(())
    }
}

/// Задание фоновой записи.
#[derive(Clone, Debug)]
pub enum PersistJob {
    Hand(CompletedHandRecord),
    ChipTx(ChipTransaction),
}

/// Ручка ограниченной очереди записи.
///
/// Тикер никогда не ждёт базу: enqueue не блокирует, а при переполнении
/// очереди новая запись отбрасывается с warn-логом (медленный store
/// не может бесконечно раздувать память процесса).
#[derive(Clone)]
pub struct PersistHandle {
    tx: mpsc::Sender<PersistJob>,
}

impl PersistHandle {
    pub fn enqueue(&self, job: PersistJob) {
        if let Err(err) = self.tx.try_send(job) {
            tracing::warn!(error = %err, "очередь персистентности переполнена, запись отброшена");
        }
    }
}

/// Куда GameManager сдаёт записи.
///
/// Сервер использует ограниченную очередь с фоновой задачей,
/// тесты и dev-симуляция — прямую синхронную запись в store.
#[derive(Clone)]
pub enum PersistSink {
    /// Записи не ведутся вовсе.
    Disabled,
    /// Синхронная запись в store (без очереди).
    Direct(std::sync::Arc<dyn HandStore>),
    /// Фоновая очередь.
    Queued(PersistHandle),
}

impl PersistSink {
    pub fn submit(&self, job: PersistJob) {
        match self {
            PersistSink::Disabled => {}
            PersistSink::Direct(store) => {
                let result = match &job {
                    PersistJob::Hand(rec) => store.persist_completed_hand(rec),
                    PersistJob::ChipTx(tx) => store.persist_chip_tx(tx),
                };
                if let Err(err) = result {
                    tracing::warn!(error = %err, "запись в store не удалась (best-effort, продолжаем)");
                }
            }
            PersistSink::Queued(handle) => handle.enqueue(job),
        }
    }
}

/// Запустить фоновую задачу записи. Возвращает ручку очереди.
pub fn spawn_persistence_worker(
    store: std::sync::Arc<dyn HandStore>,
    queue_depth: usize,
) -> PersistHandle {
    let (tx, mut rx) = mpsc::channel::<PersistJob>(queue_depth);

    tokio::spawn(async move {
        while let Some(job) = rx.recv().await {
            let result = match &job {
                PersistJob::Hand(rec) => store.persist_completed_hand(rec),
                PersistJob::ChipTx(tx) => store.persist_chip_tx(tx),
            };
            if let Err(err) = result {
                tracing::warn!(error = %err, "запись в store не удалась (best-effort, продолжаем)");
            }
        }
    });

    PersistHandle { tx }
}
