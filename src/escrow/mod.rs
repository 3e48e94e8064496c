//! Escrow-граница: узкий клиент кастодиального контракта.
//!
//! Движок сам в чейн не ходит — HTTP-адаптер компонует депозит/расчёт
//! вокруг операций GameManager. Инвариант «фишки в памяти ≡ токены
//! в escrow» держится на том, что каждый sit проходит через deposit,
//! а каждый уход — через settle; конвертацию фишек в десятичные
//! единицы токена делает реализация клиента.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::TableId;

/// Ссылка на транзакцию в чейне (хэш).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxRef(pub String);

/// Ошибки escrow-клиента. Для движка всегда external-transient:
/// состояние в памяти не откатывается, пользователю отдаётся маркер
/// сбоя расчёта.
#[derive(Debug, Error)]
pub enum EscrowError {
    #[error("Чейн недоступен: {0}")]
    ChainUnavailable(String),

    #[error("Недостаточно средств в кошельке {0}")]
    InsufficientFunds(String),

    #[error("Отказ контракта: {0}")]
    ContractRejected(String),
}

/// Контракт движок ↔ escrow: четыре чистые операции.
/// Все суммы — целые фишки.
#[async_trait]
pub trait EscrowClient: Send + Sync {
    /// Завести buy-in из кошелька игрока в escrow стола.
    async fn deposit(
        &self,
        table_id: TableId,
        player_addr: &str,
        amount: Chips,
    ) -> Result<TxRef, EscrowError>;

    /// Рассчитать финальный стек игрока обратно в кошелёк.
    async fn settle(
        &self,
        table_id: TableId,
        player_addr: &str,
        final_stack: Chips,
    ) -> Result<TxRef, EscrowError>;

    /// Массовый расчёт (например, при остановке стола).
    async fn batch_settle(
        &self,
        table_id: TableId,
        settlements: &[(String, Chips)],
    ) -> Result<TxRef, EscrowError>;

    /// Аварийный возврат: прочитать балансы стола в чейне
    /// и рассчитать их полностью.
    async fn emergency_refund_table(&self, table_id: TableId) -> Result<TxRef, EscrowError>;
}

/// Детерминированный mock для тестов и dev-запуска:
/// балансы в памяти, переключаемый режим отказов.
pub struct MockEscrowClient {
    balances: Mutex<HashMap<(TableId, String), u64>>,
    fail_settlements: Mutex<bool>,
    tx_counter: Mutex<u64>,
}

impl MockEscrowClient {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            fail_settlements: Mutex::new(false),
            tx_counter: Mutex::new(0),
        }
    }

    /// Включить/выключить имитацию сбоя расчётов.
    pub fn set_fail_settlements(&self, fail: bool) {
        *self.fail_settlements.lock() = fail;
    }

    pub fn escrowed(&self, table_id: TableId, player_addr: &str) -> Chips {
        Chips(
            self.balances
                .lock()
                .get(&(table_id, player_addr.to_string()))
                .copied()
                .unwrap_or(0),
        )
    }

    fn next_tx(&self) -> TxRef {
        let mut counter = self.tx_counter.lock();
        *counter += 1;
        TxRef(format!("0xmock{:08x}", *counter))
    }
}

impl Default for MockEscrowClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EscrowClient for MockEscrowClient {
    async fn deposit(
        &self,
        table_id: TableId,
        player_addr: &str,
        amount: Chips,
    ) -> Result<TxRef, EscrowError> {
        let mut balances = self.balances.lock();
        *balances
            .entry((table_id, player_addr.to_string()))
            .or_insert(0) += amount.0;
        Ok(self.next_tx())
    }

    async fn settle(
        &self,
        table_id: TableId,
        player_addr: &str,
        final_stack: Chips,
    ) -> Result<TxRef, EscrowError> {
        if *self.fail_settlements.lock() {
            return Err(EscrowError::ChainUnavailable("mock: расчёты отключены".into()));
        }
        let mut balances = self.balances.lock();
        balances.remove(&(table_id, player_addr.to_string()));
        let _ = final_stack;
        Ok(self.next_tx())
    }

    async fn batch_settle(
        &self,
        table_id: TableId,
        settlements: &[(String, Chips)],
    ) -> Result<TxRef, EscrowError> {
        if *self.fail_settlements.lock() {
            return Err(EscrowError::ChainUnavailable("mock: расчёты отключены".into()));
        }
        let mut balances = self.balances.lock();
        for (addr, _stack) in settlements {
            balances.remove(&(table_id, addr.clone()));
        }
        Ok(self.next_tx())
    }

    async fn emergency_refund_table(&self, table_id: TableId) -> Result<TxRef, EscrowError> {
        let mut balances = self.balances.lock();
        balances.retain(|(tid, _), _| *tid != table_id);
        Ok(self.next_tx())
    }
}
