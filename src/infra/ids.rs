use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::AgentId;

/// Генерация ID агентов на основе монотонного счётчика.
/// ID столов фиксированы конфигурацией и сюда не входят.
#[derive(Debug)]
pub struct IdGenerator {
    agent_counter: AtomicU64,
}

impl IdGenerator {
    /// Счёт начинается с 1: нулевой id оставляем как "никто".
    pub fn new() -> Self {
        Self {
            agent_counter: AtomicU64::new(1),
        }
    }

    #[inline]
    pub fn next_agent_id(&self) -> AgentId {
        self.agent_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
