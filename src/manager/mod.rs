//! GameManager: процессный реестр столов и агентов, публичные операции
//! и тикер, который двигает все столы.
//!
//! Модель конкурентности: каждый стол сериализован собственным мьютексом;
//! и HTTP-обработчики, и тикер берут тот же лок. Разные столы идут
//! параллельно. Тикер никогда не ждёт сеть/базу — persistence уходит
//! в ограниченную очередь, escrow остаётся на HTTP-адаптере.

pub mod errors;
pub mod game_manager;
pub mod tick;

pub use errors::GameError;
pub use game_manager::{CashOut, GameManager, LeaderboardRow, TableRuntime};
