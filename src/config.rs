//! Конфигурация сервера: фиксированный набор столов и тайминги.
//!
//! Столы создаются один раз на старте процесса; произвольное создание
//! столов пользователями не поддерживается.

use crate::domain::chips::Chips;
use crate::domain::table::TableConfig;

// ==== тайминги ====

/// Период тика планировщика.
pub const TICK_PERIOD_MS: u64 = 500;

/// Таймаут хода человека, после которого тикер делает auto check/fold.
pub const HUMAN_TURN_TIMEOUT_MS: i64 = 30_000;

/// «Обдумывание» бота за столом с людьми.
pub const BOT_THINK_DELAY_MS: i64 = 800;

/// Display-пауза шоудауна за столом с людьми.
pub const SHOWDOWN_HOLD_MS: i64 = 3_000;

/// Display-пауза шоудауна на чисто бот-столе.
pub const BOT_ONLY_SHOWDOWN_HOLD_MS: i64 = 300;

/// Сколько шагов бот-стол может пройти за один тик.
pub const BOT_ONLY_TICK_DEPTH: u32 = 50;

/// Глубина ring-истории раздач на стол.
pub const MAX_HAND_HISTORY: usize = 50;

/// Ёмкость очереди фоновой записи в store.
pub const PERSIST_QUEUE_DEPTH: usize = 256;

/// Сколько ботов сажаем на стол при инициализации.
pub const SEED_BOTS_PER_TABLE: usize = 3;

/// Адрес HTTP-сервера по умолчанию.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

// ==== столы ====

/// Известный набор столов: micro / low / mid / high.
pub fn default_tables() -> Vec<TableConfig> {
    vec![
        TableConfig {
            id: 1,
            name: "Micro".to_string(),
            small_blind: Chips(1),
            big_blind: Chips(2),
            min_buy_in: Chips(40),
            max_buy_in: Chips(200),
            max_seats: 6,
        },
        TableConfig {
            id: 2,
            name: "Low".to_string(),
            small_blind: Chips(5),
            big_blind: Chips(10),
            min_buy_in: Chips(200),
            max_buy_in: Chips(1_000),
            max_seats: 6,
        },
        TableConfig {
            id: 3,
            name: "Mid".to_string(),
            small_blind: Chips(25),
            big_blind: Chips(50),
            min_buy_in: Chips(1_000),
            max_buy_in: Chips(5_000),
            max_seats: 6,
        },
        TableConfig {
            id: 4,
            name: "High".to_string(),
            small_blind: Chips(100),
            big_blind: Chips(200),
            min_buy_in: Chips(4_000),
            max_buy_in: Chips(20_000),
            max_seats: 6,
        },
    ]
}
