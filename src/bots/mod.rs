//! Бот-политики: чистая функция решения для трёх профилей стратегий.
//!
//! `decide` не мутирует состояние — GameManager прогоняет её результат
//! через обычный `apply_action`, с fallback'ом (check/fold), если
//! движок отверг ход.

pub mod policy;
pub mod strength;

pub use policy::decide;
pub use strength::{postflop_strength, preflop_strength};
