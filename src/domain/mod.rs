//! Доменная модель сервера: карты, фишки, агенты, места, столы, раздачи.

pub mod agent;
pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod seat;
pub mod table;

// Базовые идентификаторы. Числовые id выдаёт infra::ids,
// uuid раздачи генерируется при её старте.
pub type AgentId = u64;
pub type TableId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use agent::*;
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use seat::*;
pub use table::*;
