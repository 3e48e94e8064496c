//! Мульти-табличный онлайн NLHE сервер.
//!
//! Слои:
//!   - domain — карты, фишки, агенты, места, столы;
//!   - eval — оценка силы рук (best-5-of-7, полный порядок);
//!   - engine — машина состояний раздачи: блайнды, улицы, сайд-поты, шоудаун;
//!   - bots — три профиля бот-политик;
//!   - manager — процессный реестр столов/агентов + тикер;
//!   - escrow — узкий клиент on-chain кастодии;
//!   - infra — ID, RNG, граница персистентности;
//!   - api — DTO, аутентификация агентов и axum-роутер.
//!
//! Авторитетное состояние игры живёт в памяти; внешний store —
//! только леджер истории, восстанавливающий монотонность номеров
//! раздач на старте.

pub mod api;
pub mod bots;
pub mod config;
pub mod domain;
pub mod engine;
pub mod escrow;
pub mod eval;
pub mod infra;
pub mod manager;
