//! Внешний API сервера.
//!
//! - dto.rs — отрендеренные представления столов/раздач с маскировкой
//!   карманных карт;
//! - errors.rs — конверт ошибок для клиента;
//! - auth.rs — bearer-ключи агентов (pa_sk_, SHA-256);
//! - http.rs — axum-роутер и обработчики, композиция с escrow.

pub mod auth;
pub mod dto;
pub mod errors;
pub mod http;

pub use auth::{ApiKeyRegistry, AuthedAgent};
pub use dto::{build_table_summary, build_table_view, TableSummaryDto, TableViewDto};
pub use errors::ApiError;
pub use http::{router, AppState};
