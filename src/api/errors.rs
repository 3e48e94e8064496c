use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::manager::errors::{ErrorClass, GameError};

/// Конверт ошибки для клиента: `{ok: false, error: "..."}`.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

/// Ошибка HTTP-слоя с кодом ответа.
#[derive(Debug)]
pub enum ApiError {
    /// 400 — неверный запрос; состояние не менялось.
    BadRequest(String),
    /// 401 — неверный или отсутствующий API-ключ.
    Unauthorized(String),
    /// 404 — стол/агент не найден.
    NotFound(String),
    /// 500 — внешняя граница (escrow) не отработала.
    Internal(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err.class() {
            ErrorClass::Unavailable => ApiError::NotFound(err.to_string()),
            ErrorClass::Validation => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
            ApiError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m),
        };
        (
            status,
            Json(ErrorBody {
                ok: false,
                error: message,
            }),
        )
            .into_response()
    }
}
