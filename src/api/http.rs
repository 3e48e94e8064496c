use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::api::auth::ApiKeyRegistry;
use crate::api::dto::{
    build_leaderboard, build_table_summary, build_table_view, LeaderboardEntryDto,
    TableSummaryDto, TableViewDto,
};
use crate::api::errors::ApiError;
use crate::domain::agent::BotStrategy;
use crate::domain::chips::Chips;
use crate::domain::seat::SeatIndex;
use crate::domain::{AgentId, TableId};
use crate::engine::ActionKind;
use crate::escrow::EscrowClient;
use crate::manager::GameManager;

/// Общее состояние HTTP-слоя.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<GameManager>,
    pub escrow: Arc<dyn EscrowClient>,
    pub auth: Arc<ApiKeyRegistry>,
}

/// Собрать роутер: публичные эндпоинты + аутентифицированный
/// вариант для агентов под /agent/v1 (bearer pa_sk_-ключ).
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/tables", get(list_tables))
        .route("/tables/:id", get(get_table))
        .route("/tables/:id/sit", post(sit))
        .route("/tables/:id/leave", post(leave))
        .route("/tables/:id/action", post(action))
        .route("/tables/:id/stand", post(stand))
        .route("/tables/:id/resume", post(resume))
        .route("/tables/:id/rebuy", post(rebuy))
        .route("/tables/:id/add-bot", post(add_bot))
        .route("/tables/:id/emergency-refund", post(emergency_refund))
        .route("/leaderboard", get(leaderboard));

    let agent_api = api
        .clone()
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    Router::new()
        .merge(api)
        .nest("/agent/v1", agent_api)
        .with_state(state)
}

/// Gate агентских эндпоинтов: bearer-ключ хэшируется SHA-256
/// и сверяется с реестром; сырой ключ нигде не оседает.
async fn require_api_key(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    if state.auth.resolve_bearer(header).is_none() {
        return Err(ApiError::Unauthorized("неверный или отсутствующий API-ключ".into()));
    }
    Ok(next.run(req).await)
}

// ==== запросы/ответы ====

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerQuery {
    pub agent_id: Option<AgentId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitRequest {
    pub seat_number: SeatIndex,
    pub buy_in_amount: u64,
    pub agent_name: String,
    pub wallet_address: Option<String>,
    /// Хэш уже сделанного клиентом депозита (кошельковый SDK успел сам).
    pub deposit_tx_hash: Option<String>,
    #[serde(default)]
    pub start_sitting_out: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitResponse {
    pub ok: bool,
    pub agent_id: AgentId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deposit_tx: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRef {
    pub agent_id: AgentId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveResponse {
    pub ok: bool,
    pub agent_id: AgentId,
    pub cash_out: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_tx: Option<String>,
    /// Маркер сбоя on-chain расчёта: фишки уже сняты со стола,
    /// пользователь может добрать их через emergency-refund.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    pub agent_id: AgentId,
    pub action: String,
    pub amount: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebuyRequest {
    pub agent_id: AgentId,
    pub amount: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBotRequest {
    pub strategy: BotStrategy,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRefundRequest {
    pub wallet_address: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OkResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBotResponse {
    pub ok: bool,
    pub agent_id: AgentId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyRefundResponse {
    pub ok: bool,
    pub refund_tx: String,
}

// ==== обработчики ====

async fn list_tables(State(state): State<AppState>) -> Json<Vec<TableSummaryDto>> {
    let mut out = Vec::new();
    for table_id in state.manager.table_ids() {
        if let Ok(summary) = state.manager.with_table(table_id, build_table_summary) {
            out.push(summary);
        }
    }
    Json(out)
}

async fn get_table(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Query(viewer): Query<ViewerQuery>,
) -> Result<Json<TableViewDto>, ApiError> {
    let view = state
        .manager
        .with_table(table_id, |rt| build_table_view(rt, viewer.agent_id))?;
    Ok(Json(view))
}

/// Sit: сначала escrow-депозит, потом место. Если движок отказал
/// после успешного депозита — компенсирующий расчёт возвращает токены.
async fn sit(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<SitRequest>,
) -> Result<Json<SitResponse>, ApiError> {
    let buy_in = Chips(req.buy_in_amount);

    let mut deposit_tx = req.deposit_tx_hash.clone();
    if let Some(wallet) = req.wallet_address.as_deref() {
        if deposit_tx.is_none() {
            let tx = state
                .escrow
                .deposit(table_id, wallet, buy_in)
                .await
                .map_err(|e| ApiError::BadRequest(format!("депозит не прошёл: {e}")))?;
            deposit_tx = Some(tx.0);
        }
    }

    let seated = state.manager.sit_agent(
        table_id,
        req.seat_number,
        req.agent_name,
        buy_in,
        req.wallet_address.clone(),
        req.start_sitting_out,
    );

    match seated {
        Ok(agent_id) => Ok(Json(SitResponse {
            ok: true,
            agent_id,
            deposit_tx,
        })),
        Err(err) => {
            // Депозит уже в escrow — возвращаем его компенсирующим расчётом.
            if let Some(wallet) = req.wallet_address.as_deref() {
                if let Err(refund_err) = state.escrow.settle(table_id, wallet, buy_in).await {
                    tracing::error!(
                        table_id,
                        wallet,
                        error = %refund_err,
                        "компенсирующий расчёт после отказа sit не прошёл"
                    );
                }
            }
            Err(err.into())
        }
    }
}

/// Leave: сначала движок (cash-out зафиксирован), потом расчёт в чейн.
/// Сбой чейна не откатывает движок — отдаём маркер settlementError.
async fn leave(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<AgentRef>,
) -> Result<Json<LeaveResponse>, ApiError> {
    let cash_out = state.manager.leave_agent(table_id, req.agent_id)?;

    let (settlement_tx, settlement_error) = match cash_out.wallet_address.as_deref() {
        Some(wallet) => {
            match state
                .escrow
                .settle(table_id, wallet, cash_out.cash_out)
                .await
            {
                Ok(tx) => (Some(tx.0), None),
                Err(err) => {
                    tracing::error!(table_id, wallet, error = %err, "on-chain расчёт не прошёл");
                    (None, Some(err.to_string()))
                }
            }
        }
        None => (None, None),
    };

    Ok(Json(LeaveResponse {
        ok: true,
        agent_id: cash_out.agent_id,
        cash_out: cash_out.cash_out.0,
        wallet_address: cash_out.wallet_address,
        settlement_tx,
        settlement_error,
    }))
}

async fn action(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<ActionRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    let kind = parse_action(&req.action, req.amount)?;
    state.manager.submit_action(table_id, req.agent_id, kind)?;
    Ok(Json(OkResponse { ok: true }))
}

async fn stand(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<AgentRef>,
) -> Result<Json<OkResponse>, ApiError> {
    state.manager.stand_agent(table_id, req.agent_id)?;
    Ok(Json(OkResponse { ok: true }))
}

async fn resume(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<AgentRef>,
) -> Result<Json<OkResponse>, ApiError> {
    state.manager.resume_agent(table_id, req.agent_id)?;
    Ok(Json(OkResponse { ok: true }))
}

async fn rebuy(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<RebuyRequest>,
) -> Result<Json<OkResponse>, ApiError> {
    state
        .manager
        .rebuy_agent(table_id, req.agent_id, Chips(req.amount))?;
    Ok(Json(OkResponse { ok: true }))
}

async fn add_bot(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<AddBotRequest>,
) -> Result<Json<AddBotResponse>, ApiError> {
    let agent_id = state.manager.add_bot(table_id, req.strategy)?;
    Ok(Json(AddBotResponse {
        ok: true,
        agent_id,
    }))
}

/// Аварийный возврат: читаем балансы стола в чейне и рассчитываем
/// их полностью. Крайний путь, когда обычный settle не прошёл.
async fn emergency_refund(
    State(state): State<AppState>,
    Path(table_id): Path<TableId>,
    Json(req): Json<EmergencyRefundRequest>,
) -> Result<Json<EmergencyRefundResponse>, ApiError> {
    let _ = req.wallet_address; // контракт возвращает по всему столу
    let tx = state
        .escrow
        .emergency_refund_table(table_id)
        .await
        .map_err(|e| ApiError::Internal(format!("аварийный возврат не прошёл: {e}")))?;
    Ok(Json(EmergencyRefundResponse {
        ok: true,
        refund_tx: tx.0,
    }))
}

async fn leaderboard(State(state): State<AppState>) -> Json<Vec<LeaderboardEntryDto>> {
    Json(build_leaderboard(state.manager.leaderboard()))
}

/// Разбор wire-действия. Строки — только здесь, движок видит enum.
fn parse_action(action: &str, amount: Option<u64>) -> Result<ActionKind, ApiError> {
    match action {
        "fold" => Ok(ActionKind::Fold),
        "check" => Ok(ActionKind::Check),
        "call" => Ok(ActionKind::Call),
        "all-in" => Ok(ActionKind::AllIn),
        "bet" => {
            let amount =
                amount.ok_or_else(|| ApiError::BadRequest("bet требует amount".into()))?;
            Ok(ActionKind::Bet(Chips(amount)))
        }
        "raise" => {
            let amount =
                amount.ok_or_else(|| ApiError::BadRequest("raise требует amount".into()))?;
            Ok(ActionKind::Raise(Chips(amount)))
        }
        other => Err(ApiError::BadRequest(format!(
            "неизвестное действие: {other}"
        ))),
    }
}
