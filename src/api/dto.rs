use chrono::{DateTime, Duration, Utc};

use serde::Serialize;
use uuid::Uuid;

use crate::config;
use crate::domain::agent::AgentKind;
use crate::domain::card::Card;
use crate::domain::hand::Phase;
use crate::domain::seat::{SeatIndex, SeatStatus};
use crate::domain::{AgentId, TableId};
use crate::engine::game_loop::ActiveHand;
use crate::manager::game_manager::{LeaderboardRow, TableRuntime};

/// Краткая строка списка столов.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummaryDto {
    pub id: TableId,
    pub name: String,
    pub small_blind: u64,
    pub big_blind: u64,
    pub min_buy_in: u64,
    pub max_buy_in: u64,
    pub max_seats: u8,
    pub seated_count: usize,
    pub hand_number: u64,
    /// "waiting" | "playing"
    pub status: &'static str,
}

/// Место в публичном представлении. Карманные карты присутствуют
/// только там, где зрителю положено их видеть.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatDto {
    pub seat_number: SeatIndex,
    pub agent_id: AgentId,
    pub agent_name: String,
    pub is_bot: bool,
    pub stack: u64,
    pub current_bet: u64,
    pub status: SeatStatus,
    pub is_sitting_out: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole_cards: Option<Vec<Card>>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidePotDto {
    pub amount: u64,
    pub eligible_seats: Vec<SeatIndex>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerDto {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub amount: u64,
    pub hand_name: String,
}

/// Текущая раздача в публичном представлении.
/// Приватная колода и стартовые стеки сюда не попадают никогда.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandDto {
    pub id: Uuid,
    pub hand_number: u64,
    pub phase: Phase,
    pub community_cards: Vec<Card>,
    pub pot: u64,
    pub side_pots: Vec<SidePotDto>,
    pub dealer_seat: SeatIndex,
    pub small_blind_seat: SeatIndex,
    pub big_blind_seat: SeatIndex,
    pub current_bet: u64,
    pub min_raise: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_turn_seat: Option<SeatIndex>,
    /// Дедлайн авто-действия, если ход за человеком.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turn_deadline: Option<DateTime<Utc>>,
    pub winners: Vec<WinnerDto>,
    pub started_at: DateTime<Utc>,
    pub last_action_at: DateTime<Utc>,
}

/// Краткая запись из ring-истории стола.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandBriefDto {
    pub hand_number: u64,
    pub pot: u64,
    pub winners: Vec<WinnerDto>,
}

/// Полное представление стола.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableViewDto {
    pub id: TableId,
    pub name: String,
    pub small_blind: u64,
    pub big_blind: u64,
    pub min_buy_in: u64,
    pub max_buy_in: u64,
    pub max_seats: u8,
    pub seats: Vec<SeatDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_hand: Option<HandDto>,
    pub hand_count: u64,
    pub recent_hands: Vec<HandBriefDto>,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryDto {
    pub agent_id: AgentId,
    pub agent_name: String,
    pub is_bot: bool,
    pub profit: i64,
    pub hands_played: u64,
    pub hands_won: u64,
}

pub fn build_table_summary(rt: &TableRuntime) -> TableSummaryDto {
    let cfg = &rt.table.config;
    TableSummaryDto {
        id: cfg.id,
        name: cfg.name.clone(),
        small_blind: cfg.small_blind.0,
        big_blind: cfg.big_blind.0,
        min_buy_in: cfg.min_buy_in.0,
        max_buy_in: cfg.max_buy_in.0,
        max_seats: cfg.max_seats,
        seated_count: rt.table.seated_count(),
        hand_number: rt.table.hand_count,
        status: if rt.hand.is_some() {
            "playing"
        } else {
            "waiting"
        },
    }
}

/// Полное представление стола глазами конкретного зрителя.
pub fn build_table_view(rt: &TableRuntime, viewer: Option<AgentId>) -> TableViewDto {
    let cfg = &rt.table.config;
    let hand = rt.hand.as_ref();

    // Вскрытие на шоудауне: карты видят все, но только если вскрытие
    // действительно было (победитель фолд-аута показываться не обязан).
    let showdown_reveal = hand
        .map(|h| {
            h.phase == Phase::Showdown
                && rt
                    .table
                    .seats
                    .iter()
                    .flatten()
                    .filter(|s| s.is_in_hand())
                    .count()
                    >= 2
        })
        .unwrap_or(false);

    let mut seats = Vec::new();
    for (idx, seat_opt) in rt.table.seats.iter().enumerate() {
        let Some(seat) = seat_opt else { continue };

        let own_view = viewer == Some(seat.agent_id);
        let reveal = own_view || (showdown_reveal && seat.is_in_hand());
        let hole_cards = if reveal && !seat.hole_cards.is_empty() {
            Some(seat.hole_cards.clone())
        } else {
            None
        };

        seats.push(SeatDto {
            seat_number: idx as SeatIndex,
            agent_id: seat.agent_id,
            agent_name: seat.agent_name.clone(),
            is_bot: seat.is_bot(),
            stack: seat.stack.0,
            current_bet: seat.current_bet.0,
            status: seat.status,
            is_sitting_out: seat.is_sitting_out,
            hole_cards,
        });
    }

    let current_hand = hand.map(|h| build_hand_dto(rt, h));

    let recent_hands = rt
        .history
        .iter()
        .rev()
        .take(10)
        .map(|a| HandBriefDto {
            hand_number: a.hand_number,
            pot: a.pot.0,
            winners: a
                .winners
                .iter()
                .map(|w| WinnerDto {
                    agent_id: w.agent_id,
                    agent_name: w.agent_name.clone(),
                    amount: w.amount.0,
                    hand_name: w.hand_name.clone(),
                })
                .collect(),
        })
        .collect();

    TableViewDto {
        id: cfg.id,
        name: cfg.name.clone(),
        small_blind: cfg.small_blind.0,
        big_blind: cfg.big_blind.0,
        min_buy_in: cfg.min_buy_in.0,
        max_buy_in: cfg.max_buy_in.0,
        max_seats: cfg.max_seats,
        seats,
        current_hand,
        hand_count: rt.table.hand_count,
        recent_hands,
    }
}

fn build_hand_dto(rt: &TableRuntime, hand: &ActiveHand) -> HandDto {
    let current_turn_seat = hand.current_turn_seat();

    // Дедлайн показываем только для хода человека — ботов торопит тикер.
    let turn_deadline = current_turn_seat.and_then(|seat_no| {
        rt.table.seats[seat_no as usize].as_ref().and_then(|seat| {
            if matches!(seat.kind, AgentKind::Human) {
                Some(hand.last_action_at + Duration::milliseconds(config::HUMAN_TURN_TIMEOUT_MS))
            } else {
                None
            }
        })
    });

    HandDto {
        id: hand.id,
        hand_number: hand.hand_number,
        phase: hand.phase,
        community_cards: hand.board.clone(),
        pot: hand.pot.0,
        side_pots: hand
            .side_pots
            .iter()
            .map(|p| SidePotDto {
                amount: p.amount.0,
                eligible_seats: p.eligible_seats.clone(),
            })
            .collect(),
        dealer_seat: hand.dealer_seat,
        small_blind_seat: hand.small_blind_seat,
        big_blind_seat: hand.big_blind_seat,
        current_bet: hand.betting.current_bet.0,
        min_raise: hand.betting.min_raise.0,
        current_turn_seat,
        turn_deadline,
        winners: hand
            .winners
            .iter()
            .map(|w| WinnerDto {
                agent_id: w.agent_id,
                agent_name: w.agent_name.clone(),
                amount: w.amount.0,
                hand_name: w.hand_name.clone(),
            })
            .collect(),
        started_at: hand.started_at,
        last_action_at: hand.last_action_at,
    }
}

pub fn build_leaderboard(rows: Vec<LeaderboardRow>) -> Vec<LeaderboardEntryDto> {
    rows.into_iter()
        .map(|r| LeaderboardEntryDto {
            agent_id: r.agent_id,
            agent_name: r.name,
            is_bot: r.is_bot,
            profit: r.profit,
            hands_played: r.hands_played,
            hands_won: r.hands_won,
        })
        .collect()
}
