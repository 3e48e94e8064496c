use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use chrono::{DateTime, Utc};

use crate::bots;
use crate::config;
use crate::domain::agent::AgentKind;
use crate::domain::hand::Phase;
use crate::domain::AgentId;
use crate::engine::{self, ActionKind};
use crate::infra::persistence::{
    ChipTransaction, ChipTxKind, CompletedHandRecord, PersistJob, SeatSnapshot,
};
use crate::infra::SystemRng;
use crate::manager::game_manager::{GameManager, TableRuntime};

impl GameManager {
    /// Один проход тикера по всем столам. Каждый стол обрабатывается
    /// под своим локом и под панико-защитой: неожиданный сбой посреди
    /// раздачи не теряет фишки — вклады возвращаются в стеки,
    /// раздача снимается.
    pub fn tick(&self, now: DateTime<Utc>) {
        for table_id in self.table_ids() {
            let Some(cell) = self.table_cell(table_id) else {
                continue;
            };
            let mut rt = cell.lock();

            let outcome = catch_unwind(AssertUnwindSafe(|| {
                self.process_table(&mut rt, now);
            }));

            if outcome.is_err() {
                tracing::error!(table_id, "сбой обработки стола, раздача аварийно снята");
                if let Some(hand) = rt.hand.take() {
                    // До шоудауна вклады ещё в банке — возвращаем их в стеки.
                    // После выплаты банка возвращать уже нечего.
                    if hand.phase.is_betting() {
                        engine::refund_contributions(&mut rt.table, &hand);
                    }
                    rt.table.reset_statuses_between_hands();
                }
            }
        }
    }

    /// Продвинуть один стол. Бот-столы пробегают до
    /// BOT_ONLY_TICK_DEPTH шагов за тик, столы с людьми — один шаг:
    /// людям нужны видимые паузы, ботам — нет.
    fn process_table(&self, rt: &mut TableRuntime, now: DateTime<Utc>) {
        let bot_only = !rt.has_human();
        let depth = if bot_only {
            config::BOT_ONLY_TICK_DEPTH
        } else {
            1
        };

        for _ in 0..depth {
            if !self.process_table_once(rt, now, bot_only) {
                break;
            }
        }
    }

    /// Один шаг стола. Возвращает true, если состояние изменилось
    /// (и бот-столу имеет смысл продолжать в этом же тике).
    fn process_table_once(&self, rt: &mut TableRuntime, now: DateTime<Utc>, bot_only: bool) -> bool {
        // 1. Нет раздачи — пробуем стартовать новую.
        if rt.hand.is_none() {
            if rt.table.dealable_count() < 2 {
                return false;
            }
            // Снимаем sit-out с людей при деньгах: UI сажает новичков
            // наблюдателями, тикер вводит их в игру между раздачами.
            for seat in rt.table.seats.iter_mut().flatten() {
                if matches!(seat.kind, AgentKind::Human)
                    && seat.is_sitting_out
                    && !seat.stack.is_zero()
                {
                    seat.is_sitting_out = false;
                }
            }
            return match self.start_hand_locked(rt, now) {
                Ok(()) => true,
                Err(err) => {
                    tracing::warn!(table_id = rt.table.id(), error = %err, "раздача не стартовала");
                    false
                }
            };
        }

        let phase = rt.hand.as_ref().map(|h| h.phase);
        match phase {
            Some(Phase::Showdown) => {
                let hold_ms = if bot_only {
                    config::BOT_ONLY_SHOWDOWN_HOLD_MS
                } else {
                    config::SHOWDOWN_HOLD_MS
                };
                let elapsed = rt
                    .hand
                    .as_ref()
                    .map(|h| (now - h.last_action_at).num_milliseconds())
                    .unwrap_or(0);
                if elapsed >= hold_ms {
                    self.complete_showdown(rt, now);
                    return true;
                }
                false
            }
            Some(Phase::Complete) | None => false,
            Some(_) => self.drive_current_turn(rt, now, bot_only),
        }
    }

    /// Ход текущего места: бот думает положенную паузу, человек
    /// получает 30 секунд, дальше auto check/fold.
    fn drive_current_turn(&self, rt: &mut TableRuntime, now: DateTime<Utc>, bot_only: bool) -> bool {
        let TableRuntime { table, hand, .. } = rt;
        let Some(hand) = hand.as_mut() else {
            return false;
        };
        let Some(turn_seat) = hand.current_turn_seat() else {
            return false;
        };
        let Some(seat) = table.seats.get(turn_seat as usize).and_then(|s| s.as_ref()) else {
            return false;
        };

        let elapsed_ms = (now - hand.last_action_at).num_milliseconds();

        match seat.kind {
            AgentKind::Bot(strategy) => {
                let think_ms = if bot_only { 0 } else { config::BOT_THINK_DELAY_MS };
                if elapsed_ms < think_ms {
                    return false;
                }

                let mut rng = SystemRng;
                let decision = bots::decide(strategy, table, hand, turn_seat, &mut rng);
                if engine::apply_action(table, hand, turn_seat, decision, now).is_ok() {
                    return true;
                }

                // Решение отверг движок (например, недорейз LAG'а) —
                // безопасный fallback, чтобы тик всегда продвигался.
                let can_check = table.seats[turn_seat as usize]
                    .as_ref()
                    .map(|s| s.current_bet == hand.betting.current_bet)
                    .unwrap_or(false);
                let fallback = if can_check {
                    ActionKind::Check
                } else {
                    ActionKind::Fold
                };
                if engine::apply_action(table, hand, turn_seat, fallback, now).is_ok() {
                    return true;
                }

                // Последний рубеж от вечного зависания стола.
                match engine::force_fold(table, hand, turn_seat, now) {
                    Ok(_) => true,
                    Err(err) => {
                        tracing::error!(
                            table_id = table.id(),
                            seat = turn_seat,
                            error = %err,
                            "не удалось продвинуть ход бота"
                        );
                        false
                    }
                }
            }

            AgentKind::Human => {
                if elapsed_ms < config::HUMAN_TURN_TIMEOUT_MS {
                    return false;
                }

                let can_check = seat.current_bet == hand.betting.current_bet;
                let auto = if can_check {
                    ActionKind::Check
                } else {
                    ActionKind::Fold
                };
                tracing::info!(
                    table_id = table.id(),
                    seat = turn_seat,
                    action = auto.label(),
                    "таймаут хода человека, авто-действие"
                );
                if engine::apply_action(table, hand, turn_seat, auto, now).is_err() {
                    let _ = engine::force_fold(table, hand, turn_seat, now);
                }
                true
            }
        }
    }

    /// Закрыть шоудаун после display-паузы: счётчики агентов,
    /// архив, запись в store, rebuy ботов и снятие раздачи со стола.
    pub(crate) fn complete_showdown(&self, rt: &mut TableRuntime, now: DateTime<Utc>) {
        let Some(mut hand) = rt.hand.take() else {
            return;
        };
        hand.phase = Phase::Complete;
        hand.completed_at = Some(now);

        let table_id = rt.table.id();
        let winner_agents: HashSet<AgentId> = hand.winners.iter().map(|w| w.agent_id).collect();

        // Счётчики и профит — по каждому месту, входившему в раздачу.
        let mut seat_snapshots = Vec::new();
        {
            let mut agents = self.agents_registry().lock();
            for (&seat_no, &start) in hand.starting_stacks() {
                let Some(Some(seat)) = rt.table.seats.get(seat_no as usize) else {
                    continue; // место успело освободиться (leave посреди раздачи)
                };
                if seat.hole_cards.len() != 2 {
                    continue; // место перезанял кто-то, кто в раздаче не был
                }

                seat_snapshots.push(SeatSnapshot {
                    seat: seat_no,
                    agent_id: seat.agent_id,
                    agent_name: seat.agent_name.clone(),
                    starting_stack: start,
                    final_stack: seat.stack,
                    hole_cards: seat.hole_cards.clone(),
                });

                if let Some(agent) = agents.get_mut(&seat.agent_id) {
                    agent.hands_played += 1;
                    agent.lifetime_profit += seat.stack.0 as i64 - start.0 as i64;
                }
            }

            for winner_id in &winner_agents {
                if let Some(agent) = agents.get_mut(winner_id) {
                    agent.hands_won += 1;
                }
            }
        }

        for w in &hand.winners {
            self.persist_sink().submit(PersistJob::ChipTx(ChipTransaction {
                table_id,
                agent_id: w.agent_id,
                kind: ChipTxKind::PotWin,
                amount: w.amount,
                at: now,
            }));
        }

        let archive = hand.archive();
        self.persist_sink().submit(PersistJob::Hand(CompletedHandRecord {
            table_id,
            hand: archive.clone(),
            seats: seat_snapshots,
        }));
        rt.archive_hand(archive);

        // Bust-out: человек пересаживается в sit-out, бот автоматически
        // докупается до максимума — столы не должны пустеть.
        let max_buy_in = rt.table.config.max_buy_in;
        let mut bot_rebuys = Vec::new();
        for seat in rt.table.seats.iter_mut().flatten() {
            if !seat.stack.is_zero() {
                continue;
            }
            if seat.is_bot() {
                seat.stack = max_buy_in;
                seat.buy_in += max_buy_in;
                bot_rebuys.push(seat.agent_id);
            } else {
                seat.is_sitting_out = true;
            }
        }
        for agent_id in bot_rebuys {
            self.persist_sink().submit(PersistJob::ChipTx(ChipTransaction {
                table_id,
                agent_id,
                kind: ChipTxKind::Rebuy,
                amount: max_buy_in,
                at: now,
            }));
        }

        rt.table.reset_statuses_between_hands();
    }
}
