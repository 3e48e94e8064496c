//! Тесты ядра движка: состояние ставок, позиции, валидация действий.

mod common;

use poker_server::domain::{Chips, SeatStatus, Street};
use poker_server::engine::betting::BettingState;
use poker_server::engine::positions::{collect_active_from, next_active_seat, next_dealer};
use poker_server::engine::validation::{diff_to_call, validate_action};
use poker_server::engine::{ActionKind, EngineError};

use common::{table_with_stacks, test_config};

//
// betting.rs
//

#[test]
fn betting_state_mark_acted_and_round_complete() {
    let mut bs = BettingState::new(Street::Preflop, Chips(100), Chips(100), vec![0, 1, 2]);

    assert!(!bs.is_round_complete());
    assert_eq!(bs.current_actor(), Some(0));

    bs.mark_acted(1);
    assert_eq!(bs.to_act, vec![0, 2]);

    bs.mark_acted(0);
    assert_eq!(bs.current_actor(), Some(2));

    bs.mark_acted(2);
    assert!(bs.is_round_complete());
}

#[test]
fn on_raise_updates_target_and_queue() {
    let mut bs = BettingState::new(Street::Flop, Chips(100), Chips(100), vec![1, 2]);

    bs.on_raise(1, Chips(300), Chips(200), vec![2]);

    assert_eq!(bs.current_bet, Chips(300));
    assert_eq!(bs.min_raise, Chips(200));
    assert_eq!(bs.last_aggressor, Some(1));
    assert_eq!(bs.to_act, vec![2]);
}

#[test]
fn min_raise_only_grows() {
    let mut bs = BettingState::new(Street::Flop, Chips(0), Chips(100), vec![0, 1]);

    // Первый бет 300: min_raise растёт до 300.
    bs.on_raise(0, Chips(300), Chips(300), vec![1]);
    assert_eq!(bs.min_raise, Chips(300));

    // Рейз ровно на min_raise: min_raise не уменьшается.
    bs.on_raise(1, Chips(600), Chips(300), vec![0]);
    assert_eq!(bs.min_raise, Chips(300));
}

#[test]
fn short_all_in_keeps_queue_closed() {
    let mut bs = BettingState::new(Street::Turn, Chips(100), Chips(100), vec![2]);

    // Короткий all-in до 150: цель растёт, очередь не пересобирается.
    bs.on_short_all_in(Chips(150));

    assert_eq!(bs.current_bet, Chips(150));
    assert_eq!(bs.min_raise, Chips(100), "min_raise не тронут");
    assert_eq!(bs.to_act, vec![2], "уже походившие не возвращаются");
}

//
// positions.rs
//

#[test]
fn next_active_seat_wraps_and_skips() {
    let mut table = table_with_stacks(&[(0, 100), (2, 100), (4, 100)], 1, 2);

    assert_eq!(next_active_seat(&table, 0, false), Some(2));
    assert_eq!(next_active_seat(&table, 4, false), Some(0), "обход по кругу");
    assert_eq!(next_active_seat(&table, 0, true), Some(0));

    // Sit-out пропускается.
    table.seats[2].as_mut().unwrap().is_sitting_out = true;
    assert_eq!(next_active_seat(&table, 0, false), Some(4));

    // Нулевой стек пропускается.
    table.seats[4].as_mut().unwrap().stack = Chips::ZERO;
    assert_eq!(next_active_seat(&table, 0, false), Some(0));
}

#[test]
fn collect_active_from_orders_clockwise() {
    let table = table_with_stacks(&[(1, 100), (3, 100), (5, 100)], 1, 2);
    assert_eq!(collect_active_from(&table, 3), vec![3, 5, 1]);
    assert_eq!(collect_active_from(&table, 0), vec![1, 3, 5]);
}

#[test]
fn dealer_rotation_first_and_subsequent() {
    let mut table = table_with_stacks(&[(1, 100), (3, 100), (5, 100)], 1, 2);

    // Первая раздача: первое активное место.
    assert_eq!(next_dealer(&table), Some(1));

    table.dealer_button = Some(1);
    assert_eq!(next_dealer(&table), Some(3));

    table.dealer_button = Some(5);
    assert_eq!(next_dealer(&table), Some(1), "кнопка идёт по кругу");
}

//
// validation.rs
//

fn seat_with(stack: u64, current_bet: u64) -> poker_server::domain::Seat {
    use poker_server::domain::{AgentKind, Seat};
    let mut seat = Seat::new(1, "X".into(), AgentKind::Human, Chips(stack + current_bet));
    seat.status = SeatStatus::Active;
    seat.stack = Chips(stack);
    seat.current_bet = Chips(current_bet);
    seat
}

#[test]
fn check_requires_matched_bet() {
    let cfg = test_config(1, 2);
    let bs = BettingState::new(Street::Flop, Chips(10), Chips(2), vec![0]);

    let matched = seat_with(100, 10);
    assert!(validate_action(&matched, &ActionKind::Check, &bs, &cfg).is_ok());

    let behind = seat_with(100, 0);
    assert_eq!(
        validate_action(&behind, &ActionKind::Check, &bs, &cfg),
        Err(EngineError::CannotCheck)
    );
}

#[test]
fn call_requires_outstanding_bet() {
    let cfg = test_config(1, 2);
    let no_bet = BettingState::new(Street::Flop, Chips(0), Chips(2), vec![0]);
    let seat = seat_with(100, 0);

    assert_eq!(
        validate_action(&seat, &ActionKind::Call, &no_bet, &cfg),
        Err(EngineError::CannotCall)
    );

    let with_bet = BettingState::new(Street::Flop, Chips(10), Chips(2), vec![0]);
    assert!(validate_action(&seat, &ActionKind::Call, &with_bet, &cfg).is_ok());

    // Колл больше стека разрешён — станет all-in call'ом в движке.
    let short = seat_with(4, 0);
    assert!(validate_action(&short, &ActionKind::Call, &with_bet, &cfg).is_ok());
}

#[test]
fn bet_rules() {
    let cfg = test_config(1, 2);
    let open = BettingState::new(Street::Flop, Chips(0), Chips(2), vec![0]);
    let seat = seat_with(100, 0);

    assert!(validate_action(&seat, &ActionKind::Bet(Chips(2)), &open, &cfg).is_ok());
    assert_eq!(
        validate_action(&seat, &ActionKind::Bet(Chips(1)), &open, &cfg),
        Err(EngineError::BetTooSmall),
        "меньше BB можно только всем стеком"
    );
    assert_eq!(
        validate_action(&seat, &ActionKind::Bet(Chips(500)), &open, &cfg),
        Err(EngineError::NotEnoughChips)
    );

    // Короткий стек целиком — валидный bet-all-in меньше BB.
    let tiny = seat_with(1, 0);
    assert!(validate_action(&tiny, &ActionKind::Bet(Chips(1)), &open, &cfg).is_ok());

    // Когда ставка уже есть, bet запрещён.
    let closed = BettingState::new(Street::Flop, Chips(10), Chips(2), vec![0]);
    assert_eq!(
        validate_action(&seat, &ActionKind::Bet(Chips(20)), &closed, &cfg),
        Err(EngineError::IllegalAction)
    );
}

#[test]
fn raise_rules() {
    let cfg = test_config(1, 2);
    // Текущая ставка 10, min_raise 10 → легальный рейз от 20.
    let bs = BettingState::new(Street::Flop, Chips(10), Chips(10), vec![0]);
    let seat = seat_with(100, 0);

    assert!(validate_action(&seat, &ActionKind::Raise(Chips(20)), &bs, &cfg).is_ok());
    assert_eq!(
        validate_action(&seat, &ActionKind::Raise(Chips(10)), &bs, &cfg),
        Err(EngineError::IllegalAction),
        "рейз обязан строго превышать текущую ставку"
    );
    assert_eq!(
        validate_action(&seat, &ActionKind::Raise(Chips(15)), &bs, &cfg),
        Err(EngineError::RaiseTooSmall)
    );

    // Недорейз всем стеком — терминальный all-in, валиден.
    let short = seat_with(15, 0);
    assert!(validate_action(&short, &ActionKind::Raise(Chips(15)), &bs, &cfg).is_ok());

    // Рейз без ставки — это bet.
    let open = BettingState::new(Street::Flop, Chips(0), Chips(2), vec![0]);
    assert_eq!(
        validate_action(&seat, &ActionKind::Raise(Chips(20)), &open, &cfg),
        Err(EngineError::IllegalAction)
    );
}

#[test]
fn folded_and_all_in_cannot_act() {
    let cfg = test_config(1, 2);
    let bs = BettingState::new(Street::Flop, Chips(10), Chips(10), vec![0]);

    let mut folded = seat_with(100, 0);
    folded.status = SeatStatus::Folded;
    assert_eq!(
        validate_action(&folded, &ActionKind::Call, &bs, &cfg),
        Err(EngineError::IllegalAction)
    );

    let mut all_in = seat_with(0, 50);
    all_in.status = SeatStatus::AllIn;
    assert_eq!(
        validate_action(&all_in, &ActionKind::Check, &bs, &cfg),
        Err(EngineError::IllegalAction)
    );
}

#[test]
fn diff_to_call_math() {
    let bs = BettingState::new(Street::Flop, Chips(30), Chips(10), vec![0]);
    assert_eq!(diff_to_call(&seat_with(100, 10), &bs), Chips(20));
    assert_eq!(diff_to_call(&seat_with(100, 30), &bs), Chips::ZERO);
}
