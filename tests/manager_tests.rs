//! GameManager: публичные операции, тикер, таймауты, лидерборд,
//! прогресс бот-столов и монотонность номеров раздач.

mod common;

use std::sync::Arc;

use chrono::{Duration, Utc};

use poker_server::config;
use poker_server::domain::{BotStrategy, Chips, Phase};
use poker_server::engine::{ActionKind, AuditKind};
use poker_server::infra::persistence::{ChipTxKind, HandStore, PersistSink};
use poker_server::infra::InMemoryHandStore;
use poker_server::manager::{GameError, GameManager};

fn manager_with_store() -> (GameManager, Arc<InMemoryHandStore>) {
    let store = Arc::new(InMemoryHandStore::new());
    let dyn_store: Arc<dyn HandStore> = store.clone();
    let manager = GameManager::new(
        config::default_tables(),
        Some(&*dyn_store),
        PersistSink::Direct(dyn_store.clone()),
    );
    (manager, store)
}

const MICRO: u64 = 1; // столик micro из фиксированного набора, блайнды 1/2

//
// Посадка и валидация.
//

#[test]
fn sit_validates_seat_and_buyin() {
    let (manager, store) = manager_with_store();

    let id = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();
    assert!(id > 0);

    // Занятое место.
    let err = manager
        .sit_agent(MICRO, 0, "Bob".into(), Chips(100), None, false)
        .unwrap_err();
    assert!(matches!(err, GameError::SeatTaken(0)));

    // Закуп вне диапазона (micro: 40..=200).
    let err = manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(10), None, false)
        .unwrap_err();
    assert!(matches!(err, GameError::BuyInOutOfRange { .. }));

    // Неизвестный стол.
    let err = manager
        .sit_agent(999, 0, "Bob".into(), Chips(100), None, false)
        .unwrap_err();
    assert!(matches!(err, GameError::TableNotFound(999)));

    // Buy-in записан движением фишек.
    let txs = store.chip_txs();
    assert!(txs
        .iter()
        .any(|tx| tx.kind == ChipTxKind::BuyIn && tx.amount == Chips(100)));
}

#[test]
fn stand_and_resume_flip_sitting_out() {
    let (manager, _store) = manager_with_store();
    let id = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();

    manager.stand_agent(MICRO, id).unwrap();
    let sitting = manager
        .with_table(MICRO, |rt| rt.table.seats[0].as_ref().unwrap().is_sitting_out)
        .unwrap();
    assert!(sitting);

    manager.resume_agent(MICRO, id).unwrap();
    let sitting = manager
        .with_table(MICRO, |rt| rt.table.seats[0].as_ref().unwrap().is_sitting_out)
        .unwrap();
    assert!(!sitting);

    assert!(matches!(
        manager.stand_agent(MICRO, 12345).unwrap_err(),
        GameError::AgentNotSeated(12345)
    ));
}

//
// Rebuy.
//

#[test]
fn rebuy_only_between_hands_and_capped() {
    let (manager, _store) = manager_with_store();
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();

    // Между раздачами — можно, но не выше максимума стола (200).
    manager.rebuy_agent(MICRO, alice, Chips(50)).unwrap();
    let err = manager.rebuy_agent(MICRO, alice, Chips(100)).unwrap_err();
    assert!(matches!(err, GameError::RebuyAboveMax));

    // Во время раздачи — нельзя.
    manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(100), None, false)
        .unwrap();
    manager.tick(Utc::now());
    let has_hand = manager.with_table(MICRO, |rt| rt.hand.is_some()).unwrap();
    assert!(has_hand, "тикер должен был стартовать раздачу");

    let err = manager.rebuy_agent(MICRO, alice, Chips(10)).unwrap_err();
    assert!(matches!(err, GameError::RebuyDuringHand));
}

//
// Действия и таймаут человека.
//

#[test]
fn human_timeout_auto_folds_facing_bet() {
    let (manager, _store) = manager_with_store();
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();
    let bob = manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(100), None, false)
        .unwrap();

    let t0 = Utc::now();
    manager.tick(t0);

    // Хедз-ап: дилер/SB — место 0 (Alice), она ходит первой.
    manager.submit_action(MICRO, alice, ActionKind::Call).unwrap();
    manager.submit_action(MICRO, bob, ActionKind::Check).unwrap();

    // Флоп: Bob (BB) первым ставит 10. Alice молчит.
    manager
        .submit_action(MICRO, bob, ActionKind::Bet(Chips(10)))
        .unwrap();

    let bet_at = manager
        .with_table(MICRO, |rt| rt.hand.as_ref().unwrap().last_action_at)
        .unwrap();

    // До таймаута тикер ничего не делает.
    manager.tick(bet_at + Duration::seconds(29));
    let still_waiting = manager
        .with_table(MICRO, |rt| {
            rt.hand.as_ref().unwrap().current_turn_seat() == Some(0)
        })
        .unwrap();
    assert!(still_waiting);

    // Спустя 30+ секунд — авто-fold, Bob выигрывает фолд-аутом.
    let fired_at = bet_at + Duration::seconds(31);
    manager.tick(fired_at);

    manager
        .with_table(MICRO, |rt| {
            let hand = rt.hand.as_ref().expect("раздача в display-паузе");
            assert_eq!(hand.phase, Phase::Showdown);

            let fold = hand
                .actions
                .entries
                .iter()
                .rev()
                .find(|e| e.kind == AuditKind::Fold)
                .expect("запись авто-fold");
            assert_eq!(fold.seat, 0);
            assert!((fold.at - bet_at).num_seconds() >= 30);

            assert_eq!(hand.winners[0].agent_id, bob);
        })
        .unwrap();
}

#[test]
fn human_timeout_auto_checks_when_possible() {
    let (manager, _store) = manager_with_store();
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();
    manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(100), None, false)
        .unwrap();

    let t0 = Utc::now();
    manager.tick(t0);
    manager.submit_action(MICRO, alice, ActionKind::Call).unwrap();

    // Bob может чекнуть опцию BB — таймаут делает это за него.
    let last = manager
        .with_table(MICRO, |rt| rt.hand.as_ref().unwrap().last_action_at)
        .unwrap();
    manager.tick(last + Duration::seconds(31));

    manager
        .with_table(MICRO, |rt| {
            let hand = rt.hand.as_ref().unwrap();
            assert_eq!(hand.phase, Phase::Flop, "BB авто-чекнул, открыт флоп");
            // Постфлоп хедз-ап первым снова ходит BB (Bob, место 1).
            assert_eq!(hand.current_turn_seat(), Some(1));
        })
        .unwrap();
}

//
// Уход из-за стола.
//

#[test]
fn leave_mid_hand_force_folds_and_cashes_out() {
    let (manager, store) = manager_with_store();
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();
    let bob = manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(100), None, false)
        .unwrap();

    manager.tick(Utc::now());

    // Alice (SB, поставила 1) уходит посреди раздачи.
    let cash = manager.leave_agent(MICRO, alice).unwrap();
    assert_eq!(cash.cash_out, Chips(99));
    assert_eq!(cash.wallet_address, None);

    // Место освободилось, Bob выиграл фолд-аутом.
    manager
        .with_table(MICRO, |rt| {
            assert!(rt.table.seats[0].is_none());
            let hand = rt.hand.as_ref().unwrap();
            assert_eq!(hand.phase, Phase::Showdown);
            assert_eq!(hand.winners[0].agent_id, bob);
        })
        .unwrap();

    // Cash-out записан; профит Alice за прерванную раздачу — −1.
    assert!(store
        .chip_txs()
        .iter()
        .any(|tx| tx.kind == ChipTxKind::CashOut && tx.amount == Chips(99)));
    let agent = manager.agent(alice).unwrap();
    assert_eq!(agent.lifetime_profit, -1);
}

//
// Лидерборд.
//

#[test]
fn leaderboard_counts_only_current_hand_unrealized() {
    let (manager, _store) = manager_with_store();
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();
    let bob = manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(100), None, false)
        .unwrap();

    manager.tick(Utc::now());

    // Блайнды 1/2 уже в банке: нереализованный результат −1 и −2.
    let rows = manager.leaderboard();
    let profit_of = |id| rows.iter().find(|r| r.agent_id == id).unwrap().profit;
    assert_eq!(profit_of(alice), -1);
    assert_eq!(profit_of(bob), -2);

    // Сортировка по убыванию профита.
    assert!(rows.windows(2).all(|w| w[0].profit >= w[1].profit));
}

//
// Бот-столы: прогресс и сохранение фишек (сценарий из спецификации:
// ≥10 раздач за 10 секунд симулированного времени).
//

#[test]
fn bot_only_table_races_through_hands() {
    let (manager, store) = manager_with_store();
    for _ in 0..3 {
        manager.add_bot(MICRO, BotStrategy::Fish).unwrap();
    }

    let mut now = Utc::now();
    for _ in 0..20 {
        manager.tick(now);
        now += Duration::milliseconds(config::TICK_PERIOD_MS as i64);
    }

    let (hands, stacks, pot) = manager
        .with_table(MICRO, |rt| {
            let pot = rt.hand.as_ref().map(|h| h.pot.0).unwrap_or(0);
            (rt.table.hand_count, common::total_stacks(&rt.table), pot)
        })
        .unwrap();

    assert!(hands >= 10, "за 10 секунд сыграно только {hands} раздач");

    // Сохранение фишек: стартовые закупы + все rebuys ботов.
    let rebuys: u64 = store
        .chip_txs()
        .iter()
        .filter(|tx| tx.kind == ChipTxKind::Rebuy)
        .map(|tx| tx.amount.0)
        .sum();
    let in_flight = if manager
        .with_table(MICRO, |rt| {
            rt.hand
                .as_ref()
                .map(|h| h.phase.is_betting())
                .unwrap_or(false)
        })
        .unwrap()
    {
        pot
    } else {
        0
    };
    assert_eq!(stacks + in_flight, 3 * 200 + rebuys);

    // История и записи в store двигаются вместе с раздачами.
    let archived = manager.with_table(MICRO, |rt| rt.history.len()).unwrap();
    assert!(archived >= 10);
    assert!(store.hand_count() >= 10);
}

//
// Монотонность номеров раздач через рестарт.
//

#[test]
fn hand_numbers_survive_restart() {
    let store = Arc::new(InMemoryHandStore::with_hand_numbers(&[(MICRO, 7)]));
    let dyn_store: Arc<dyn HandStore> = store.clone();

    let manager = GameManager::new(
        config::default_tables(),
        Some(&*dyn_store),
        PersistSink::Direct(dyn_store.clone()),
    );

    let count = manager.with_table(MICRO, |rt| rt.table.hand_count).unwrap();
    assert_eq!(count, 7, "счётчик продолжает с персистентного максимума");

    // Следующая раздача получает номер 8.
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();
    manager
        .sit_agent(MICRO, 1, "Bob".into(), Chips(100), None, false)
        .unwrap();

    let t0 = Utc::now();
    manager.tick(t0);
    let number = manager
        .with_table(MICRO, |rt| rt.hand.as_ref().unwrap().hand_number)
        .unwrap();
    assert_eq!(number, 8);

    // Фолд-аут и завершение после display-паузы — запись в store.
    manager.submit_action(MICRO, alice, ActionKind::Fold).unwrap();
    manager.tick(t0 + Duration::seconds(10));

    let last = store.last_hand().expect("раздача записана");
    assert_eq!(last.hand.hand_number, 8);
    assert!(last.hand.completed_at.is_some());

    // «Рестарт»: новый менеджер от того же store.
    let manager2 = GameManager::new(
        config::default_tables(),
        Some(&*dyn_store),
        PersistSink::Disabled,
    );
    let count2 = manager2.with_table(MICRO, |rt| rt.table.hand_count).unwrap();
    assert_eq!(count2, 8, "монотонно неубывающий счётчик после рестарта");
}

//
// Протокольные ошибки.
//

#[test]
fn action_without_hand_is_rejected() {
    let (manager, _store) = manager_with_store();
    let alice = manager
        .sit_agent(MICRO, 0, "Alice".into(), Chips(100), None, false)
        .unwrap();

    let err = manager
        .submit_action(MICRO, alice, ActionKind::Check)
        .unwrap_err();
    assert!(matches!(err, GameError::NoHandInProgress));
}
