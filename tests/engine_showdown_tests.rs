//! Шоудаун: вскрытие, дележ банка, нечётная фишка, имена комбинаций.

mod common;

use chrono::Utc;

use poker_server::domain::{Chips, Phase};
use poker_server::engine::{apply_action, start_hand, ActionKind, HandStatus};

use common::{agent_for_seat, table_with_stacks, total_stacks, StackedDeck};

/// Сценарий спецификации: колесо A2345 бьёт пару королей.
#[test]
fn ace_low_straight_beats_kings() {
    let mut table = table_with_stacks(&[(0, 100), (1, 100)], 1, 2);

    // Хедз-ап, дилер 0. A: As 2c, B: Kd Kh; борд 5c 4h 3s 2d 9h.
    let mut rng = StackedDeck::new("As Kd 2c Kh 5c 4h 3s 2d 9h");
    let now = Utc::now();

    let mut hand = start_hand(&mut table, &mut rng, 1, now).unwrap();

    // Все улицы прочекиваются (SB доплачивает на префлопе).
    apply_action(&mut table, &mut hand, 0, ActionKind::Call, now).unwrap();
    apply_action(&mut table, &mut hand, 1, ActionKind::Check, now).unwrap();
    for _ in 0..3 {
        // Постфлоп хедз-ап: BB первым, дилер закрывает.
        apply_action(&mut table, &mut hand, 1, ActionKind::Check, now).unwrap();
        apply_action(&mut table, &mut hand, 0, ActionKind::Check, now).unwrap();
    }

    assert_eq!(hand.phase, Phase::Showdown);

    // A выигрывает стритом до пятёрки.
    assert_eq!(hand.winners.len(), 1);
    let winner = &hand.winners[0];
    assert_eq!(winner.agent_id, agent_for_seat(0));
    assert_eq!(winner.amount, Chips(4));
    assert_eq!(winner.hand_name, "Straight");

    assert_eq!(table.seats[0].as_ref().unwrap().stack, Chips(102));
    assert_eq!(table.seats[1].as_ref().unwrap().stack, Chips(98));
}

/// Сценарий спецификации: оба играют борд (стрит-флеш) — сплит,
/// нечётная фишка уходит первому по кругу слева от кнопки.
#[test]
fn split_pot_odd_chip_goes_left_of_dealer() {
    let mut table = table_with_stacks(&[(0, 100), (1, 100), (2, 100)], 1, 2);

    // Дилер 0, SB 1, BB 2. Карты не улучшают борд 3c4c5c6c7c.
    let mut rng = StackedDeck::new("Ad Ah Ks Kh 9d 9h 3c 4c 5c 6c 7c");
    let now = Utc::now();

    let mut hand = start_hand(&mut table, &mut rng, 1, now).unwrap();

    // Префлоп: дилер коллирует, SB выкидывает (его 1 остаётся в банке),
    // BB чекает. Банк = 5 — нечётный.
    apply_action(&mut table, &mut hand, 0, ActionKind::Call, now).unwrap();
    apply_action(&mut table, &mut hand, 1, ActionKind::Fold, now).unwrap();
    apply_action(&mut table, &mut hand, 2, ActionKind::Check, now).unwrap();

    // Все улицы — чек-чек (постфлоп первым ходит место 2).
    for _ in 0..3 {
        apply_action(&mut table, &mut hand, 2, ActionKind::Check, now).unwrap();
        apply_action(&mut table, &mut hand, 0, ActionKind::Check, now).unwrap();
    }

    assert_eq!(hand.phase, Phase::Showdown);
    assert_eq!(hand.pot, Chips(5));

    // Сплит 5 → 2 + 2, нечётная фишка — месту 2 (оно раньше по кругу
    // слева от кнопки, чем само место 0).
    assert_eq!(table.seats[2].as_ref().unwrap().stack, Chips(101));
    assert_eq!(table.seats[0].as_ref().unwrap().stack, Chips(100));
    assert_eq!(table.seats[1].as_ref().unwrap().stack, Chips(99));

    // Каждая выплата записана со стрит-флешем; по суммам:
    // место 2 собрало 3, место 0 — 2 (выплаты идут по слоям банка).
    assert!(!hand.winners.is_empty());
    for w in &hand.winners {
        assert_eq!(w.hand_name, "Straight flush");
    }
    let paid_to = |agent_id| -> u64 {
        hand.winners
            .iter()
            .filter(|w| w.agent_id == agent_id)
            .map(|w| w.amount.0)
            .sum()
    };
    assert_eq!(paid_to(agent_for_seat(2)), 3);
    assert_eq!(paid_to(agent_for_seat(0)), 2);

    assert_eq!(total_stacks(&table), 300);
}

/// Сумма сайд-потов равна банку перед выплатой, выплачено всё.
#[test]
fn payout_equals_pot() {
    let mut table = table_with_stacks(&[(0, 60), (1, 80), (2, 100)], 1, 2);
    let mut rng = StackedDeck::new("As Kd Qd Ad Kh Qh 2c 7h 9s Jd 3d");
    let now = Utc::now();

    let mut hand = start_hand(&mut table, &mut rng, 1, now).unwrap();

    apply_action(&mut table, &mut hand, 0, ActionKind::AllIn, now).unwrap();
    apply_action(&mut table, &mut hand, 1, ActionKind::AllIn, now).unwrap();
    let status = apply_action(&mut table, &mut hand, 2, ActionKind::AllIn, now).unwrap();
    assert_eq!(status, HandStatus::ShowdownReached);

    let pots_sum: u64 = hand.side_pots.iter().map(|p| p.amount.0).sum();
    assert_eq!(pots_sum, hand.pot.0, "слои покрывают банк целиком");

    let paid: u64 = hand.winners.iter().map(|w| w.amount.0).sum();
    assert_eq!(paid, hand.pot.0, "выплачен весь банк");

    assert_eq!(total_stacks(&table), 240);
}

/// Шоудаун ровно с одним вскрытием не положен победителю фолд-аута:
/// банк уходит сразу, комбинация не называется.
#[test]
fn fold_out_has_no_showdown_hand_name() {
    let mut table = table_with_stacks(&[(0, 100), (1, 100)], 1, 2);
    let mut rng = StackedDeck::new("As Kd 2c Kh 5c 4h 3s 2d 9h");
    let now = Utc::now();

    let mut hand = start_hand(&mut table, &mut rng, 1, now).unwrap();
    apply_action(&mut table, &mut hand, 0, ActionKind::Fold, now).unwrap();

    assert_eq!(hand.phase, Phase::Showdown);
    assert_eq!(hand.winners[0].hand_name, "Last player standing");
    assert!(hand.side_pots.is_empty(), "сайд-поты не считались");
}
