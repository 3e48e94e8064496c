//! Сайд-поты: формирование слоёв по вкладам и розыгрыш
//! трёхстороннего all-in сценария.

mod common;

use std::collections::HashMap;

use chrono::Utc;

use poker_server::domain::{Chips, Phase, SeatIndex};
use poker_server::engine::side_pots::{compute_side_pots, reconcile_with_pot, SidePot};
use poker_server::engine::{apply_action, start_hand, ActionKind};

use common::{agent_for_seat, table_with_stacks, total_stacks, StackedDeck};

/// Утилита: собрать contributions из пар (seat, amount).
fn make_contributions(pairs: &[(SeatIndex, u64)]) -> HashMap<SeatIndex, Chips> {
    let mut m = HashMap::new();
    for (seat, amount) in pairs {
        m.insert(*seat, Chips(*amount));
    }
    m
}

/// Утилита: (amount, eligible_seats) из SidePot.
fn pot_info(p: &SidePot) -> (u64, Vec<SeatIndex>) {
    (p.amount.0, p.eligible_seats.clone())
}

//
// ============ ЧИСТАЯ МАТЕМАТИКА СЛОЁВ ============
//

/// Два игрока по 100 — один общий пот 200.
#[test]
fn side_pots_two_players_equal() {
    let pots = compute_side_pots(&make_contributions(&[(0, 100), (1, 100)]));

    assert_eq!(pots.len(), 1, "должен быть один общий пот");
    assert_eq!(pot_info(&pots[0]), (200, vec![0, 1]));
}

/// 3 игрока all-in: 100, 200, 300 →
/// pot0 300 {0,1,2}, pot1 200 {1,2}, pot2 100 {2}.
#[test]
fn side_pots_three_layers() {
    let pots = compute_side_pots(&make_contributions(&[(0, 100), (1, 200), (2, 300)]));

    assert_eq!(pots.len(), 3);
    assert_eq!(pot_info(&pots[0]), (300, vec![0, 1, 2]));
    assert_eq!(pot_info(&pots[1]), (200, vec![1, 2]));
    assert_eq!(pot_info(&pots[2]), (100, vec![2]));
}

/// Равные уровни не плодят пустых слоёв: 100,100,300,300 → два пота.
#[test]
fn side_pots_merge_equal_levels() {
    let pots =
        compute_side_pots(&make_contributions(&[(0, 100), (1, 100), (2, 300), (3, 300)]));

    assert_eq!(pots.len(), 2);
    assert_eq!(pot_info(&pots[0]), (400, vec![0, 1, 2, 3]));
    assert_eq!(pot_info(&pots[1]), (400, vec![2, 3]));
}

/// Нулевые вклады не участвуют.
#[test]
fn side_pots_ignore_zero_contributions() {
    let pots = compute_side_pots(&make_contributions(&[(0, 0), (1, 50), (2, 50)]));

    assert_eq!(pots.len(), 1);
    assert_eq!(pot_info(&pots[0]), (100, vec![1, 2]));
}

/// Сумма слоёв всегда равна сумме вкладов (фолды включены).
#[test]
fn side_pots_cover_whole_pot() {
    let contribs = make_contributions(&[(0, 7), (1, 120), (2, 45), (3, 45), (5, 300)]);
    let total: u64 = contribs.values().map(|c| c.0).sum();

    let pots = compute_side_pots(&contribs);
    let sum: u64 = pots.iter().map(|p| p.amount.0).sum();
    assert_eq!(sum, total);
}

/// Защитная сверка докладывает расхождение в последний пот.
#[test]
fn reconcile_tops_up_last_pot() {
    let mut pots = vec![
        SidePot {
            amount: Chips(30),
            eligible_seats: vec![0, 1, 2],
        },
        SidePot {
            amount: Chips(60),
            eligible_seats: vec![1, 2],
        },
    ];
    reconcile_with_pot(&mut pots, Chips(95));
    assert_eq!(pots[1].amount, Chips(65));
}

//
// ============ СЦЕНАРИЙ: ТРЁХСТОРОННИЙ ALL-IN ============
//

/// Спецификация: стеки 10/40/100, все в all-in на префлопе.
/// Main 30 {A,B,C}, side1 60 {B,C}; недозванный остаток C
/// возвращается ему третьим потом.
#[test]
fn three_way_all_in_preflop() {
    let mut table = table_with_stacks(&[(0, 10), (1, 40), (2, 100)], 1, 2);

    // Раздача от кнопки (место 0): A=AsAd, B=KdKh, C=QdQh,
    // борд без флешей и стритов.
    let mut rng = StackedDeck::new("As Kd Qd Ad Kh Qh 2c 7h 9s Jd 3d");
    let now = Utc::now();

    let mut hand = start_hand(&mut table, &mut rng, 1, now).unwrap();

    // Дилер 0, SB 1 (1), BB 2 (2). Все заталкивают стек.
    apply_action(&mut table, &mut hand, 0, ActionKind::AllIn, now).unwrap();
    apply_action(&mut table, &mut hand, 1, ActionKind::AllIn, now).unwrap();
    apply_action(&mut table, &mut hand, 2, ActionKind::AllIn, now).unwrap();

    assert_eq!(hand.phase, Phase::Showdown, "борд раскатан без ожидания");
    assert_eq!(hand.pot, Chips(150));

    let infos: Vec<(u64, Vec<SeatIndex>)> = hand.side_pots.iter().map(pot_info).collect();
    assert_eq!(infos[0], (30, vec![0, 1, 2]), "main pot");
    assert_eq!(infos[1], (60, vec![1, 2]), "side pot 1");
    assert_eq!(infos[2], (60, vec![2]), "несыгранный остаток C");

    // AA забирает main, KK бьёт QQ в side1, C возвращает свои 60.
    let stacks: Vec<u64> = (0..3)
        .map(|i| table.seats[i].as_ref().unwrap().stack.0)
        .collect();
    assert_eq!(stacks, vec![30, 60, 60]);

    // Победитель каждого пота обязан быть в его eligible-наборе.
    for w in &hand.winners {
        match w.agent_id {
            id if id == agent_for_seat(0) => assert_eq!(w.amount, Chips(30)),
            id if id == agent_for_seat(1) => assert_eq!(w.amount, Chips(60)),
            id if id == agent_for_seat(2) => assert_eq!(w.amount, Chips(60)),
            other => panic!("неожиданный победитель {other}"),
        }
    }

    assert_eq!(total_stacks(&table), 150, "фишки сохранились");
}
