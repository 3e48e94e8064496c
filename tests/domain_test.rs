//! Тесты доменной модели: карты, колода, фишки, стол.

mod common;

use std::collections::HashSet;
use std::str::FromStr;

use poker_server::domain::{
    AgentKind, Card, Chips, Deck, Rank, Seat, SeatStatus, Suit,
};

use common::{table_with_stacks, test_config};

//
// card.rs
//

#[test]
fn card_display_and_parse_roundtrip() {
    for s in ["Ah", "Td", "7c", "2s", "Kh", "Qd", "Jc", "9s"] {
        let card = Card::from_str(s).unwrap();
        assert_eq!(card.to_string(), s);
    }
}

#[test]
fn card_parse_rejects_garbage() {
    assert!(Card::from_str("").is_err());
    assert!(Card::from_str("A").is_err());
    assert!(Card::from_str("1h").is_err());
    assert!(Card::from_str("Ax").is_err());
    assert!(Card::from_str("Ahh").is_err());
}

#[test]
fn card_wire_format_is_rank_suit_object() {
    // Wire-формат: {"rank": "A", "suit": "h"}.
    let card = Card::new(Rank::Ace, Suit::Hearts);
    let json = serde_json::to_string(&card).unwrap();
    assert_eq!(json, r#"{"rank":"A","suit":"h"}"#);

    let back: Card = serde_json::from_str(&json).unwrap();
    assert_eq!(back, card);

    let ten = Card::new(Rank::Ten, Suit::Spades);
    assert_eq!(
        serde_json::to_string(&ten).unwrap(),
        r#"{"rank":"T","suit":"s"}"#
    );
}

#[test]
fn rank_ordering_is_ace_high() {
    assert!(Rank::Ace > Rank::King);
    assert!(Rank::King > Rank::Ten);
    assert!(Rank::Three > Rank::Two);
}

//
// deck.rs
//

#[test]
fn fresh_deck_has_52_unique_cards() {
    let deck = Deck::fresh();
    assert_eq!(deck.remaining(), 52);

    let unique: HashSet<String> = deck.cards.iter().map(|c| c.to_string()).collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn deck_draw_advances_cursor_without_removing_cards() {
    let mut deck = Deck::fresh();
    let first = deck.draw().expect("в свежей колоде 52 карты");

    // Карты остаются на месте, двигается только курсор.
    assert_eq!(first, deck.cards[0]);
    assert_eq!(deck.cards.len(), 52);
    assert_eq!(deck.remaining(), 51);

    for _ in 0..51 {
        assert!(deck.draw().is_some());
    }
    assert_eq!(deck.remaining(), 0);
    assert!(deck.draw().is_none(), "колода исчерпана");
}

//
// chips.rs
//

#[test]
fn chips_arithmetic_saturates() {
    let a = Chips(10);
    let b = Chips(25);

    assert_eq!(a + b, Chips(35));
    assert_eq!(a - b, Chips::ZERO, "вычитание не уходит в минус");
    assert_eq!(b.saturating_sub(a), Chips(15));
    assert_eq!(a.min(b), a);
    assert!(Chips::ZERO.is_zero());
}

//
// seat.rs / table.rs
//

#[test]
fn seat_flags_and_dealability() {
    let mut seat = Seat::new(7, "X".into(), AgentKind::Human, Chips(100));
    assert_eq!(seat.status, SeatStatus::Waiting);
    assert!(seat.can_be_dealt_in());
    assert!(!seat.is_in_hand());

    seat.is_sitting_out = true;
    assert!(!seat.can_be_dealt_in());

    seat.is_sitting_out = false;
    seat.stack = Chips::ZERO;
    assert!(!seat.can_be_dealt_in(), "нулевой стек не входит в раздачу");

    seat.stack = Chips(1);
    seat.status = SeatStatus::AllIn;
    assert!(seat.is_in_hand());
}

#[test]
fn table_seat_lookup_helpers() {
    let table = table_with_stacks(&[(0, 100), (2, 100)], 1, 2);

    assert_eq!(table.seated_count(), 2);
    assert_eq!(table.dealable_count(), 2);
    assert_eq!(table.first_empty_seat(), Some(1));
    assert!(table.is_seat_empty(1));
    assert!(!table.is_seat_empty(2));
    assert_eq!(table.seat_of_agent(10), Some(0));
    assert_eq!(table.seat_of_agent(30), Some(2));
    assert_eq!(table.seat_of_agent(999), None);
}

#[test]
fn table_reset_between_hands_clears_hand_state() {
    let mut table = table_with_stacks(&[(0, 100), (1, 100)], 1, 2);
    {
        let seat = table.seats[0].as_mut().unwrap();
        seat.status = SeatStatus::Folded;
        seat.current_bet = Chips(5);
        seat.hole_cards = common::cards("As Kd");
    }

    table.reset_statuses_between_hands();

    let seat = table.seats[0].as_ref().unwrap();
    assert_eq!(seat.status, SeatStatus::Waiting);
    assert_eq!(seat.current_bet, Chips::ZERO);
    assert!(seat.hole_cards.is_empty());
}

#[test]
fn test_config_buyin_range_sane() {
    let cfg = test_config(5, 10);
    assert!(cfg.min_buy_in < cfg.max_buy_in);
    assert_eq!(cfg.big_blind, Chips(10));
}
