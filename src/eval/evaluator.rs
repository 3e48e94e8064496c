use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::HandRank;

use super::hand_rank::{category_name, HandCategory};
use super::lookup_tables::{detect_straight, num_to_rank, rank_bit, RankMask};

/// Результат оценки: категория, тай-брейкеры, лучшая пятёрка карт.
///
/// Полный порядок задаёт упакованный `rank`; `values` — значащие
/// лексикографические тай-брейкеры (например, для двух пар:
/// [старшая пара, младшая пара, кикер]).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluatedHand {
    pub rank: HandRank,
    pub values: Vec<Rank>,
    pub best_five: Vec<Card>,
    pub name: String,
}

impl EvaluatedHand {
    pub fn category(&self) -> HandCategory {
        self.rank.category()
    }

    /// Сравнение силы: >0 — self сильнее, 0 — точный сплит.
    pub fn cmp_strength(&self, other: &EvaluatedHand) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Лучшая 5-карточная рука из карманных + борда.
///
/// Ожидается `hole.len() == 2` и от 3 до 5 карт борда,
/// но функция корректна для любых 5–7 карт на входе.
pub fn evaluate_hole_and_board(hole: &[Card], board: &[Card]) -> EvaluatedHand {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_best_hand(&all_cards)
}

/// Перебираем все C(n,5) комбинаций из 5–7 карт и выбираем лучшую.
/// Результат не зависит от порядка входных карт.
pub fn evaluate_best_hand(cards: &[Card]) -> EvaluatedHand {
    let n = cards.len();
    assert!(
        (5..=7).contains(&n),
        "evaluate_best_hand ожидает от 5 до 7 карт"
    );

    let mut best: Option<EvaluatedHand> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let candidate = evaluate_5card_hand(&five);
                        let better = best
                            .as_ref()
                            .map_or(true, |cur| candidate.rank > cur.rank);
                        if better {
                            best = Some(candidate);
                        }
                    }
                }
            }
        }
    }

    best.expect("должна быть хотя бы одна 5-карточная комбинация")
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: &[Card; 5]) -> EvaluatedHand {
    let mut suit_counts = [0u8; 4]; // clubs, diamonds, hearts, spades
    let mut rank_counts = [0u8; 15]; // индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        let suit_idx = match card.suit {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        };
        suit_counts[suit_idx] += 1;
        rank_counts[card.rank as usize] += 1;
        rank_mask |= rank_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // Список (rank, count): сначала по количеству, затем по рангу (убыв.).
    let mut rc_list: Vec<(Rank, u8)> = Vec::with_capacity(5);
    for r_val in (2usize..=14).rev() {
        if rank_counts[r_val] > 0 {
            rc_list.push((num_to_rank(r_val as u8), rank_counts[r_val]));
        }
    }
    rc_list.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    // pattern: [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1], [1,1,1,1,1]
    let pattern: Vec<u8> = rc_list.iter().map(|rc| rc.1).collect();

    let (category, values) = if let (true, Some(high)) = (is_flush, straight_high) {
        if high == Rank::Ace {
            (HandCategory::RoyalFlush, vec![Rank::Ace])
        } else {
            (HandCategory::StraightFlush, vec![high])
        }
    } else if pattern == [4, 1] {
        (HandCategory::FourOfAKind, vec![rc_list[0].0, rc_list[1].0])
    } else if pattern == [3, 2] {
        (HandCategory::FullHouse, vec![rc_list[0].0, rc_list[1].0])
    } else if is_flush {
        let mut desc: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
        desc.sort_by(|a, b| b.cmp(a));
        (HandCategory::Flush, desc)
    } else if let Some(high) = straight_high {
        (HandCategory::Straight, vec![high])
    } else if pattern == [3, 1, 1] {
        (
            HandCategory::ThreeOfAKind,
            vec![rc_list[0].0, rc_list[1].0, rc_list[2].0],
        )
    } else if pattern == [2, 2, 1] {
        (
            HandCategory::TwoPair,
            vec![rc_list[0].0, rc_list[1].0, rc_list[2].0],
        )
    } else if pattern == [2, 1, 1, 1] {
        (
            HandCategory::OnePair,
            vec![rc_list[0].0, rc_list[1].0, rc_list[2].0, rc_list[3].0],
        )
    } else {
        let mut desc: Vec<Rank> = rc_list.iter().map(|rc| rc.0).collect();
        desc.sort_by(|a, b| b.cmp(a));
        (HandCategory::HighCard, desc)
    };

    let rank = HandRank::pack(category, &values);

    // Лучшая пятёрка — сами карты комбинации, от старшей к младшей
    // (для wheel туз остаётся в конце).
    let mut best_five = cards.to_vec();
    best_five.sort_by(|a, b| b.rank.cmp(&a.rank));
    if matches!(
        category,
        HandCategory::Straight | HandCategory::StraightFlush
    ) && values[0] == Rank::Five
    {
        // A2345: вынимаем туза из головы в хвост.
        let ace = best_five.remove(0);
        best_five.push(ace);
    }

    EvaluatedHand {
        rank,
        values,
        best_five,
        name: category_name(category).to_string(),
    }
}
