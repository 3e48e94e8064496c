use crate::domain::card::{Card, Rank};
use crate::eval::{evaluate_hole_and_board, HandCategory};

/// Префлоп-сила двух карманных карт, скаляр в [0, 1].
///
/// Грубая эвристика: пары и старшие ранги тянут вверх,
/// одномастность и связность добавляют, разрыв отнимает.
/// Точные формулы не контракт — важен только порядок величин.
pub fn preflop_strength(hole: &[Card]) -> f64 {
    if hole.len() != 2 {
        return 0.0;
    }

    let (hi, lo) = if hole[0].rank >= hole[1].rank {
        (hole[0], hole[1])
    } else {
        (hole[1], hole[0])
    };

    let hi_v = hi.rank as u8 as f64;
    let lo_v = lo.rank as u8 as f64;

    // База: старшинство карт (AA ≈ 1.0 до скидок, 72o у дна).
    let mut score = (hi_v + lo_v - 4.0) / 24.0 * 0.55;

    if hi.rank == lo.rank {
        // Пара: от ~0.5 (22) до 1.0 (AA).
        score = 0.5 + (hi_v - 2.0) / 12.0 * 0.5;
        return score.clamp(0.0, 1.0);
    }

    if hi.suit == lo.suit {
        score += 0.08;
    }

    let gap = hi_v - lo_v;
    if gap == 1.0 {
        // Коннекторы.
        score += 0.07;
    } else if gap == 2.0 {
        score += 0.03;
    } else if gap > 4.0 {
        score -= 0.05 * (gap - 4.0) / 8.0;
    }

    // Туз или король сверху заметно помогают.
    if hi.rank == Rank::Ace {
        score += 0.10;
    } else if hi.rank == Rank::King {
        score += 0.05;
    }

    score.clamp(0.0, 1.0)
}

/// Постфлоп-сила: готовая комбинация + дро.
///
/// Дешёвая эвристика поверх eval: категория готовой руки задаёт базу,
/// флеш- и стрит-дро добавляют потенциал.
pub fn postflop_strength(hole: &[Card], board: &[Card]) -> f64 {
    if hole.len() != 2 || board.len() < 3 {
        return 0.0;
    }

    let made = evaluate_hole_and_board(hole, board);

    let mut score: f64 = match made.category() {
        HandCategory::HighCard => 0.10,
        HandCategory::OnePair => 0.35,
        HandCategory::TwoPair => 0.60,
        HandCategory::ThreeOfAKind => 0.72,
        HandCategory::Straight => 0.82,
        HandCategory::Flush => 0.88,
        HandCategory::FullHouse => 0.94,
        HandCategory::FourOfAKind => 0.98,
        HandCategory::StraightFlush | HandCategory::RoyalFlush => 1.0,
    };

    // Пара от старшей карманной карты чуть сильнее «пары с борда».
    if made.category() == HandCategory::OnePair {
        let pair_rank = made.values.first().copied();
        if pair_rank == Some(hole[0].rank.max(hole[1].rank)) {
            score += 0.08;
        }
    }

    if board.len() < 5 {
        let all: Vec<Card> = hole.iter().chain(board.iter()).copied().collect();

        // Флеш-дро: четыре карты одной масти.
        let mut suit_counts = [0u8; 4];
        for c in &all {
            suit_counts[c.suit as usize % 4] += 1;
        }
        if suit_counts.iter().any(|&n| n == 4) {
            score += 0.12;
        }

        // Открытое стрит-дро: четыре подряд ранга.
        let mut mask: u16 = 0;
        for c in &all {
            mask |= 1 << ((c.rank as u8) - 2);
        }
        let mut run = 0u8;
        let mut best_run = 0u8;
        for bit in 0..13 {
            if mask & (1 << bit) != 0 {
                run += 1;
                best_run = best_run.max(run);
            } else {
                run = 0;
            }
        }
        if best_run == 4 {
            score += 0.10;
        }
    }

    score.clamp(0.0, 1.0)
}
