use crate::domain::card::{Rank, RANKS};

/// Битовая маска рангов: бит 0 — двойка, бит 12 — туз.
pub type RankMask = u16;

/// Колесо A2345: туз (бит 12) играет снизу вместе с 2345 (биты 0–3).
const WHEEL_MASK: RankMask = (1 << 12) | 0b1111;

/// Окно пяти старших подряд идущих бит: TJQKA.
const BROADWAY_WINDOW: RankMask = 0b1_1111 << 8;

pub fn rank_bit(rank: Rank) -> RankMask {
    1 << ((rank as u8) - 2)
}

/// Ранг по числовому значению 2..14.
pub fn num_to_rank(value: u8) -> Rank {
    RANKS[(value.clamp(2, 14) - 2) as usize]
}

/// Найти стрит в маске рангов: скользим окном из пяти подряд идущих
/// бит от бродвея вниз, колесо проверяем отдельно в самом конце.
/// Возвращается старшая карта стрита (для колеса — пятёрка).
pub fn detect_straight(mask: RankMask) -> Option<Rank> {
    let mut window = BROADWAY_WINDOW;
    for high in (Rank::Six as u8..=Rank::Ace as u8).rev() {
        if mask & window == window {
            return Some(num_to_rank(high));
        }
        window >>= 1;
    }

    if mask & WHEEL_MASK == WHEEL_MASK {
        return Some(Rank::Five);
    }
    None
}
