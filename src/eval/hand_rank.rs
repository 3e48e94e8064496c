use crate::domain::card::Rank;
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandRank {
    /// Собрать HandRank из категории и лексикографических тай-брейкеров
    /// (от старшего к младшему, не больше пяти).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][v0:4][v1:4][v2:4][v3:4][v4:4]
    /// Ранг 2..14 влазит в 4 бита; незначащие позиции — нули.
    pub fn pack(category: HandCategory, values: &[Rank]) -> Self {
        debug_assert!(values.len() <= 5);

        let mut out = (category as u32 & 0x0F) << 20;
        for (i, rank) in values.iter().enumerate() {
            let nibble = (*rank as u32) & 0x0F;
            out |= nibble << (16 - 4 * i as u32);
        }
        HandRank(out)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        match (self.0 >> 20) & 0x0F {
            0 => HandCategory::HighCard,
            1 => HandCategory::OnePair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::ThreeOfAKind,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::FourOfAKind,
            8 => HandCategory::StraightFlush,
            _ => HandCategory::RoyalFlush,
        }
    }
}

/// Человекочитаемое имя категории — идёт в `WinnerEntry::hand_name`
/// и в публичные представления.
pub fn category_name(category: HandCategory) -> &'static str {
    match category {
        HandCategory::HighCard => "High card",
        HandCategory::OnePair => "One pair",
        HandCategory::TwoPair => "Two pair",
        HandCategory::ThreeOfAKind => "Three of a kind",
        HandCategory::Straight => "Straight",
        HandCategory::Flush => "Flush",
        HandCategory::FullHouse => "Full house",
        HandCategory::FourOfAKind => "Four of a kind",
        HandCategory::StraightFlush => "Straight flush",
        HandCategory::RoyalFlush => "Royal flush",
    }
}
