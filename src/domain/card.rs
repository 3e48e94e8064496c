use core::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Масть карты.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

/// Ранг карты. Туз всегда старший; «колесо» A2345 обрабатывает eval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

/// Все ранги по возрастанию, туз старший.
pub const RANKS: [Rank; 13] = [
    Rank::Two,
    Rank::Three,
    Rank::Four,
    Rank::Five,
    Rank::Six,
    Rank::Seven,
    Rank::Eight,
    Rank::Nine,
    Rank::Ten,
    Rank::Jack,
    Rank::Queen,
    Rank::King,
    Rank::Ace,
];

/// Четыре масти в фабричном порядке колоды.
pub const SUITS: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

/// Обычная покерная карта (52-карточная колода).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl Suit {
    /// Односимвольная форма для wire-формата: `h | d | c | s`.
    pub fn as_char(&self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    pub fn from_char(ch: char) -> Result<Self, String> {
        match ch {
            'c' | 'C' => Ok(Suit::Clubs),
            'd' | 'D' => Ok(Suit::Diamonds),
            'h' | 'H' => Ok(Suit::Hearts),
            's' | 'S' => Ok(Suit::Spades),
            _ => Err(format!("Invalid suit: {ch}")),
        }
    }
}

impl Rank {
    /// Односимвольная форма для wire-формата: `2..9 | T | J | Q | K | A`.
    pub fn as_char(&self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => char::from_digit(*r as u32, 10).unwrap(),
        }
    }

    pub fn from_char(ch: char) -> Result<Self, String> {
        match ch {
            '2' => Ok(Rank::Two),
            '3' => Ok(Rank::Three),
            '4' => Ok(Rank::Four),
            '5' => Ok(Rank::Five),
            '6' => Ok(Rank::Six),
            '7' => Ok(Rank::Seven),
            '8' => Ok(Rank::Eight),
            '9' => Ok(Rank::Nine),
            'T' | 't' => Ok(Rank::Ten),
            'J' | 'j' => Ok(Rank::Jack),
            'Q' | 'q' => Ok(Rank::Queen),
            'K' | 'k' => Ok(Rank::King),
            'A' | 'a' => Ok(Rank::Ace),
            _ => Err(format!("Invalid rank: {ch}")),
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err("Card string must have length 2".into());
        }
        let mut chars = s.chars();
        let rank = Rank::from_char(chars.next().unwrap())?;
        let suit = Suit::from_char(chars.next().unwrap())?;
        Ok(Card { rank, suit })
    }
}

// Wire-формат карты: {"rank": "A", "suit": "h"}.
// Ручные serde-имплементации, чтобы и HTTP, и персистентность
// видели один и тот же компактный вид.

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_char().to_string())
    }
}

impl<'de> Deserialize<'de> for Rank {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let ch = s
            .chars()
            .next()
            .ok_or_else(|| de::Error::custom("empty rank"))?;
        if s.len() != 1 {
            return Err(de::Error::custom(format!("invalid rank: {s}")));
        }
        Rank::from_char(ch).map_err(de::Error::custom)
    }
}

impl Serialize for Suit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_char().to_string())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        let ch = s
            .chars()
            .next()
            .ok_or_else(|| de::Error::custom("empty suit"))?;
        if s.len() != 1 {
            return Err(de::Error::custom(format!("invalid suit: {s}")));
        }
        Suit::from_char(ch).map_err(de::Error::custom)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("Card", 2)?;
        st.serialize_field("rank", &self.rank)?;
        st.serialize_field("suit", &self.suit)?;
        st.end()
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CardVisitor;

        impl<'de> Visitor<'de> for CardVisitor {
            type Value = Card;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("card object {rank, suit}")
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Card, A::Error> {
                let mut rank: Option<Rank> = None;
                let mut suit: Option<Suit> = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "rank" => rank = Some(map.next_value()?),
                        "suit" => suit = Some(map.next_value()?),
                        other => return Err(de::Error::unknown_field(other, &["rank", "suit"])),
                    }
                }
                Ok(Card {
                    rank: rank.ok_or_else(|| de::Error::missing_field("rank"))?,
                    suit: suit.ok_or_else(|| de::Error::missing_field("suit"))?,
                })
            }
        }

        deserializer.deserialize_struct("Card", &["rank", "suit"], CardVisitor)
    }
}
