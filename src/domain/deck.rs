use crate::domain::card::{Card, RANKS, SUITS};

/// Колода одной раздачи.
///
/// После тасовки (её делает engine через RNG из infra) карты из колоды
/// не удаляются: раздача лишь продвигает курсор. Так состав колоды
/// остаётся на месте до конца раздачи, а "сколько уже роздано" — это
/// просто позиция курсора.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deck {
    /// Все 52 карты. До тасовки — фабричный порядок SUITS × RANKS.
    pub cards: Vec<Card>,
    next: usize,
}

impl Deck {
    /// Полная колода в фабричном порядке, курсор на первой карте.
    pub fn fresh() -> Self {
        let cards = SUITS
            .iter()
            .flat_map(|&suit| RANKS.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Self { cards, next: 0 }
    }

    /// Выдать очередную карту, продвинув курсор.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }

    /// Сколько карт ещё не роздано.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }
}
