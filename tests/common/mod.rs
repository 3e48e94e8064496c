//! Общие помощники интеграционных тестов.
#![allow(dead_code)]

use std::str::FromStr;

use poker_server::domain::{
    AgentKind, Card, Chips, Rank, Seat, SeatIndex, Suit, Table, TableConfig,
};
use poker_server::engine::RandomSource;

/// Разобрать список карт из строки вида "As Kd 7c".
pub fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace()
        .map(|c| Card::from_str(c).expect("валидная карта в тесте"))
        .collect()
}

/// Конфиг тестового стола с широким диапазоном закупа.
pub fn test_config(small_blind: u64, big_blind: u64) -> TableConfig {
    TableConfig {
        id: 1,
        name: "Test".to_string(),
        small_blind: Chips(small_blind),
        big_blind: Chips(big_blind),
        min_buy_in: Chips(big_blind * 10),
        max_buy_in: Chips(1_000_000),
        max_seats: 6,
    }
}

/// Стол с людьми на указанных местах и стеках.
/// agent_id каждого места = (seat + 1) * 10.
pub fn table_with_stacks(stacks: &[(SeatIndex, u64)], sb: u64, bb: u64) -> Table {
    let mut table = Table::new(test_config(sb, bb));
    for &(seat_no, stack) in stacks {
        let agent_id = agent_for_seat(seat_no);
        table.seats[seat_no as usize] = Some(Seat::new(
            agent_id,
            format!("Player {agent_id}"),
            AgentKind::Human,
            Chips(stack),
        ));
    }
    table
}

pub fn agent_for_seat(seat_no: SeatIndex) -> u64 {
    (seat_no as u64 + 1) * 10
}

/// Фабричный индекс карты в неперемешанной колоде
/// (Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A).
fn factory_index(card: &Card) -> usize {
    let suit_idx = match card.suit {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    };
    suit_idx * 13 + (card.rank as usize - 2)
}

/// «Подкрученная» колода: shuffle выкладывает карты так, чтобы курсор
/// колоды выдавал их ровно в заданном порядке (раздача идёт с начала
/// вектора). Оставшиеся карты — в фабричном порядке.
///
/// Работает через перестановку индексов, поэтому остаётся обобщённой
/// по T, как того требует RandomSource.
pub struct StackedDeck {
    top: Vec<Card>,
}

impl StackedDeck {
    /// cards_in_draw_order — карты в порядке их выхода из колоды:
    /// сначала карманные (по кругу от кнопки, два круга), затем борд.
    pub fn new(cards_in_draw_order: &str) -> Self {
        Self {
            top: cards(cards_in_draw_order),
        }
    }
}

impl RandomSource for StackedDeck {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        assert_eq!(slice.len(), 52, "StackedDeck ожидает полную колоду");

        // src_of_dest[i] — фабричный индекс карты, которая должна
        // оказаться в позиции i. Первая выданная карта — позиция 0.
        let mut used = [false; 52];
        let mut src_of_dest = [usize::MAX; 52];
        for (k, card) in self.top.iter().enumerate() {
            let fi = factory_index(card);
            assert!(!used[fi], "карта {card} задана дважды");
            used[fi] = true;
            src_of_dest[k] = fi;
        }
        let mut rest = (0..52).filter(|i| !used[*i]);
        for slot in src_of_dest.iter_mut() {
            if *slot == usize::MAX {
                *slot = rest.next().expect("остаток колоды");
            }
        }

        // Применяем перестановку swap'ами, поддерживая две карты:
        // at[pos] = фабричный индекс в позиции, pos[fi] = позиция.
        let mut at: Vec<usize> = (0..52).collect();
        let mut pos: Vec<usize> = (0..52).collect();
        for dest in 0..52 {
            let want = src_of_dest[dest];
            let cur = pos[want];
            if cur != dest {
                slice.swap(dest, cur);
                let displaced = at[dest];
                at[dest] = want;
                at[cur] = displaced;
                pos[want] = dest;
                pos[displaced] = cur;
            }
        }
    }

    fn next_unit(&mut self) -> f64 {
        0.5
    }
}

/// Сумма всех стеков стола.
pub fn total_stacks(table: &Table) -> u64 {
    table
        .seats
        .iter()
        .flatten()
        .map(|s| s.stack.0)
        .sum()
}

/// Ранг по короткой букве, для ожиданий в тестах.
pub fn rank(ch: char) -> Rank {
    Rank::from_char(ch).expect("валидный ранг")
}
