use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;

/// Состояние раунда ставок на конкретной улице.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Место последнего агрессора (bet / полноценный raise).
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих (по кругу): кто ещё должен сделать действие на этой улице.
    /// Первый элемент — текущий ход.
    pub to_act: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
            to_act,
        }
    }

    /// Чей сейчас ход.
    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Удалить место из очереди to_act, если оно там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Полноценный bet/raise: обновить цель, минимальный рейз
    /// и перезапустить очередь (её формирует game_loop).
    ///
    /// min_raise растёт только если новый рейз крупнее предыдущего.
    pub fn on_raise(
        &mut self,
        seat: SeatIndex,
        new_bet: Chips,
        raise_size: Chips,
        new_to_act: Vec<SeatIndex>,
    ) {
        self.current_bet = new_bet;
        if raise_size > self.min_raise {
            self.min_raise = raise_size;
        }
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
    }

    /// Короткий all-in поверх текущей ставки: цель растёт,
    /// но очередь НЕ перезапускается — уже походившие не получают
    /// права действовать снова.
    pub fn on_short_all_in(&mut self, new_bet: Chips) {
        self.current_bet = new_bet;
    }

    /// Раунд ставок завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
