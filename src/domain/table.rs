use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::seat::{Seat, SeatIndex, SeatStatus};
use crate::domain::TableId;

/// Конфиг стола: блайнды, рамки закупа, число мест.
/// Набор столов фиксирован на старте процесса и не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub id: TableId,
    pub name: String,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    /// Максимальное количество мест за столом (обычно 2–9).
    pub max_seats: u8,
}

/// Основное состояние стола: конфиг + места + кнопка дилера.
///
/// Текущая раздача живёт рядом, в рантайме стола у GameManager:
/// стол не тащит в себе приватную колоду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None — место пустое.
    pub seats: Vec<Option<Seat>>,

    /// Индекс дилерской кнопки или None, если раздач ещё не было.
    pub dealer_button: Option<SeatIndex>,

    /// Сколько раздач стол отыграл (монотонно, переживает рестарт
    /// через GetMaxHandNumbers).
    pub hand_count: u64,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(config: TableConfig) -> Self {
        let seats = vec![None; config.max_seats as usize];
        Self {
            config,
            seats,
            dealer_button: None,
            hand_count: 0,
        }
    }

    pub fn id(&self) -> TableId {
        self.config.id
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seats
            .get(index as usize)
            .map(|s| s.is_none())
            .unwrap_or(true)
    }

    /// Первое пустое место (для AddBot).
    pub fn first_empty_seat(&self) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|i| i as SeatIndex)
    }

    /// Место агента по его id.
    pub fn seat_of_agent(&self, agent_id: crate::domain::AgentId) -> Option<SeatIndex> {
        self.seats.iter().position(|s| {
            s.as_ref()
                .map(|seat| seat.agent_id == agent_id)
                .unwrap_or(false)
        })
        .map(|i| i as SeatIndex)
    }

    /// Сколько мест могут войти в следующую раздачу
    /// (заняты, не sit out, со стеком).
    pub fn dealable_count(&self) -> usize {
        self.seats
            .iter()
            .filter_map(|s| s.as_ref())
            .filter(|s| s.can_be_dealt_in())
            .count()
    }

    /// Сумма всех стеков. Вместе с текущим банком раздачи
    /// инвариантна относительно любого действия.
    pub fn total_stacks(&self) -> Chips {
        let mut total = Chips::ZERO;
        for seat in self.seats.iter().flatten() {
            total += seat.stack;
        }
        total
    }

    /// Сбросить раздаточные статусы между раздачами.
    pub fn reset_statuses_between_hands(&mut self) {
        for seat in self.seats.iter_mut().flatten() {
            seat.status = SeatStatus::Waiting;
            seat.current_bet = Chips::ZERO;
            seat.hole_cards.clear();
        }
    }
}
