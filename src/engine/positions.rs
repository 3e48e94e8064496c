use crate::domain::{SeatIndex, Table};

/// Следующее по кругу место, которое занято и может войти в раздачу
/// (не sit out, со стеком). include_start включает само start.
pub fn next_active_seat(table: &Table, start: SeatIndex, include_start: bool) -> Option<SeatIndex> {
    let max = table.max_seats() as usize;
    if max == 0 {
        return None;
    }

    let mut idx = start as usize % max;
    if !include_start {
        idx = (idx + 1) % max;
    }

    for _ in 0..max {
        if let Some(Some(seat)) = table.seats.get(idx) {
            if seat.can_be_dealt_in() {
                return Some(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }

    None
}

/// Все места, входящие в раздачу, по кругу начиная со start.
pub fn collect_active_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.max_seats() as usize;
    let mut seats = Vec::new();
    if max == 0 {
        return seats;
    }

    let mut idx = start as usize % max;
    for _ in 0..max {
        if let Some(Some(seat)) = table.seats.get(idx) {
            if seat.can_be_dealt_in() {
                seats.push(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }

    seats
}

/// Позиция кнопки для новой раздачи:
/// - первая раздача — первое активное место;
/// - дальше — следующее активное по кругу от прошлой кнопки.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    match table.dealer_button {
        Some(button) => next_active_seat(table, button, false),
        None => next_active_seat(table, 0, true),
    }
}
