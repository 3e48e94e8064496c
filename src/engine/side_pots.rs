use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Сайд-пот: часть банка, на которую претендуют только некоторые места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    pub eligible_seats: Vec<SeatIndex>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки за всю раздачу.
///
/// Вход: contributions[seat] = суммарный вклад места (все улицы).
/// Выход: поты в порядке «от младших к старшим» уровням вклада.
/// Сумма потов всегда равна сумме вкладов: уровни строятся по всем
/// вкладам, включая сфолдивших; их деньги остаются в тех потах,
/// куда были внесены, а из претендентов их отфильтрует шоудаун.
pub fn compute_side_pots(contributions: &HashMap<SeatIndex, Chips>) -> Vec<SidePot> {
    let mut entries: Vec<(SeatIndex, Chips)> = contributions
        .iter()
        .filter(|(_, chips)| !chips.is_zero())
        .map(|(seat, chips)| (*seat, *chips))
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    // Сортируем по размеру вклада, при равенстве — по месту,
    // чтобы результат был детерминирован.
    entries.sort_by_key(|(seat, c)| (c.0, *seat));

    let mut pots = Vec::new();
    let mut prev_level = Chips::ZERO;

    for &(_, level) in entries.iter() {
        if level == prev_level {
            continue;
        }
        let level_diff = level - prev_level;

        // Претенденты уровня: все, кто внёс хотя бы столько.
        let mut eligible: Vec<SeatIndex> = entries
            .iter()
            .filter(|(_, contrib)| contrib.0 >= level.0)
            .map(|(seat, _)| *seat)
            .collect();
        eligible.sort_unstable();

        if !eligible.is_empty() {
            pots.push(SidePot {
                amount: Chips(level_diff.0 * eligible.len() as u64),
                eligible_seats: eligible,
            });
        }

        prev_level = level;
    }

    pots
}

/// Защитная сверка: если сумма потов разошлась с общим банком
/// (не должна при нашей конструкции), остаток докладываем в последний пот.
pub fn reconcile_with_pot(pots: &mut [SidePot], total_pot: Chips) {
    let sum: u64 = pots.iter().map(|p| p.amount.0).sum();
    if sum < total_pot.0 {
        if let Some(last) = pots.last_mut() {
            last.amount += Chips(total_pot.0 - sum);
        }
    }
}
