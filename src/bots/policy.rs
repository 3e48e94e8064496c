use crate::bots::strength::{postflop_strength, preflop_strength};
use crate::domain::agent::BotStrategy;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::seat::{Seat, SeatIndex};
use crate::domain::table::Table;
use crate::engine::game_loop::ActiveHand;
use crate::engine::hand_history::AuditKind;
use crate::engine::{ActionKind, RandomSource};

/// Решение бота для текущего хода.
///
/// Функция чистая по состоянию: читает стол и раздачу, бросает кубик
/// через RandomSource и возвращает действие. Легальность до конца не
/// гарантируется — отказ движка обрабатывает вызывающий код.
pub fn decide<R: RandomSource>(
    strategy: BotStrategy,
    table: &Table,
    hand: &ActiveHand,
    seat_no: SeatIndex,
    rng: &mut R,
) -> ActionKind {
    let seat = match table.seats.get(seat_no as usize).and_then(|s| s.as_ref()) {
        Some(seat) => seat,
        None => return ActionKind::Fold,
    };

    let strength = if hand.street() == Street::Preflop {
        preflop_strength(&seat.hole_cards)
    } else {
        postflop_strength(&seat.hole_cards, &hand.board)
    };

    let ctx = DecisionCtx::new(table, hand, seat, seat_no);

    match strategy {
        BotStrategy::Fish => decide_fish(&ctx, strength, rng),
        BotStrategy::Tag => decide_tag(&ctx, strength, rng),
        BotStrategy::Lag => decide_lag(&ctx, strength, rng),
    }
}

/// Снимок всего, что нужно политике для решения.
struct DecisionCtx {
    to_call: Chips,
    pot: Chips,
    stack: Chips,
    big_blind: Chips,
    min_raise: Chips,
    current_bet: Chips,
    seat_bet: Chips,
    /// Сколько раз это место уже повышало на текущей улице.
    own_raises_this_street: u32,
}

impl DecisionCtx {
    fn new(table: &Table, hand: &ActiveHand, seat: &Seat, seat_no: SeatIndex) -> Self {
        let to_call = if hand.betting.current_bet > seat.current_bet {
            hand.betting.current_bet - seat.current_bet
        } else {
            Chips::ZERO
        };

        let street = hand.street();
        let own_raises_this_street = hand
            .actions
            .entries
            .iter()
            .filter(|e| {
                e.street == street
                    && e.seat == seat_no
                    && matches!(e.kind, AuditKind::Bet | AuditKind::Raise | AuditKind::AllIn)
            })
            .count() as u32;

        Self {
            to_call,
            pot: hand.pot,
            stack: seat.stack,
            big_blind: table.config.big_blind,
            min_raise: hand.betting.min_raise,
            current_bet: hand.betting.current_bet,
            seat_bet: seat.current_bet,
            own_raises_this_street,
        }
    }

    fn can_check(&self) -> bool {
        self.to_call.is_zero()
    }

    /// Повышение примерно на две трети банка, не меньше минимального рейза.
    /// Если столько фишек нет — это all-in.
    fn raise_to_two_thirds_pot(&self) -> ActionKind {
        let bump = ((self.pot.0 * 2) / 3).max(self.min_raise.0);
        let target = Chips(self.current_bet.0 + bump);
        let affordable = self.seat_bet + self.stack;
        if target >= affordable {
            ActionKind::AllIn
        } else if self.current_bet.is_zero() {
            ActionKind::Bet(Chips(target.0.max(self.big_blind.0)))
        } else {
            ActionKind::Raise(target)
        }
    }

    fn call_or_check(&self) -> ActionKind {
        if self.can_check() {
            ActionKind::Check
        } else {
            ActionKind::Call
        }
    }
}

/// Fish (loose-passive): почти всегда коллирует, почти никогда
/// не повышает, выкидывает только дно диапазона против крупной ставки.
fn decide_fish<R: RandomSource>(ctx: &DecisionCtx, strength: f64, rng: &mut R) -> ActionKind {
    if ctx.can_check() {
        // Изредка тычет мелкую ставку с сильной рукой.
        if strength > 0.8 && rng.next_unit() < 0.15 {
            return ctx.raise_to_two_thirds_pot();
        }
        return ActionKind::Check;
    }

    let call_in_blinds = ctx.to_call.0 as f64 / ctx.big_blind.0.max(1) as f64;
    if strength < 0.15 && call_in_blinds > 4.0 {
        return ActionKind::Fold;
    }

    if strength > 0.85 && rng.next_unit() < 0.10 {
        return ctx.raise_to_two_thirds_pot();
    }

    ActionKind::Call
}

/// TAG (tight-aggressive): узкий диапазон, но с ним давит.
fn decide_tag<R: RandomSource>(ctx: &DecisionCtx, strength: f64, rng: &mut R) -> ActionKind {
    if strength >= 0.70 {
        // Сильная рука: ставим/повышаем примерно в две трети банка,
        // но без бесконечной войны рейзов.
        if ctx.own_raises_this_street < 2 && rng.next_unit() < 0.8 {
            return ctx.raise_to_two_thirds_pot();
        }
        return ctx.call_or_check();
    }

    if ctx.can_check() {
        return ActionKind::Check;
    }

    // Средняя рука: коллируем только дёшево.
    if strength >= 0.45 && ctx.to_call <= Chips(ctx.big_blind.0 * 3) {
        return ActionKind::Call;
    }

    // Слабое — в пас (префлоп это даёт порядка половины фолдов).
    ActionKind::Fold
}

/// LAG (loose-aggressive): играет почти всё, часто повышает, блефует.
/// Ре-рейзы на улицу ограничены, чтобы два LAG'а не зациклились.
fn decide_lag<R: RandomSource>(ctx: &DecisionCtx, strength: f64, rng: &mut R) -> ActionKind {
    let bluffing = rng.next_unit() < 0.18;

    if (strength >= 0.40 || bluffing) && ctx.own_raises_this_street < 2 {
        if rng.next_unit() < 0.6 {
            return ctx.raise_to_two_thirds_pot();
        }
    }

    if ctx.can_check() {
        return ActionKind::Check;
    }

    // Совсем мусор без блефа против большой ставки — всё же пас.
    let call_in_blinds = ctx.to_call.0 as f64 / ctx.big_blind.0.max(1) as f64;
    if strength < 0.10 && !bluffing && call_in_blinds > 6.0 {
        return ActionKind::Fold;
    }

    ActionKind::Call
}
