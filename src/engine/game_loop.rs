use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{Phase, Street, WinnerEntry};
use crate::domain::seat::{SeatIndex, SeatStatus};
use crate::domain::table::Table;
use crate::eval::{evaluate_hole_and_board, EvaluatedHand};
use crate::engine::actions::ActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{ActionLog, AuditKind};
use crate::engine::positions::{collect_active_from, next_dealer};
use crate::engine::side_pots::{compute_side_pots, reconcile_with_pot, SidePot};
use crate::engine::validation::{diff_to_call, validate_action};
use crate::engine::RandomSource;

/// Статус раздачи после применения действия.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Торговля продолжается.
    Ongoing,
    /// Фишки разыграны, раздача стоит в Showdown до display-паузы.
    ShowdownReached,
}

/// Приватная часть раздачи: колода и стеки на старте.
/// Никогда не попадает в публичные представления.
pub struct HandSecret {
    pub deck: Deck,
    /// Стек каждого участника на момент старта раздачи (до блайндов).
    /// Нужен для unrealized P/L лидерборда и проверок сохранения фишек.
    pub starting_stacks: HashMap<SeatIndex, Chips>,
}

/// Машина состояний одной раздачи.
///
/// Владеет стол (через рантайм GameManager); запись в ring-историю
/// делается глубоким снапшотом `HandArchive` без приватной части.
pub struct ActiveHand {
    pub id: Uuid,
    /// Монотонный номер раздачи в рамках стола.
    pub hand_number: u64,
    pub phase: Phase,
    /// Общие карты борда (0–5).
    pub board: Vec<Card>,
    /// Общий банк (все раунды).
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    /// Состояние раунда ставок текущей улицы.
    pub betting: BettingState,
    /// Суммарный вклад каждого места за все улицы (для сайд-потов).
    pub contributions: HashMap<SeatIndex, Chips>,
    /// Журнал действий (append-only).
    pub actions: ActionLog,
    pub dealer_seat: SeatIndex,
    pub small_blind_seat: SeatIndex,
    pub big_blind_seat: SeatIndex,
    /// Выплаты по итогам (заполняется на шоудауне / при фолд-ауте).
    pub winners: Vec<WinnerEntry>,
    pub started_at: DateTime<Utc>,
    /// Базовая точка для таймаутов хода и display-паузы.
    pub last_action_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub(crate) secret: HandSecret,
}

impl ActiveHand {
    /// Чей сейчас ход. Определено только в торговых фазах.
    pub fn current_turn_seat(&self) -> Option<SeatIndex> {
        if self.phase.is_betting() {
            self.betting.current_actor()
        } else {
            None
        }
    }

    pub fn street(&self) -> Street {
        self.betting.street
    }

    pub fn starting_stack(&self, seat: SeatIndex) -> Option<Chips> {
        self.secret.starting_stacks.get(&seat).copied()
    }

    pub fn starting_stacks(&self) -> &HashMap<SeatIndex, Chips> {
        &self.secret.starting_stacks
    }

    /// Глубокий снапшот завершённой раздачи для ring-истории и персистентности.
    pub fn archive(&self) -> HandArchive {
        HandArchive {
            id: self.id,
            hand_number: self.hand_number,
            board: self.board.clone(),
            pot: self.pot,
            side_pots: self.side_pots.clone(),
            actions: self.actions.clone(),
            winners: self.winners.clone(),
            dealer_seat: self.dealer_seat,
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

/// Архивная запись раздачи (без колоды и стартовых стеков).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandArchive {
    pub id: Uuid,
    pub hand_number: u64,
    pub board: Vec<Card>,
    pub pot: Chips,
    pub side_pots: Vec<SidePot>,
    pub actions: ActionLog,
    pub winners: Vec<WinnerEntry>,
    pub dealer_seat: SeatIndex,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Старт новой раздачи:
/// - выбирает дилера и блайнды (хедз-ап: дилер = SB);
/// - сдаёт карманные карты из свежеперемешанной колоды;
/// - постит блайнды (короткий стек — all-in) и строит очередь префлопа.
///
/// Если торговаться некому (все в all-in с блайндов), борд раскатывается
/// сразу и раздача возвращается уже в фазе Showdown.
pub fn start_hand<R: RandomSource>(
    table: &mut Table,
    rng: &mut R,
    hand_number: u64,
    now: DateTime<Utc>,
) -> Result<ActiveHand, EngineError> {
    if table.dealable_count() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    // Готовим места: все, кто может войти в раздачу, становятся Active.
    for seat in table.seats.iter_mut().flatten() {
        seat.current_bet = Chips::ZERO;
        seat.hole_cards.clear();
        if seat.can_be_dealt_in() {
            seat.status = SeatStatus::Active;
        }
    }

    let dealer_seat = next_dealer(table).ok_or(EngineError::NotEnoughPlayers)?;
    table.dealer_button = Some(dealer_seat);

    let order = collect_active_from(table, dealer_seat);
    if order.len() < 2 {
        return Err(EngineError::NotEnoughPlayers);
    }

    // Хедз-ап: дилер — малый блайнд. Иначе SB/BB — следующие за кнопкой.
    let (small_blind_seat, big_blind_seat) = if order.len() == 2 {
        (order[0], order[1])
    } else {
        (order[1], order[2])
    };

    // Стеки на старте — до блайндов.
    let mut starting_stacks = HashMap::new();
    for &seat_no in &order {
        if let Some(seat) = table.seats[seat_no as usize].as_ref() {
            starting_stacks.insert(seat_no, seat.stack);
        }
    }

    let mut deck = Deck::fresh();
    rng.shuffle(&mut deck.cards);

    let mut hand = ActiveHand {
        id: Uuid::new_v4(),
        hand_number,
        phase: Phase::Preflop,
        board: Vec::new(),
        pot: Chips::ZERO,
        side_pots: Vec::new(),
        betting: BettingState::new(
            Street::Preflop,
            table.config.big_blind,
            table.config.big_blind,
            Vec::new(),
        ),
        contributions: HashMap::new(),
        actions: ActionLog::new(),
        dealer_seat,
        small_blind_seat,
        big_blind_seat,
        winners: Vec::new(),
        started_at: now,
        last_action_at: now,
        completed_at: None,
        secret: HandSecret {
            deck,
            starting_stacks,
        },
    };

    // Две карманные карты каждому, по кругу от кнопки.
    for _round in 0..2 {
        for &seat_no in &order {
            let card = hand
                .secret
                .deck
                .draw()
                .ok_or(EngineError::Internal("колода исчерпана при раздаче"))?;
            if let Some(seat) = table.seats[seat_no as usize].as_mut() {
                seat.hole_cards.push(card);
            }
        }
    }

    // Блайнды; недостаточный стек уходит в all-in, а номинал
    // текущей ставки остаётся равным большому блайнду.
    post_blind(
        table,
        &mut hand,
        small_blind_seat,
        table.config.small_blind,
        AuditKind::SmallBlind,
        now,
    );
    post_blind(
        table,
        &mut hand,
        big_blind_seat,
        table.config.big_blind,
        AuditKind::BigBlind,
        now,
    );

    // Очередь префлопа: по кругу от места за BB, только способные ходить.
    let bb_pos = order
        .iter()
        .position(|&s| s == big_blind_seat)
        .ok_or(EngineError::Internal("BB выпал из порядка раздачи"))?;
    let mut to_act = Vec::new();
    for i in 1..=order.len() {
        let seat_no = order[(bb_pos + i) % order.len()];
        if let Some(seat) = table.seats[seat_no as usize].as_ref() {
            if matches!(seat.status, SeatStatus::Active) {
                to_act.push(seat_no);
            }
        }
    }
    hand.betting.to_act = to_act;

    // Если решений не осталось (все в all-in с блайндов) — раскатываем борд.
    if preflop_nobody_to_act(table, &hand) {
        advance_round(table, &mut hand, now)?;
    }

    Ok(hand)
}

/// Постинг одного блайнда, с ограничением по стеку.
fn post_blind(
    table: &mut Table,
    hand: &mut ActiveHand,
    seat_no: SeatIndex,
    amount: Chips,
    kind: AuditKind,
    now: DateTime<Utc>,
) {
    if let Some(seat) = table.seats[seat_no as usize].as_mut() {
        let paid = amount.min(seat.stack);
        seat.stack -= paid;
        seat.current_bet += paid;
        if seat.stack.is_zero() {
            seat.status = SeatStatus::AllIn;
        }
        hand.pot += paid;
        *hand.contributions.entry(seat_no).or_insert(Chips::ZERO) += paid;
        hand.actions
            .push(Street::Preflop, seat_no, seat.agent_id, kind, paid, now);
    }
}

/// Некому торговаться на префлопе: очередь пуста либо единственный
/// способный ходить уже уравнял номинал (остальные в all-in).
fn preflop_nobody_to_act(table: &Table, hand: &ActiveHand) -> bool {
    match hand.betting.to_act.len() {
        0 => true,
        1 => {
            let seat_no = hand.betting.to_act[0];
            table.seats[seat_no as usize]
                .as_ref()
                .map(|s| s.current_bet >= hand.betting.current_bet)
                .unwrap_or(true)
        }
        _ => false,
    }
}

/// Применить действие места. Возвращает статус раздачи.
///
/// Валидно только когда seat_no — текущий ход, место не сфолдило
/// и не в all-in. Префлоп-особенность: "bet" превращается в raise,
/// потому что большой блайнд считается действующей ставкой.
pub fn apply_action(
    table: &mut Table,
    hand: &mut ActiveHand,
    seat_no: SeatIndex,
    kind: ActionKind,
    now: DateTime<Utc>,
) -> Result<HandStatus, EngineError> {
    if !hand.phase.is_betting() {
        return Err(EngineError::NoActiveHand);
    }
    if seat_no as usize >= table.seats.len() {
        return Err(EngineError::InvalidSeat(seat_no));
    }
    if hand.current_turn_seat() != Some(seat_no) {
        return Err(EngineError::NotSeatsTurn(seat_no));
    }

    let kind = match kind {
        // BB — действующая ставка, поэтому префлоп-«bet» на деле raise.
        ActionKind::Bet(amount) if hand.street() == Street::Preflop => ActionKind::Raise(amount),
        other => other,
    };

    let street = hand.street();
    let seat_ref = table.seats[seat_no as usize]
        .as_ref()
        .ok_or(EngineError::EmptySeat)?;
    let agent_id = seat_ref.agent_id;

    validate_action(seat_ref, &kind, &hand.betting, &table.config)?;

    let to_call = diff_to_call(seat_ref, &hand.betting);
    let current_bet_before = hand.betting.current_bet;
    let min_raise_before = hand.betting.min_raise;

    match kind {
        ActionKind::Fold => {
            let seat = table.seats[seat_no as usize]
                .as_mut()
                .ok_or(EngineError::EmptySeat)?;
            seat.status = SeatStatus::Folded;
            let amount = seat.current_bet;
            hand.actions
                .push(street, seat_no, agent_id, AuditKind::Fold, amount, now);
        }

        ActionKind::Check => {
            let seat = table.seats[seat_no as usize]
                .as_ref()
                .ok_or(EngineError::EmptySeat)?;
            hand.actions.push(
                street,
                seat_no,
                agent_id,
                AuditKind::Check,
                seat.current_bet,
                now,
            );
        }

        ActionKind::Call => {
            let seat = table.seats[seat_no as usize]
                .as_mut()
                .ok_or(EngineError::EmptySeat)?;
            let pay = to_call.min(seat.stack);
            seat.stack -= pay;
            seat.current_bet += pay;
            if seat.stack.is_zero() {
                seat.status = SeatStatus::AllIn;
            }
            let amount = seat.current_bet;
            hand.pot += pay;
            *hand.contributions.entry(seat_no).or_insert(Chips::ZERO) += pay;
            hand.actions
                .push(street, seat_no, agent_id, AuditKind::Call, amount, now);
        }

        ActionKind::Bet(amount) => {
            let new_bet = {
                let seat = table.seats[seat_no as usize]
                    .as_mut()
                    .ok_or(EngineError::EmptySeat)?;
                seat.stack -= amount;
                seat.current_bet += amount;
                if seat.stack.is_zero() {
                    seat.status = SeatStatus::AllIn;
                }
                seat.current_bet
            };
            hand.pot += amount;
            *hand.contributions.entry(seat_no).or_insert(Chips::ZERO) += amount;

            // Первый bet улицы задаёт и цель, и минимальный рейз.
            let reopened = collect_pending_after(table, seat_no);
            hand.betting.on_raise(seat_no, new_bet, amount, reopened);

            hand.actions
                .push(street, seat_no, agent_id, AuditKind::Bet, new_bet, now);
        }

        ActionKind::Raise(total_bet) => {
            let new_bet = {
                let seat = table.seats[seat_no as usize]
                    .as_mut()
                    .ok_or(EngineError::EmptySeat)?;
                let diff = total_bet - seat.current_bet;
                seat.stack -= diff;
                seat.current_bet += diff;
                if seat.stack.is_zero() {
                    seat.status = SeatStatus::AllIn;
                }
                hand.pot += diff;
                *hand.contributions.entry(seat_no).or_insert(Chips::ZERO) += diff;
                seat.current_bet
            };

            let raise_size = new_bet - current_bet_before;
            if raise_size >= min_raise_before {
                let reopened = collect_pending_after(table, seat_no);
                hand.betting.on_raise(seat_no, new_bet, raise_size, reopened);
            } else {
                // Недобор до min_raise прошёл валидацию только как all-in:
                // ставка растёт, но уже походившие не переоткрываются.
                hand.betting.on_short_all_in(new_bet);
            }

            hand.actions
                .push(street, seat_no, agent_id, AuditKind::Raise, new_bet, now);
        }

        ActionKind::AllIn => {
            let new_bet = {
                let seat = table.seats[seat_no as usize]
                    .as_mut()
                    .ok_or(EngineError::EmptySeat)?;
                let allin = seat.stack;
                seat.stack = Chips::ZERO;
                seat.current_bet += allin;
                seat.status = SeatStatus::AllIn;
                hand.pot += allin;
                *hand.contributions.entry(seat_no).or_insert(Chips::ZERO) += allin;
                seat.current_bet
            };

            if new_bet > current_bet_before {
                let raise_size = new_bet - current_bet_before;
                if raise_size >= min_raise_before {
                    let reopened = collect_pending_after(table, seat_no);
                    hand.betting.on_raise(seat_no, new_bet, raise_size, reopened);
                } else {
                    hand.betting.on_short_all_in(new_bet);
                }
            }
            // Под-колл all-in'ом цель не меняет — место просто выходит из очереди.

            hand.actions
                .push(street, seat_no, agent_id, AuditKind::AllIn, new_bet, now);
        }
    }

    hand.betting.mark_acted(seat_no);
    hand.last_action_at = now;

    // Остался один непофолдивший — банк уходит ему без вскрытия.
    if count_in_hand(table) == 1 {
        finish_by_folds(table, hand, now)?;
        return Ok(HandStatus::ShowdownReached);
    }

    if hand.betting.is_round_complete() {
        advance_round(table, hand, now)
    } else {
        Ok(HandStatus::Ongoing)
    }
}

/// Принудительный fold вне очереди: таймаут хода или уход из-за стола.
///
/// В отличие от `apply_action` не требует, чтобы сейчас был ход этого
/// места, но так же двигает раздачу дальше (фолд-аут, конец раунда).
pub fn force_fold(
    table: &mut Table,
    hand: &mut ActiveHand,
    seat_no: SeatIndex,
    now: DateTime<Utc>,
) -> Result<HandStatus, EngineError> {
    if !hand.phase.is_betting() {
        return Err(EngineError::NoActiveHand);
    }

    let street = hand.street();
    let (agent_id, amount) = {
        let seat = table
            .seats
            .get_mut(seat_no as usize)
            .and_then(|s| s.as_mut())
            .ok_or(EngineError::EmptySeat)?;
        if !seat.is_in_hand() {
            return Err(EngineError::IllegalAction);
        }
        seat.status = SeatStatus::Folded;
        (seat.agent_id, seat.current_bet)
    };

    hand.actions
        .push(street, seat_no, agent_id, AuditKind::Fold, amount, now);
    hand.betting.mark_acted(seat_no);
    hand.last_action_at = now;

    if count_in_hand(table) == 1 {
        finish_by_folds(table, hand, now)?;
        return Ok(HandStatus::ShowdownReached);
    }

    if hand.betting.is_round_complete() {
        advance_round(table, hand, now)
    } else {
        Ok(HandStatus::Ongoing)
    }
}

/// Очередь после bet/raise: все Active-места по кругу за рейзером,
/// сам рейзер в очередь не возвращается.
fn collect_pending_after(table: &Table, raiser: SeatIndex) -> Vec<SeatIndex> {
    let max = table.max_seats() as usize;
    let mut result = Vec::new();

    let mut idx = (raiser as usize + 1) % max;
    for _ in 0..max.saturating_sub(1) {
        if let Some(Some(seat)) = table.seats.get(idx) {
            if matches!(seat.status, SeatStatus::Active) {
                result.push(idx as SeatIndex);
            }
        }
        idx = (idx + 1) % max;
    }
    result
}

/// Сколько мест ещё претендует на банк (Active + AllIn).
fn count_in_hand(table: &Table) -> usize {
    table
        .seats
        .iter()
        .filter_map(|s| s.as_ref())
        .filter(|s| s.is_in_hand())
        .count()
}

/// Переход улиц. Если на новой улице некому торговаться
/// (0–1 способных ходить), борд раскатывается до самого шоудауна.
fn advance_round(
    table: &mut Table,
    hand: &mut ActiveHand,
    now: DateTime<Utc>,
) -> Result<HandStatus, EngineError> {
    loop {
        // Раундовые ставки в банк уже занесены — обнуляем счётчики.
        for seat in table.seats.iter_mut().flatten() {
            seat.current_bet = Chips::ZERO;
        }

        let next_street = match hand.street() {
            Street::Preflop => {
                deal_board(hand, 3)?;
                Street::Flop
            }
            Street::Flop => {
                deal_board(hand, 1)?;
                Street::Turn
            }
            Street::Turn => {
                deal_board(hand, 1)?;
                Street::River
            }
            Street::River => {
                run_showdown(table, hand, now)?;
                return Ok(HandStatus::ShowdownReached);
            }
        };

        hand.phase = Phase::from(next_street);

        // Постфлоп первым ходит первый активный по кругу от кнопки;
        // сама кнопка — последней. Критерий — раздаточный статус:
        // вставший посреди раздачи всё ещё обязан доиграть её.
        let max = table.max_seats() as usize;
        let mut to_act = Vec::new();
        let mut idx = (hand.dealer_seat as usize + 1) % max;
        for _ in 0..max {
            if let Some(Some(seat)) = table.seats.get(idx) {
                if matches!(seat.status, SeatStatus::Active) {
                    to_act.push(idx as SeatIndex);
                }
            }
            idx = (idx + 1) % max;
        }

        hand.betting = BettingState::new(
            next_street,
            Chips::ZERO,
            table.config.big_blind,
            to_act,
        );

        if hand.betting.to_act.len() >= 2 {
            return Ok(HandStatus::Ongoing);
        }
        // 0 или 1 способных ходить: ставить не на кого — едем дальше.
    }
}

/// Открыть карты борда.
fn deal_board(hand: &mut ActiveHand, count: usize) -> Result<(), EngineError> {
    for _ in 0..count {
        let card = hand
            .secret
            .deck
            .draw()
            .ok_or(EngineError::Internal("колода исчерпана на борде"))?;
        hand.board.push(card);
    }
    Ok(())
}

/// Победа без вскрытия: все, кроме одного, сфолдили.
fn finish_by_folds(
    table: &mut Table,
    hand: &mut ActiveHand,
    now: DateTime<Utc>,
) -> Result<(), EngineError> {
    let winner_seat = table
        .seats
        .iter()
        .position(|s| s.as_ref().map(|seat| seat.is_in_hand()).unwrap_or(false))
        .ok_or(EngineError::Internal("нет претендента на банк"))? as SeatIndex;

    for seat in table.seats.iter_mut().flatten() {
        seat.current_bet = Chips::ZERO;
    }

    let pot = hand.pot;
    if let Some(seat) = table.seats[winner_seat as usize].as_mut() {
        seat.stack += pot;
        hand.winners.push(WinnerEntry {
            agent_id: seat.agent_id,
            agent_name: seat.agent_name.clone(),
            amount: pot,
            hand_name: "Last player standing".to_string(),
        });
    }

    hand.phase = Phase::Showdown;
    hand.last_action_at = now;
    Ok(())
}

/// Шоудаун: сайд-поты, оценка рук, дележ каждого пота.
/// Нечётная фишка при сплите уходит первому победителю по кругу
/// слева от кнопки.
fn run_showdown(
    table: &mut Table,
    hand: &mut ActiveHand,
    now: DateTime<Utc>,
) -> Result<(), EngineError> {
    hand.phase = Phase::Showdown;
    hand.last_action_at = now;

    for seat in table.seats.iter_mut().flatten() {
        seat.current_bet = Chips::ZERO;
    }

    let mut pots = compute_side_pots(&hand.contributions);
    reconcile_with_pot(&mut pots, hand.pot);
    hand.side_pots = pots.clone();

    // Оценки считаем один раз на место.
    let mut evals: HashMap<SeatIndex, EvaluatedHand> = HashMap::new();
    for (idx, seat_opt) in table.seats.iter().enumerate() {
        if let Some(seat) = seat_opt {
            if seat.is_in_hand() && seat.hole_cards.len() == 2 {
                evals.insert(
                    idx as SeatIndex,
                    evaluate_hole_and_board(&seat.hole_cards, &hand.board),
                );
            }
        }
    }

    let dealer = hand.dealer_seat;
    let max = table.max_seats() as usize;
    // Порядок "по кругу слева от кнопки" для нечётных фишек.
    let clockwise_rank =
        |seat: SeatIndex| -> usize { (seat as usize + max - dealer as usize - 1) % max };

    for pot in &pots {
        if pot.amount.is_zero() {
            continue;
        }

        // Претенденты пота, ещё не сфолдившие.
        let mut contenders: Vec<SeatIndex> = pot
            .eligible_seats
            .iter()
            .copied()
            .filter(|s| evals.contains_key(s))
            .collect();
        if contenders.is_empty() {
            // Все претенденты слоя сфолдили — отдаём его оставшимся в раздаче.
            contenders = evals.keys().copied().collect();
        }
        if contenders.is_empty() {
            return Err(EngineError::Internal("шоудаун без претендентов"));
        }

        let best = contenders
            .iter()
            .filter_map(|s| evals.get(s).map(|e| e.rank))
            .max()
            .ok_or(EngineError::Internal("шоудаун без оценок"))?;

        let mut pot_winners: Vec<SeatIndex> = contenders
            .into_iter()
            .filter(|s| evals.get(s).map(|e| e.rank) == Some(best))
            .collect();
        pot_winners.sort_by_key(|s| clockwise_rank(*s));

        let share = Chips(pot.amount.0 / pot_winners.len() as u64);
        let mut remainder = pot.amount.0 % pot_winners.len() as u64;

        for &seat_no in &pot_winners {
            let mut prize = share;
            if remainder > 0 {
                prize += Chips(1);
                remainder -= 1;
            }
            if prize.is_zero() {
                continue;
            }
            if let Some(seat) = table.seats[seat_no as usize].as_mut() {
                seat.stack += prize;
                let hand_name = evals
                    .get(&seat_no)
                    .map(|e| e.name.clone())
                    .unwrap_or_else(|| "High card".to_string());
                hand.winners.push(WinnerEntry {
                    agent_id: seat.agent_id,
                    agent_name: seat.agent_name.clone(),
                    amount: prize,
                    hand_name,
                });
            }
        }
    }

    Ok(())
}

/// Аварийный откат: вернуть каждому месту его вклад в раздачу.
/// Используется защитой тика при неожиданном сбое, чтобы фишки
/// не потерялись вместе с раздачей.
pub fn refund_contributions(table: &mut Table, hand: &ActiveHand) {
    for (&seat_no, &contrib) in hand.contributions.iter() {
        if let Some(seat) = table.seats.get_mut(seat_no as usize).and_then(|s| s.as_mut()) {
            seat.stack += contrib;
            seat.current_bet = Chips::ZERO;
        }
    }
}
