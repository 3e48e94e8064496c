use std::collections::{HashMap, VecDeque};

use chrono::Utc;
use parking_lot::Mutex;

use crate::config;
use crate::domain::agent::{Agent, AgentKind, BotStrategy};
use crate::domain::chips::Chips;
use crate::domain::seat::{Seat, SeatIndex};
use crate::domain::table::{Table, TableConfig};
use crate::domain::{AgentId, TableId};
use crate::engine::game_loop::{ActiveHand, HandArchive};
use crate::engine::{self, ActionKind, EngineError, HandStatus};
use crate::infra::persistence::{ChipTransaction, ChipTxKind, HandStore, PersistJob, PersistSink};
use crate::infra::{IdGenerator, SystemRng};
use crate::manager::errors::GameError;

/// Рантайм одного стола: доменный стол + активная раздача + ring-история.
pub struct TableRuntime {
    pub table: Table,
    pub hand: Option<ActiveHand>,
    /// Последние завершённые раздачи (не больше MAX_HAND_HISTORY).
    pub history: VecDeque<HandArchive>,
}

impl TableRuntime {
    fn new(config: TableConfig) -> Self {
        Self {
            table: Table::new(config),
            hand: None,
            history: VecDeque::new(),
        }
    }

    /// Есть ли за столом хоть один человек — от этого зависят тайминги тика.
    pub fn has_human(&self) -> bool {
        self.table
            .seats
            .iter()
            .flatten()
            .any(|s| matches!(s.kind, AgentKind::Human))
    }

    pub fn archive_hand(&mut self, archive: HandArchive) {
        if self.history.len() >= config::MAX_HAND_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(archive);
    }
}

/// Итог ухода из-за стола — сумма к расчёту на кошелёк.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CashOut {
    pub agent_id: AgentId,
    pub cash_out: Chips,
    pub wallet_address: Option<String>,
}

/// Строка лидерборда: накопленный профит завершённых раздач плюс
/// нереализованный результат текущей (и только текущей) раздачи.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LeaderboardRow {
    pub agent_id: AgentId,
    pub name: String,
    pub is_bot: bool,
    pub profit: i64,
    pub hands_played: u64,
    pub hands_won: u64,
}

/// Процессный владелец всего игрового состояния.
pub struct GameManager {
    tables: HashMap<TableId, Mutex<TableRuntime>>,
    agents: Mutex<HashMap<AgentId, Agent>>,
    ids: IdGenerator,
    persist: PersistSink,
}

impl GameManager {
    /// Создать менеджер с фиксированным набором столов.
    ///
    /// Если store передан, подтягиваем максимум номера раздач на стол,
    /// чтобы hand_count продолжал монотонно расти после рестарта.
    pub fn new(
        configs: Vec<TableConfig>,
        store: Option<&dyn HandStore>,
        persist: PersistSink,
    ) -> Self {
        let recovered = store.map(|s| s.max_hand_numbers()).unwrap_or_default();

        let mut tables = HashMap::new();
        for cfg in configs {
            let id = cfg.id;
            let mut runtime = TableRuntime::new(cfg);
            if let Some(&n) = recovered.get(&id) {
                runtime.table.hand_count = n;
            }
            tables.insert(id, Mutex::new(runtime));
        }

        Self {
            tables,
            agents: Mutex::new(HashMap::new()),
            ids: IdGenerator::new(),
            persist,
        }
    }

    /// Рассадить стартовых ботов: по нескольку на стол,
    /// стратегии по кругу, места подряд с нулевого.
    pub fn seed_bots(&self) {
        let strategies = [BotStrategy::Fish, BotStrategy::Tag, BotStrategy::Lag];
        for table_id in self.table_ids() {
            for i in 0..config::SEED_BOTS_PER_TABLE {
                let strategy = strategies[i % strategies.len()];
                if let Err(err) = self.add_bot(table_id, strategy) {
                    tracing::warn!(table_id, error = %err, "не удалось посадить стартового бота");
                }
            }
        }
    }

    /// ID всех столов, по возрастанию.
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self.tables.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Прочитать стол под локом.
    pub fn with_table<T>(
        &self,
        table_id: TableId,
        f: impl FnOnce(&TableRuntime) -> T,
    ) -> Result<T, GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        Ok(f(&runtime.lock()))
    }

    /// Мутировать стол под локом. Для тестов и внутренних нужд.
    pub fn with_table_mut<T>(
        &self,
        table_id: TableId,
        f: impl FnOnce(&mut TableRuntime) -> T,
    ) -> Result<T, GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        Ok(f(&mut runtime.lock()))
    }

    /// Снимок агента из реестра.
    pub fn agent(&self, agent_id: AgentId) -> Option<Agent> {
        self.agents.lock().get(&agent_id).cloned()
    }

    // ==== публичные операции ====

    /// Посадить свежего бота в первое свободное место.
    pub fn add_bot(&self, table_id: TableId, strategy: BotStrategy) -> Result<AgentId, GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        let mut rt = runtime.lock();

        let seat_no = rt.table.first_empty_seat().ok_or(GameError::NoFreeSeat)?;
        let buy_in = rt.table.config.max_buy_in;

        let agent_id = self.ids.next_agent_id();
        let name = format!("{} Bot #{}", strategy_label(strategy), agent_id);
        let agent = Agent::new(agent_id, name.clone(), AgentKind::Bot(strategy));

        rt.table.seats[seat_no as usize] = Some(Seat::new(
            agent_id,
            name,
            AgentKind::Bot(strategy),
            buy_in,
        ));
        drop(rt);

        self.agents.lock().insert(agent_id, agent);
        self.persist.submit(PersistJob::ChipTx(ChipTransaction {
            table_id,
            agent_id,
            kind: ChipTxKind::BuyIn,
            amount: buy_in,
            at: Utc::now(),
        }));

        Ok(agent_id)
    }

    /// Посадить человека в конкретное место.
    ///
    /// Escrow-депозит делает HTTP-адаптер ДО вызова; при отказе здесь
    /// адаптер запускает компенсирующий расчёт.
    pub fn sit_agent(
        &self,
        table_id: TableId,
        seat_no: SeatIndex,
        name: String,
        buy_in: Chips,
        wallet_address: Option<String>,
        start_sitting_out: bool,
    ) -> Result<AgentId, GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        let mut rt = runtime.lock();

        if seat_no as usize >= rt.table.seats.len() {
            return Err(GameError::NoSuchSeat(seat_no));
        }
        if !rt.table.is_seat_empty(seat_no) {
            return Err(GameError::SeatTaken(seat_no));
        }
        let (min, max) = (rt.table.config.min_buy_in, rt.table.config.max_buy_in);
        if buy_in < min || buy_in > max {
            return Err(GameError::BuyInOutOfRange { buy_in, min, max });
        }

        let agent_id = self.ids.next_agent_id();
        let agent = Agent::new(agent_id, name.clone(), AgentKind::Human)
            .with_wallet(wallet_address.clone());

        rt.table.seats[seat_no as usize] = Some(
            Seat::new(agent_id, name, AgentKind::Human, buy_in)
                .sitting_out(start_sitting_out)
                .with_wallet(wallet_address),
        );
        drop(rt);

        self.agents.lock().insert(agent_id, agent);
        self.persist.submit(PersistJob::ChipTx(ChipTransaction {
            table_id,
            agent_id,
            kind: ChipTxKind::BuyIn,
            amount: buy_in,
            at: Utc::now(),
        }));

        Ok(agent_id)
    }

    /// Пометить место sit out (действует со следующей раздачи).
    pub fn stand_agent(&self, table_id: TableId, agent_id: AgentId) -> Result<(), GameError> {
        self.flip_sitting_out(table_id, agent_id, true)
    }

    /// Вернуть место в игру.
    pub fn resume_agent(&self, table_id: TableId, agent_id: AgentId) -> Result<(), GameError> {
        self.flip_sitting_out(table_id, agent_id, false)
    }

    fn flip_sitting_out(
        &self,
        table_id: TableId,
        agent_id: AgentId,
        value: bool,
    ) -> Result<(), GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        let mut rt = runtime.lock();

        let seat_no = rt
            .table
            .seat_of_agent(agent_id)
            .ok_or(GameError::AgentNotSeated(agent_id))?;
        if let Some(seat) = rt.table.seats[seat_no as usize].as_mut() {
            seat.is_sitting_out = value;
        }
        Ok(())
    }

    /// Действие агента в текущей раздаче.
    pub fn submit_action(
        &self,
        table_id: TableId,
        agent_id: AgentId,
        kind: ActionKind,
    ) -> Result<(), GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        let mut rt = runtime.lock();

        let seat_no = rt
            .table
            .seat_of_agent(agent_id)
            .ok_or(GameError::AgentNotSeated(agent_id))?;

        let rt = &mut *rt;
        let hand = rt.hand.as_mut().ok_or(GameError::NoHandInProgress)?;
        engine::apply_action(&mut rt.table, hand, seat_no, kind, Utc::now())?;
        Ok(())
    }

    /// Докупка фишек. Только между раздачами; стек не может превысить
    /// максимальный закуп стола.
    pub fn rebuy_agent(
        &self,
        table_id: TableId,
        agent_id: AgentId,
        amount: Chips,
    ) -> Result<(), GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        let mut rt = runtime.lock();

        if rt.hand.is_some() {
            return Err(GameError::RebuyDuringHand);
        }

        let seat_no = rt
            .table
            .seat_of_agent(agent_id)
            .ok_or(GameError::AgentNotSeated(agent_id))?;
        let max = rt.table.config.max_buy_in;

        let seat = rt.table.seats[seat_no as usize]
            .as_mut()
            .ok_or(GameError::AgentNotSeated(agent_id))?;
        if seat.stack + amount > max {
            return Err(GameError::RebuyAboveMax);
        }
        seat.stack += amount;
        seat.buy_in += amount;
        drop(rt);

        self.persist.submit(PersistJob::ChipTx(ChipTransaction {
            table_id,
            agent_id,
            kind: ChipTxKind::Rebuy,
            amount,
            at: Utc::now(),
        }));

        Ok(())
    }

    /// Уход из-за стола. Посреди раздачи — принудительный fold;
    /// возвращает сумму к расчёту на кошелёк.
    pub fn leave_agent(&self, table_id: TableId, agent_id: AgentId) -> Result<CashOut, GameError> {
        let runtime = self
            .tables
            .get(&table_id)
            .ok_or(GameError::TableNotFound(table_id))?;
        let mut rt = runtime.lock();

        let seat_no = rt
            .table
            .seat_of_agent(agent_id)
            .ok_or(GameError::AgentNotSeated(agent_id))?;

        let now = Utc::now();

        // Посреди раздачи — сначала fold, чтобы раздача могла идти дальше.
        let rt_inner = &mut *rt;
        if let Some(hand) = rt_inner.hand.as_mut() {
            let in_hand = rt_inner.table.seats[seat_no as usize]
                .as_ref()
                .map(|s| s.is_in_hand())
                .unwrap_or(false);
            if in_hand && hand.phase.is_betting() {
                match engine::force_fold(&mut rt_inner.table, hand, seat_no, now) {
                    Ok(HandStatus::Ongoing) | Ok(HandStatus::ShowdownReached) => {}
                    Err(err) => {
                        tracing::warn!(table_id, agent_id, error = %err, "force-fold при уходе не удался");
                    }
                }
            }

            // Профит текущей раздачи фиксируем при уходе, иначе
            // завершение раздачи его уже не увидит.
            if let (Some(start), Some(seat)) = (
                hand.starting_stack(seat_no),
                rt_inner.table.seats[seat_no as usize].as_ref(),
            ) {
                let delta = seat.stack.0 as i64 - start.0 as i64;
                let mut agents = self.agents.lock();
                if let Some(agent) = agents.get_mut(&agent_id) {
                    agent.lifetime_profit += delta;
                    agent.hands_played += 1;
                }
            }
        }

        let seat = rt.table.seats[seat_no as usize]
            .take()
            .ok_or(GameError::AgentNotSeated(agent_id))?;
        let cash_out = seat.stack;
        let wallet_address = seat.wallet_address.clone();
        drop(rt);

        // Профит завершённых раздач уже аккумулирован позрадачно,
        // здесь сессионную дельту повторно не добавляем.
        self.persist.submit(PersistJob::ChipTx(ChipTransaction {
            table_id,
            agent_id,
            kind: ChipTxKind::CashOut,
            amount: cash_out,
            at: now,
        }));

        Ok(CashOut {
            agent_id,
            cash_out,
            wallet_address,
        })
    }

    /// Лидерборд: профит завершённых раздач из реестра агентов плюс
    /// нереализованный результат текущих раздач (стек минус стек на
    /// старте раздачи). Сессионную дельту (stack − buy_in) использовать
    /// нельзя — завершённые раздачи уже учтены в профите.
    pub fn leaderboard(&self) -> Vec<LeaderboardRow> {
        let mut rows: HashMap<AgentId, LeaderboardRow> = self
            .agents
            .lock()
            .values()
            .map(|a| {
                (
                    a.id,
                    LeaderboardRow {
                        agent_id: a.id,
                        name: a.name.clone(),
                        is_bot: a.kind.is_bot(),
                        profit: a.lifetime_profit,
                        hands_played: a.hands_played,
                        hands_won: a.hands_won,
                    },
                )
            })
            .collect();

        for table_id in self.table_ids() {
            if let Some(runtime) = self.tables.get(&table_id) {
                let rt = runtime.lock();
                if let Some(hand) = rt.hand.as_ref() {
                    for (&seat_no, &start) in hand.starting_stacks() {
                        if let Some(Some(seat)) = rt.table.seats.get(seat_no as usize) {
                            if let Some(row) = rows.get_mut(&seat.agent_id) {
                                row.profit += seat.stack.0 as i64 - start.0 as i64;
                            }
                        }
                    }
                }
            }
        }

        let mut out: Vec<LeaderboardRow> = rows.into_values().collect();
        out.sort_by(|a, b| b.profit.cmp(&a.profit).then_with(|| a.agent_id.cmp(&b.agent_id)));
        out
    }

    // ==== внутренности, нужные тикеру ====

    pub(crate) fn persist_sink(&self) -> &PersistSink {
        &self.persist
    }

    pub(crate) fn agents_registry(&self) -> &Mutex<HashMap<AgentId, Agent>> {
        &self.agents
    }

    pub(crate) fn table_cell(&self, table_id: TableId) -> Option<&Mutex<TableRuntime>> {
        self.tables.get(&table_id)
    }

    /// Стартовать раздачу на столе (под уже взятым локом).
    pub(crate) fn start_hand_locked(
        &self,
        rt: &mut TableRuntime,
        now: chrono::DateTime<Utc>,
    ) -> Result<(), EngineError> {
        let mut rng = SystemRng;
        rt.table.hand_count += 1;
        let hand_count = rt.table.hand_count;
        match engine::start_hand(&mut rt.table, &mut rng, hand_count, now) {
            Ok(hand) => {
                rt.hand = Some(hand);
                Ok(())
            }
            Err(err) => {
                rt.table.hand_count -= 1;
                Err(err)
            }
        }
    }
}

fn strategy_label(strategy: BotStrategy) -> &'static str {
    match strategy {
        BotStrategy::Fish => "Fish",
        BotStrategy::Tag => "TAG",
        BotStrategy::Lag => "LAG",
    }
}
