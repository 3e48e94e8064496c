// src/bin/dev_sim.rs
//
// Dev-симуляция: чисто бот-столы прогоняются синтетическим временем,
// без сети и рантайма. Удобно смотреть, что движок и тикер живут.

use std::sync::Arc;

use chrono::{Duration, Utc};

use poker_server::config;
use poker_server::infra::persistence::{HandStore, PersistSink};
use poker_server::infra::InMemoryHandStore;
use poker_server::manager::GameManager;

fn main() {
    println!("dev_sim: стартуем бот-симуляцию…");

    let store = Arc::new(InMemoryHandStore::new());
    let dyn_store: Arc<dyn HandStore> = store.clone();
    let manager = GameManager::new(
        config::default_tables(),
        Some(&*dyn_store),
        PersistSink::Direct(dyn_store.clone()),
    );
    manager.seed_bots();

    // 60 тиков по 500 мс — 30 «секунд» игрового времени.
    let mut now = Utc::now();
    for _ in 0..60 {
        manager.tick(now);
        now += Duration::milliseconds(config::TICK_PERIOD_MS as i64);
    }

    println!();
    println!("================ ИТОГИ СИМУЛЯЦИИ =================");
    for table_id in manager.table_ids() {
        let summary = manager
            .with_table(table_id, |rt| {
                let last = rt.history.back().map(|h| {
                    let winners: Vec<String> = h
                        .winners
                        .iter()
                        .map(|w| format!("{} +{} ({})", w.agent_name, w.amount, w.hand_name))
                        .collect();
                    (h.hand_number, h.pot, winners)
                });
                (rt.table.config.name.clone(), rt.table.hand_count, last)
            })
            .expect("стол из собственного списка");

        let (name, hands, last) = summary;
        println!("Стол {name}: сыграно раздач — {hands}");
        if let Some((n, pot, winners)) = last {
            println!("  последняя раздача #{n}, банк {pot}: {}", winners.join(", "));
        }
    }

    println!();
    println!("Лидерборд:");
    for row in manager.leaderboard().into_iter().take(10) {
        println!(
            "  {:<16} профит {:>6}  (раздач {}, побед {})",
            row.name, row.profit, row.hands_played, row.hands_won
        );
    }

    println!();
    println!(
        "Записей в store: раздач {}, движений фишек {}",
        store.hand_count(),
        store.chip_tx_count()
    );
}
