use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;

use poker_server::api::auth::ApiKeyRegistry;
use poker_server::api::{self, AppState};
use poker_server::config;
use poker_server::escrow::MockEscrowClient;
use poker_server::infra::persistence::{spawn_persistence_worker, HandStore, PersistSink};
use poker_server::infra::InMemoryHandStore;
use poker_server::manager::GameManager;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Store: in-memory реализация по умолчанию; боевое хранилище
    // подключается той же трейт-границей.
    let store: Arc<dyn HandStore> = Arc::new(InMemoryHandStore::new());
    let persist = PersistSink::Queued(spawn_persistence_worker(
        store.clone(),
        config::PERSIST_QUEUE_DEPTH,
    ));

    let manager = Arc::new(GameManager::new(
        config::default_tables(),
        Some(store.as_ref()),
        persist,
    ));
    manager.seed_bots();

    // Тикер: единственный владелец продвижения столов.
    let ticker = manager.clone();
    tokio::spawn(async move {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(config::TICK_PERIOD_MS));
        loop {
            interval.tick().await;
            ticker.tick(Utc::now());
        }
    });

    let auth = ApiKeyRegistry::from_env("POKER_AGENT_KEYS");
    if auth.is_empty() {
        tracing::warn!("POKER_AGENT_KEYS пуст — агентский API закрыт для всех");
    }

    let state = AppState {
        manager,
        escrow: Arc::new(MockEscrowClient::new()),
        auth: Arc::new(auth),
    };
    let app = api::router(state);

    let addr: SocketAddr = std::env::var("POKER_BIND_ADDR")
        .unwrap_or_else(|_| config::DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    tracing::info!(%addr, "сервер стартует");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("сервер остановлен");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("получен сигнал остановки");
}
