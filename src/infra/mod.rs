//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - RNG-реализации;
//! - граница персистентности (store + фоновая запись).

pub mod ids;
pub mod persistence;
pub mod rng;

pub use ids::IdGenerator;
pub use persistence::{
    spawn_persistence_worker, ChipTransaction, ChipTxKind, CompletedHandRecord, HandStore,
    InMemoryHandStore, PersistHandle, PersistJob, PersistSink, SeatSnapshot, StoreError,
};
pub use rng::{DeterministicRng, SystemRng};
