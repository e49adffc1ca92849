use std::sync::Arc;

use hoard_core::memory::MemoryStore;
use hoard_core::repository::{TreasureRepository, UserRepository};
use hoard_db::repositories::{TreasureRepo, UserRepo};
use hoard_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    pub treasures: Arc<dyn TreasureRepository>,
    pub users: Arc<dyn UserRepository>,
    /// Database connection pool, absent when running on the memory store.
    pub pool: Option<DbPool>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            treasures: Arc::new(TreasureRepo::new(pool.clone())),
            users: Arc::new(UserRepo::new(pool.clone())),
            pool: Some(pool),
            config: Arc::new(config),
        }
    }

    /// State backed by a fresh in-process store.
    pub fn in_memory(config: ServerConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            treasures: store.clone(),
            users: store,
            pool: None,
            config: Arc::new(config),
        }
    }

    /// Whether the configured store is reachable.
    pub async fn storage_healthy(&self) -> bool {
        match &self.pool {
            Some(pool) => hoard_db::health_check(pool).await.is_ok(),
            None => true,
        }
    }
}
