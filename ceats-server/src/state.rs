//! Application state shared across all request handlers.

use crate::config::runtime::SharedConfig;
use sqlx::PgPool;

/// Application state that is shared across all request handlers.
///
/// Cheap to clone: the pool is an `Arc` internally and every config
/// section sits behind its own `Arc<RwLock<…>>` so a SIGHUP reload swaps
/// sections without blocking unrelated readers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: PgPool,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
}

impl AppState {
    pub fn new(db: PgPool, config: SharedConfig) -> Self {
        Self { db, config }
    }
}
