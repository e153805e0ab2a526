//! Validated runtime configuration, split into independently locked
//! sections so a SIGHUP reload never blocks unrelated readers.

use crate::auth::TokenService;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Server configuration (listen address).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
}

/// Shared configuration state with separate locks for each section.
#[derive(Clone)]
pub struct SharedConfig {
    pub server: Arc<RwLock<ServerConfig>>,
    /// Bearer token service; swapping it rotates the signing secret.
    pub tokens: Arc<RwLock<TokenService>>,
}
