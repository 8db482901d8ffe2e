//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use lunchvote::domain::VotingWindow;
use lunchvote::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) voting_window: VotingWindow,
}

impl ServerConfig {
    /// Configuration with in-memory storage and the default voting window.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            voting_window: VotingWindow::default(),
        }
    }

    /// Attach a database connection pool; repositories then use PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    #[must_use]
    pub fn with_voting_window(mut self, voting_window: VotingWindow) -> Self {
        self.voting_window = voting_window;
        self
    }
}
