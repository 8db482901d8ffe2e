//! Driving port for user lookups.
//!
//! Inbound adapters use this port to read users without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Email, Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user, failing with not found when absent.
    async fn get(&self, id: UserId) -> Result<User, Error>;

    /// Fetch one user by exact email, failing with not found when absent.
    async fn get_by_email(&self, email: &Email) -> Result<User, Error>;

    /// Every user, ordered by email.
    async fn get_all(&self) -> Result<Vec<User>, Error>;
}
