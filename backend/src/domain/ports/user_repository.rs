//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Email, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already owns the email address.
        DuplicateEmail { email: String } => "email {email} is already registered",
    }
}

/// Storage for application users.
///
/// Every method is one atomic unit of work.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return it with its storage-assigned id.
    async fn create(
        &self,
        draft: &UserDraft,
        registered: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError>;

    /// Overwrite the user with the same id.
    ///
    /// Returns `false` when no such user exists.
    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Remove a user and, by cascade, their votes.
    ///
    /// Returns `false` when no such user exists.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email match.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError>;

    /// All users ordered by email, then id.
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError>;
}
