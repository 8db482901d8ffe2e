//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, User, UserDraft, UserId};

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns a conflict when the email is already registered.
    async fn create(&self, draft: UserDraft) -> Result<User, Error>;

    /// Replace the stored user carrying the same id.
    ///
    /// # Errors
    ///
    /// Returns not found when the id is unknown and a conflict when the new
    /// email belongs to another user.
    async fn update(&self, user: User) -> Result<(), Error>;

    /// Delete a user together with their votes.
    async fn delete(&self, id: UserId) -> Result<(), Error>;
}
