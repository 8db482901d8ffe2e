//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`], turning
//! absent rows into not-found errors and duplicate emails into conflicts.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Email, Error, User, UserDraft, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => {
            Error::conflict(format!("email {email} is already registered"))
        }
    }
}

fn user_not_found(id: UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UserService<R> {
    /// Create a service stamping registrations with `clock`.
    pub fn new(user_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { user_repo, clock }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create(&self, draft: UserDraft) -> Result<User, Error> {
        let user = self
            .user_repo
            .create(&draft, self.clock.utc())
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<(), Error> {
        if user.roles.is_empty() {
            return Err(Error::invalid_request("user must hold at least one role"));
        }
        let updated = self
            .user_repo
            .update(&user)
            .await
            .map_err(map_repository_error)?;
        if !updated {
            return Err(user_not_found(user.id));
        }
        info!(user_id = %user.id, "user updated");
        Ok(())
    }

    async fn delete(&self, id: UserId) -> Result<(), Error> {
        let deleted = self
            .user_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn get(&self, id: UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn get_by_email(&self, email: &Email) -> Result<User, Error> {
        self.user_repo
            .find_by_email(email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("no user registered with email {email}")))
    }

    async fn get_all(&self) -> Result<Vec<User>, Error> {
        self.user_repo.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
