//! `UserRepository` over the in-memory store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserDraft, UserId};

use super::{InMemoryStore, next_id};

fn email_taken(users: &BTreeMap<i32, User>, email: &Email, except: Option<UserId>) -> bool {
    users
        .values()
        .any(|user| &user.email == email && Some(user.id) != except)
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(
        &self,
        draft: &UserDraft,
        registered: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut state = self.lock();
        if email_taken(&state.users, &draft.email, None) {
            return Err(UserPersistenceError::duplicate_email(draft.email.to_string()));
        }
        let raw_id = next_id(&mut state.user_seq);
        let id = UserId::new(raw_id)
            .map_err(|err| UserPersistenceError::query(format!("user sequence exhausted: {err}")))?;
        let user = draft.clone().into_user(id, registered);
        state.users.insert(raw_id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock();
        if !state.users.contains_key(&user.id.get()) {
            return Ok(false);
        }
        if email_taken(&state.users, &user.email, Some(user.id)) {
            return Err(UserPersistenceError::duplicate_email(user.email.to_string()));
        }
        state.users.insert(user.id.get(), user.clone());
        Ok(true)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut state = self.lock();
        if state.users.remove(&id.get()).is_none() {
            return Ok(false);
        }
        state.votes.retain(|_, vote| vote.user_id != id);
        Ok(true)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().users.get(&id.get()).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|user| &user.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut users: Vec<User> = self.lock().users.values().cloned().collect();
        users.sort_by(|a, b| a.email.cmp(&b.email).then(a.id.cmp(&b.id)));
        Ok(users)
    }
}
