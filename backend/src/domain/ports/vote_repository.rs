//! Port abstraction for vote persistence.
//!
//! Adapters guarantee at most one vote per user and calendar day. A second
//! insert for the same day fails with
//! [`VotePersistenceError::DuplicateDailyVote`].

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{RestaurantId, UserId, Vote, VoteId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by vote repository adapters.
    pub enum VotePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "vote repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "vote repository query failed: {message}",
        /// The user already voted on that day.
        DuplicateDailyVote { user_id: i32, date: NaiveDate } =>
            "user {user_id} already voted on {date}",
        /// The referenced user does not exist.
        UnknownUser { user_id: i32 } => "user {user_id} does not exist",
        /// The referenced restaurant does not exist.
        UnknownRestaurant { restaurant_id: i32 } =>
            "restaurant {restaurant_id} does not exist",
    }
}

/// Vote to insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewVote {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    pub date_time: NaiveDateTime,
}

/// Change to an existing vote on behalf of `user_id`.
///
/// `restaurant_id` of `None` keeps the stored restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteChange {
    pub id: VoteId,
    pub user_id: UserId,
    pub restaurant_id: Option<RestaurantId>,
    pub date_time: NaiveDateTime,
}

/// Result of [`VoteRepository::update_for_user`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteUpdate {
    /// The vote was changed; carries the stored state.
    Updated(Vote),
    /// No vote with that id exists.
    Missing,
    /// The vote belongs to someone else and was left untouched.
    NotOwned { owner: UserId },
    /// The stored vote counts for another day and was left untouched.
    OtherDay { voted_on: NaiveDate },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Insert a vote and return it with its storage-assigned id.
    async fn insert(&self, vote: &NewVote) -> Result<Vote, VotePersistenceError>;

    /// Apply `change` only when the stored vote is owned by
    /// `change.user_id` and falls on the same calendar day.
    ///
    /// The lookup, checks and write happen atomically.
    async fn update_for_user(&self, change: &VoteChange)
    -> Result<VoteUpdate, VotePersistenceError>;

    /// The user's votes, newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Vote>, VotePersistenceError>;

    /// The user's votes with `from <= date_time <= to`, newest first.
    async fn list_for_user_between(
        &self,
        user_id: UserId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Vote>, VotePersistenceError>;
}
