//! Vote domain service.
//!
//! Enforces the daily voting rules on top of the vote, user and restaurant
//! repositories:
//!
//! - a vote is cast for the current server-local day only;
//! - a vote may be changed strictly before the [`VotingWindow`] cutoff;
//! - a user holds at most one vote per day;
//! - only the owner of a vote may change it.
//!
//! "Now" always comes from the injected [`Clock`], never from the caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CastVoteRequest, ChangeVoteRequest, ListVotesBetweenRequest, ListVotesRequest, NewVote,
    RestaurantPersistenceError, RestaurantRepository, UserPersistenceError, UserRepository,
    VoteChange, VotePersistenceError, VoteRepository, VoteUpdate, VotesCommand, VotesQuery,
};
use crate::domain::{
    Error, RestaurantId, UserId, Vote, VoteDraft, VoteWriteOutcome, VotingWindow, day_bounds,
};

fn map_vote_error(error: VotePersistenceError) -> Error {
    match error {
        VotePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("vote repository unavailable: {message}"))
        }
        VotePersistenceError::Query { message } => {
            Error::internal(format!("vote repository error: {message}"))
        }
        VotePersistenceError::DuplicateDailyVote { user_id, date } => {
            Error::conflict(format!("user {user_id} already voted on {date}"))
        }
        VotePersistenceError::UnknownUser { user_id } => {
            Error::not_found(format!("user {user_id} not found"))
        }
        VotePersistenceError::UnknownRestaurant { restaurant_id } => {
            Error::not_found(format!("restaurant {restaurant_id} not found"))
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message }
        | UserPersistenceError::DuplicateEmail { email: message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_restaurant_error(error: RestaurantPersistenceError) -> Error {
    match error {
        RestaurantPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("restaurant repository unavailable: {message}"))
        }
        RestaurantPersistenceError::Query { message }
        | RestaurantPersistenceError::DuplicateName { name: message } => {
            Error::internal(format!("restaurant repository error: {message}"))
        }
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::invalid_request(format!("{name} must not be null")))
}

fn not_today() -> Error {
    Error::out_of_date_time("only today's votes are applicable")
}

fn too_late() -> Error {
    Error::out_of_date_time("too late to change the vote")
}

/// Vote service implementing [`VotesCommand`] and [`VotesQuery`].
#[derive(Clone)]
pub struct VoteService<V, U, R> {
    vote_repo: Arc<V>,
    user_repo: Arc<U>,
    restaurant_repo: Arc<R>,
    clock: Arc<dyn Clock>,
    window: VotingWindow,
}

impl<V, U, R> VoteService<V, U, R> {
    /// Create a service using the default voting window.
    pub fn new(
        vote_repo: Arc<V>,
        user_repo: Arc<U>,
        restaurant_repo: Arc<R>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            vote_repo,
            user_repo,
            restaurant_repo,
            clock,
            window: VotingWindow::default(),
        }
    }

    /// Replace the voting window.
    #[must_use]
    pub fn with_window(mut self, window: VotingWindow) -> Self {
        self.window = window;
        self
    }

    fn now(&self) -> NaiveDateTime {
        self.clock.local().naive_local()
    }
}

impl<V, U, R> VoteService<V, U, R>
where
    V: VoteRepository,
    U: UserRepository,
    R: RestaurantRepository,
{
    async fn ensure_user_exists(&self, user_id: UserId) -> Result<(), Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }

    async fn ensure_restaurant_exists(&self, restaurant_id: RestaurantId) -> Result<(), Error> {
        self.restaurant_repo
            .find_by_id(restaurant_id)
            .await
            .map_err(map_restaurant_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(format!("restaurant {restaurant_id} not found")))
    }

    /// Insert a new vote or apply an ownership-checked change.
    async fn save(
        &self,
        vote: VoteDraft,
        restaurant_id: Option<RestaurantId>,
        user_id: UserId,
    ) -> Result<VoteWriteOutcome, Error> {
        self.ensure_user_exists(user_id).await?;
        if let Some(restaurant_id) = restaurant_id {
            self.ensure_restaurant_exists(restaurant_id).await?;
        }

        let Some(vote_id) = vote.id else {
            let restaurant_id = required(restaurant_id, "restaurant id")?;
            let stored = self
                .vote_repo
                .insert(&NewVote {
                    user_id,
                    restaurant_id,
                    date_time: vote.date_time,
                })
                .await
                .map_err(map_vote_error)?;
            info!(vote_id = %stored.id, %user_id, %restaurant_id, "vote cast");
            return Ok(VoteWriteOutcome::Saved(stored));
        };

        let change = VoteChange {
            id: vote_id,
            user_id,
            restaurant_id,
            date_time: vote.date_time,
        };
        match self
            .vote_repo
            .update_for_user(&change)
            .await
            .map_err(map_vote_error)?
        {
            VoteUpdate::Updated(stored) => {
                info!(%vote_id, %user_id, restaurant_id = %stored.restaurant_id, "vote changed");
                Ok(VoteWriteOutcome::Saved(stored))
            }
            VoteUpdate::Missing => Ok(VoteWriteOutcome::NotFound(vote_id)),
            VoteUpdate::NotOwned { owner } => {
                warn!(%vote_id, %user_id, %owner, "vote change rejected: not the owner");
                Ok(VoteWriteOutcome::NotOwned(vote_id))
            }
            VoteUpdate::OtherDay { voted_on } => Err(Error::out_of_date_time(format!(
                "vote {vote_id} counts for {voted_on} and cannot be changed today"
            ))),
        }
    }
}

#[async_trait]
impl<V, U, R> VotesCommand for VoteService<V, U, R>
where
    V: VoteRepository,
    U: UserRepository,
    R: RestaurantRepository,
{
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteWriteOutcome, Error> {
        let vote = required(request.vote, "vote")?;
        let restaurant_id = required(request.restaurant_id, "restaurant id")?;
        let user_id = required(request.user_id, "user id")?;

        if !self.window.is_today(vote.date_time, self.now()) {
            return Err(not_today());
        }
        self.save(vote, Some(restaurant_id), user_id).await
    }

    async fn change_vote(&self, request: ChangeVoteRequest) -> Result<VoteWriteOutcome, Error> {
        let vote = required(request.vote, "vote")?;
        let user_id = required(request.user_id, "user id")?;

        let now = self.now();
        if !self.window.accepts_change_at(now) {
            return Err(too_late());
        }
        if !self.window.is_today(vote.date_time, now) {
            return Err(not_today());
        }
        if !self.window.accepts_change_at(vote.date_time) {
            return Err(too_late());
        }
        self.save(vote, request.restaurant_id, user_id).await
    }
}

#[async_trait]
impl<V, U, R> VotesQuery for VoteService<V, U, R>
where
    V: VoteRepository,
    U: UserRepository,
    R: RestaurantRepository,
{
    async fn list_votes(&self, request: ListVotesRequest) -> Result<Vec<Vote>, Error> {
        let user_id = required(request.user_id, "user id")?;
        self.vote_repo
            .list_for_user(user_id)
            .await
            .map_err(map_vote_error)
    }

    async fn list_votes_between(
        &self,
        request: ListVotesBetweenRequest,
    ) -> Result<Vec<Vote>, Error> {
        let start_date = required(request.start_date, "start date")?;
        let end_date = required(request.end_date, "end date")?;
        let user_id = required(request.user_id, "user id")?;

        if start_date > end_date {
            return Ok(Vec::new());
        }
        let (from, to) = day_bounds(start_date, end_date);
        self.vote_repo
            .list_for_user_between(user_id, from, to)
            .await
            .map_err(map_vote_error)
    }
}

#[cfg(test)]
#[path = "vote_service_tests.rs"]
mod tests;
