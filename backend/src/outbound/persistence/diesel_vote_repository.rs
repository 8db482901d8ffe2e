//! PostgreSQL-backed `VoteRepository` implementation.
//!
//! The one-vote-per-day rule is enforced by the unique constraint on
//! `(user_id, vote_date)`, so concurrent inserts for the same day cannot both
//! succeed. Ownership-checked changes lock the vote row for the duration of
//! their transaction.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{
    NewVote, VoteChange, VotePersistenceError, VoteRepository, VoteUpdate,
};
use crate::domain::{RestaurantId, UserId, Vote, VoteId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewVoteRow, VoteRow, VoteUpdateRow};
use super::pool::{DbPool, PoolError};
use super::schema::votes;

const DAILY_VOTE_CONSTRAINT: &str = "votes_user_id_vote_date_key";
const USER_FK_CONSTRAINT: &str = "votes_user_id_fkey";
const RESTAURANT_FK_CONSTRAINT: &str = "votes_restaurant_id_fkey";

#[derive(Clone)]
pub struct DieselVoteRepository {
    pool: DbPool,
}

impl DieselVoteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Identifiers involved in a write, used to explain constraint violations.
#[derive(Debug, Clone, Copy)]
struct WriteContext {
    user_id: UserId,
    restaurant_id: Option<RestaurantId>,
    date: NaiveDate,
}

fn map_pool_error(error: PoolError) -> VotePersistenceError {
    VotePersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    context: Option<WriteContext>,
) -> VotePersistenceError {
    let failure = classify_diesel_error(error);
    match (failure, context) {
        (DieselFailure::Connection(message), _) => VotePersistenceError::connection(message),
        (DieselFailure::UniqueViolation { constraint }, Some(ctx))
            if constraint.as_deref() == Some(DAILY_VOTE_CONSTRAINT) =>
        {
            VotePersistenceError::duplicate_daily_vote(ctx.user_id.get(), ctx.date)
        }
        (DieselFailure::ForeignKeyViolation { constraint }, Some(ctx)) => {
            match (constraint.as_deref(), ctx.restaurant_id) {
                (Some(USER_FK_CONSTRAINT), _) => {
                    VotePersistenceError::unknown_user(ctx.user_id.get())
                }
                (Some(RESTAURANT_FK_CONSTRAINT), Some(restaurant_id)) => {
                    VotePersistenceError::unknown_restaurant(restaurant_id.get())
                }
                _ => VotePersistenceError::query("foreign key constraint violated"),
            }
        }
        (DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. }, _) => {
            VotePersistenceError::query("constraint violated")
        }
        (DieselFailure::Query(message), _) => VotePersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> VotePersistenceError {
    map_diesel_error(error, None)
}

fn row_to_vote(row: VoteRow) -> Result<Vote, VotePersistenceError> {
    let corrupt = |field: &str| {
        VotePersistenceError::query(format!("invalid vote row {}: bad {field}", row.id))
    };
    Ok(Vote {
        id: VoteId::new(row.id).map_err(|_| corrupt("id"))?,
        user_id: UserId::new(row.user_id).map_err(|_| corrupt("user id"))?,
        restaurant_id: RestaurantId::new(row.restaurant_id)
            .map_err(|_| corrupt("restaurant id"))?,
        date_time: row.date_time,
    })
}

/// Outcome of the locked update, before rows are converted.
enum LockedUpdate {
    Updated(VoteRow),
    Missing,
    NotOwned(i32),
    OtherDay(NaiveDate),
}

fn locked_update_to_domain(update: LockedUpdate) -> Result<VoteUpdate, VotePersistenceError> {
    match update {
        LockedUpdate::Updated(row) => row_to_vote(row).map(VoteUpdate::Updated),
        LockedUpdate::Missing => Ok(VoteUpdate::Missing),
        LockedUpdate::NotOwned(owner) => UserId::new(owner)
            .map(|owner| VoteUpdate::NotOwned { owner })
            .map_err(|err| VotePersistenceError::query(format!("invalid vote owner: {err}"))),
        LockedUpdate::OtherDay(voted_on) => Ok(VoteUpdate::OtherDay { voted_on }),
    }
}

#[async_trait]
impl VoteRepository for DieselVoteRepository {
    async fn insert(&self, vote: &NewVote) -> Result<Vote, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let context = WriteContext {
            user_id: vote.user_id,
            restaurant_id: Some(vote.restaurant_id),
            date: vote.date_time.date(),
        };

        let stored: VoteRow = diesel::insert_into(votes::table)
            .values(&NewVoteRow {
                user_id: vote.user_id.get(),
                restaurant_id: vote.restaurant_id.get(),
                date_time: vote.date_time,
            })
            .returning(VoteRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(context)))?;

        row_to_vote(stored)
    }

    async fn update_for_user(
        &self,
        change: &VoteChange,
    ) -> Result<VoteUpdate, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let change = *change;
        let context = WriteContext {
            user_id: change.user_id,
            restaurant_id: change.restaurant_id,
            date: change.date_time.date(),
        };

        let outcome = conn
            .transaction(|conn| {
                async move {
                    let current: Option<VoteRow> = votes::table
                        .find(change.id.get())
                        .select(VoteRow::as_select())
                        .for_update()
                        .first(conn)
                        .await
                        .optional()?;

                    let Some(current) = current else {
                        return Ok(LockedUpdate::Missing);
                    };
                    if current.user_id != change.user_id.get() {
                        return Ok(LockedUpdate::NotOwned(current.user_id));
                    }
                    if current.date_time.date() != change.date_time.date() {
                        return Ok(LockedUpdate::OtherDay(current.date_time.date()));
                    }

                    let restaurant_id = change
                        .restaurant_id
                        .map_or(current.restaurant_id, RestaurantId::get);
                    let updated: VoteRow = diesel::update(votes::table.find(current.id))
                        .set(&VoteUpdateRow {
                            restaurant_id,
                            date_time: change.date_time,
                        })
                        .returning(VoteRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(LockedUpdate::Updated(updated))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, Some(context)))?;

        locked_update_to_domain(outcome)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Vote>, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VoteRow> = votes::table
            .filter(votes::user_id.eq(user_id.get()))
            .order((votes::date_time.desc(), votes::id.desc()))
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_vote).collect()
    }

    async fn list_for_user_between(
        &self,
        user_id: UserId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Vote>, VotePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<VoteRow> = votes::table
            .filter(votes::user_id.eq(user_id.get()))
            .filter(votes::date_time.between(from, to))
            .order((votes::date_time.desc(), votes::id.desc()))
            .select(VoteRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_vote).collect()
    }
}
