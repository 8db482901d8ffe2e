//! Vote data model and the daily voting window.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{RestaurantId, UserId};

/// Validation errors for vote components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteValidationError {
    #[error("vote id must be a positive integer")]
    InvalidId,
}

/// Storage-assigned vote identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i32", into = "i32")]
#[schema(value_type = i32, example = 7)]
pub struct VoteId(i32);

impl VoteId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i32) -> Result<Self, VoteValidationError> {
        if id <= 0 {
            return Err(VoteValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VoteId> for i32 {
    fn from(value: VoteId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for VoteId {
    type Error = VoteValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A user's choice of restaurant for one calendar day.
///
/// `date_time` is server-local wall clock time without an offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    #[schema(value_type = i32, example = 7)]
    pub id: VoteId,
    #[schema(value_type = i32, example = 3)]
    pub user_id: UserId,
    #[schema(value_type = i32, example = 5)]
    pub restaurant_id: RestaurantId,
    #[schema(value_type = String, example = "2026-10-19T10:30:00")]
    pub date_time: NaiveDateTime,
}

impl Vote {
    /// Calendar day the vote counts for.
    pub fn voted_on(&self) -> NaiveDate {
        self.date_time.date()
    }
}

/// Vote payload supplied by callers. It is new when `id` is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteDraft {
    pub id: Option<VoteId>,
    pub date_time: NaiveDateTime,
}

impl VoteDraft {
    /// Payload for a vote that has not been stored yet.
    pub fn new(date_time: NaiveDateTime) -> Self {
        Self {
            id: None,
            date_time,
        }
    }

    /// Payload targeting an existing vote.
    pub fn existing(id: VoteId, date_time: NaiveDateTime) -> Self {
        Self {
            id: Some(id),
            date_time,
        }
    }

    /// Whether the payload describes a vote without an identity.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// Result of a vote write that completed without a domain error.
///
/// A change aimed at a vote the caller does not own is reported rather than
/// silently ignored; the stored vote is left untouched in that case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteWriteOutcome {
    Saved(Vote),
    NotFound(VoteId),
    NotOwned(VoteId),
}

/// Daily voting rules: votes count for the current day only and may be
/// changed strictly before the cutoff time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingWindow {
    change_cutoff: NaiveTime,
}

impl Default for VotingWindow {
    fn default() -> Self {
        Self::new(NaiveTime::default() + TimeDelta::hours(11))
    }
}

impl VotingWindow {
    /// Build a window with a custom change cutoff.
    pub fn new(change_cutoff: NaiveTime) -> Self {
        Self { change_cutoff }
    }

    /// Time of day from which votes can no longer be changed.
    pub fn change_cutoff(&self) -> NaiveTime {
        self.change_cutoff
    }

    /// Whether `date_time` falls on the same calendar day as `now`.
    pub fn is_today(&self, date_time: NaiveDateTime, now: NaiveDateTime) -> bool {
        date_time.date() == now.date()
    }

    /// Whether a change made at `at` lands before the cutoff of its day.
    pub fn accepts_change_at(&self, at: NaiveDateTime) -> bool {
        at.time() < self.change_cutoff
    }
}

/// Last representable instant of a day, leap seconds aside.
const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Inclusive bounds covering whole days from `start` to `end`.
pub fn day_bounds(start: NaiveDate, end: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    (start.and_time(NaiveTime::MIN), end.and_time(END_OF_DAY))
}
