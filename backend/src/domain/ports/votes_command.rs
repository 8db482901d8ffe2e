//! Driving port for casting and changing votes.
//!
//! Request fields are optional so that inputs missing at the transport are
//! rejected by the domain with an invalid-request error rather than by the
//! adapter.

use async_trait::async_trait;

use crate::domain::{Error, RestaurantId, UserId, VoteDraft, VoteWriteOutcome};

/// Request to cast today's vote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastVoteRequest {
    pub vote: Option<VoteDraft>,
    pub restaurant_id: Option<RestaurantId>,
    pub user_id: Option<UserId>,
}

/// Request to change a vote before the daily cutoff.
///
/// Leaving `restaurant_id` empty keeps the restaurant already chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeVoteRequest {
    pub vote: Option<VoteDraft>,
    pub restaurant_id: Option<RestaurantId>,
    pub user_id: Option<UserId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotesCommand: Send + Sync {
    /// Record a vote dated today.
    ///
    /// # Errors
    ///
    /// - invalid request when any input is missing;
    /// - out of date time when the vote is not dated today;
    /// - not found when the user or restaurant is unknown;
    /// - conflict when the user already voted today.
    async fn cast_vote(&self, request: CastVoteRequest) -> Result<VoteWriteOutcome, Error>;

    /// Change a vote while the daily window is still open.
    ///
    /// A vote owned by another user yields [`VoteWriteOutcome::NotOwned`]
    /// and is left unchanged.
    async fn change_vote(&self, request: ChangeVoteRequest) -> Result<VoteWriteOutcome, Error>;
}
