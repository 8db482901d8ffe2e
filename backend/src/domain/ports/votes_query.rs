//! Driving port for reading a user's vote history.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, UserId, Vote};

/// Request for every vote of one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListVotesRequest {
    pub user_id: Option<UserId>,
}

/// Request for one user's votes between two days, both included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListVotesBetweenRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub user_id: Option<UserId>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotesQuery: Send + Sync {
    /// Every vote of the user, newest first.
    async fn list_votes(&self, request: ListVotesRequest) -> Result<Vec<Vote>, Error>;

    /// The user's votes from the start of `start_date` to the end of
    /// `end_date`, newest first. A reversed range yields no votes.
    async fn list_votes_between(
        &self,
        request: ListVotesBetweenRequest,
    ) -> Result<Vec<Vote>, Error>;
}
