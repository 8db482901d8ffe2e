//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed entities for users, restaurants and daily
//! lunch votes, plus the services enforcing the voting rules. Adapters reach
//! the domain only through the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Restaurant, Vote and their id/draft types.
//! - VotingWindow: the daily cutoff rule.
//! - UserService, RestaurantService, VoteService: driving port implementations.

pub mod error;
pub mod ports;
pub mod restaurant;
mod restaurant_service;
#[cfg(test)]
pub(crate) mod test_clock;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod vote;
mod vote_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::restaurant::{
    Restaurant, RestaurantDraft, RestaurantId, RestaurantName, RestaurantValidationError,
};
pub use self::restaurant_service::RestaurantService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Email, Role, User, UserDraft, UserId, UserName, UserValidationError};
pub use self::user_service::UserService;
pub use self::vote::{
    Vote, VoteDraft, VoteId, VoteValidationError, VoteWriteOutcome, VotingWindow, day_bounds,
};
pub use self::vote_service::VoteService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use lunchvote::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
