//! Votes API handlers.
//!
//! The acting user is named in the path; there is no authentication layer.
//!
//! ```text
//! POST /api/v1/users/{userId}/votes           {"restaurantId":5,"dateTime":"2026-10-19T12:00:00"}
//! PUT  /api/v1/users/{userId}/votes/{voteId}  {"restaurantId":9,"dateTime":"2026-10-19T10:59:00"}
//! GET  /api/v1/users/{userId}/votes?startDate=2026-10-01&endDate=2026-10-19
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    CastVoteRequest, ChangeVoteRequest, ListVotesBetweenRequest, ListVotesRequest,
};
use crate::domain::{Error, RestaurantId, Vote, VoteDraft, VoteWriteOutcome};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, parse_optional_date, parse_restaurant_id, parse_user_id, parse_vote_id,
};

const USER_ID: FieldName = FieldName::new("userId");
const VOTE_ID: FieldName = FieldName::new("voteId");
const RESTAURANT_ID: FieldName = FieldName::new("restaurantId");

/// Body for casting or changing a vote. Both fields are validated by the
/// vote service, so either may be omitted here.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    #[schema(example = 5)]
    pub restaurant_id: Option<i32>,
    #[schema(value_type = Option<String>, example = "2026-10-19T10:30:00")]
    pub date_time: Option<NaiveDateTime>,
}

impl VoteRequest {
    fn restaurant_id(&self) -> Result<Option<RestaurantId>, Error> {
        self.restaurant_id
            .map(|raw| parse_restaurant_id(raw, RESTAURANT_ID))
            .transpose()
    }
}

/// Optional inclusive date range for vote history.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VoteRangeQuery {
    /// First day, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: Option<String>,
}

fn saved_or_error(outcome: VoteWriteOutcome) -> Result<Vote, Error> {
    match outcome {
        VoteWriteOutcome::Saved(vote) => Ok(vote),
        VoteWriteOutcome::NotFound(id) => Err(Error::not_found(format!("vote {id} not found"))),
        VoteWriteOutcome::NotOwned(id) => Err(Error::forbidden(format!(
            "vote {id} belongs to another user"
        ))),
    }
}

/// Cast today's vote.
#[utoipa::path(
    post,
    path = "/api/v1/users/{userId}/votes",
    params(("userId" = i32, Path, description = "Voting user")),
    request_body = VoteRequest,
    responses(
        (status = 201, description = "Vote stored", body = Vote),
        (status = 400, description = "Missing input", body = Error),
        (status = 404, description = "Unknown user or restaurant", body = Error),
        (status = 409, description = "Already voted today", body = Error),
        (status = 422, description = "Vote is not for today", body = Error)
    ),
    tags = ["votes"],
    operation_id = "castVote"
)]
#[post("/users/{userId}/votes")]
pub async fn cast_vote(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(path.into_inner(), USER_ID)?;
    let body = payload.into_inner();
    let request = CastVoteRequest {
        vote: body.date_time.map(VoteDraft::new),
        restaurant_id: body.restaurant_id()?,
        user_id: Some(user_id),
    };
    let vote = saved_or_error(state.votes.cast_vote(request).await?)?;
    Ok(HttpResponse::Created().json(vote))
}

/// Change an existing vote before the daily cutoff.
#[utoipa::path(
    put,
    path = "/api/v1/users/{userId}/votes/{voteId}",
    params(
        ("userId" = i32, Path, description = "Voting user"),
        ("voteId" = i32, Path, description = "Vote to change")
    ),
    request_body = VoteRequest,
    responses(
        (status = 200, description = "Vote updated", body = Vote),
        (status = 400, description = "Missing input", body = Error),
        (status = 403, description = "Vote belongs to another user", body = Error),
        (status = 404, description = "Unknown vote, user or restaurant", body = Error),
        (status = 422, description = "Past the cutoff or not today", body = Error)
    ),
    tags = ["votes"],
    operation_id = "changeVote"
)]
#[put("/users/{userId}/votes/{voteId}")]
pub async fn change_vote(
    state: web::Data<HttpState>,
    path: web::Path<(i32, i32)>,
    payload: web::Json<VoteRequest>,
) -> ApiResult<web::Json<Vote>> {
    let (raw_user, raw_vote) = path.into_inner();
    let user_id = parse_user_id(raw_user, USER_ID)?;
    let vote_id = parse_vote_id(raw_vote, VOTE_ID)?;
    let body = payload.into_inner();
    let request = ChangeVoteRequest {
        vote: body
            .date_time
            .map(|date_time| VoteDraft::existing(vote_id, date_time)),
        restaurant_id: body.restaurant_id()?,
        user_id: Some(user_id),
    };
    let vote = saved_or_error(state.votes.change_vote(request).await?)?;
    Ok(web::Json(vote))
}

/// List a user's votes, newest first, optionally within an inclusive range.
///
/// Supplying only one of `startDate` and `endDate` is an invalid request.
#[utoipa::path(
    get,
    path = "/api/v1/users/{userId}/votes",
    params(("userId" = i32, Path, description = "Voting user"), VoteRangeQuery),
    responses(
        (status = 200, description = "Votes", body = [Vote]),
        (status = 400, description = "Invalid range", body = Error)
    ),
    tags = ["votes"],
    operation_id = "listVotes"
)]
#[get("/users/{userId}/votes")]
pub async fn list_votes(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<VoteRangeQuery>,
) -> ApiResult<web::Json<Vec<Vote>>> {
    let user_id = parse_user_id(path.into_inner(), USER_ID)?;
    let range = query.into_inner();
    let start_date =
        parse_optional_date(range.start_date.as_deref(), FieldName::new("startDate"))?;
    let end_date = parse_optional_date(range.end_date.as_deref(), FieldName::new("endDate"))?;

    let votes = if start_date.is_none() && end_date.is_none() {
        state
            .votes_query
            .list_votes(ListVotesRequest {
                user_id: Some(user_id),
            })
            .await?
    } else {
        state
            .votes_query
            .list_votes_between(ListVotesBetweenRequest {
                start_date,
                end_date,
                user_id: Some(user_id),
            })
            .await?
    };
    Ok(web::Json(votes))
}

#[cfg(test)]
#[path = "votes_tests.rs"]
mod tests;
