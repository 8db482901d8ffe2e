//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST endpoint of the inbound HTTP layer along
//! with the domain payloads they exchange. Swagger UI serves it in debug
//! builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Restaurant, Role, User, Vote};
use crate::inbound::http::restaurants::RestaurantRequest;
use crate::inbound::http::users::UserRequest;
use crate::inbound::http::votes::VoteRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lunch vote API",
        description = "Users vote once a day for where to have lunch and may change their mind until the daily cutoff."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user_by_email,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::restaurants::create_restaurant,
        crate::inbound::http::restaurants::list_restaurants,
        crate::inbound::http::restaurants::get_restaurant,
        crate::inbound::http::votes::cast_vote,
        crate::inbound::http::votes::change_vote,
        crate::inbound::http::votes::list_votes,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Role,
        Restaurant,
        Vote,
        Error,
        ErrorCode,
        UserRequest,
        RestaurantRequest,
        VoteRequest
    )),
    tags(
        (name = "users", description = "User registration and lookup"),
        (name = "restaurants", description = "Restaurants available for voting"),
        (name = "votes", description = "Daily lunch votes"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
