//! Restaurants API handlers.
//!
//! ```text
//! POST /api/v1/restaurants {"name":"Chez Panisse"}
//! GET  /api/v1/restaurants
//! GET  /api/v1/restaurants/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, Restaurant, RestaurantDraft, RestaurantName, RestaurantValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_restaurant_id};

/// Body for `POST /api/v1/restaurants`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    #[schema(example = "Chez Panisse")]
    pub name: String,
}

impl TryFrom<RestaurantRequest> for RestaurantDraft {
    type Error = Error;

    fn try_from(value: RestaurantRequest) -> Result<Self, Self::Error> {
        let name = RestaurantName::new(value.name).map_err(|err| {
            let code = match err {
                RestaurantValidationError::NameTooLong { .. } => "name_too_long",
                _ => "empty_name",
            };
            Error::invalid_request(err.to_string())
                .with_details(json!({ "field": "name", "code": code }))
        })?;
        Ok(Self { name })
    }
}

/// Register a restaurant.
#[utoipa::path(
    post,
    path = "/api/v1/restaurants",
    request_body = RestaurantRequest,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Name already taken", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "createRestaurant"
)]
#[post("/restaurants")]
pub async fn create_restaurant(
    state: web::Data<HttpState>,
    payload: web::Json<RestaurantRequest>,
) -> ApiResult<HttpResponse> {
    let draft = RestaurantDraft::try_from(payload.into_inner())?;
    let restaurant = state.restaurants.create(draft).await?;
    Ok(HttpResponse::Created().json(restaurant))
}

/// List restaurants ordered by name.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants",
    responses((status = 200, description = "Restaurants", body = [Restaurant])),
    tags = ["restaurants"],
    operation_id = "listRestaurants"
)]
#[get("/restaurants")]
pub async fn list_restaurants(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Restaurant>>> {
    Ok(web::Json(state.restaurants_query.get_all().await?))
}

/// Fetch a restaurant by id.
#[utoipa::path(
    get,
    path = "/api/v1/restaurants/{id}",
    params(("id" = i32, Path, description = "Restaurant id")),
    responses(
        (status = 200, description = "Restaurant", body = Restaurant),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["restaurants"],
    operation_id = "getRestaurant"
)]
#[get("/restaurants/{id}")]
pub async fn get_restaurant(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<Restaurant>> {
    let id = parse_restaurant_id(path.into_inner(), FieldName::new("id"))?;
    Ok(web::Json(state.restaurants_query.get(id).await?))
}
