//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use chrono::NaiveDateTime;
use serde_json::Value;

use crate::domain::test_clock::clock_at;
use crate::domain::{RestaurantService, UserService, VoteService};
use crate::middleware::Trace;
use crate::outbound::InMemoryStore;

use super::state::HttpState;
use super::validation::{json_config, path_config, query_config};

/// Handler state over a fresh in-memory store with the clock frozen at `now`.
pub(crate) fn memory_state(now: NaiveDateTime) -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    let clock = clock_at(now);
    HttpState::from_services(
        Arc::new(UserService::new(store.clone(), clock.clone())),
        Arc::new(RestaurantService::new(store.clone())),
        Arc::new(VoteService::new(store.clone(), store.clone(), store, clock)),
    )
}

/// App skeleton with the extractor configuration used in production.
pub(crate) fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
}

/// Send `request` and return the status with the JSON body, `Null` when empty.
pub(crate) async fn send<S>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}
