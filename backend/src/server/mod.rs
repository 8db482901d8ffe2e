//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::{build_http_state, system_clock};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use lunchvote::Trace;
#[cfg(debug_assertions)]
use lunchvote::doc::ApiDoc;
use lunchvote::inbound::http::health::{HealthState, live, ready};
use lunchvote::inbound::http::restaurants::{create_restaurant, get_restaurant, list_restaurants};
use lunchvote::inbound::http::state::HttpState;
use lunchvote::inbound::http::users::{
    create_user, delete_user, get_user, get_user_by_email, list_users, update_user,
};
use lunchvote::inbound::http::validation::{json_config, path_config, query_config};
use lunchvote::inbound::http::votes::{cast_vote, change_vote, list_votes};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    // `by-email` must be registered before `{id}`.
    let api = web::scope("/api/v1")
        .service(create_user)
        .service(list_users)
        .service(get_user_by_email)
        .service(get_user)
        .service(update_user)
        .service(delete_user)
        .service(create_restaurant)
        .service(list_restaurants)
        .service(get_restaurant)
        .service(cast_vote)
        .service(change_vote)
        .service(list_votes);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config, system_clock());

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn app_routes_probes_and_api() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        let app = actix_test::init_service(build_app(
            health,
            build_http_state(&config, system_clock()),
        ))
        .await;

        for uri in ["/health/ready", "/health/live", "/api/v1/users", "/api/v1/restaurants"] {
            let response =
                actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                    .await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(response.headers().contains_key("trace-id"), "{uri}");
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn by_email_route_wins_over_id_route() {
        let config = ServerConfig::new(([127, 0, 0, 1], 0).into());
        let app = actix_test::init_service(build_app(
            web::Data::new(HealthState::new()),
            build_http_state(&config, system_clock()),
        ))
        .await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/v1/users/by-email?email=nobody@example.com")
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = actix_test::read_body_json(response).await;
        assert_eq!(
            body.get("message").and_then(serde_json::Value::as_str),
            Some("no user registered with email nobody@example.com")
        );
    }
}
