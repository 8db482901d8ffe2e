//! Builders wiring repositories and services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::info;

use lunchvote::domain::ports::{RestaurantRepository, UserRepository, VoteRepository};
use lunchvote::domain::{RestaurantService, UserService, VoteService, VotingWindow};
use lunchvote::inbound::http::state::HttpState;
use lunchvote::outbound::InMemoryStore;
use lunchvote::outbound::persistence::{
    DieselRestaurantRepository, DieselUserRepository, DieselVoteRepository,
};

use super::ServerConfig;

/// Build the services over one set of repositories.
fn build_services<U, R, V>(
    users: Arc<U>,
    restaurants: Arc<R>,
    votes: Arc<V>,
    clock: Arc<dyn Clock>,
    window: VotingWindow,
) -> HttpState
where
    U: UserRepository + 'static,
    R: RestaurantRepository + 'static,
    V: VoteRepository + 'static,
{
    let vote_service = VoteService::new(votes, users.clone(), restaurants.clone(), clock.clone())
        .with_window(window);
    HttpState::from_services(
        Arc::new(UserService::new(users, clock)),
        Arc::new(RestaurantService::new(restaurants)),
        Arc::new(vote_service),
    )
}

/// Build handler state, backed by PostgreSQL when a pool is configured and
/// by an in-memory store otherwise.
pub(super) fn build_http_state(
    config: &ServerConfig,
    clock: Arc<dyn Clock>,
) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => build_services(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselRestaurantRepository::new(pool.clone())),
            Arc::new(DieselVoteRepository::new(pool.clone())),
            clock,
            config.voting_window,
        ),
        None => {
            info!("no database configured; data is kept in memory");
            let store = Arc::new(InMemoryStore::new());
            build_services(
                store.clone(),
                store.clone(),
                store,
                clock,
                config.voting_window,
            )
        }
    };
    web::Data::new(state)
}

/// Production clock.
pub(super) fn system_clock() -> Arc<dyn Clock> {
    Arc::new(DefaultClock)
}
