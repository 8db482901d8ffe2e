//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    RestaurantsCommand, RestaurantsQuery, UsersCommand, UsersQuery, VotesCommand, VotesQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub restaurants: Arc<dyn RestaurantsCommand>,
    pub restaurants_query: Arc<dyn RestaurantsQuery>,
    pub votes: Arc<dyn VotesCommand>,
    pub votes_query: Arc<dyn VotesQuery>,
}

impl HttpState {
    /// Build state from services that each implement a command/query pair.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use lunchvote::domain::{RestaurantService, UserService, VoteService};
    /// use lunchvote::inbound::http::state::HttpState;
    /// use lunchvote::outbound::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let clock = Arc::new(DefaultClock);
    /// let state = HttpState::from_services(
    ///     Arc::new(UserService::new(store.clone(), clock.clone())),
    ///     Arc::new(RestaurantService::new(store.clone())),
    ///     Arc::new(VoteService::new(store.clone(), store.clone(), store, clock)),
    /// );
    /// let _votes = state.votes.clone();
    /// ```
    pub fn from_services<U, R, V>(users: Arc<U>, restaurants: Arc<R>, votes: Arc<V>) -> Self
    where
        U: UsersCommand + UsersQuery + 'static,
        R: RestaurantsCommand + RestaurantsQuery + 'static,
        V: VotesCommand + VotesQuery + 'static,
    {
        Self {
            users: users.clone(),
            users_query: users,
            restaurants: restaurants.clone(),
            restaurants_query: restaurants,
            votes: votes.clone(),
            votes_query: votes,
        }
    }
}
