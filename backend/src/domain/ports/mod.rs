//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`) are implemented by domain services and called
//! by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod restaurant_repository;
mod restaurants_command;
mod restaurants_query;
mod user_repository;
mod users_command;
mod users_query;
mod vote_repository;
mod votes_command;
mod votes_query;

#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{RestaurantPersistenceError, RestaurantRepository};
#[cfg(test)]
pub use restaurants_command::MockRestaurantsCommand;
pub use restaurants_command::RestaurantsCommand;
#[cfg(test)]
pub use restaurants_query::MockRestaurantsQuery;
pub use restaurants_query::RestaurantsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
#[cfg(test)]
pub use vote_repository::MockVoteRepository;
pub use vote_repository::{NewVote, VoteChange, VotePersistenceError, VoteRepository, VoteUpdate};
#[cfg(test)]
pub use votes_command::MockVotesCommand;
pub use votes_command::{CastVoteRequest, ChangeVoteRequest, VotesCommand};
#[cfg(test)]
pub use votes_query::MockVotesQuery;
pub use votes_query::{ListVotesBetweenRequest, ListVotesRequest, VotesQuery};
