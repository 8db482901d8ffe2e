//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers depend on the driving ports bundled in [`state::HttpState`] and
//! never on concrete services or repositories.

pub mod error;
pub mod health;
pub mod restaurants;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;
pub mod votes;

pub use error::ApiResult;
