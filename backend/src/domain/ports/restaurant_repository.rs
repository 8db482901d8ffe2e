//! Port abstraction for restaurant persistence.

use async_trait::async_trait;

use crate::domain::{Restaurant, RestaurantDraft, RestaurantId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by restaurant repository adapters.
    pub enum RestaurantPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "restaurant repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "restaurant repository query failed: {message}",
        /// A restaurant with the same name exists.
        DuplicateName { name: String } => "restaurant {name} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Insert a restaurant and return it with its storage-assigned id.
    async fn create(
        &self,
        draft: &RestaurantDraft,
    ) -> Result<Restaurant, RestaurantPersistenceError>;

    /// Fetch a restaurant by identifier.
    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;

    /// All restaurants ordered by name.
    async fn list(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError>;
}
