//! Driving port for restaurant mutations.

use async_trait::async_trait;

use crate::domain::{Error, Restaurant, RestaurantDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantsCommand: Send + Sync {
    /// Register a restaurant; duplicate names are a conflict.
    async fn create(&self, draft: RestaurantDraft) -> Result<Restaurant, Error>;
}
