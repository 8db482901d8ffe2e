//! Driving port for restaurant lookups.

use async_trait::async_trait;

use crate::domain::{Error, Restaurant, RestaurantId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantsQuery: Send + Sync {
    /// Fetch one restaurant, failing with not found when absent.
    async fn get(&self, id: RestaurantId) -> Result<Restaurant, Error>;

    /// Every restaurant, ordered by name.
    async fn get_all(&self) -> Result<Vec<Restaurant>, Error>;
}
