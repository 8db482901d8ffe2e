//! Restaurant domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    RestaurantPersistenceError, RestaurantRepository, RestaurantsCommand, RestaurantsQuery,
};
use crate::domain::{Error, Restaurant, RestaurantDraft, RestaurantId};

fn map_repository_error(error: RestaurantPersistenceError) -> Error {
    match error {
        RestaurantPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("restaurant repository unavailable: {message}"))
        }
        RestaurantPersistenceError::Query { message } => {
            Error::internal(format!("restaurant repository error: {message}"))
        }
        RestaurantPersistenceError::DuplicateName { name } => {
            Error::conflict(format!("restaurant {name} already exists"))
        }
    }
}

/// Restaurant service implementing the restaurant driving ports.
#[derive(Clone)]
pub struct RestaurantService<R> {
    restaurant_repo: Arc<R>,
}

impl<R> RestaurantService<R> {
    pub fn new(restaurant_repo: Arc<R>) -> Self {
        Self { restaurant_repo }
    }
}

#[async_trait]
impl<R> RestaurantsCommand for RestaurantService<R>
where
    R: RestaurantRepository,
{
    async fn create(&self, draft: RestaurantDraft) -> Result<Restaurant, Error> {
        let restaurant = self
            .restaurant_repo
            .create(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(restaurant_id = %restaurant.id, name = %restaurant.name, "restaurant added");
        Ok(restaurant)
    }
}

#[async_trait]
impl<R> RestaurantsQuery for RestaurantService<R>
where
    R: RestaurantRepository,
{
    async fn get(&self, id: RestaurantId) -> Result<Restaurant, Error> {
        self.restaurant_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("restaurant {id} not found")))
    }

    async fn get_all(&self) -> Result<Vec<Restaurant>, Error> {
        self.restaurant_repo.list().await.map_err(map_repository_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::RestaurantName;
    use crate::domain::ports::MockRestaurantRepository;
    use rstest::rstest;

    fn make_service(
        repo: MockRestaurantRepository,
    ) -> RestaurantService<MockRestaurantRepository> {
        RestaurantService::new(Arc::new(repo))
    }

    fn draft(name: &str) -> RestaurantDraft {
        RestaurantDraft {
            name: RestaurantName::new(name).expect("valid name"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn create_returns_stored_restaurant() {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_create().times(1).returning(|draft| {
            Ok(Restaurant {
                id: RestaurantId::new(5).expect("valid id"),
                name: draft.name.clone(),
            })
        });

        let restaurant = make_service(repo)
            .create(draft("Noma"))
            .await
            .expect("create succeeds");

        assert_eq!(restaurant.id.get(), 5);
        assert_eq!(restaurant.name.as_ref(), "Noma");
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_names_conflict() {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_create()
            .times(1)
            .return_once(|_| Err(RestaurantPersistenceError::duplicate_name("Noma")));

        let error = make_service(repo)
            .create(draft("Noma"))
            .await
            .expect_err("conflict");

        assert_eq!(error.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_restaurant_is_not_found() {
        let mut repo = MockRestaurantRepository::new();
        repo.expect_find_by_id().times(1).return_once(|_| Ok(None));

        let error = make_service(repo)
            .get(RestaurantId::new(8).expect("valid id"))
            .await
            .expect_err("missing");

        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "restaurant 8 not found");
    }
}
