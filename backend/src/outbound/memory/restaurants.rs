//! `RestaurantRepository` over the in-memory store.

use async_trait::async_trait;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::{Restaurant, RestaurantDraft, RestaurantId};

use super::{InMemoryStore, next_id};

#[async_trait]
impl RestaurantRepository for InMemoryStore {
    async fn create(
        &self,
        draft: &RestaurantDraft,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let mut state = self.lock();
        if state
            .restaurants
            .values()
            .any(|restaurant| restaurant.name == draft.name)
        {
            return Err(RestaurantPersistenceError::duplicate_name(
                draft.name.to_string(),
            ));
        }
        let raw_id = next_id(&mut state.restaurant_seq);
        let id = RestaurantId::new(raw_id).map_err(|err| {
            RestaurantPersistenceError::query(format!("restaurant sequence exhausted: {err}"))
        })?;
        let restaurant = Restaurant {
            id,
            name: draft.name.clone(),
        };
        state.restaurants.insert(raw_id, restaurant.clone());
        Ok(restaurant)
    }

    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        Ok(self.lock().restaurants.get(&id.get()).cloned())
    }

    async fn list(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut restaurants: Vec<Restaurant> = self.lock().restaurants.values().cloned().collect();
        restaurants.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(restaurants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RestaurantName;
    use rstest::rstest;

    fn draft(name: &str) -> RestaurantDraft {
        RestaurantDraft {
            name: RestaurantName::new(name).expect("valid name"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn names_are_unique_and_listed_in_order() {
        let store = InMemoryStore::new();
        for name in ["Noma", "Chez Panisse"] {
            RestaurantRepository::create(&store, &draft(name))
                .await
                .expect("create");
        }

        let error = RestaurantRepository::create(&store, &draft("Noma"))
            .await
            .expect_err("duplicate");
        assert_eq!(error, RestaurantPersistenceError::duplicate_name("Noma"));

        let names: Vec<String> = RestaurantRepository::list(&store)
            .await
            .expect("list")
            .into_iter()
            .map(|restaurant| restaurant.name.to_string())
            .collect();
        assert_eq!(names, ["Chez Panisse", "Noma"]);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_id_is_absent() {
        let store = InMemoryStore::new();
        let found = RestaurantRepository::find_by_id(&store, RestaurantId::new(9).expect("valid id"))
            .await
            .expect("lookup");
        assert!(found.is_none());
    }
}
