//! PostgreSQL-backed `RestaurantRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::{
    Restaurant, RestaurantDraft, RestaurantId, RestaurantName, RestaurantValidationError,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewRestaurantRow, RestaurantRow};
use super::pool::{DbPool, PoolError};
use super::schema::restaurants;

const NAME_CONSTRAINT: &str = "restaurants_name_key";

#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RestaurantPersistenceError {
    RestaurantPersistenceError::connection(error.into_message())
}

fn map_diesel_error(
    error: diesel::result::Error,
    name: Option<&RestaurantName>,
) -> RestaurantPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => RestaurantPersistenceError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(NAME_CONSTRAINT) =>
        {
            let name = name.map(ToString::to_string).unwrap_or_default();
            RestaurantPersistenceError::duplicate_name(name)
        }
        DieselFailure::UniqueViolation { .. } | DieselFailure::ForeignKeyViolation { .. } => {
            RestaurantPersistenceError::query("constraint violated")
        }
        DieselFailure::Query(message) => RestaurantPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> RestaurantPersistenceError {
    map_diesel_error(error, None)
}

fn row_to_restaurant(row: RestaurantRow) -> Result<Restaurant, RestaurantPersistenceError> {
    let corrupt = |err: RestaurantValidationError| {
        RestaurantPersistenceError::query(format!("invalid restaurant row {}: {err}", row.id))
    };
    Ok(Restaurant {
        id: RestaurantId::new(row.id).map_err(corrupt)?,
        name: RestaurantName::new(row.name.as_str()).map_err(corrupt)?,
    })
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn create(
        &self,
        draft: &RestaurantDraft,
    ) -> Result<Restaurant, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let stored: RestaurantRow = diesel::insert_into(restaurants::table)
            .values(&NewRestaurantRow {
                name: draft.name.as_ref(),
            })
            .returning(RestaurantRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(&draft.name)))?;

        row_to_restaurant(stored)
    }

    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RestaurantRow> = restaurants::table
            .find(id.get())
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_restaurant).transpose()
    }

    async fn list(&self) -> Result<Vec<Restaurant>, RestaurantPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RestaurantRow> = restaurants::table
            .order((restaurants::name.asc(), restaurants::id.asc()))
            .select(RestaurantRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_restaurant).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_converts_to_domain_restaurant() {
        let restaurant = row_to_restaurant(RestaurantRow {
            id: 5,
            name: "Noma".to_owned(),
        })
        .expect("valid row");
        assert_eq!(restaurant.id.get(), 5);
        assert_eq!(restaurant.name.as_ref(), "Noma");
    }

    #[rstest]
    fn blank_name_is_a_query_error() {
        let error = row_to_restaurant(RestaurantRow {
            id: 5,
            name: " ".to_owned(),
        })
        .expect_err("corrupt row");
        assert!(matches!(error, RestaurantPersistenceError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::build("bad url"));
        assert_eq!(error, RestaurantPersistenceError::connection("bad url"));
    }
}
