//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, Role, User, UserDraft, UserId, UserName, UserValidationError};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Unique constraint on `users.email`, named in the migrations.
const EMAIL_CONSTRAINT: &str = "users_email_key";

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.into_message())
}

/// Map Diesel errors, reporting email uniqueness violations against `email`.
fn map_diesel_error(error: diesel::result::Error, email: Option<&Email>) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(EMAIL_CONSTRAINT) =>
        {
            let email = email.map(ToString::to_string).unwrap_or_default();
            UserPersistenceError::duplicate_email(email)
        }
        DieselFailure::UniqueViolation { .. } => {
            UserPersistenceError::query("unique constraint violated")
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            UserPersistenceError::query("foreign key constraint violated")
        }
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn map_read_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(error, None)
}

fn roles_to_db(roles: &BTreeSet<Role>) -> Vec<String> {
    roles.iter().map(|role| role.as_str().to_owned()).collect()
}

/// Convert a stored row into a domain user, rejecting corrupt data.
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |err: UserValidationError| {
        UserPersistenceError::query(format!("invalid user row {}: {err}", row.id))
    };
    let id = UserId::new(row.id).map_err(corrupt)?;
    let name = UserName::new(row.name.as_str()).map_err(corrupt)?;
    let email = Email::new(row.email.as_str()).map_err(corrupt)?;
    let roles = row
        .roles
        .iter()
        .map(|role| role.parse::<Role>())
        .collect::<Result<BTreeSet<_>, _>>()
        .map_err(corrupt)?;
    if roles.is_empty() {
        return Err(UserPersistenceError::query(format!(
            "invalid user row {}: no roles stored",
            row.id
        )));
    }
    Ok(User {
        id,
        name,
        email,
        roles,
        enabled: row.enabled,
        registered: row.registered,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(
        &self,
        draft: &UserDraft,
        registered: DateTime<Utc>,
    ) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewUserRow {
            name: draft.name.as_ref(),
            email: draft.email.as_ref(),
            roles: roles_to_db(&draft.roles),
            enabled: draft.enabled,
            registered,
        };
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(&draft.email)))?;

        row_to_user(stored)
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserUpdate {
            name: user.name.as_ref(),
            email: user.email.as_ref(),
            roles: roles_to_db(&user.roles),
            enabled: user.enabled,
        };
        let updated_rows = diesel::update(users::table.find(user.id.get()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(&user.email)))?;

        Ok(updated_rows > 0)
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted_rows = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(deleted_rows > 0)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::email.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        rows.into_iter().map(row_to_user).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> UserRow {
        UserRow {
            id: 3,
            name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            roles: vec!["admin".to_owned(), "user".to_owned()],
            enabled: true,
            registered: DateTime::parse_from_rfc3339("2026-10-19T08:00:00Z")
                .expect("valid timestamp")
                .with_timezone(&Utc),
        }
    }

    #[rstest]
    fn row_converts_to_domain_user(row: UserRow) {
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id.get(), 3);
        assert_eq!(user.roles, BTreeSet::from([Role::User, Role::Admin]));
    }

    #[rstest]
    fn unknown_role_is_a_query_error(mut row: UserRow) {
        row.roles = vec!["owner".to_owned()];
        let error = row_to_user(row).expect_err("corrupt row");
        assert!(matches!(error, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn empty_roles_are_a_query_error(mut row: UserRow) {
        row.roles.clear();
        assert!(row_to_user(row).is_err());
    }

    #[rstest]
    fn roles_are_stored_by_name() {
        let roles = BTreeSet::from([Role::Admin, Role::User]);
        assert_eq!(roles_to_db(&roles), vec!["user", "admin"]);
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::checkout("connection refused"));
        assert_eq!(error, UserPersistenceError::connection("connection refused"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let error = map_read_error(diesel::result::Error::NotFound);
        assert_eq!(error, UserPersistenceError::query("record not found"));
    }
}
