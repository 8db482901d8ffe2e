//! Users API handlers.
//!
//! ```text
//! POST   /api/v1/users              {"name":"Ada","email":"ada@example.com"}
//! GET    /api/v1/users
//! GET    /api/v1/users/by-email?email=ada@example.com
//! GET    /api/v1/users/{id}
//! PUT    /api/v1/users/{id}         {"name":"Ada","email":"ada@example.com","roles":["user"]}
//! DELETE /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Email, Error, Role, User, UserDraft, UserName, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

const USER_ID: FieldName = FieldName::new("id");

/// Body for creating or replacing a user.
///
/// `roles` and `enabled` are optional: on create they default to `["user"]`
/// and `true`; on update the stored values are kept.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Query for `GET /api/v1/users/by-email`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct EmailQuery {
    pub email: String,
}

fn validation_error(field: &str, err: &UserValidationError) -> Error {
    let code = match err {
        UserValidationError::InvalidId => "invalid_id",
        UserValidationError::EmptyName => "empty_name",
        UserValidationError::NameTooLong { .. } => "name_too_long",
        UserValidationError::EmptyEmail => "empty_email",
        UserValidationError::EmailTooLong { .. } => "email_too_long",
        UserValidationError::MalformedEmail => "malformed_email",
        UserValidationError::UnknownRole { .. } => "unknown_role",
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

fn parse_email(raw: String) -> Result<Email, Error> {
    Email::new(raw).map_err(|err| validation_error("email", &err))
}

fn parse_roles(raw: Vec<String>) -> Result<Vec<Role>, Error> {
    raw.iter()
        .map(|role| role.parse::<Role>())
        .collect::<Result<_, _>>()
        .map_err(|err| validation_error("roles", &err))
}

impl TryFrom<UserRequest> for UserDraft {
    type Error = Error;

    fn try_from(value: UserRequest) -> Result<Self, Self::Error> {
        let name = UserName::new(value.name).map_err(|err| validation_error("name", &err))?;
        let mut draft = Self::new(name, parse_email(value.email)?);
        if let Some(roles) = value.roles {
            draft = draft.with_roles(parse_roles(roles)?);
        }
        if let Some(enabled) = value.enabled {
            draft = draft.with_enabled(enabled);
        }
        Ok(draft)
    }
}

/// Apply a replacement body to the stored user, keeping omitted fields.
fn apply_update(mut user: User, request: UserRequest) -> Result<User, Error> {
    user.name = UserName::new(request.name).map_err(|err| validation_error("name", &err))?;
    user.email = parse_email(request.email)?;
    if let Some(roles) = request.roles {
        user.roles = parse_roles(roles)?.into_iter().collect();
    }
    if let Some(enabled) = request.enabled {
        user.enabled = enabled;
    }
    Ok(user)
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let draft = UserDraft::try_from(payload.into_inner())?;
    let user = state.users.create(draft).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List all users ordered by email.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use lunchvote::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [User]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users_query.get_all().await?))
}

/// Look a user up by exact email.
#[utoipa::path(
    get,
    path = "/api/v1/users/by-email",
    params(EmailQuery),
    responses(
        (status = 200, description = "User", body = User),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No user with that email", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserByEmail"
)]
#[get("/users/by-email")]
pub async fn get_user_by_email(
    state: web::Data<HttpState>,
    query: web::Query<EmailQuery>,
) -> ApiResult<web::Json<User>> {
    let email = parse_email(query.into_inner().email)?;
    Ok(web::Json(state.users_query.get_by_email(&email).await?))
}

/// Fetch a user by id.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User", body = User),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(path.into_inner(), USER_ID)?;
    Ok(web::Json(state.users_query.get(id).await?))
}

/// Replace a user's profile.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    request_body = UserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Not found", body = Error),
        (status = 409, description = "Email already registered", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner(), USER_ID)?;
    let current = state.users_query.get(id).await?;
    let user = apply_update(current, payload.into_inner())?;
    state.users.update(user).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a user and their votes.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "Not found", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(path.into_inner(), USER_ID)?;
    state.users.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests;
