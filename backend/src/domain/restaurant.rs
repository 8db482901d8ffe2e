//! Restaurant data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors for restaurant components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RestaurantValidationError {
    #[error("restaurant id must be a positive integer")]
    InvalidId,
    #[error("restaurant name must not be empty")]
    EmptyName,
    #[error("restaurant name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Storage-assigned restaurant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "i32", into = "i32")]
#[schema(value_type = i32, example = 5)]
pub struct RestaurantId(i32);

impl RestaurantId {
    /// Validate and wrap a raw identifier.
    pub fn new(id: i32) -> Result<Self, RestaurantValidationError> {
        if id <= 0 {
            return Err(RestaurantValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<RestaurantId> for i32 {
    fn from(value: RestaurantId) -> Self {
        value.0
    }
}

impl TryFrom<i32> for RestaurantId {
    type Error = RestaurantValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Maximum allowed length for a restaurant name.
pub const RESTAURANT_NAME_MAX: usize = 100;

/// Display name of a restaurant; unique across restaurants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantName(String);

impl RestaurantName {
    /// Validate and construct a [`RestaurantName`]; surrounding whitespace is trimmed.
    pub fn new(name: impl Into<String>) -> Result<Self, RestaurantValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RestaurantValidationError::EmptyName);
        }
        if trimmed.chars().count() > RESTAURANT_NAME_MAX {
            return Err(RestaurantValidationError::NameTooLong {
                max: RESTAURANT_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RestaurantName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RestaurantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<RestaurantName> for String {
    fn from(value: RestaurantName) -> Self {
        value.0
    }
}

impl TryFrom<String> for RestaurantName {
    type Error = RestaurantValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Creation payload for a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantDraft {
    pub name: RestaurantName,
}

/// Stored restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[schema(value_type = i32, example = 5)]
    pub id: RestaurantId,
    #[schema(value_type = String, example = "Chez Panisse")]
    pub name: RestaurantName,
}
