//! User identity model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserId::new`] and [`User::try_from_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier is empty.
    EmptyId,
    /// The identifier carries leading or trailing whitespace.
    SurroundingWhitespace,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::SurroundingWhitespace => {
                write!(f, "user id must not contain surrounding whitespace")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable, opaque user identifier issued by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    ///
    /// # Examples
    /// ```
    /// use input_blade::domain::UserId;
    ///
    /// let id = UserId::new("u1").expect("valid id");
    /// assert_eq!(id.as_ref(), "u1");
    /// assert!(UserId::new(" u1").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::SurroundingWhitespace);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// The signed-in user as reported by the identity service.
///
/// ## Invariants
/// - `user_id` is non-empty and carries no surrounding whitespace.
///
/// Serialises as `{"userId": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    user_id: UserId,
}

impl User {
    /// Build a [`User`] from a validated identifier.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Fallible constructor validating a raw identifier.
    pub fn try_from_id(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Ok(Self::new(UserId::new(id)?))
    }

    /// Stable user identifier.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    user_id: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            user_id: value.user_id.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserValidationError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        User::try_from_id(value.user_id)
    }
}
