use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::ids::{CourseId, UserId};
use crate::roles::Role;

/// User as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub schedule: Vec<CourseId>,
}

/// Stored user row, including the bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub schedule: Vec<CourseId>,
}

impl UserRecord {
    pub fn is_enrolled(&self, course_id: CourseId) -> bool {
        self.schedule.contains(&course_id)
    }

    pub fn into_public(self) -> User {
        User {
            id: self.id,
            username: self.username,
            email: self.email,
            role: self.role,
            created_at: self.created_at,
            schedule: self.schedule,
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        record.into_public()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserDto {
    #[validate(length(min = 1, message = "is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
    /// `teacher` or `student`; anything else, including non-strings,
    /// registers a student.
    #[serde(default, deserialize_with = "deserialize_role_text")]
    pub role: Option<String>,
}

/// Keeps the requested role only when it is a JSON string.
fn deserialize_role_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_str().map(str::to_string)))
}

/// A user ready to be stored: password already hashed, role resolved.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Unique lookup keys for users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserField {
    Username(String),
    Email(String),
}
