//! Session token claims.

use coursebook_core::AppError;
use coursebook_models::{Role, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims embedded in a session token.
///
/// Identity and role travel in the token, so authorization decisions need no
/// store lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub role: Role,
    /// Expiration, Unix seconds
    pub exp: i64,
    /// Issued-at, Unix seconds
    pub iat: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub
            .parse()
            .map_err(|_| AppError::unauthorized(crate::jwt::INVALID_TOKEN_MESSAGE))
    }
}
