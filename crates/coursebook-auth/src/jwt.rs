//! Issuing and verifying session tokens.
//!
//! Tokens are HS256 JWTs signed with [`JwtConfig::secret`]. Verification
//! rejects malformed tokens, bad signatures and expired tokens with zero
//! leeway; the caller never sees partially trusted claims.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use coursebook_config::JwtConfig;
use coursebook_core::AppError;
use coursebook_models::{Role, UserId};

use crate::claims::Claims;

pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token.";

/// Issues a session token using the configured lifetime.
pub fn create_access_token(
    user_id: UserId,
    role: Role,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    issue_token(user_id, role, jwt_config.token_expiry, jwt_config)
}

/// Issues a token valid for `ttl_secs` from now.
pub fn issue_token(
    user_id: UserId,
    role: Role,
    ttl_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: now + ttl_secs,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized(INVALID_TOKEN_MESSAGE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_core::ErrorKind;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig::new("test-secret-key-at-least-32-characters-long", 3600)
    }

    #[test]
    fn test_verify_token_success() {
        let config = get_test_jwt_config();
        let user_id = UserId::new();

        let token = create_access_token(user_id, Role::Teacher, &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let err = verify_token("invalid-token", &config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthenticationInvalid);
        assert_eq!(err.message(), INVALID_TOKEN_MESSAGE);
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(UserId::new(), Role::Student, &config).unwrap();

        let wrong_config = JwtConfig::new("different-secret-key-at-least-32-characters", 3600);
        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let token = issue_token(UserId::new(), Role::Student, -5, &config).unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthenticationInvalid);
    }

    #[test]
    fn test_verify_token_tampered_payload() {
        let config = get_test_jwt_config();
        let token = create_access_token(UserId::new(), Role::Student, &config).unwrap();

        let forged_claims = Claims {
            sub: UserId::new().to_string(),
            role: Role::Teacher,
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        };
        let forged_payload = encode(
            &Header::new(Algorithm::HS256),
            &forged_claims,
            &EncodingKey::from_secret(b"attacker"),
        )
        .unwrap();

        // original header and signature, attacker's payload
        let original: Vec<&str> = token.split('.').collect();
        let forged: Vec<&str> = forged_payload.split('.').collect();
        let spliced = format!("{}.{}.{}", original[0], forged[1], original[2]);

        assert!(verify_token(&spliced, &config).is_err());
    }
}
