//! # Coursebook Auth
//!
//! Session tokens for the Coursebook API.
//!
//! - [`claims`]: the claim set carried by every session token
//! - [`jwt`]: issuing and verifying HS256 tokens
//!
//! # Example
//!
//! ```ignore
//! use coursebook_auth::{create_access_token, verify_token};
//! use coursebook_config::JwtConfig;
//! use coursebook_models::Role;
//!
//! let config = JwtConfig::from_env()?;
//! let token = create_access_token(user_id, Role::Teacher, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, Role::Teacher);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{INVALID_TOKEN_MESSAGE, create_access_token, issue_token, verify_token};
