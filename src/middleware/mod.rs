//! Request gates.
//!
//! - [`auth`]: bearer token authentication ([`auth::AuthUser`], [`auth::authenticate`])
//! - [`role`]: role gates layered after authentication ([`role::require_teacher`])
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. Missing header or another scheme: 401, token never inspected
//! 3. Token fails verification: 401 with a distinct message
//! 4. Role gate (where the route has one): 403 on mismatch
//! 5. Handler runs with [`auth::AuthUser`] available as an extractor

pub mod auth;
pub mod role;
