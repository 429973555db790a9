//! # Coursebook Core
//!
//! Core types shared by every Coursebook crate.
//!
//! - [`errors`]: Application error taxonomy with HTTP response conversion
//! - [`password`]: bcrypt password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use coursebook_core::{AppError, hash_password, verify_password};
//!
//! let hash = hash_password("correct horse battery staple")?;
//! assert!(verify_password("correct horse battery staple", &hash)?);
//!
//! let err = AppError::not_found("Course not found.");
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse, describe_validation_errors};
pub use password::{BCRYPT_COST, hash_password, hash_password_blocking, verify_password, verify_password_blocking};
