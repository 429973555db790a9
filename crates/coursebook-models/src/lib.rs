//! # Coursebook Models
//!
//! Domain models and DTOs for the Coursebook API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed UUID newtypes for courses and users
//! - [`roles`]: The closed teacher/student role enumeration
//! - [`courses`]: Course records, create/update payloads and the validated draft
//! - [`users`]: User records (public and credential-bearing) and registration payloads
//! - [`auth`]: Login request/response
//! - [`schedule`]: Enrollment payloads and responses
//!
//! # Example
//!
//! ```ignore
//! use coursebook_models::{CourseDraft, CoursePatch, Role};
//!
//! let draft = CourseDraft {
//!     name: "Quantitative Reasoning".to_string(),
//!     subject: "MATH".to_string(),
//!     number: 123,
//!     description: None,
//!     credits: 3,
//! };
//! draft.check()?;
//!
//! assert_eq!(Role::from_registration(Some("admin")), Role::Student);
//! ```

pub mod auth;
pub mod courses;
pub mod ids;
pub mod roles;
pub mod schedule;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse};
pub use courses::{Course, CourseDraft, CoursePatch};
pub use ids::{CourseId, UserId};
pub use roles::Role;
pub use schedule::{ScheduleChangeDto, ScheduleResponse};
pub use users::{NewUser, RegisterUserDto, User, UserField, UserRecord};
