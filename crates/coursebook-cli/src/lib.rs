//! # Coursebook CLI
//!
//! Administrative helpers used by the `coursebook-cli` binary. Everything
//! here goes through the [`Gateway`](coursebook_db::Gateway) traits, so it
//! runs against either backend.
//!
//! ```ignore
//! use coursebook_cli::seeder::{SeedConfig, seed_database};
//!
//! let summary = seed_database(&gateway, SeedConfig::new(20, 50)).await?;
//! ```

pub mod accounts;
pub mod seeder;

pub use accounts::create_teacher;
