//! Fake data for development databases.

mod courses;
mod users;

use std::time::Instant;

use coursebook_core::hash_password_blocking;
use coursebook_db::Gateway;

pub use courses::generate_courses;
pub use users::generate_students;

/// Password given to every seeded student.
pub const SEED_PASSWORD: &str = "password123";

#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub courses: usize,
    pub students: usize,
}

impl SeedConfig {
    pub fn new(courses: usize, students: usize) -> Self {
        Self { courses, students }
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self::new(20, 50)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub courses: usize,
    pub students: usize,
    /// Generated students whose username or email collided with an existing one.
    pub skipped_students: usize,
}

pub async fn seed_database(gateway: &Gateway, config: SeedConfig) -> anyhow::Result<SeedSummary> {
    let start = Instant::now();
    let mut summary = SeedSummary::default();

    for draft in generate_courses(config.courses) {
        gateway.courses.create(draft).await?;
        summary.courses += 1;
    }

    let password_hash = hash_password_blocking(SEED_PASSWORD.to_string())
        .await
        .map_err(|e| anyhow::anyhow!(e.message()))?;

    for student in generate_students(config.students, &password_hash) {
        match gateway.users.create(student).await {
            Ok(_) => summary.students += 1,
            Err(coursebook_db::StoreError::UniqueViolation(_)) => summary.skipped_students += 1,
            Err(e) => return Err(e.into()),
        }
    }

    println!(
        "Seeded {} courses and {} students in {:.2?}",
        summary.courses,
        summary.students,
        start.elapsed()
    );
    Ok(summary)
}
