//! Gateway traits over the two collections.
//!
//! Handlers only ever see `Arc<dyn CourseStore>` and `Arc<dyn UserStore>`,
//! so the backend is chosen once at startup.

use async_trait::async_trait;
use coursebook_models::{
    Course, CourseDraft, CourseId, CoursePatch, NewUser, UserField, UserId, UserRecord,
};

use crate::error::StoreResult;

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Validates and stores a new course.
    async fn create(&self, draft: CourseDraft) -> StoreResult<Course>;

    async fn find_all(&self) -> StoreResult<Vec<Course>>;

    async fn find_by_id(&self, id: CourseId) -> StoreResult<Option<Course>>;

    /// Courses for `ids` in the given order; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[CourseId]) -> StoreResult<Vec<Course>>;

    /// Merges `patch` onto the stored course and re-validates the result.
    /// `Ok(None)` when no course has that id.
    async fn update_by_id(&self, id: CourseId, patch: CoursePatch) -> StoreResult<Option<Course>>;

    /// Removes the course and pulls its id out of every schedule.
    /// `Ok(false)` when no course has that id.
    async fn delete_by_id(&self, id: CourseId) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new user with an empty schedule. Fails with
    /// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation)
    /// when the username or email is taken.
    async fn create(&self, user: NewUser) -> StoreResult<UserRecord>;

    async fn find_all(&self) -> StoreResult<Vec<UserRecord>>;

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>>;

    async fn find_by_field(&self, field: UserField) -> StoreResult<Option<UserRecord>>;

    /// Replaces the whole schedule in one write.
    async fn update_schedule(
        &self,
        id: UserId,
        schedule: &[CourseId],
    ) -> StoreResult<Option<UserRecord>>;

    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool>;

    /// Resolves the user's schedule to courses, keeping schedule order.
    async fn dereference_schedule(&self, user: &UserRecord) -> StoreResult<Vec<Course>>;
}
