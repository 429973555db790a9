//! In-process backend.
//!
//! Keeps both collections behind one `RwLock`, so every trait method is a
//! single atomic step. Enforces the same uniqueness and validation rules as
//! the PostgreSQL schema. Used by the test suites and by
//! `STORAGE_BACKEND=memory`.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use coursebook_models::{
    Course, CourseDraft, CourseId, CoursePatch, NewUser, UserField, UserId, UserRecord,
};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{CourseStore, UserStore};

#[derive(Debug, Default)]
struct Tables {
    courses: Vec<Course>,
    users: Vec<UserRecord>,
}

impl Tables {
    fn courses_for(&self, ids: &[CourseId]) -> Vec<Course> {
        ids.iter()
            .filter_map(|id| self.courses.iter().find(|c| c.id == *id).cloned())
            .collect()
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn create(&self, draft: CourseDraft) -> StoreResult<Course> {
        draft.check()?;
        let course = Course::from_draft(CourseId::new(), draft);
        self.tables.write().await.courses.push(course.clone());
        Ok(course)
    }

    async fn find_all(&self) -> StoreResult<Vec<Course>> {
        Ok(self.tables.read().await.courses.clone())
    }

    async fn find_by_id(&self, id: CourseId) -> StoreResult<Option<Course>> {
        let tables = self.tables.read().await;
        Ok(tables.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> StoreResult<Vec<Course>> {
        Ok(self.tables.read().await.courses_for(ids))
    }

    async fn update_by_id(&self, id: CourseId, patch: CoursePatch) -> StoreResult<Option<Course>> {
        let mut tables = self.tables.write().await;
        let Some(existing) = tables.courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };

        let merged = patch.apply(existing);
        merged.check()?;

        *existing = Course::from_draft(id, merged);
        Ok(Some(existing.clone()))
    }

    async fn delete_by_id(&self, id: CourseId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.courses.len();
        tables.courses.retain(|c| c.id != id);
        if tables.courses.len() == before {
            return Ok(false);
        }

        for user in tables.users.iter_mut() {
            user.schedule.retain(|course_id| *course_id != id);
        }
        Ok(true)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, user: NewUser) -> StoreResult<UserRecord> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation("users_username_key".to_string()));
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation("users_email_key".to_string()));
        }

        let record = UserRecord {
            id: UserId::new(),
            username: user.username,
            email: user.email,
            role: user.role,
            password_hash: user.password_hash,
            created_at: Utc::now(),
            schedule: Vec::new(),
        };
        tables.users.push(record.clone());
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<UserRecord>> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_field(&self, field: UserField) -> StoreResult<Option<UserRecord>> {
        let tables = self.tables.read().await;
        let found = match field {
            UserField::Username(username) => tables.users.iter().find(|u| u.username == username),
            UserField::Email(email) => tables.users.iter().find(|u| u.email == email),
        };
        Ok(found.cloned())
    }

    async fn update_schedule(
        &self,
        id: UserId,
        schedule: &[CourseId],
    ) -> StoreResult<Option<UserRecord>> {
        let mut tables = self.tables.write().await;
        let Some(user) = tables.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.schedule = schedule.to_vec();
        Ok(Some(user.clone()))
    }

    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }

    async fn dereference_schedule(&self, user: &UserRecord) -> StoreResult<Vec<Course>> {
        Ok(self.tables.read().await.courses_for(&user.schedule))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_models::Role;

    fn draft(number: i32, credits: i32) -> CourseDraft {
        CourseDraft {
            name: "Data Structures".to_string(),
            subject: "CS".to_string(),
            number,
            description: Some("Lists, trees, graphs".to_string()),
            credits,
        }
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "$2b$10$hash".to_string(),
            role: Role::Student,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_course() {
        let store = MemoryStore::new();
        let course = CourseStore::create(&store, draft(999, 5)).await.unwrap();

        let found = CourseStore::find_by_id(&store, course.id).await.unwrap();
        assert_eq!(found, Some(course));
    }

    #[tokio::test]
    async fn test_invalid_course_is_not_stored() {
        let store = MemoryStore::new();
        for (number, credits) in [(1000, 3), (-1, 3), (100, 0), (100, 6)] {
            let err = CourseStore::create(&store, draft(number, credits))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
        }
        assert!(CourseStore::find_all(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_and_revalidates() {
        let store = MemoryStore::new();
        let course = CourseStore::create(&store, draft(101, 3)).await.unwrap();

        let updated = store
            .update_by_id(
                course.id,
                CoursePatch {
                    name: Some(Some("Algorithms".to_string())),
                    ..CoursePatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Algorithms");
        assert_eq!(updated.number, 101);

        let err = store
            .update_by_id(
                course.id,
                CoursePatch {
                    credits: Some(9),
                    ..CoursePatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let stored = CourseStore::find_by_id(&store, course.id).await.unwrap().unwrap();
        assert_eq!(stored.credits, 3);
    }

    #[tokio::test]
    async fn test_update_unknown_course() {
        let store = MemoryStore::new();
        let result = store
            .update_by_id(CourseId::new(), CoursePatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_or_email_rejected() {
        let store = MemoryStore::new();
        UserStore::create(&store, new_user("ada", "ada@example.com"))
            .await
            .unwrap();

        let same_name = UserStore::create(&store, new_user("ada", "x@example.com")).await;
        assert!(matches!(same_name, Err(StoreError::UniqueViolation(_))));

        let same_email = UserStore::create(&store, new_user("other", "ada@example.com")).await;
        assert!(matches!(same_email, Err(StoreError::UniqueViolation(_))));

        assert_eq!(UserStore::find_all(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_field() {
        let store = MemoryStore::new();
        let user = UserStore::create(&store, new_user("ada", "ada@example.com"))
            .await
            .unwrap();

        let by_name = store
            .find_by_field(UserField::Username("ada".to_string()))
            .await
            .unwrap();
        let by_email = store
            .find_by_field(UserField::Email("ada@example.com".to_string()))
            .await
            .unwrap();
        assert_eq!(by_name.map(|u| u.id), Some(user.id));
        assert_eq!(by_email.map(|u| u.id), Some(user.id));

        let missing = store
            .find_by_field(UserField::Username("nobody".to_string()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_dereference_keeps_order_and_skips_missing() {
        let store = MemoryStore::new();
        let a = CourseStore::create(&store, draft(1, 1)).await.unwrap();
        let b = CourseStore::create(&store, draft(2, 2)).await.unwrap();
        let user = UserStore::create(&store, new_user("ada", "ada@example.com"))
            .await
            .unwrap();

        let user = store
            .update_schedule(user.id, &[b.id, CourseId::new(), a.id])
            .await
            .unwrap()
            .unwrap();

        let courses = store.dereference_schedule(&user).await.unwrap();
        assert_eq!(
            courses.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![b.id, a.id]
        );
    }

    #[tokio::test]
    async fn test_delete_course_removes_it_from_schedules() {
        let store = MemoryStore::new();
        let a = CourseStore::create(&store, draft(1, 1)).await.unwrap();
        let b = CourseStore::create(&store, draft(2, 2)).await.unwrap();
        let user = UserStore::create(&store, new_user("ada", "ada@example.com"))
            .await
            .unwrap();
        store.update_schedule(user.id, &[a.id, b.id]).await.unwrap();

        assert!(CourseStore::delete_by_id(&store, a.id).await.unwrap());
        assert!(!CourseStore::delete_by_id(&store, a.id).await.unwrap());

        let user = UserStore::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert_eq!(user.schedule, vec![b.id]);
    }

    #[tokio::test]
    async fn test_update_schedule_unknown_user() {
        let store = MemoryStore::new();
        let result = store.update_schedule(UserId::new(), &[]).await.unwrap();
        assert!(result.is_none());
    }
}
