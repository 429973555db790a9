//! PostgreSQL backend.
//!
//! Uniqueness of username and email and the course bounds are also enforced
//! by the schema (`migrations/`), so a constraint the application misses
//! still surfaces as a typed [`StoreError`](crate::StoreError).

use async_trait::async_trait;
use coursebook_models::{
    Course, CourseDraft, CourseId, CoursePatch, NewUser, UserField, UserId, UserRecord,
};
use sqlx::PgPool;

use crate::error::StoreResult;
use crate::store::{CourseStore, UserStore};

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Deletes every user and course.
    pub async fn clear(&self) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM users").execute(&mut *tx).await?;
        sqlx::query("DELETE FROM courses").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn create(&self, draft: CourseDraft) -> StoreResult<Course> {
        draft.check()?;

        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO courses (id, name, subject, number, description, credits)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, name, subject, number, description, credits",
        )
        .bind(CourseId::new())
        .bind(&draft.name)
        .bind(&draft.subject)
        .bind(draft.number)
        .bind(&draft.description)
        .bind(draft.credits)
        .fetch_one(&self.pool)
        .await?;

        Ok(course)
    }

    async fn find_all(&self) -> StoreResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT id, name, subject, number, description, credits FROM courses",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    async fn find_by_id(&self, id: CourseId) -> StoreResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(
            "SELECT id, name, subject, number, description, credits FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(course)
    }

    async fn find_by_ids(&self, ids: &[CourseId]) -> StoreResult<Vec<Course>> {
        let courses = sqlx::query_as::<_, Course>(
            "SELECT c.id, c.name, c.subject, c.number, c.description, c.credits
             FROM unnest($1::uuid[]) WITH ORDINALITY AS s(id, ord)
             JOIN courses c ON c.id = s.id
             ORDER BY s.ord",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(courses)
    }

    async fn update_by_id(&self, id: CourseId, patch: CoursePatch) -> StoreResult<Option<Course>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Course>(
            "SELECT id, name, subject, number, description, credits
             FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let merged = patch.apply(&existing);
        merged.check()?;

        let course = sqlx::query_as::<_, Course>(
            "UPDATE courses
             SET name = $2, subject = $3, number = $4, description = $5, credits = $6
             WHERE id = $1
             RETURNING id, name, subject, number, description, credits",
        )
        .bind(id)
        .bind(&merged.name)
        .bind(&merged.subject)
        .bind(merged.number)
        .bind(&merged.description)
        .bind(merged.credits)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(course))
    }

    async fn delete_by_id(&self, id: CourseId) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Ok(false);
        }

        let unenrolled = sqlx::query(
            "UPDATE users SET schedule = array_remove(schedule, $1) WHERE $1 = ANY(schedule)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        tracing::debug!(course_id = %id, unenrolled, "course deleted");
        Ok(true)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, user: NewUser) -> StoreResult<UserRecord> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, username, email, role, password_hash)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id, username, email, role, password_hash, created_at, schedule",
        )
        .bind(UserId::new())
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.role)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn find_all(&self) -> StoreResult<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, role, password_hash, created_at, schedule
             FROM users ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, email, role, password_hash, created_at, schedule
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_by_field(&self, field: UserField) -> StoreResult<Option<UserRecord>> {
        let (sql, value) = match field {
            UserField::Username(username) => (
                "SELECT id, username, email, role, password_hash, created_at, schedule
                 FROM users WHERE username = $1",
                username,
            ),
            UserField::Email(email) => (
                "SELECT id, username, email, role, password_hash, created_at, schedule
                 FROM users WHERE email = $1",
                email,
            ),
        };

        let user = sqlx::query_as::<_, UserRecord>(sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_schedule(
        &self,
        id: UserId,
        schedule: &[CourseId],
    ) -> StoreResult<Option<UserRecord>> {
        let user = sqlx::query_as::<_, UserRecord>(
            "UPDATE users SET schedule = $2 WHERE id = $1
             RETURNING id, username, email, role, password_hash, created_at, schedule",
        )
        .bind(id)
        .bind(schedule)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn delete_by_id(&self, id: UserId) -> StoreResult<bool> {
        let deleted = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    async fn dereference_schedule(&self, user: &UserRecord) -> StoreResult<Vec<Course>> {
        CourseStore::find_by_ids(self, &user.schedule).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use coursebook_models::Role;

    fn draft(number: i32) -> CourseDraft {
        CourseDraft {
            name: "Linear Algebra".to_string(),
            subject: "MATH".to_string(),
            number,
            description: None,
            credits: 4,
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

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_course_crud(pool: PgPool) {
        let store = PgStore::new(pool);

        let course = CourseStore::create(&store, draft(221)).await.unwrap();
        assert_eq!(course.number, 221);

        let patch = CoursePatch {
            credits: Some(5),
            ..CoursePatch::default()
        };
        let updated = store.update_by_id(course.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.credits, 5);
        assert_eq!(updated.name, course.name);

        assert!(CourseStore::delete_by_id(&store, course.id).await.unwrap());
        assert!(CourseStore::find_by_id(&store, course.id).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_revalidates_merged_course(pool: PgPool) {
        let store = PgStore::new(pool);
        let course = CourseStore::create(&store, draft(10)).await.unwrap();

        let patch = CoursePatch {
            number: Some(1000),
            ..CoursePatch::default()
        };
        let err = store.update_by_id(course.id, patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let stored = CourseStore::find_by_id(&store, course.id).await.unwrap().unwrap();
        assert_eq!(stored.number, 10);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_duplicate_username_is_unique_violation(pool: PgPool) {
        let store = PgStore::new(pool);
        UserStore::create(&store, new_user("ada", "ada@example.com"))
            .await
            .unwrap();

        let err = UserStore::create(&store, new_user("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
        assert_eq!(UserStore::find_all(&store).await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_schedule_roundtrip_and_cleanup(pool: PgPool) {
        let store = PgStore::new(pool);
        let first = CourseStore::create(&store, draft(1)).await.unwrap();
        let second = CourseStore::create(&store, draft(2)).await.unwrap();
        let user = UserStore::create(&store, new_user("grace", "grace@example.com"))
            .await
            .unwrap();

        let user = store
            .update_schedule(user.id, &[second.id, first.id])
            .await
            .unwrap()
            .unwrap();
        let courses = store.dereference_schedule(&user).await.unwrap();
        assert_eq!(
            courses.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );

        CourseStore::delete_by_id(&store, second.id).await.unwrap();
        let user = UserStore::find_by_id(&store, user.id).await.unwrap().unwrap();
        assert_eq!(user.schedule, vec![first.id]);
    }
}
