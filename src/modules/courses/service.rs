use tracing::{info, instrument};

use coursebook_core::AppError;
use coursebook_db::{CourseStore, StoreError};
use coursebook_models::{Course, CourseDraft, CourseId, CoursePatch};
use coursebook_observability::{track_course_created, track_course_deleted, track_course_updated};

pub const COURSE_NOT_FOUND_MESSAGE: &str = "Course not found.";

pub struct CourseService;

impl CourseService {
    /// Path ids that are not UUIDs cannot name a course.
    pub fn parse_id(raw: &str) -> Result<CourseId, AppError> {
        raw.parse()
            .map_err(|_| AppError::not_found(COURSE_NOT_FOUND_MESSAGE))
    }

    #[instrument(skip(courses))]
    pub async fn list_courses(courses: &dyn CourseStore) -> Result<Vec<Course>, AppError> {
        let all = courses
            .find_all()
            .await
            .map_err(|e| AppError::internal_context("Failed to retrieve courses.", e))?;

        info!(count = all.len(), "Retrieved all courses");
        Ok(all)
    }

    #[instrument(skip(courses))]
    pub async fn create_course(
        courses: &dyn CourseStore,
        draft: CourseDraft,
    ) -> Result<Course, AppError> {
        let course = courses.create(draft).await.map_err(|e| match e {
            StoreError::Validation(detail) => {
                AppError::bad_request("Invalid course data.").with_detail(detail)
            }
            other => AppError::internal_context("Failed to create course.", other),
        })?;

        track_course_created();
        info!(course_id = %course.id, name = %course.name, "New course created");
        Ok(course)
    }

    #[instrument(skip(courses))]
    pub async fn update_course(
        courses: &dyn CourseStore,
        id: CourseId,
        patch: CoursePatch,
    ) -> Result<Course, AppError> {
        let course = courses
            .update_by_id(id, patch)
            .await
            .map_err(|e| match e {
                StoreError::Validation(detail) => {
                    AppError::bad_request("Invalid update data.").with_detail(detail)
                }
                other => AppError::internal_context("Failed to update course.", other),
            })?
            .ok_or_else(|| AppError::not_found(COURSE_NOT_FOUND_MESSAGE))?;

        track_course_updated();
        info!(course_id = %course.id, name = %course.name, "Course updated");
        Ok(course)
    }

    #[instrument(skip(courses))]
    pub async fn delete_course(courses: &dyn CourseStore, id: CourseId) -> Result<(), AppError> {
        let deleted = courses
            .delete_by_id(id)
            .await
            .map_err(|e| AppError::internal_context("Failed to delete course.", e))?;

        if !deleted {
            return Err(AppError::not_found(COURSE_NOT_FOUND_MESSAGE));
        }

        track_course_deleted();
        info!(course_id = %id, "Course deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_core::ErrorKind;
    use coursebook_db::MemoryStore;

    fn draft() -> CourseDraft {
        CourseDraft {
            name: "Organic Chemistry".to_string(),
            subject: "CHEM".to_string(),
            number: 230,
            description: None,
            credits: 4,
        }
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let store = MemoryStore::new();
        let course = CourseService::create_course(&store, draft()).await.unwrap();

        let all = CourseService::list_courses(&store).await.unwrap();
        assert_eq!(all, vec![course]);
    }

    #[tokio::test]
    async fn test_create_out_of_bounds_is_validation_error() {
        let store = MemoryStore::new();
        let err = CourseService::create_course(
            &store,
            CourseDraft {
                credits: 6,
                ..draft()
            },
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message(), "Invalid course data.");
        assert_eq!(err.detail.as_deref(), Some("credits: must be between 1 and 5"));
        assert!(CourseService::list_courses(&store).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = CourseService::update_course(&store, CourseId::new(), CoursePatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message(), COURSE_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_update_merged_violation_is_invalid_update() {
        let store = MemoryStore::new();
        let course = CourseService::create_course(&store, draft()).await.unwrap();

        let err = CourseService::update_course(
            &store,
            course.id,
            CoursePatch {
                number: Some(-3),
                ..CoursePatch::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert_eq!(err.message(), "Invalid update data.");
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = MemoryStore::new();
        let course = CourseService::create_course(&store, draft()).await.unwrap();

        CourseService::delete_course(&store, course.id).await.unwrap();
        let err = CourseService::delete_course(&store, course.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_parse_id() {
        let id = CourseId::new();
        assert_eq!(CourseService::parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(
            CourseService::parse_id("42").unwrap_err().kind,
            ErrorKind::NotFound
        );
    }
}
