//! Enrollment.
//!
//! Enroll and drop read the user, check, then write the whole schedule back.
//! Two concurrent requests for the same user can interleave between the read
//! and the write; the later write wins.

use tracing::{info, instrument};

use coursebook_core::AppError;
use coursebook_db::{CourseStore, UserStore};
use coursebook_models::{Course, CourseId, ScheduleResponse, UserId, UserRecord};
use coursebook_observability::{track_course_dropped, track_course_enrolled};

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found.";
pub const USER_OR_COURSE_NOT_FOUND_MESSAGE: &str = "User or Course not found.";
pub const ALREADY_ENROLLED_MESSAGE: &str = "Already enrolled in this course.";

const ENROLL_ERROR_MESSAGE: &str = "Failed to add course to schedule.";
const DROP_ERROR_MESSAGE: &str = "Failed to drop course from schedule.";

pub struct ScheduleService;

impl ScheduleService {
    #[instrument(skip(users))]
    pub async fn get_schedule(
        users: &dyn UserStore,
        user_id: UserId,
    ) -> Result<Vec<Course>, AppError> {
        const FETCH_ERROR_MESSAGE: &str = "Failed to fetch user schedule.";

        let user = users
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::internal_context(FETCH_ERROR_MESSAGE, e))?
            .ok_or_else(|| AppError::not_found(USER_NOT_FOUND_MESSAGE))?;

        users
            .dereference_schedule(&user)
            .await
            .map_err(|e| AppError::internal_context(FETCH_ERROR_MESSAGE, e))
    }

    #[instrument(skip(courses, users))]
    pub async fn enroll(
        courses: &dyn CourseStore,
        users: &dyn UserStore,
        user_id: UserId,
        course_id: Option<CourseId>,
    ) -> Result<ScheduleResponse, AppError> {
        let (user, course) =
            Self::load_pair(courses, users, user_id, course_id, ENROLL_ERROR_MESSAGE).await?;

        if user.is_enrolled(course.id) {
            return Err(AppError::already_enrolled(ALREADY_ENROLLED_MESSAGE));
        }

        let mut schedule = user.schedule.clone();
        schedule.push(course.id);
        let schedule =
            Self::save_schedule(users, user.id, &schedule, ENROLL_ERROR_MESSAGE).await?;

        track_course_enrolled();
        info!(user_id = %user.id, course_id = %course.id, "Course added to schedule");

        Ok(ScheduleResponse {
            message: format!("Successfully enrolled in {}.", course.code()),
            schedule,
        })
    }

    /// Dropping a course that is not on the schedule succeeds without change.
    #[instrument(skip(courses, users))]
    pub async fn drop_course(
        courses: &dyn CourseStore,
        users: &dyn UserStore,
        user_id: UserId,
        course_id: Option<CourseId>,
    ) -> Result<ScheduleResponse, AppError> {
        let (user, course) =
            Self::load_pair(courses, users, user_id, course_id, DROP_ERROR_MESSAGE).await?;

        let schedule: Vec<CourseId> = user
            .schedule
            .iter()
            .copied()
            .filter(|id| *id != course.id)
            .collect();
        let schedule = Self::save_schedule(users, user.id, &schedule, DROP_ERROR_MESSAGE).await?;

        track_course_dropped();
        info!(user_id = %user.id, course_id = %course.id, "Course dropped from schedule");

        Ok(ScheduleResponse {
            message: format!("Successfully dropped {}.", course.code()),
            schedule,
        })
    }

    async fn load_pair(
        courses: &dyn CourseStore,
        users: &dyn UserStore,
        user_id: UserId,
        course_id: Option<CourseId>,
        error_message: &'static str,
    ) -> Result<(UserRecord, Course), AppError> {
        let user = users
            .find_by_id(user_id)
            .await
            .map_err(|e| AppError::internal_context(error_message, e))?;

        let course = match course_id {
            Some(id) => courses
                .find_by_id(id)
                .await
                .map_err(|e| AppError::internal_context(error_message, e))?,
            None => None,
        };

        match (user, course) {
            (Some(user), Some(course)) => Ok((user, course)),
            _ => Err(AppError::not_found(USER_OR_COURSE_NOT_FOUND_MESSAGE)),
        }
    }

    /// Persists the schedule and returns it dereferenced.
    async fn save_schedule(
        users: &dyn UserStore,
        user_id: UserId,
        schedule: &[CourseId],
        error_message: &'static str,
    ) -> Result<Vec<Course>, AppError> {
        let updated = users
            .update_schedule(user_id, schedule)
            .await
            .map_err(|e| AppError::internal_context(error_message, e))?
            .ok_or_else(|| AppError::not_found(USER_OR_COURSE_NOT_FOUND_MESSAGE))?;

        users
            .dereference_schedule(&updated)
            .await
            .map_err(|e| AppError::internal_context(error_message, e))
    }
}
