use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use coursebook_core::{AppError, ErrorResponse};
use coursebook_models::{Course, CourseDraft, CoursePatch};

use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List the full catalog
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses", body = Vec<Course>),
        (status = 500, description = "Failed to retrieve courses", body = ErrorResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list_courses(state.courses.as_ref()).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseDraft,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 400, description = "Invalid course data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(draft): ValidatedJson<CourseDraft>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(state.courses.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    request_body = CoursePatch,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 400, description = "Invalid update data", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<CoursePatch>,
) -> Result<Json<Course>, AppError> {
    let id = CourseService::parse_id(&id)?;
    let course = CourseService::update_course(state.courses.as_ref(), id, patch).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = String, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Teacher role required", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 500, description = "Failed to delete course", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = CourseService::parse_id(&id)?;
    CourseService::delete_course(state.courses.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
