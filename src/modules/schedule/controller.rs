use axum::{Json, extract::State};
use tracing::instrument;

use coursebook_core::{AppError, ErrorResponse};
use coursebook_models::{Course, ScheduleChangeDto, ScheduleResponse};

use crate::middleware::auth::AuthUser;
use crate::modules::schedule::service::ScheduleService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// The caller's schedule as full course records
#[utoipa::path(
    get,
    path = "/api/users/schedule",
    responses(
        (status = 200, description = "Enrolled courses", body = Vec<Course>),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Failed to fetch user schedule", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn get_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<Course>>, AppError> {
    let schedule = ScheduleService::get_schedule(state.users.as_ref(), auth.user_id()?).await?;
    Ok(Json(schedule))
}

#[utoipa::path(
    post,
    path = "/api/users/schedule/add",
    request_body = ScheduleChangeDto,
    responses(
        (status = 200, description = "Course added to schedule", body = ScheduleResponse),
        (status = 400, description = "Already enrolled in this course", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User or course not found", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn enroll_course(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<ScheduleChangeDto>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let response = ScheduleService::enroll(
        state.courses.as_ref(),
        state.users.as_ref(),
        auth.user_id()?,
        dto.course_id(),
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/users/schedule/drop",
    request_body = ScheduleChangeDto,
    responses(
        (status = 200, description = "Course dropped from schedule", body = ScheduleResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "User or course not found", body = ErrorResponse)
    ),
    tag = "Schedule",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn drop_course(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(dto): ValidatedJson<ScheduleChangeDto>,
) -> Result<Json<ScheduleResponse>, AppError> {
    let response = ScheduleService::drop_course(
        state.courses.as_ref(),
        state.users.as_ref(),
        auth.user_id()?,
        dto.course_id(),
    )
    .await?;
    Ok(Json(response))
}
