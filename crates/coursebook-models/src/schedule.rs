//! Enrollment payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::courses::Course;
use crate::ids::CourseId;

/// Body of enroll and drop requests.
///
/// The id is kept as text: a missing or unparseable id cannot name a course,
/// and is reported the same way as an unknown one.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ScheduleChangeDto {
    #[serde(default, rename = "courseId", alias = "course_id")]
    #[schema(value_type = String, format = "uuid")]
    pub course_id: Option<String>,
}

impl ScheduleChangeDto {
    pub fn course_id(&self) -> Option<CourseId> {
        self.course_id.as_deref().and_then(|raw| raw.parse().ok())
    }
}

/// Result of an enroll or drop: a confirmation plus the dereferenced schedule.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScheduleResponse {
    pub message: String,
    pub schedule: Vec<Course>,
}
