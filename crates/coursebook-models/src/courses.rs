//! Course catalog models.
//!
//! - [`Course`]: a stored catalog entry
//! - [`CourseDraft`]: the full, validated content of a course (create payload)
//! - [`CoursePatch`]: a partial update, merged onto an existing course and
//!   re-validated as a whole

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::ids::CourseId;

pub const MIN_COURSE_NUMBER: i32 = 0;
pub const MAX_COURSE_NUMBER: i32 = 999;
pub const MIN_CREDITS: i32 = 1;
pub const MAX_CREDITS: i32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub subject: String,
    pub number: i32,
    pub description: Option<String>,
    pub credits: i32,
}

impl Course {
    /// Label used in enrollment messages, e.g. `MATH 123`.
    pub fn code(&self) -> String {
        format!("{} {}", self.subject, self.number)
    }

    pub fn from_draft(id: CourseId, draft: CourseDraft) -> Self {
        Self {
            id,
            name: draft.name,
            subject: draft.subject,
            number: draft.number,
            description: draft.description,
            credits: draft.credits,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CourseDraft {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub subject: String,
    #[validate(range(
        min = MIN_COURSE_NUMBER,
        max = MAX_COURSE_NUMBER,
        message = "must be between 0 and 999"
    ))]
    pub number: i32,
    pub description: Option<String>,
    #[validate(range(min = MIN_CREDITS, max = MAX_CREDITS, message = "must be between 1 and 5"))]
    pub credits: i32,
}

impl CourseDraft {
    pub fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate, ToSchema)]
pub struct CoursePatch {
    /// Absent keeps the name; `null` fails revalidation as a missing value.
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub subject: Option<Option<String>>,
    #[validate(range(
        min = MIN_COURSE_NUMBER,
        max = MAX_COURSE_NUMBER,
        message = "must be between 0 and 999"
    ))]
    pub number: Option<i32>,
    /// Absent leaves the description alone; `null` clears it.
    #[serde(default, deserialize_with = "deserialize_present")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[validate(range(min = MIN_CREDITS, max = MAX_CREDITS, message = "must be between 1 and 5"))]
    pub credits: Option<i32>,
}

impl CoursePatch {
    /// Merges the patch onto `existing`. The result still needs [`CourseDraft::check`].
    pub fn apply(&self, existing: &Course) -> CourseDraft {
        CourseDraft {
            name: merge_required(&self.name, &existing.name),
            subject: merge_required(&self.subject, &existing.subject),
            number: self.number.unwrap_or(existing.number),
            description: match &self.description {
                Some(description) => description.clone(),
                None => existing.description.clone(),
            },
            credits: self.credits.unwrap_or(existing.credits),
        }
    }
}

/// An explicit `null` becomes an empty string so the merged draft reports the
/// field as required.
fn merge_required(patched: &Option<Option<String>>, existing: &str) -> String {
    match patched {
        Some(Some(value)) => value.clone(),
        Some(None) => String::new(),
        None => existing.to_string(),
    }
}

/// Tells a present `null` (`Some(None)`) apart from an absent field (`None`).
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
