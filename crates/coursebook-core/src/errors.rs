//! Application error taxonomy.
//!
//! Every handler failure is expressed as an [`AppError`]: an [`ErrorKind`]
//! that fixes the HTTP status, a user-facing message, and an optional detail
//! string (used for validation failures). The JSON body always carries a
//! `message` field:
//!
//! ```json
//! { "message": "Invalid request data.", "error": "credits: must be between 1 and 5" }
//! ```

use std::fmt::{Debug, Display};

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Failure categories surfaced by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No `Authorization` header, or not a `Bearer` credential.
    AuthenticationMissing,
    /// Token is malformed, tampered with, or expired; also bad login credentials.
    AuthenticationInvalid,
    /// Authenticated caller lacks the required role.
    AuthorizationDenied,
    /// Input violates a field constraint.
    Validation,
    /// A unique field (username, email) is already taken.
    UniqueConstraintViolation,
    /// A referenced record does not exist.
    NotFound,
    /// The course is already on the caller's schedule.
    AlreadyEnrolled,
    /// Unexpected collaborator failure.
    Server,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::AuthenticationMissing | ErrorKind::AuthenticationInvalid => {
                StatusCode::UNAUTHORIZED
            }
            ErrorKind::AuthorizationDenied => StatusCode::FORBIDDEN,
            ErrorKind::Validation | ErrorKind::AlreadyEnrolled => StatusCode::BAD_REQUEST,
            ErrorKind::UniqueConstraintViolation => StatusCode::CONFLICT,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Server => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub kind: ErrorKind,
    pub error: Error,
    pub detail: Option<String>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status: kind.status(),
            kind,
            error: err.into(),
            detail: None,
        }
    }

    fn from_message<M>(kind: ErrorKind, message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::new(kind, Error::msg(message))
    }

    /// Attaches the underlying constraint description to the response body.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn missing_credentials<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::AuthenticationMissing, message)
    }

    pub fn unauthorized<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::AuthenticationInvalid, message)
    }

    pub fn forbidden<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::AuthorizationDenied, message)
    }

    pub fn bad_request<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::Validation, message)
    }

    /// Validation failure carrying the formatted constraint violations.
    pub fn validation<M>(message: M, errors: &ValidationErrors) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::bad_request(message).with_detail(describe_validation_errors(errors))
    }

    pub fn conflict<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::UniqueConstraintViolation, message)
    }

    pub fn not_found<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::NotFound, message)
    }

    pub fn already_enrolled<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::AlreadyEnrolled, message)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Server, err)
    }

    pub fn internal_error<M>(message: M) -> Self
    where
        M: Display + Debug + Send + Sync + 'static,
    {
        Self::from_message(ErrorKind::Server, message)
    }

    /// 500 whose body shows only `message`; `err` stays in the logged chain.
    pub fn internal_context<E>(message: &'static str, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::internal(err.into().context(message))
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.error, detail),
            None => write!(f, "{}", self.error),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error = ?self.error, kind = ?self.kind, "request failed");
        }

        let body = Json(ErrorResponse {
            message: self.error.to_string(),
            error: self.detail,
        });

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}

/// Flattens `validator` output into `field: message` pairs, sorted by field.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match &error.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}
