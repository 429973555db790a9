use coursebook_core::describe_validation_errors;
use thiserror::Error;
use validator::ValidationErrors;

/// Failures the handler layer can tell apart.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A field constraint was violated; carries `field: message` detail.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A unique field (username, email) is already taken.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<ValidationErrors> for StoreError {
    fn from(errors: ValidationErrors) -> Self {
        StoreError::Validation(describe_validation_errors(&errors))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                let detail = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                return StoreError::UniqueViolation(detail);
            }
            if db_err.is_check_violation() {
                return StoreError::Validation(db_err.message().to_string());
            }
        }
        StoreError::Backend(err.into())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
