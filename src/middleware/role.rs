//! Role gates.
//!
//! A gate always authenticates first, so an unauthenticated caller gets 401
//! and never reaches the role comparison.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use coursebook_core::AppError;
use coursebook_models::Role;
use coursebook_observability::track_authorization_denied;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn denial_message(required: Role) -> &'static str {
    match required {
        Role::Teacher => "Forbidden. Teacher role required for this action.",
        Role::Student => "Forbidden. Student role required for this action.",
    }
}

/// Checks the caller's role against `required`.
pub fn authorize(user: &AuthUser, required: Role) -> Result<(), AppError> {
    let allowed = match (required, user.role()) {
        (Role::Teacher, Role::Teacher) | (Role::Student, Role::Student) => true,
        (Role::Teacher, Role::Student) | (Role::Student, Role::Teacher) => false,
    };

    if allowed {
        Ok(())
    } else {
        track_authorization_denied(user.role().as_str());
        Err(AppError::forbidden(denial_message(required)))
    }
}

pub async fn require_role(
    state: AppState,
    req: Request,
    next: Next,
    required: Role,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let user = AuthUser::from_request_parts(&mut parts, &state).await?;
    authorize(&user, required)?;
    parts.extensions.insert(user);

    Ok(next.run(Request::from_parts(parts, body)).await)
}

/// Gate for catalog mutations.
///
/// ```rust,ignore
/// Router::new()
///     .route("/", post(create_course))
///     .route_layer(middleware::from_fn_with_state(state.clone(), require_teacher));
/// ```
pub async fn require_teacher(State(state): State<AppState>, req: Request, next: Next) -> Response {
    match require_role(state, req, next, Role::Teacher).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coursebook_auth::Claims;
    use coursebook_core::ErrorKind;
    use coursebook_models::UserId;

    fn user_with(role: Role) -> AuthUser {
        AuthUser(Claims {
            sub: UserId::new().to_string(),
            role,
            exp: 9999999999,
            iat: 1234567890,
        })
    }

    #[test]
    fn test_teacher_passes_teacher_gate() {
        assert!(authorize(&user_with(Role::Teacher), Role::Teacher).is_ok());
    }

    #[test]
    fn test_student_denied_teacher_gate() {
        let err = authorize(&user_with(Role::Student), Role::Teacher).unwrap_err();
        assert_eq!(err.kind, ErrorKind::AuthorizationDenied);
        assert_eq!(
            err.message(),
            "Forbidden. Teacher role required for this action."
        );
    }

    #[test]
    fn test_student_gate_is_exact() {
        assert!(authorize(&user_with(Role::Student), Role::Student).is_ok());
        assert!(authorize(&user_with(Role::Teacher), Role::Student).is_err());
    }
}
