use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::middleware::role::require_teacher;
use crate::state::AppState;

use super::controller::{create_course, delete_course, get_courses, update_course};

/// Reading the catalog is public; every mutation sits behind the teacher gate.
pub fn init_courses_router(state: AppState) -> Router<AppState> {
    let teacher_only = Router::new()
        .route("/", post(create_course))
        .route("/{id}", put(update_course).delete(delete_course))
        .route_layer(middleware::from_fn_with_state(state, require_teacher));

    Router::new()
        .route("/", get(get_courses))
        .merge(teacher_only)
}
