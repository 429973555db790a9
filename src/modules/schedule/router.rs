use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::middleware::auth::authenticate;
use crate::state::AppState;

use super::controller::{drop_course, enroll_course, get_schedule};

/// Schedule routes; every one requires a valid token of any role.
pub fn init_schedule_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/schedule", get(get_schedule))
        .route("/schedule/add", post(enroll_course))
        .route("/schedule/drop", post(drop_course))
        .route_layer(middleware::from_fn_with_state(state, authenticate))
}
