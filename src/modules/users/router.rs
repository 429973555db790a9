use axum::{Router, routing::post};

use crate::state::AppState;

use super::controller::{login_user, register_user};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
}
