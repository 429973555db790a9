use std::sync::Arc;

use coursebook_config::{CorsConfig, DatabaseConfig, JwtConfig};
use coursebook_db::{CourseStore, Gateway, UserStore};

/// Shared, read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub courses: Arc<dyn CourseStore>,
    pub users: Arc<dyn UserStore>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(gateway: Gateway, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            courses: gateway.courses,
            users: gateway.users,
            jwt_config,
            cors_config,
        }
    }
}

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let jwt_config = JwtConfig::from_env()?;
    let database_config = DatabaseConfig::from_env()?;
    let gateway = Gateway::connect(&database_config).await?;

    Ok(AppState::new(gateway, jwt_config, CorsConfig::from_env()))
}
