//! # Coursebook DB
//!
//! Persistence gateway for the Coursebook API.
//!
//! - [`store`]: the [`CourseStore`] and [`UserStore`] traits handlers depend on
//! - [`postgres`]: [`PgStore`], backed by sqlx and PostgreSQL
//! - [`memory`]: [`MemoryStore`], an in-process backend with the same rules
//! - [`pool`]: connection pool setup and migrations
//!
//! # Example
//!
//! ```ignore
//! use coursebook_config::DatabaseConfig;
//! use coursebook_db::Gateway;
//!
//! let gateway = Gateway::connect(&DatabaseConfig::from_env()?).await?;
//! let courses = gateway.courses.find_all().await?;
//! ```

pub mod error;
pub mod memory;
pub mod pool;
pub mod postgres;
pub mod store;

use std::sync::Arc;

use coursebook_config::{DatabaseConfig, StorageBackend};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use pool::{init_db_pool, run_migrations};
pub use postgres::PgStore;
pub use sqlx::PgPool;
pub use store::{CourseStore, UserStore};

/// Both collections behind one backend.
#[derive(Clone)]
pub struct Gateway {
    pub courses: Arc<dyn CourseStore>,
    pub users: Arc<dyn UserStore>,
}

impl Gateway {
    pub fn from_store<S>(store: S) -> Self
    where
        S: CourseStore + UserStore + 'static,
    {
        let store = Arc::new(store);
        Self {
            courses: store.clone(),
            users: store,
        }
    }

    pub fn in_memory() -> Self {
        Self::from_store(MemoryStore::new())
    }

    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        match config.backend {
            StorageBackend::Postgres => {
                let pool = init_db_pool(config).await?;
                Ok(Self::from_store(PgStore::new(pool)))
            }
            StorageBackend::Memory => {
                tracing::warn!("using in-memory storage; data is lost on restart");
                Ok(Self::in_memory())
            }
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway").finish_non_exhaustive()
    }
}
