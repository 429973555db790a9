//! Coursebook observability.
//!
//! - Structured request logging and `tracing` subscriber setup, with optional
//!   OpenTelemetry export
//! - Prometheus metrics: HTTP request counters and latency histograms plus
//!   business counters for the catalog, accounts and schedules
//!
//! Everything is compiled in with the `observability` feature (default) and
//! can be switched off at runtime with `OBSERVABILITY_ENABLED=false`, in which
//! case only compact console logging is installed.
//!
//! ```no_run
//! use coursebook_observability::{init_tracing, shutdown_tracer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing()?;
//!     // ... application code ...
//!     shutdown_tracer().await;
//!     Ok(())
//! }
//! ```

use std::sync::OnceLock;

pub mod basic_logging;
#[cfg(feature = "observability")]
pub mod logging;
#[cfg(feature = "observability")]
pub mod metrics;

pub use basic_logging::init_basic_console_logging;

#[cfg(feature = "observability")]
pub use logging::{init_tracing, logging_middleware, shutdown_tracer};
#[cfg(feature = "observability")]
pub use metrics::{
    init_metrics, metrics_app, metrics_middleware, track_authorization_denied,
    track_course_created, track_course_deleted, track_course_updated, track_course_dropped,
    track_course_enrolled, track_token_issued, track_user_login_failure, track_user_login_success,
    track_user_registered,
};
#[cfg(feature = "observability")]
pub use metrics_exporter_prometheus::PrometheusHandle;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Runtime switch read once from `OBSERVABILITY_ENABLED` (default on).
/// Always `false` when the feature is compiled out.
pub fn is_observability_enabled() -> bool {
    cfg!(feature = "observability")
        && *OBSERVABILITY_ENABLED.get_or_init(|| {
            std::env::var("OBSERVABILITY_ENABLED")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true)
        })
}

// No-op stubs when observability is disabled
#[cfg(not(feature = "observability"))]
pub mod stubs {
    use axum::{Router, extract::Request, middleware::Next, response::Response};

    /// Placeholder for the Prometheus handle.
    #[derive(Clone, Debug)]
    pub struct PrometheusHandle;

    pub async fn logging_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    pub async fn metrics_middleware(req: Request, next: Next) -> Response {
        next.run(req).await
    }

    /// Console logging only.
    pub fn init_tracing() -> anyhow::Result<()> {
        crate::init_basic_console_logging()
    }

    pub async fn shutdown_tracer() {}

    pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
        Ok(None)
    }

    pub fn metrics_app(_handle: PrometheusHandle) -> Router {
        Router::new()
    }

    pub fn track_course_created() {}
    pub fn track_course_updated() {}
    pub fn track_course_deleted() {}
    pub fn track_user_registered(_role: &'static str) {}
    pub fn track_user_login_success(_role: &'static str) {}
    pub fn track_user_login_failure(_reason: &'static str) {}
    pub fn track_token_issued() {}
    pub fn track_course_enrolled() {}
    pub fn track_course_dropped() {}
    pub fn track_authorization_denied(_role: &'static str) {}
}

#[cfg(not(feature = "observability"))]
pub use stubs::*;
