use std::time::{Duration, Instant};

use anyhow::Context;
use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use crate::is_observability_enabled;

const LATENCY_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Installs the Prometheus recorder and spawns its upkeep task.
/// `Ok(None)` when observability is switched off.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .context("Failed to set histogram buckets")?
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    let status_category = match status {
        200..=299 => "2xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    };
    counter!("http_requests_by_status", "status_category" => status_category).increment(1);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// Router for the metrics server.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics

pub fn track_course_created() {
    if is_observability_enabled() {
        counter!("courses_created_total").increment(1);
    }
}

pub fn track_course_updated() {
    if is_observability_enabled() {
        counter!("courses_updated_total").increment(1);
    }
}

pub fn track_course_deleted() {
    if is_observability_enabled() {
        counter!("courses_deleted_total").increment(1);
    }
}

pub fn track_user_registered(role: &'static str) {
    if is_observability_enabled() {
        counter!("users_registered_total", "role" => role).increment(1);
    }
}

pub fn track_user_login_success(role: &'static str) {
    if is_observability_enabled() {
        counter!("user_logins_total", "role" => role, "status" => "success").increment(1);
    }
}

pub fn track_user_login_failure(reason: &'static str) {
    if is_observability_enabled() {
        counter!("user_logins_total", "role" => "unknown", "status" => "failure", "reason" => reason)
            .increment(1);
    }
}

pub fn track_token_issued() {
    if is_observability_enabled() {
        counter!("jwt_tokens_issued_total").increment(1);
    }
}

pub fn track_course_enrolled() {
    if is_observability_enabled() {
        counter!("schedule_changes_total", "action" => "enroll").increment(1);
    }
}

pub fn track_course_dropped() {
    if is_observability_enabled() {
        counter!("schedule_changes_total", "action" => "drop").increment(1);
    }
}

pub fn track_authorization_denied(role: &'static str) {
    if is_observability_enabled() {
        counter!("authorization_denied_total", "role" => role).increment(1);
    }
}
