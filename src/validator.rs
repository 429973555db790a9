//! JSON body extraction with validation.
//!
//! [`ValidatedJson`] deserializes the body and runs `validator` rules. Both
//! failure kinds become a 400 whose `message` is chosen by the payload type
//! ([`Payload::INVALID_MESSAGE`]) and whose `error` carries the detail.
//!
//! Payloads with a [`Payload::fallback`] treat an empty body, or one not sent
//! as JSON, as that fallback instead of rejecting it.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use coursebook_core::AppError;
use coursebook_models::{CourseDraft, CoursePatch, LoginRequest, RegisterUserDto, ScheduleChangeDto};

/// Request bodies accepted through [`ValidatedJson`].
pub trait Payload: DeserializeOwned + Validate {
    const INVALID_MESSAGE: &'static str = "Invalid request data.";

    /// Value used when the request carries no JSON body at all.
    fn fallback() -> Option<Self> {
        None
    }
}

impl Payload for CourseDraft {
    const INVALID_MESSAGE: &'static str = "Invalid course data.";
}

impl Payload for CoursePatch {
    const INVALID_MESSAGE: &'static str = "Invalid update data.";
}

impl Payload for RegisterUserDto {
    const INVALID_MESSAGE: &'static str = "Invalid user registration data.";
}

impl Payload for LoginRequest {
    fn fallback() -> Option<Self> {
        Some(Self::default())
    }
}

impl Payload for ScheduleChangeDto {
    fn fallback() -> Option<Self> {
        Some(Self::default())
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn describe_rejection(rejection: &JsonRejection) -> String {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return "Missing 'Content-Type: application/json' header".to_string();
    }

    let body = rejection.body_text();
    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{}: is required", field);
    }
    body
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Payload + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let reject = |rejection: JsonRejection| {
            AppError::bad_request(T::INVALID_MESSAGE).with_detail(describe_rejection(&rejection))
        };

        let value = match T::fallback() {
            Some(fallback) => {
                if !is_json_content_type(req.headers()) {
                    fallback
                } else {
                    let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
                        AppError::bad_request(T::INVALID_MESSAGE)
                            .with_detail(rejection.body_text())
                    })?;
                    if bytes.is_empty() {
                        fallback
                    } else {
                        Json::<T>::from_bytes(&bytes).map_err(reject)?.0
                    }
                }
            }
            None => Json::<T>::from_request(req, state).await.map_err(reject)?.0,
        };

        value
            .validate()
            .map_err(|errors| AppError::validation(T::INVALID_MESSAGE, &errors))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request as HttpRequest, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn accept(ValidatedJson(draft): ValidatedJson<CourseDraft>) -> String {
        draft.name
    }

    async fn send(body: &str) -> (StatusCode, serde_json::Value) {
        let app = Router::new().route("/", post(accept));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn test_missing_field_names_the_field() {
        let (status, body) = send(r#"{"name":"Logic","subject":"PHIL","credits":3}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid course data.");
        assert_eq!(body["error"], "number: is required");
    }

    #[tokio::test]
    async fn test_constraint_violation_carries_detail() {
        let (status, body) =
            send(r#"{"name":"Logic","subject":"PHIL","number":1000,"credits":3}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid course data.");
        assert_eq!(body["error"], "number: must be between 0 and 999");
    }

    async fn accept_login(ValidatedJson(login): ValidatedJson<LoginRequest>) -> String {
        format!("{}:{}", login.username, login.password)
    }

    async fn send_login(content_type: Option<&str>, body: &'static str) -> (StatusCode, String) {
        let app = Router::new().route("/", post(accept_login));
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = app
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_missing_body_uses_fallback_payload() {
        assert_eq!(send_login(None, "").await, (StatusCode::OK, ":".to_string()));
        assert_eq!(
            send_login(Some("application/json"), "").await,
            (StatusCode::OK, ":".to_string())
        );
        assert_eq!(
            send_login(Some("text/plain"), "username=ada").await,
            (StatusCode::OK, ":".to_string())
        );
    }

    #[tokio::test]
    async fn test_fallback_payload_still_parses_json() {
        let (status, body) = send_login(
            Some("application/json; charset=utf-8"),
            r#"{"username":"ada","password":"pw"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ada:pw");

        let (status, _) = send_login(Some("application/json"), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_strict_payload_requires_json_content_type() {
        let app = Router::new().route("/", post(accept));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_valid_body_passes() {
        let app = Router::new().route("/", post(accept));
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri("/")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name":"Logic","subject":"PHIL","number":101,"credits":3}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
