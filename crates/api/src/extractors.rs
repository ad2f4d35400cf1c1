//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use fleet_shared::AppError;

use crate::error::ApiError;

/// `Json` body extractor whose rejections use the API error envelope.
///
/// Syntax errors, type mismatches (such as a date that does not parse) and
/// a missing content type all answer 400 `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(AppError::Validation(rejection.body_text()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        response::IntoResponse,
        routing::post,
    };
    use http_body_util::BodyExt;
    use rstest::rstest;
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Booking {
        #[allow(dead_code)]
        start_date: chrono::NaiveDate,
    }

    async fn echo(ApiJson(_booking): ApiJson<Booking>) -> impl IntoResponse {
        StatusCode::NO_CONTENT
    }

    #[rstest]
    #[case(r#"{"start_date":"2024-13-45"}"#, Some("application/json"))]
    #[case(r#"{"start_date":"#, Some("application/json"))]
    #[case(r#"{}"#, Some("application/json"))]
    #[case(r#"{"start_date":"2024-09-13"}"#, None)]
    #[tokio::test]
    async fn test_rejections_use_validation_envelope(
        #[case] body: &'static str,
        #[case] content_type: Option<&str>,
    ) {
        let app = Router::new().route("/", post(echo));
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("Content-Type", content_type);
        }
        let response = app
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_valid_body_passes_through() {
        let app = Router::new().route("/", post(echo));
        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::from(r#"{"start_date":"2024-09-13"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
