//! Request ID echo
//!
//! Problem Details のボディに `requestId` を追加するミドルウェア。
//! `x-request-id` を付与するレイヤーより内側に置いてください。

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub(crate) const PROBLEM_JSON: &str = "application/problem+json";

// Problem bodies are a handful of short strings
const MAX_PROBLEM_BODY: usize = 64 * 1024;

/// エラーレスポンス以外はそのまま通します。
pub async fn echo_request_id(req: Request, next: Next) -> Response {
    let request_id = req.headers().get(REQUEST_ID_HEADER).cloned();
    let response = next.run(req).await;

    match request_id {
        Some(id) if is_problem(&response) => attach(response, &id).await,
        _ => response,
    }
}

fn is_problem(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes() == PROBLEM_JSON.as_bytes())
}

async fn attach(response: Response, request_id: &HeaderValue) -> Response {
    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, MAX_PROBLEM_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to buffer problem body");
            return Response::from_parts(parts, Body::empty());
        }
    };

    let mut problem = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => return Response::from_parts(parts, Body::from(bytes)),
    };

    if let Ok(id) = request_id.to_str() {
        problem.insert("requestId".to_string(), id.into());
    }

    match serde_json::to_vec(&problem) {
        Ok(body) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(body))
        }
        Err(_) => Response::from_parts(parts, Body::from(bytes)),
    }
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    use super::*;
    use crate::error::app_error::AppError;

    fn app() -> Router {
        Router::new()
            .route(
                "/missing",
                get(|| async { AppError::not_found("Blog not found").with_code("BLOG_NOT_FOUND") }),
            )
            .route("/ok", get(|| async { "fine" }))
            .layer(middleware::from_fn(echo_request_id))
    }

    async fn call(uri: &str, request_id: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut request = axum::http::Request::builder().uri(uri);
        if let Some(id) = request_id {
            request = request.header(REQUEST_ID_HEADER, id);
        }
        let response = app()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_problem_body_carries_request_id() {
        let (status, bytes) = call("/missing", Some("req-123")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["requestId"], "req-123");
        assert_eq!(body["code"], "BLOG_NOT_FOUND");
        assert_eq!(body["status"], 404);
    }

    #[tokio::test]
    async fn test_without_header_body_is_untouched() {
        let (_, bytes) = call("/missing", None).await;
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body.get("requestId").is_none());
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (status, bytes) = call("/ok", Some("req-9")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(bytes, b"fine");
    }
}
