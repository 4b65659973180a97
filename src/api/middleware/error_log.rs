//! Central logging of failed requests.
//!
//! Every response with status >= 400 is logged once with its method, URI,
//! status and body: `warn` for client errors, `error` for server errors.

use axum::{
    body::{to_bytes, Body, HttpBody},
    extract::Request,
    middleware::Next,
    response::Response,
};

use crate::config::MAX_LOGGED_BODY_BYTES;
use crate::errors::ErrorReport;

const UNAVAILABLE: &str = "<unavailable>";

pub async fn error_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let (response, body) = match response.extensions().get::<ErrorReport>().cloned() {
        Some(ErrorReport(report)) => (response, report),
        None => read_body(response).await,
    };

    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), body = %body, "Request failed");
    } else {
        tracing::warn!(%method, %uri, status = status.as_u16(), body = %body, "Request rejected");
    }

    response
}

/// Buffer a body produced outside `AppError` (framework fallbacks, rate
/// limiter) so it can be logged and still sent. Bodies without a known
/// size within `MAX_LOGGED_BODY_BYTES` are passed on unread.
async fn read_body(response: Response) -> (Response, String) {
    let fits = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|len| len <= MAX_LOGGED_BODY_BYTES as u64);
    if !fits {
        return (response, String::from(UNAVAILABLE));
    }

    let (parts, body) = response.into_parts();
    match to_bytes(body, MAX_LOGGED_BODY_BYTES).await {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            (Response::from_parts(parts, Body::from(bytes)), text)
        }
        // The body stream itself failed; there is nothing left to forward.
        Err(e) => {
            tracing::debug!(error = %e, "Error body not captured");
            (Response::from_parts(parts, Body::empty()), String::from(UNAVAILABLE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/missing", get(|| async { AppError::NotFound }))
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .route("/ok", get(|| async { "fine" }))
            .route(
                "/oversized",
                get(|| async { (StatusCode::BAD_GATEWAY, "x".repeat(MAX_LOGGED_BODY_BYTES + 1)) }),
            )
            .layer(middleware::from_fn(error_log_middleware))
    }

    async fn call(uri: &str) -> (StatusCode, String) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_error_body_is_preserved() {
        let (status, body) = call("/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_non_app_error_body_is_rebuilt() {
        let (status, body) = call("/teapot").await;
        assert_eq!(status, StatusCode::IM_A_TEAPOT);
        assert_eq!(body, "short and stout");
    }

    #[tokio::test]
    async fn test_oversized_error_body_is_forwarded_unread() {
        let (status, body) = call("/oversized").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body.len(), MAX_LOGGED_BODY_BYTES + 1);
    }

    #[tokio::test]
    async fn test_success_passes_through() {
        let (status, body) = call("/ok").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "fine");
    }
}
