//! HTTP enforcement of an installed [`RequestExtension`].

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use sso_binding_sdk::RequestMetadata;

use crate::domain::{RequestExtension, RequestRejection};

/// Wrap every route of `router` with SSO enforcement through `extension`.
pub fn apply(router: Router, extension: Arc<RequestExtension>) -> Router {
    router.layer(axum::middleware::from_fn_with_state(extension, sso_middleware))
}

/// Authenticates and authorizes each request through the bound providers.
///
/// For each request:
/// 1. Skips CORS preflight requests
/// 2. Builds [`RequestMetadata`] from the method, path and bearer token
/// 3. Runs [`RequestExtension::process`]
/// 4. On success inserts the `Principal` into request extensions
pub async fn sso_middleware(
    State(extension): State<Arc<RequestExtension>>,
    mut req: Request,
    next: Next,
) -> Response {
    if is_preflight_request(req.method(), req.headers()) {
        return next.run(req).await;
    }

    let mut metadata = RequestMetadata::new(req.method().as_str(), req.uri().path());
    if let Some(token) = extract_bearer_token(req.headers()) {
        metadata = metadata.with_bearer_token(token);
    }

    match extension.process(&metadata).await {
        Ok(principal) => {
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(rejection) => rejection_to_response(&rejection),
    }
}

/// Convert a [`RequestRejection`] to an RFC-9457 Problem Details response.
fn rejection_to_response(rejection: &RequestRejection) -> Response {
    log_rejection(rejection);
    let (status, title, detail) = match rejection {
        RequestRejection::Unauthenticated(_) => (
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Authentication failed",
        ),
        RequestRejection::Forbidden { .. } => {
            (StatusCode::FORBIDDEN, "Forbidden", "Access denied")
        }
        RequestRejection::Unavailable(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            "Service Unavailable",
            "Authentication service unavailable",
        ),
        RequestRejection::Internal(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal Server Error",
            "Internal authentication error",
        ),
    };
    let body = serde_json::json!({
        "type": "about:blank",
        "title": title,
        "status": status.as_u16(),
        "detail": detail,
    });
    (
        status,
        [(header::CONTENT_TYPE, "application/problem+json")],
        body.to_string(),
    )
        .into_response()
}

/// Log rejections at appropriate levels.
///
/// Cognitive complexity is inflated by tracing macro expansion.
#[allow(clippy::cognitive_complexity)]
fn log_rejection(rejection: &RequestRejection) {
    match rejection {
        RequestRejection::Unauthenticated(msg) => tracing::debug!("SSO rejected: {msg}"),
        RequestRejection::Forbidden { reason } => {
            tracing::debug!(reason = ?reason, "SSO access denied");
        }
        RequestRejection::Unavailable(msg) => tracing::error!("SSO provider unavailable: {msg}"),
        RequestRejection::Internal(msg) => tracing::error!("SSO internal error: {msg}"),
    }
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").map(str::trim))
        .filter(|s| !s.is_empty())
}

/// Check if this is a CORS preflight request
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(header::ORIGIN)
        && headers.contains_key(header::ACCESS_CONTROL_REQUEST_METHOD)
}
