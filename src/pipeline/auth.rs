//! Authentication Stage
//!
//! Shared-secret gate for every path outside a fixed public allow-list.

use axum::extract::Request;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use subtle::ConstantTimeEq;

use super::{BoxResponseFuture, Next, Stage};

/// Paths served without authentication: the welcome root and the
/// diagnostic fault trigger.
pub const PUBLIC_PATHS: [&str; 2] = ["/", "/error"];

/// Compares the request's `Authorization` header against the configured
/// shared secret. A `Bearer ` prefix is accepted and stripped; the
/// comparison itself is constant-time.
pub struct AuthStage {
    token: String,
}

impl AuthStage {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn is_authorized(&self, headers: &HeaderMap) -> bool {
        let Some(value) = headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
        else {
            return false;
        };
        let presented = value.strip_prefix("Bearer ").unwrap_or(value);
        constant_time_str_eq(presented, &self.token)
    }
}

impl Stage for AuthStage {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxResponseFuture<'a> {
        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.uri().path()) {
                return next.run(req).await;
            }

            if !self.is_authorized(req.headers()) {
                return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
            }

            next.run(req).await
        })
    }
}

/// Constant-time comparison of two byte slices
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

/// Constant-time comparison of two strings
fn constant_time_str_eq(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
