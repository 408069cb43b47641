//! Recovery Stage
//!
//! Outermost stage; converts panics from inner stages and handlers into a
//! structured 500 response so a fault never escapes to the transport.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use futures_util::FutureExt;
use serde::Serialize;

use crate::observability::Logger;

use super::{BoxResponseFuture, Next, RequestId, Stage};

const GENERIC_ERROR: &str = "An internal server error occurred";
const GENERIC_DETAIL: &str = "Please try again later";

/// Body of the recovery response. `details` carries the fault message
/// only when detail exposure is enabled (development mode).
#[derive(Debug, Serialize)]
struct FaultBody<'a> {
    error: &'a str,
    details: &'a str,
}

/// Catches panics from everything downstream of it.
pub struct RecoveryStage {
    expose_detail: bool,
}

impl RecoveryStage {
    /// `expose_detail` gates whether the raw fault message reaches the
    /// client; outside development it is replaced with a generic phrase.
    pub fn new(expose_detail: bool) -> Self {
        Self { expose_detail }
    }
}

impl Stage for RecoveryStage {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxResponseFuture<'a> {
        Box::pin(async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            let request_id = RequestId::from_request(&req)
                .map(|id| id.to_string())
                .unwrap_or_default();

            match AssertUnwindSafe(next.run(req)).catch_unwind().await {
                Ok(response) => response,
                Err(panic) => {
                    let detail = panic_detail(&*panic);
                    Logger::error(
                        "request_panicked",
                        &[
                            ("detail", &detail),
                            ("method", &method),
                            ("path", &path),
                            ("request_id", &request_id),
                        ],
                    );

                    let details = if self.expose_detail {
                        detail.as_str()
                    } else {
                        GENERIC_DETAIL
                    };
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(FaultBody {
                            error: GENERIC_ERROR,
                            details,
                        }),
                    )
                        .into_response()
                }
            }
        })
    }
}

/// Best-effort extraction of a panic payload's message.
fn panic_detail(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::{ok_terminal, request};
    use crate::pipeline::{Pipeline, Terminal};
    use axum::body::to_bytes;

    fn panicking_terminal() -> Terminal {
        Box::new(|_req| Box::pin(async { panic!("Test exception") }))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_passes_through_when_nothing_panics() {
        let pipeline = Pipeline::new().with_stage(RecoveryStage::new(true));
        let response = pipeline.run(request("/users"), ok_terminal()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_panic_becomes_500_with_detail_in_development() {
        let pipeline = Pipeline::new().with_stage(RecoveryStage::new(true));
        let response = pipeline.run(request("/error"), panicking_terminal()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], GENERIC_ERROR);
        assert_eq!(body["details"], "Test exception");
    }

    #[tokio::test]
    async fn test_panic_detail_is_masked_outside_development() {
        let pipeline = Pipeline::new().with_stage(RecoveryStage::new(false));
        let response = pipeline.run(request("/error"), panicking_terminal()).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["details"], GENERIC_DETAIL);
    }

    #[tokio::test]
    async fn test_string_panic_payloads_are_extracted() {
        let pipeline = Pipeline::new().with_stage(RecoveryStage::new(true));
        let terminal: Terminal = Box::new(|_req| {
            Box::pin(async { panic!("{}", String::from("formatted failure")) })
        });
        let response = pipeline.run(request("/error"), terminal).await;

        let body = body_json(response).await;
        assert_eq!(body["details"], "formatted failure");
    }
}
