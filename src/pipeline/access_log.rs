//! Access Log Stage
//!
//! Innermost stage; records method and path before the terminal handler
//! runs and the resulting status code after it returns. Recovery sits
//! outside, so the status observed here is always a real one.

use axum::extract::Request;

use crate::observability::Logger;

use super::{BoxResponseFuture, Next, RequestId, Stage};

pub struct AccessLogStage;

impl Stage for AccessLogStage {
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxResponseFuture<'a> {
        Box::pin(async move {
            let method = req.method().to_string();
            let path = req.uri().path().to_string();
            let request_id = RequestId::from_request(&req)
                .map(|id| id.to_string())
                .unwrap_or_default();

            Logger::info(
                "http_request",
                &[
                    ("method", &method),
                    ("path", &path),
                    ("request_id", &request_id),
                ],
            );

            let response = next.run(req).await;

            let status = response.status().as_u16().to_string();
            Logger::info(
                "http_response",
                &[
                    ("method", &method),
                    ("path", &path),
                    ("request_id", &request_id),
                    ("status", &status),
                ],
            );

            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::test_support::request;
    use crate::pipeline::{Pipeline, Terminal};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_response_is_forwarded_unchanged() {
        let pipeline = Pipeline::new().with_stage(AccessLogStage);
        let terminal: Terminal = Box::new(|_req| {
            Box::pin(async { StatusCode::NO_CONTENT.into_response() })
        });

        let response = pipeline.run(request("/users/1"), terminal).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
