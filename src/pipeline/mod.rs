//! # Request Pipeline
//!
//! Ordered middleware stages wrapping the terminal request handler.
//!
//! Each stage receives the request and a [`Next`] handle and either
//! forwards (continue) or short-circuits with its own response (terminate,
//! remaining stages skipped). Stage order is fixed by the composition
//! root: recovery outermost, then authentication, then access logging.
//! No stage retries and no stage mutates the request body.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;
use uuid::Uuid;

pub mod access_log;
pub mod auth;
pub mod recover;

pub use access_log::AccessLogStage;
pub use auth::AuthStage;
pub use recover::RecoveryStage;

/// Boxed response future returned by stages.
pub type BoxResponseFuture<'a> = Pin<Box<dyn Future<Output = Response> + Send + 'a>>;

/// The handler at the end of the chain. Stages are unit-testable by
/// passing a stub closure here.
pub type Terminal = Box<dyn FnOnce(Request) -> BoxResponseFuture<'static> + Send>;

/// One stage of the request pipeline.
pub trait Stage: Send + Sync {
    /// Process the request, forwarding through `next` or short-circuiting
    /// with a response.
    fn handle<'a>(&'a self, req: Request, next: Next<'a>) -> BoxResponseFuture<'a>;
}

/// Remaining stages plus the terminal handler.
pub struct Next<'a> {
    stages: &'a [Arc<dyn Stage>],
    terminal: Terminal,
}

impl<'a> Next<'a> {
    /// Run the next stage, or the terminal handler once the chain is
    /// exhausted.
    pub fn run(self, req: Request) -> BoxResponseFuture<'a> {
        Box::pin(async move {
            match self.stages.split_first() {
                Some((stage, rest)) => {
                    let next = Next {
                        stages: rest,
                        terminal: self.terminal,
                    };
                    stage.handle(req, next).await
                }
                None => (self.terminal)(req).await,
            }
        })
    }
}

/// Identifier attached to every request entering the pipeline; carried in
/// request extensions and echoed in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_request(req: &Request) -> Option<Self> {
        req.extensions().get::<Self>().copied()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The ordered stage list, composed once at startup.
pub struct Pipeline {
    stages: Vec<Arc<dyn Stage>>,
}

impl Pipeline {
    /// Pipeline with no stages; requests go straight to the terminal.
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage. Earlier stages wrap later ones.
    pub fn with_stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Number of composed stages.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Tag the request with a fresh [`RequestId`] and walk the stages.
    pub async fn run(&self, mut req: Request, terminal: Terminal) -> Response {
        req.extensions_mut().insert(RequestId::new());
        Next {
            stages: &self.stages,
            terminal,
        }
        .run(req)
        .await
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    pub fn request(path: &str) -> Request {
        Request::builder()
            .uri(path)
            .body(Body::empty())
            .unwrap()
    }

    pub fn ok_terminal() -> Terminal {
        Box::new(|_req| Box::pin(async { StatusCode::OK.into_response() }))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{ok_terminal, request};
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_empty_pipeline_runs_terminal() {
        let pipeline = Pipeline::new();
        let response = pipeline.run(request("/users"), ok_terminal()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_request_id_is_attached_before_terminal() {
        let pipeline = Pipeline::new();
        let terminal: Terminal = Box::new(|req| {
            Box::pin(async move {
                assert!(RequestId::from_request(&req).is_some());
                StatusCode::OK.into_response()
            })
        });
        pipeline.run(request("/users"), terminal).await;
    }

    #[tokio::test]
    async fn test_stage_count() {
        let pipeline = Pipeline::new()
            .with_stage(AccessLogStage)
            .with_stage(AuthStage::new("secret"));
        assert_eq!(pipeline.stage_count(), 2);
    }
}
