//! # HTTP Error Mapping
//!
//! The only place service errors meet status codes. Domain layers return
//! plain `UserError`s; this boundary renders them as `{"error": message}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::user::UserError;

/// Service error carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub UserError);

/// Structured error body for 4xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            UserError::Validation(_) => StatusCode::BAD_REQUEST,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::ValidationError;

    #[test]
    fn test_validation_maps_to_400() {
        let err = ApiError(ValidationError::AgeOutOfRange.into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let err = ApiError(UserError::NotFound(9));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
