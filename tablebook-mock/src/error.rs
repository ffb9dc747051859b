//! Mock backend errors, rendered as `{"error": "..."}` bodies

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::ApiErrorBody;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),
}

impl MockError {
    fn status(&self) -> StatusCode {
        match self {
            MockError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            MockError::BadRequest(_) => StatusCode::BAD_REQUEST,
            MockError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(%status, error = %self, "Mock request rejected");
        (status, Json(ApiErrorBody::new(self.to_string()))).into_response()
    }
}

pub type MockResult<T> = Result<T, MockError>;
