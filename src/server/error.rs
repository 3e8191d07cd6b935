use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

pub type AppResult<T> = Result<T, Error>;

/// everything a handler can fail with, each variant knows its own status code
#[derive(Error, Debug)]
pub enum Error {
    /// upstream answered with a non-2xx, the caller gets the same code back
    #[error("{detail}")]
    UpstreamStatus { status: StatusCode, detail: String },

    /// dns, connect, tls, timeout or a body that died halfway
    #[error("{0}")]
    UpstreamUnreachable(String),

    /// upstream answered fine but the token we scrape for wasn't in there
    #[error("{0}")]
    ExtractionFailed(String),

    #[error("{0}")]
    InvalidId(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    InternalServerErrorWithContext(String),
}

/// body shape is `{"detail": "..."}` so existing clients keep parsing errors the same way
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UpstreamStatus { status, .. } => *status,
            Self::UpstreamUnreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ExtractionFailed(_) => StatusCode::NOT_FOUND,
            Self::InvalidId(_) => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerErrorWithContext(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("request failed with {}: {}", status, self);
        } else {
            debug!("request rejected with {}: {}", status, self);
        }

        let body = ErrorResponse {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
