use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use clima_core::{LocationError, ValidationError, WeatherError};
use thiserror::Error;

/// Everything that can end a `/clima` request early.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    InvalidZipcode(#[from] ValidationError),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidZipcode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Location(_) => StatusCode::NOT_FOUND,
            ApiError::Weather(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        // Plain-text body terminated by a newline.
        (
            status,
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            format!("{self}\n"),
        )
            .into_response()
    }
}
