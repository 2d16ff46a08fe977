use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::Value;

/// Failures surfaced by the films client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("film {id} not found")]
    NotFound { id: String },

    #[error("rejected by service ({status}): {body}")]
    Validation { status: StatusCode, body: Value },

    #[error("service error ({status})")]
    Server { status: StatusCode, body: String },

    #[error("malformed response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> StatusCode {
        match self {
            ClientError::NotFound { .. } => StatusCode::NOT_FOUND,
            ClientError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ClientError::Network(_) | ClientError::Server { .. } | ClientError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            },
        }
    }
}

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    fn status(&self) -> StatusCode {
        match self.0.downcast_ref::<ClientError>() {
            Some(err) => err.status(),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
        }
        let body = crate::templates::error_page(status, self.to_string());
        (status, Html(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
