use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Shown when the input does not hold exactly 8 digits.
pub const INVALID_CEP_MESSAGE: &str = "Por favor, insira um CEP válido com 8 dígitos.";
/// Shown when ViaCEP answers with the not-found marker.
pub const NOT_FOUND_MESSAGE: &str = "CEP não encontrado. Por favor, verifique o CEP digitado.";
/// Shown for any failure of the lookup call itself.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Erro ao consultar o CEP. Verifique sua conexão e tente novamente.";

/// Why a lookup produced no address.
///
/// Every variant is terminal: nothing is retried and the user re-triggers the
/// search manually.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Input did not hold exactly 8 digits; no request was sent.
    InvalidCep,
    /// The service answered but flagged the CEP as unknown.
    NotFound,
    /// The request failed (connection, timeout, HTTP status or body parsing).
    /// The detail is for logs only.
    Transport(String),
}

impl LookupError {
    /// The fixed message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::InvalidCep => INVALID_CEP_MESSAGE,
            LookupError::NotFound => NOT_FOUND_MESSAGE,
            LookupError::Transport(_) => CONNECTION_ERROR_MESSAGE,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::InvalidCep => write!(f, "Invalid CEP"),
            LookupError::NotFound => write!(f, "CEP not found"),
            LookupError::Transport(msg) => write!(f, "ViaCEP request failed: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }
}

/// Application-specific error types for the HTTP surface.
#[derive(Debug, Clone)]
pub enum AppError {
    /// Bad request error (invalid input).
    BadRequest(String),
    /// Resource not found error.
    NotFound(String),
    /// The screen is busy with a lookup.
    Conflict(String),
    /// Error interacting with an external API.
    ExternalApiError(String),
    /// Internal server error.
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ExternalApiError(msg) => write!(f, "External API error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each variant to a status code and a `{"error": ...}` body.
    ///
    /// External and internal failures are logged here and replaced by a
    /// generic message.
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::ExternalApiError(msg) => {
                tracing::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    CONNECTION_ERROR_MESSAGE.to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<LookupError> for AppError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::InvalidCep => AppError::BadRequest(INVALID_CEP_MESSAGE.to_string()),
            LookupError::NotFound => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            LookupError::Transport(msg) => AppError::ExternalApiError(msg),
        }
    }
}
