use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeshotError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("Failed to initialize OCR engine: {0}")]
    InitializationError(String),

    #[error("No OCR engine is loaded")]
    EngineUnavailable,

    #[error("Failed to recognize text: {0}")]
    ProcessingError(String),

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CodeshotError {
    /// Stable machine-readable code, also used in HTTP error bodies
    pub fn code(&self) -> &'static str {
        match self {
            CodeshotError::InvalidInput(_) => "INVALID_INPUT",
            CodeshotError::Configuration(_) => "CONFIGURATION_ERROR",
            CodeshotError::DecodeError(_) => "DECODE_ERROR",
            CodeshotError::EncodeError(_) => "ENCODE_ERROR",
            CodeshotError::InitializationError(_) => "INIT_ERROR",
            CodeshotError::EngineUnavailable => "OCR_UNAVAILABLE",
            CodeshotError::ProcessingError(_) => "PROCESSING_ERROR",
            CodeshotError::ImageTooLarge { .. } => "IMAGE_TOO_LARGE",
            CodeshotError::MissingFile => "MISSING_FILE",
            CodeshotError::InvalidRequest(_) => "INVALID_REQUEST",
            CodeshotError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            CodeshotError::InvalidInput(_)
            | CodeshotError::Configuration(_)
            | CodeshotError::DecodeError(_)
            | CodeshotError::MissingFile
            | CodeshotError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CodeshotError::EncodeError(_)
            | CodeshotError::InitializationError(_)
            | CodeshotError::ProcessingError(_)
            | CodeshotError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CodeshotError::EngineUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            CodeshotError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for CodeshotError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (status, body).into_response()
    }
}
