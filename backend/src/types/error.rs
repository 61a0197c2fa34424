//! Universal error handling for the API

use aide::OperationOutput;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use case_tracker_storage::{inmate::InmateStorageError, model::InvalidEnumValue};
use schemars::JsonSchema;
use serde::Serialize;

/// API error response envelope
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    /// Whether the client should retry the request
    pub allow_retry: bool,
    /// Error details
    error: ErrorBody,
}

/// Error body containing code and message
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    /// Machine-readable error code
    pub code: &'static str,
    /// Human-readable error message
    pub message: &'static str,
}

/// Application error type that wraps the API error response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    inner: ApiErrorResponse,
}

impl AppError {
    /// Create a new application error
    #[must_use]
    pub const fn new(
        status: StatusCode,
        code: &'static str,
        msg: &'static str,
        retry: bool,
    ) -> Self {
        Self {
            status,
            inner: ApiErrorResponse {
                allow_retry: retry,
                error: ErrorBody { code, message: msg },
            },
        }
    }

    /// HTTP status of the response
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Machine-readable error code
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.inner.error.code
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error based on status code
        match self.status.as_u16() {
            400..=499 => tracing::warn!(
                "Client error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            500..=599 => tracing::error!(
                "Server error: {} - {}",
                self.inner.error.code,
                self.inner.error.message
            ),
            _ => {}
        }

        (self.status, Json(self.inner)).into_response()
    }
}

impl OperationOutput for AppError {
    type Inner = ApiErrorResponse;

    fn operation_response(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) -> Option<aide::openapi::Response> {
        Json::<ApiErrorResponse>::operation_response(ctx, operation)
    }
}

impl From<InmateStorageError> for AppError {
    fn from(err: InmateStorageError) -> Self {
        use InmateStorageError::{
            DecodeFailed, EncodeFailed, InvalidArgument, QueryFailed, ScanFailed, WriteFailed,
        };

        match &err {
            InvalidArgument(msg) => {
                tracing::debug!("Invalid argument: {msg}");
                Self::new(StatusCode::BAD_REQUEST, "invalid_argument", *msg, false)
            }
            // Writes only happen on POST, which reports every failure as 400
            WriteFailed(_) => {
                tracing::error!("DynamoDB write error: {err}");
                Self::new(
                    StatusCode::BAD_REQUEST,
                    "write_failed",
                    "Failed to store record",
                    true,
                )
            }
            ScanFailed(_) | QueryFailed(_) => {
                tracing::error!("DynamoDB read error: {err}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "Failed to read records",
                    true,
                )
            }
            EncodeFailed(_) | DecodeFailed(_) => {
                tracing::error!("Mapping error: {err}");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error",
                    false,
                )
            }
        }
    }
}

impl From<InvalidEnumValue> for AppError {
    fn from(err: InvalidEnumValue) -> Self {
        tracing::debug!("Invalid enum value: {err}");
        Self::new(
            StatusCode::BAD_REQUEST,
            "invalid_gender",
            "Gender must be one of male, female, 0 or 1",
            false,
        )
    }
}
