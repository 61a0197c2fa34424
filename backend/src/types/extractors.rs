//! Custom extractors for request validation

use aide::operation::OperationInput;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    Json,
};
use schemars::JsonSchema;
use validator::Validate;

use crate::types::error::AppError;

/// JSON extractor that validates the payload
///
/// Every rejection (missing content type, malformed JSON, wrong field types,
/// failed validation rules) becomes a `400 BAD_REQUEST`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|err| {
                tracing::warn!(rejection = %err.body_text(), "Failed to bind request body");
                match err {
                    JsonRejection::MissingJsonContentType(_) => AppError::new(
                        StatusCode::BAD_REQUEST,
                        "invalid_content_type",
                        "Missing Content-Type: application/json header",
                        false,
                    ),
                    _ => AppError::new(
                        StatusCode::BAD_REQUEST,
                        "invalid_json",
                        "Invalid JSON payload",
                        false,
                    ),
                }
            })?;

        payload.validate().map_err(|errors| {
            tracing::warn!(%errors, "Request validation failed");
            AppError::new(
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed",
                false,
            )
        })?;

        Ok(Self(payload))
    }
}

impl<T> OperationInput for ValidatedJson<T>
where
    T: JsonSchema,
{
    fn operation_input(
        ctx: &mut aide::generate::GenContext,
        operation: &mut aide::openapi::Operation,
    ) {
        Json::<T>::operation_input(ctx, operation);
    }
}
