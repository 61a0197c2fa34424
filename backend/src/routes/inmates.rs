//! Inmate and attempt endpoints

use std::sync::Arc;

use axum::{extract::Path, http::StatusCode, Extension, Json};
use case_tracker_storage::{
    inmate::InmateStorage,
    model::{parse_gender, Gender, Inmate, InmateAttempt, InvalidEnumValue},
};
use schemars::JsonSchema;
use serde::{
    de::{self, Unexpected},
    Deserialize, Deserializer, Serialize,
};
use validator::Validate;

use crate::types::{AppError, ValidatedJson};

/// Gender as submitted by clients
///
/// Accepts the numeric code (`0` female, `1` male) or its name, case-insensitive.
/// Numeric strings such as `"1"` are accepted as well.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum GenderInput {
    /// Numeric gender code
    Code(u8),
    /// Gender name or numeric code as text
    Name(String),
}

impl GenderInput {
    fn parse(&self) -> Result<Gender, InvalidEnumValue> {
        match self {
            Self::Code(code) => Gender::try_from(*code),
            Self::Name(name) => parse_gender(name),
        }
    }
}

/// Request to create or replace an inmate
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
pub struct CreateInmateRequest {
    /// Inmate identifier, raw or prefixed with `i#`
    #[validate(length(min = 1))]
    pub id: String,
    /// Last name
    pub last_name: String,
    /// Gender
    pub gender: GenderInput,
}

/// Request to record a contact attempt
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate)]
pub struct RecordAttemptRequest {
    /// Inmate identifier, raw or prefixed with `i#`
    #[validate(length(min = 1))]
    pub id: String,
    /// Reason for the attempt
    pub reason: String,
    /// Attempt counter, a whole number that fits a signed 8-bit integer
    #[serde(deserialize_with = "deserialize_attempts")]
    #[schemars(with = "i8")]
    pub attempts: i8,
}

/// Accepts any JSON number with no fractional part inside the `i8` range, so
/// `3` and `3.0` are equal while `3.5` and `128` are rejected
fn deserialize_attempts<'de, D>(deserializer: D) -> Result<i8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    let range = f64::from(i8::MIN)..=f64::from(i8::MAX);

    if value.fract() != 0.0 || !range.contains(&value) {
        return Err(de::Error::invalid_value(
            Unexpected::Float(value),
            &"a whole number between -128 and 127",
        ));
    }

    #[allow(clippy::cast_possible_truncation)]
    let attempts = value as i8;
    Ok(attempts)
}

/// An inmate as returned by the API
#[derive(Debug, Serialize, JsonSchema)]
pub struct InmateResponse {
    /// Namespaced inmate identifier (`i#<id>`)
    pub id: String,
    /// Last name
    pub last_name: String,
    /// Gender code, `0` female or `1` male
    pub gender: u8,
}

impl From<Inmate> for InmateResponse {
    fn from(inmate: Inmate) -> Self {
        Self {
            id: inmate.key(),
            gender: inmate.gender.code(),
            last_name: inmate.last_name,
        }
    }
}

/// Response when an inmate is created
#[derive(Debug, Serialize, JsonSchema)]
pub struct CreateInmateResponse {
    /// The stored inmate
    pub inmate: InmateResponse,
}

/// An attempt as returned by the API
#[derive(Debug, Serialize, JsonSchema)]
pub struct AttemptResponse {
    /// Namespaced inmate identifier
    pub inmate_id: String,
    /// Namespaced attempt identifier
    pub id: String,
    /// RFC 3339 creation time
    pub creation_date_and_time: String,
    /// Reason for the attempt
    pub reason: String,
    /// Attempt counter
    pub attempts: i8,
}

impl From<InmateAttempt> for AttemptResponse {
    fn from(attempt: InmateAttempt) -> Self {
        Self {
            creation_date_and_time: attempt.creation.to_rfc3339(),
            inmate_id: attempt.inmate_id,
            id: attempt.id,
            reason: attempt.reason,
            attempts: attempt.attempts,
        }
    }
}

/// List all inmates
///
/// # Errors
///
/// Returns `500 INTERNAL_SERVER_ERROR` if the table cannot be scanned or an
/// item cannot be decoded
pub async fn list_inmates(
    Extension(inmate_storage): Extension<Arc<InmateStorage>>,
) -> Result<Json<Vec<InmateResponse>>, AppError> {
    let inmates = inmate_storage.list_inmates().await?;

    Ok(Json(inmates.into_iter().map(InmateResponse::from).collect()))
}

/// Create or replace an inmate
///
/// # Returns
///
/// Returns `201 CREATED` with the stored inmate
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a malformed body, an invalid gender, a blank
/// id or a failed write
pub async fn create_inmate(
    Extension(inmate_storage): Extension<Arc<InmateStorage>>,
    ValidatedJson(payload): ValidatedJson<CreateInmateRequest>,
) -> Result<(StatusCode, Json<CreateInmateResponse>), AppError> {
    let gender = payload.gender.parse()?;
    let inmate = Inmate::new(&payload.id, payload.last_name, gender);

    inmate_storage.put_inmate(&inmate).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateInmateResponse {
            inmate: inmate.into(),
        }),
    ))
}

/// Record a contact attempt against an inmate
///
/// The inmate does not have to exist.
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a malformed body, a non-numeric or out of
/// range `attempts`, a blank id or a failed write
pub async fn record_attempt(
    Extension(inmate_storage): Extension<Arc<InmateStorage>>,
    ValidatedJson(payload): ValidatedJson<RecordAttemptRequest>,
) -> Result<StatusCode, AppError> {
    inmate_storage
        .record_attempt(&payload.id, &payload.reason, payload.attempts)
        .await?;

    Ok(StatusCode::OK)
}

/// List the attempts recorded against an inmate
///
/// # Errors
///
/// Returns `400 BAD_REQUEST` for a blank id, or `500 INTERNAL_SERVER_ERROR` if
/// the query fails or an item cannot be decoded
pub async fn list_attempts(
    Extension(inmate_storage): Extension<Arc<InmateStorage>>,
    Path(inmate_id): Path<String>,
) -> Result<Json<Vec<AttemptResponse>>, AppError> {
    let attempts = inmate_storage.list_attempts(&inmate_id).await?;

    Ok(Json(attempts.into_iter().map(AttemptResponse::from).collect()))
}
