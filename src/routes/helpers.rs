use std::fmt;

use actix_web::dev::ServiceResponse;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::http::StatusCode;
use actix_web::middleware::ErrorHandlerResponse;
use actix_web::{HttpResponse, ResponseError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::utils::error_chain_fmt;

/// Error body shared by every JSON endpoint
#[derive(serde::Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Success body returned after storing a new record
#[derive(serde::Serialize)]
pub struct Created {
    pub success: bool,
    pub message: &'static str,
    pub id: i64,
}

/// Listing error, shared by the read-back endpoints
#[derive(thiserror::Error)]
pub enum ListError {
    #[error("Internal server error")]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for ListError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}

/// Whether a JSON value counts as "nothing was sent"
///
/// `null`, `false`, zero, the empty string and empty arrays or objects are all
/// treated like an absent value.
#[allow(clippy::float_cmp)]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Parse a JSON request body
///
/// An empty body or a blank JSON value (see [`is_blank`]) yields `Ok(None)`,
/// leaving the caller to decide which fields were required.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<Option<T>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    let value: Value = serde_json::from_slice(body)?;
    if is_blank(&value) {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}

/// Deserialize a key that is present in the payload, keeping `null` apart from a missing key
///
/// Use with `#[serde(default)]` on an `Option<Value>` field: a missing key is
/// `None`, `null` is `Some(Value::Null)`.
pub fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Extract the text of a submitted field
///
/// Blank values read as no text at all. Any other non-string value is an error.
pub fn text_field(name: &str, value: Value) -> anyhow::Result<Option<String>> {
    match value {
        Value::String(text) => Ok(Some(text)),
        value if is_blank(&value) => Ok(None),
        _ => anyhow::bail!("Field `{name}` holds a non-string value"),
    }
}

/// Replace any 500 that is not already a JSON error with the generic body
pub fn render_internal_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .response()
        .headers()
        .get(CONTENT_TYPE)
        .is_some_and(|value| value.as_bytes().starts_with(b"application/json"));
    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let (req, res) = res.into_parts();
    if let Some(e) = res.error() {
        tracing::error!(error.cause_chain = ?e, error.message = %e, "Unhandled error");
    }
    let res = HttpResponse::InternalServerError().json(ErrorBody::new("Internal server error"));
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}
