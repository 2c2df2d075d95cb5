//! HTTP request handlers for the generation API.

pub mod persona;
pub mod prompt;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::error::AppError;

/// Decode a request body without ever rejecting it.
///
/// Unparseable bytes, non-object JSON, and fields of the wrong type all
/// decode as `T::default()`, which the services then reject as blank input.
/// A JSON string whose content is itself a JSON object is unwrapped once.
pub(crate) fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    let value = match serde_json::from_slice::<Value>(body) {
        Ok(Value::String(inner)) => serde_json::from_str::<Value>(&inner).unwrap_or(Value::Null),
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(error = %err, "request body is not JSON");
            Value::Null
        }
    };

    if !value.is_object() {
        return T::default();
    }
    serde_json::from_value(value).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "request body has unexpected shape");
        T::default()
    })
}

/// Fallback for non-POST methods on the generation routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
