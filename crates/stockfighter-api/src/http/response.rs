/*
[INPUT]:  Raw HTTP response bodies
[OUTPUT]: Decoded ApiResponse values or InvalidJson errors carrying the raw bytes
[POS]:    HTTP layer - response normalization
[UPDATE]: When the success/error envelope of the service changes
*/

use crate::http::{Result, StockfighterError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decoded response body, returned exactly as the service sent it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse(Value);

impl ApiResponse {
    /// Decode a response body; non-JSON bodies keep their raw bytes in the error
    pub fn from_body(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body)
            .map(Self)
            .map_err(|err| StockfighterError::invalid_json(err, body))
    }

    /// True when the body is a mapping with a truthy `ok` field
    pub fn is_ok(&self) -> bool {
        self.0.get("ok").is_some_and(is_truthy)
    }

    /// Error reported by the service, if any
    pub fn error(&self) -> Option<&str> {
        self.0.get("error").and_then(Value::as_str)
    }

    /// Error text suitable for logging a failed call
    pub fn error_message(&self) -> String {
        match self.0.get("error") {
            Some(Value::String(message)) => message.clone(),
            Some(other) => other.to_string(),
            None => "no error reported".to_string(),
        }
    }

    /// Look up a top-level field
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Instance id returned when a level is started
    pub fn instance_id(&self) -> Option<u64> {
        self.0.get("instanceId").and_then(Value::as_u64)
    }

    /// Deserialize the body into a caller-defined type
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(T::deserialize(&self.0)?)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ApiResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// JSON truthiness: false, null, zero and empty containers are all falsy
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}
