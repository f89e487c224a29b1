//! The token type and the cache contract every backend implements

use serde_json::{Map, Value};

use super::error::Result;

/// An opaque authentication token: string keys mapped to arbitrary JSON values
///
/// The cache imposes no schema. Typical contents are `access_token`,
/// `refresh_token` and an expiry, but backends never look inside.
pub type Token = Map<String, Value>;

/// Storage backend capable of persisting a single token
///
/// Callers are written against this trait so that backends can be swapped
/// without touching them. Both methods are required; there is no usable
/// default behaviour.
pub trait TokenCache {
    /// Persists `data`, replacing whatever was stored before
    ///
    /// # Returns
    /// * `Ok(())` once the token is stored
    /// * `Err` if the backend could not store it
    fn save_token(&self, data: &Token) -> Result<()>;

    /// Retrieves the stored token
    ///
    /// # Returns
    /// * `Ok(Some(token))` if a non-empty token is stored
    /// * `Ok(None)` if nothing was ever saved or the stored token is empty
    /// * `Err` if stored data exists but cannot be read back
    fn get_token(&self) -> Result<Option<Token>>;
}

/// Returns true for values that count as "nothing stored"
///
/// Null, `false`, zero, and empty strings, arrays or objects are all treated
/// as an absent token.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Human-readable name of a JSON value's type, used in error messages
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
