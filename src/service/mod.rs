//! HTTP route handlers for servicedesk.
//!
//! Every handler follows the same shape: validate the body, run one unit of
//! work against a fresh connection, answer with JSON.

pub mod error;
pub mod tickets;
pub mod users;

pub use error::{ApiError, ErrorResponse};

use axum::Json;
use serde::Serialize;
use serde_json::{Map, Value};

/// Request body shape shared by every route: a JSON object read by field
/// name. Arrays and scalars are rejected by the extractor.
pub type JsonObject = Map<String, Value>;

/// Body of a plain confirmation response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

impl MessageResponse {
    pub fn json(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Handle GET / - welcome message.
pub async fn home() -> Json<MessageResponse> {
    MessageResponse::json("Welcome to the College Service Support API!")
}

/// Answer for routes that do not exist.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Whether a field counts as supplied.
///
/// Null, `false`, zero, empty strings and empty collections do not.
pub(crate) fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// A supplied, non-empty string field.
pub(crate) fn present_str(value: Option<&Value>) -> Option<&str> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_present() {
        assert!(is_present(Some(&json!("x"))));
        assert!(is_present(Some(&json!(7))));
        assert!(is_present(Some(&json!(true))));
        assert!(is_present(Some(&json!([1]))));

        assert!(!is_present(None));
        assert!(!is_present(Some(&json!(null))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(0.0))));
        assert!(!is_present(Some(&json!(false))));
        assert!(!is_present(Some(&json!([]))));
        assert!(!is_present(Some(&json!({}))));
    }

    #[test]
    fn test_present_str_requires_string() {
        assert_eq!(present_str(Some(&json!("alice"))), Some("alice"));
        assert_eq!(present_str(Some(&json!(""))), None);
        assert_eq!(present_str(Some(&json!(5))), None);
        assert_eq!(present_str(None), None);
    }
}
