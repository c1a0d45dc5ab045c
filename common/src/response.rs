//! API error body parsing.
//!
//! The console backend reports failures either as `{"error": "message"}`
//! or inside the envelope `{"success": false, "error": {"code", "message"}}`.

use serde::Deserialize;

/// Message used when a failed response carries no usable `error` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "API Request Failed";

/// Structured error details inside a response envelope.
#[derive(Debug, Deserialize)]
pub struct ApiError {
    /// Error code for client handling (e.g., "VALIDATION_ERROR", "NOT_FOUND").
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable error message.
    pub message: String,

    /// Additional error details (optional).
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// The `error` field of a failed response.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ErrorField {
    /// Plain message string.
    Message(String),
    /// Structured error object.
    Detailed(ApiError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<ErrorField>,
}

/// Extracts the server-provided error message from a response body.
///
/// Returns `None` when the body has no `error` field, or it is empty.
pub fn error_message(body: &serde_json::Value) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_value(body.clone()).ok()?;
    let message = match parsed.error? {
        ErrorField::Message(m) => m,
        ErrorField::Detailed(e) => e.message,
    };
    (!message.is_empty()).then_some(message)
}

/// Like [`error_message`], falling back to [`DEFAULT_ERROR_MESSAGE`].
pub fn error_message_or_default(body: Option<&serde_json::Value>) -> String {
    body.and_then(error_message)
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_error_string() {
        let body = json!({ "error": "Stock insuffisant" });
        assert_eq!(error_message(&body).as_deref(), Some("Stock insuffisant"));
    }

    #[test]
    fn test_envelope_error_object() {
        let body = json!({
            "success": false,
            "error": { "code": "NOT_FOUND", "message": "Client introuvable" }
        });
        assert_eq!(error_message(&body).as_deref(), Some("Client introuvable"));
    }

    #[test]
    fn test_missing_error_falls_back() {
        let body = json!({ "detail": "nope" });
        assert_eq!(error_message(&body), None);
        assert_eq!(error_message_or_default(Some(&body)), DEFAULT_ERROR_MESSAGE);
        assert_eq!(error_message_or_default(None), DEFAULT_ERROR_MESSAGE);
    }

    #[test]
    fn test_non_object_body_falls_back() {
        assert_eq!(error_message(&json!([1, 2, 3])), None);
        assert_eq!(error_message(&json!({ "error": null })), None);
    }
}
