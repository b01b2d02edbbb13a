//! JSON response envelope.
//!
//! # Responsibilities
//! - Wrap every outgoing body as `{"status": ..., "result": ...}`
//! - Pretty-print the body with a stable field order
//! - Set the HTTP status of the outgoing response
//!
//! # Design Decisions
//! - The envelope accepts any integer status; only the transport status
//!   line is constrained to valid HTTP codes (500 otherwise)
//! - Four-space indentation

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

const INDENT: &[u8] = b"    ";

/// The `{status, result}` body of every response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: i64,
    pub result: T,
}

impl<T> Envelope<T> {
    pub fn new(status: i64, result: T) -> Self {
        Self { status, result }
    }

    /// `200` envelope.
    pub fn ok(result: T) -> Self {
        Self::new(200, result)
    }
}

impl<T: Serialize> Envelope<T> {
    /// Serialize as pretty-printed JSON, `status` first.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let mut buf = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut serializer)?;
        String::from_utf8(buf).map_err(serde_json::Error::custom)
    }

    /// The status line for this envelope.
    pub fn status_code(&self) -> StatusCode {
        u16::try_from(self.status)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or_else(|| {
                tracing::warn!(status = self.status, "Envelope status is not a valid HTTP status");
                StatusCode::INTERNAL_SERVER_ERROR
            })
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        match self.to_json() {
            Ok(body) => (
                self.status_code(),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response envelope");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to serialize response").into_response()
            }
        }
    }
}

/// Encode `result` with `status` into an envelope body.
pub fn encode<T: Serialize>(status: i64, result: T) -> Result<String, serde_json::Error> {
    Envelope::new(status, result).to_json()
}

/// Build the outgoing response for `status` and `result`.
pub fn dispatch<T: Serialize>(status: i64, result: T) -> Response {
    Envelope::new(status, result).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_field_order_and_indent() {
        let body = encode(200, json!({"ok": true})).unwrap();
        assert_eq!(
            body,
            "{\n    \"status\": 200,\n    \"result\": {\n        \"ok\": true\n    }\n}"
        );
    }

    #[test]
    fn test_non_ascii_output_is_verbatim() {
        let body = encode(200, "żółw 🐢").unwrap();
        assert_eq!(body, "{\n    \"status\": 200,\n    \"result\": \"żółw 🐢\"\n}");
    }

    #[test]
    fn test_round_trip() {
        let cases = [
            (200, json!({"ok": true})),
            (201, json!([1, 2.5, "three", null, {"nested": {"deep": [true]}}])),
            (204, Value::Null),
            (-1, json!("any integer is accepted")),
            (99999, json!({"unicode": "żółw 🐢", "escaped": "a\"b\\c\n"})),
        ];
        for (status, result) in cases {
            let body = encode(status, &result).unwrap();
            let decoded: Envelope<Value> = serde_json::from_str(&body).unwrap();
            assert_eq!(decoded, Envelope::new(status, result));
        }
    }

    #[test]
    fn test_status_code() {
        assert_eq!(Envelope::ok(()).status_code(), StatusCode::OK);
        assert_eq!(Envelope::new(404, ()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Envelope::new(-5, ()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            Envelope::new(1000, ()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_dispatch_sets_status_and_body() {
        let response = dispatch(201, json!({"id": 7}));
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let decoded: Envelope<Value> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, Envelope::new(201, json!({"id": 7})));
    }
}
