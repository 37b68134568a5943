//! Mapping of `reqwest` failures and service error bodies.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use stockroom_core::error::{Error, ProtocolError, TransportError};

/// Classify a `reqwest` failure where no usable response was received.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let message = describe(&err);
    let err = if err.is_timeout() {
        TransportError::Timeout { message }
    } else if err.is_connect() {
        TransportError::Connection { message }
    } else {
        TransportError::Http { message }
    };
    Error::Transport(err)
}

/// The error's message followed by each of its causes.
fn describe(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Decode a successful body; an empty body is treated as `null`.
pub(crate) fn decode_body<R: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> Result<R, Error> {
    let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|e| {
        ProtocolError::new(
            status.as_u16(),
            Some(format!("malformed response body: {}", e)),
        )
        .into()
    })
}

/// Error body: `{"detail": "..."}` or a validation list
/// `{"detail": [{"loc": [...], "msg": "...", "type": "..."}]}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Extract the human-readable `detail` of an error body, if any.
pub(crate) fn error_detail(bytes: &[u8]) -> Option<String> {
    let body: ErrorBody = serde_json::from_slice(bytes).ok()?;

    match body.detail? {
        serde_json::Value::String(detail) => Some(detail),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(String::from)
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_detail() {
        let body = json!({"detail": "Incorrect username or password"}).to_string();
        assert_eq!(
            error_detail(body.as_bytes()).as_deref(),
            Some("Incorrect username or password")
        );
    }

    #[test]
    fn validation_list_detail() {
        let body = json!({"detail": [
            {"loc": ["body", "quantity"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "price"], "msg": "value is not a valid float", "type": "type_error.float"}
        ]})
        .to_string();
        assert_eq!(
            error_detail(body.as_bytes()).as_deref(),
            Some("field required; value is not a valid float")
        );
    }

    #[test]
    fn non_json_body_has_no_detail() {
        assert_eq!(error_detail(b"<html>Bad Gateway</html>"), None);
        assert_eq!(error_detail(b""), None);
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        decode_body::<()>(StatusCode::NO_CONTENT, b"").unwrap();
        decode_body::<()>(StatusCode::OK, b"  \n").unwrap();
    }

    #[test]
    fn malformed_body_is_a_protocol_error() {
        let err = decode_body::<Vec<i64>>(StatusCode::OK, b"{\"items\":").unwrap_err();
        match err {
            Error::Protocol(e) => {
                assert_eq!(e.status, 200);
                assert!(e.detail.unwrap().starts_with("malformed response body"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_message_keeps_the_cause() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:9/")
            .send()
            .await
            .unwrap_err();
        let top = err.to_string();

        match transport_error(err) {
            Error::Transport(TransportError::Connection { message }) => {
                assert!(message.starts_with(&top));
                assert!(message.len() > top.len(), "cause missing: {message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
