//! # Response Envelope
//!
//! Every response body is wrapped in an envelope:
//!
//! ```json
//! { "ok": true,  "result": ... }
//! { "ok": false, "error_code": 409, "description": "Conflict", "parameters": { ... } }
//! ```
//!
//! [`decode_envelope`] unwraps the payload, or turns a failed envelope into a
//! [`RemoteError`] without ever looking at `result`.
use crate::client::CallError;
use crate::codec::{self, JsonCodec, Maybe, SchemaError};
use crate::record;
use serde_json::Value;

record! {
    /// Extra hints attached to some failed responses.
    pub struct ResponseParameters {
        /// The group was upgraded to a supergroup with this identifier.
        pub migrate_to_chat_id: Maybe<i64>,
        /// Seconds to wait before repeating a request that hit flood control.
        pub retry_after: Maybe<u32>,
    }
}

record! {
    struct Envelope {
        ok: bool,
        result: Maybe<Value>,
        error_code: Maybe<i64>,
        description: Maybe<String>,
        parameters: Maybe<Value>,
    }
}

/// A failure reported by the remote API (`"ok": false`).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Remote API error {error_code}: {description}")]
pub struct RemoteError {
    pub error_code: i64,
    pub description: String,
    pub parameters: Option<ResponseParameters>,
}

impl RemoteError {
    /// Seconds the server asked to wait before retrying, if any.
    pub fn retry_after(&self) -> Option<u32> {
        self.parameters
            .as_ref()
            .and_then(|p| p.retry_after.get().copied())
    }
}

/// Decodes a response envelope, returning its `result` decoded as `T`.
pub fn decode_envelope<T: JsonCodec>(response: &Value) -> Result<T, CallError> {
    let envelope: Envelope = codec::from_value(response)?;

    if !envelope.ok {
        let missing = |field| SchemaError::MissingRequiredField {
            record: "Envelope",
            field,
        };

        return Err(CallError::Remote(RemoteError {
            error_code: envelope.error_code.into_option().ok_or(missing("error_code"))?,
            description: envelope
                .description
                .into_option()
                .ok_or(missing("description"))?,
            parameters: envelope.parameters.get().and_then(decode_parameters),
        }));
    }

    let result = match envelope.result {
        Maybe::Present(result) => result,
        // `"result": null` is a valid payload for unit-like results.
        Maybe::Null => Value::Null,
        Maybe::Absent => {
            return Err(SchemaError::MissingRequiredField {
                record: "Envelope",
                field: "result",
            }
            .into());
        }
    };

    T::decode(&result).map_err(|source| {
        SchemaError::InField {
            record: "Envelope",
            field: "result",
            source: Box::new(source),
        }
        .into()
    })
}

// Parameters are hints: a malformed block must not hide the remote error itself.
fn decode_parameters(value: &Value) -> Option<ResponseParameters> {
    ResponseParameters::decode(value)
        .inspect_err(|err| tracing::debug!(error = %err, "Ignoring malformed response parameters"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn failed_envelope_carries_parameters() {
        let response = json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests: retry after 7",
            "parameters": { "retry_after": 7 }
        });

        let Err(CallError::Remote(err)) = decode_envelope::<bool>(&response) else {
            panic!("Expected a remote error");
        };

        assert_eq!(err.error_code, 429);
        assert_eq!(err.retry_after(), Some(7));
    }

    #[test]
    fn malformed_parameters_keep_the_remote_error() {
        let response = json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests",
            "parameters": { "retry_after": -1 }
        });

        let Err(CallError::Remote(err)) = decode_envelope::<bool>(&response) else {
            panic!("Expected a remote error");
        };

        assert_eq!(err.error_code, 429);
        assert_eq!(err.description, "Too Many Requests");
        assert_eq!(err.parameters, None);
    }

    #[test]
    fn failed_envelope_without_code_is_a_schema_error() {
        let response = json!({ "ok": false, "description": "broken" });

        assert!(matches!(
            decode_envelope::<bool>(&response),
            Err(CallError::Schema(SchemaError::MissingRequiredField {
                field: "error_code",
                ..
            }))
        ));
    }

    #[test]
    fn result_errors_are_located_under_result() {
        let response = json!({ "ok": true, "result": "yes" });

        let Err(CallError::Schema(err)) = decode_envelope::<bool>(&response) else {
            panic!("Expected a schema error");
        };

        assert_eq!(err.path(), "result");
    }

    #[test]
    fn missing_ok_is_rejected() {
        assert!(matches!(
            decode_envelope::<bool>(&json!({ "result": true })),
            Err(CallError::Schema(SchemaError::MissingRequiredField { field: "ok", .. }))
        ));
    }
}
