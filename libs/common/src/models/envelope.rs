//! Generic response envelope
//!
//! Every backend endpoint wraps its payload as
//! `{ success, message, data, timestamp }`. A call failed when `success` is
//! false, whatever the HTTP status said.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{ApplicationFailure, ContractViolation};

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    /// ISO-8601, as emitted by the backend
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Successful envelope, mostly useful for tests and stub backends
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            timestamp: crate::timestamp::format(&Utc::now()),
        }
    }

    /// Parsed envelope timestamp
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        crate::timestamp::parse(&self.timestamp).ok()
    }

    /// Payload of a successful envelope, the failure otherwise
    pub fn into_result(self) -> Result<T, ApplicationFailure> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApplicationFailure {
                message: self.message,
                timestamp: Some(self.timestamp),
            })
        }
    }
}

impl ApiResponse<serde_json::Value> {
    /// Failed envelope carrying `data: null`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: serde_json::Value::Null,
            timestamp: crate::timestamp::format(&Utc::now()),
        }
    }
}

/// Errors from decoding an envelope in two stages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    Application(ApplicationFailure),
    Contract(ContractViolation),
}

/// Decode a response body into the payload type
///
/// The envelope is read first with an untyped payload, so a failure envelope
/// (whose `data` is usually `null`) is reported as an application failure
/// rather than as a payload that does not fit `T`. The `data` key itself is
/// required; `null` is a value.
pub fn decode<T: DeserializeOwned>(context: &str, body: &[u8]) -> Result<T, EnvelopeError> {
    let envelope: ApiResponse<serde_json::Value> = serde_json::from_slice(body)
        .map_err(|e| EnvelopeError::Contract(ContractViolation::new(context, e)))?;

    let data = envelope.into_result().map_err(EnvelopeError::Application)?;
    serde_json::from_value(data)
        .map_err(|e| EnvelopeError::Contract(ContractViolation::new(context, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LoginResponse, User};
    use serde_json::json;

    #[test]
    fn test_failure_envelope_is_an_application_failure() {
        let body = json!({
            "success": false,
            "message": "invalid credentials",
            "data": null,
            "timestamp": "2024-01-01T00:00:00Z"
        })
        .to_string();

        match decode::<LoginResponse>("/auth/login", body.as_bytes()) {
            Err(EnvelopeError::Application(failure)) => {
                assert_eq!(failure.message, "invalid credentials");
                assert_eq!(failure.timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));
            }
            other => panic!("expected application failure, got {:?}", other),
        }
    }

    #[test]
    fn test_success_envelope_yields_data() {
        let body = json!({
            "success": true,
            "message": "Operation successful",
            "data": {
                "id": "u1",
                "email": "a@example.com",
                "role": "ADMIN",
                "createdAt": "2024-01-01T00:00:00",
                "status": "ACTIVE"
            },
            "timestamp": "2024-01-01T00:00:00.123"
        })
        .to_string();

        let user: User = decode("/users/u1", body.as_bytes()).unwrap();
        assert_eq!(user.email, "a@example.com");
    }

    #[test]
    fn test_bad_payload_is_a_contract_violation() {
        let body = json!({
            "success": true,
            "message": "ok",
            "data": { "id": "u1", "role": "GUEST" },
            "timestamp": "2024-01-01T00:00:00Z"
        })
        .to_string();

        match decode::<User>("/users/u1", body.as_bytes()) {
            Err(EnvelopeError::Contract(violation)) => assert_eq!(violation.context, "/users/u1"),
            other => panic!("expected contract violation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_envelope_field_is_a_contract_violation() {
        let body = json!({ "success": true, "data": null }).to_string();
        assert!(matches!(
            decode::<()>("/x", body.as_bytes()),
            Err(EnvelopeError::Contract(_))
        ));
    }

    #[test]
    fn test_missing_data_key_is_a_contract_violation() {
        let body = json!({
            "success": true,
            "message": "ok",
            "timestamp": "2024-01-01T00:00:00"
        })
        .to_string();

        match decode::<()>("/publications/1", body.as_bytes()) {
            Err(EnvelopeError::Contract(violation)) => assert!(violation.detail.contains("data")),
            other => panic!("expected contract violation, got {:?}", other),
        }
        assert!(matches!(
            decode::<Option<String>>("/x", body.as_bytes()),
            Err(EnvelopeError::Contract(_))
        ));
    }

    #[test]
    fn test_failure_constructor() {
        let body = serde_json::to_vec(&ApiResponse::failure("Subscriber not found")).unwrap();
        match decode::<()>("/newsletter/unsubscribe", &body) {
            Err(EnvelopeError::Application(failure)) => {
                assert_eq!(failure.message, "Subscriber not found")
            }
            other => panic!("expected application failure, got {:?}", other),
        }
    }

    #[test]
    fn test_unit_payload_accepts_null_data() {
        let body = json!({
            "success": true,
            "message": "Publication deleted",
            "data": null,
            "timestamp": "2024-01-01T00:00:00"
        })
        .to_string();
        decode::<()>("/publications/1", body.as_bytes()).unwrap();
    }

    #[test]
    fn test_issued_at() {
        let envelope = ApiResponse::ok("ok", 1u32);
        assert!(envelope.issued_at().is_some());
        assert_eq!(envelope.into_result(), Ok(1));
    }
}
