//! Classified API responses.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::error::{Error, InvalidInputError};

/// Classification of a completed gateway call.
///
/// Every call resolves to exactly one class, whether or not a response was
/// received from the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseClass {
    /// 2xx from the backend.
    Success,
    /// 401/403 from the backend, or no stored credential (short-circuit).
    AuthFailure,
    /// Any other 4xx/5xx; passed through for the caller to interpret.
    BusinessError,
    /// Transport error before any response was received.
    NetworkFailure,
}

impl ResponseClass {
    /// Classify an HTTP status received from the backend.
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => ResponseClass::Success,
            401 | 403 => ResponseClass::AuthFailure,
            _ => ResponseClass::BusinessError,
        }
    }
}

/// A response-shaped result from the gateway.
///
/// The gateway never throws for session-ending conditions: callers always
/// receive an `ApiResponse` they can branch on by status. Responses that
/// reached the backend carry the original status and body unmodified;
/// short-circuits and transport failures carry a synthesized status (401
/// and 500 respectively) and a JSON body with a `message` field.
#[derive(Clone, Debug)]
pub struct ApiResponse {
    /// HTTP status code (synthesized for no-credential and transport cases).
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
    /// Classification of this outcome.
    pub class: ResponseClass,
}

impl ApiResponse {
    /// Wrap a response actually received from the backend.
    pub fn received(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            body,
            class: ResponseClass::from_status(status),
        }
    }

    /// Synthesize the no-credential short-circuit response.
    pub fn missing_credential() -> Self {
        Self {
            status: 401,
            body: serde_json::to_vec(&json!({"message": "authentication token not found"}))
                .unwrap_or_default(),
            class: ResponseClass::AuthFailure,
        }
    }

    /// Synthesize the transport-failure response.
    pub fn network_failure(message: &str) -> Self {
        Self {
            status: 500,
            body: serde_json::to_vec(&json!({"message": message})).unwrap_or_default(),
            class: ResponseClass::NetworkFailure,
        }
    }

    /// Returns true for 2xx outcomes.
    pub fn is_success(&self) -> bool {
        self.class == ResponseClass::Success
    }

    /// Returns the body as UTF-8 text (lossy).
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_slice(&self.body).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: format!("response body is not valid JSON: {}", e),
            })
        })
    }

    /// Returns the `message` field of a JSON error body, if present.
    pub fn error_message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }
        serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(|b| b.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_statuses() {
        assert_eq!(ResponseClass::from_status(200), ResponseClass::Success);
        assert_eq!(ResponseClass::from_status(201), ResponseClass::Success);
        assert_eq!(ResponseClass::from_status(401), ResponseClass::AuthFailure);
        assert_eq!(ResponseClass::from_status(403), ResponseClass::AuthFailure);
        assert_eq!(ResponseClass::from_status(400), ResponseClass::BusinessError);
        assert_eq!(ResponseClass::from_status(500), ResponseClass::BusinessError);
    }

    #[test]
    fn missing_credential_is_synthesized_401() {
        let response = ApiResponse::missing_credential();
        assert_eq!(response.status, 401);
        assert_eq!(response.class, ResponseClass::AuthFailure);
        assert_eq!(
            response.error_message().as_deref(),
            Some("authentication token not found")
        );
    }

    #[test]
    fn network_failure_is_synthesized_500() {
        let response = ApiResponse::network_failure("connection refused");
        assert_eq!(response.status, 500);
        assert_eq!(response.class, ResponseClass::NetworkFailure);
    }

    #[test]
    fn error_message_from_backend_body() {
        let response = ApiResponse::received(403, br#"{"message":"token expired"}"#.to_vec());
        assert_eq!(response.error_message().as_deref(), Some("token expired"));
    }

    #[test]
    fn error_message_absent_for_non_json() {
        let response = ApiResponse::received(500, b"Internal Server Error".to_vec());
        assert_eq!(response.error_message(), None);
    }
}
