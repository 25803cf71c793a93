//! Shared API request/response types used by the web client and API server.

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Request to send a verification code to an email address.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RequestCodePayload {
    #[garde(email)]
    pub email: String,
}

/// Returned after a verification code has been issued and emailed.
#[derive(Debug, Serialize, Deserialize)]
pub struct RequestCodeResponse {
    pub success: bool,
    pub message: String,
}

/// Submit the verification code received via email.
///
/// Fields default to empty when absent; the server treats empty and missing
/// the same and answers with a single validation message for both.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyCodePayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub code: String,
}

/// Returned after successful verification. `email` is the normalized
/// (trimmed, lower-cased) address the account flow should key on.
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    pub success: bool,
    pub message: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_code_rejects_invalid_email() {
        let payload = RequestCodePayload {
            email: "not-an-email".to_string(),
        };

        assert!(payload.validate().is_err());
    }

    #[test]
    fn request_code_accepts_valid_email() {
        let payload = RequestCodePayload {
            email: "user@example.com".to_string(),
        };

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn verify_payload_defaults_missing_fields_to_empty() {
        let payload: VerifyCodePayload = serde_json::from_str("{}").unwrap();

        assert_eq!(payload.email, "");
        assert_eq!(payload.code, "");
    }
}
