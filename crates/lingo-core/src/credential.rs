//! Session credential types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer token for authenticated requests.
///
/// Tokens are short-lived strings issued by the backend on login or
/// registration.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new bearer token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

/// The persisted session credential.
///
/// One record per installation: the bearer token plus the display fields
/// the backend returns on login. Absence of a stored credential means
/// "logged out".
#[derive(Clone, Serialize, Deserialize)]
pub struct Credential {
    /// The bearer token attached to every authenticated request.
    pub token: AuthToken,
    /// First name, for display.
    pub fname: String,
    /// Last name, for display.
    pub lname: String,
    /// Avatar reference (URL or backend path), if the account has one.
    pub avatar: Option<String>,
}

impl Credential {
    /// Create a new credential record.
    pub fn new(
        token: impl Into<String>,
        fname: impl Into<String>,
        lname: impl Into<String>,
        avatar: Option<String>,
    ) -> Self {
        Self {
            token: AuthToken::new(token),
            fname: fname.into(),
            lname: lname.into(),
            avatar,
        }
    }

    /// Returns the account's display name ("First Last").
    pub fn display_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }
}

// Custom Debug impl that hides the token
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"[REDACTED]")
            .field("fname", &self.fname)
            .field("lname", &self.lname)
            .field("avatar", &self.avatar)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = AuthToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn credential_hides_token_in_debug() {
        let credential = Credential::new("abc123", "Jane", "Doe", None);
        let debug = format!("{:?}", credential);
        assert!(!debug.contains("abc123"));
        assert!(debug.contains("Jane"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn display_name_joins_fields() {
        let credential = Credential::new("t", "Jane", "Doe", None);
        assert_eq!(credential.display_name(), "Jane Doe");
    }
}
