//! Authentication endpoints: login, registration, token verification.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use lingo_core::error::{ApiError, AuthError, Error};
use lingo_core::{ApiRequest, ApiUrl, Credential, CredentialStore};

use crate::gateway::{Gateway, classify_transport};

const LOGIN: &str = "auth/login";
const REGISTER: &str = "auth/register";
const VERIFY: &str = "auth/verify";

/// Request body for login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    username_or_email: &'a str,
    password: &'a str,
}

/// Response from a successful login.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    fname: String,
    lname: String,
    avatar: Option<String>,
}

/// Registration details for a new account.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    /// First name.
    pub fname: String,
    /// Last name.
    pub lname: String,
    /// Email address, also the login identifier.
    pub email: String,
    /// Date of birth, `YYYY-MM-DD`.
    pub dob: String,
    /// Account password.
    pub password: String,
}

/// Client for the unauthenticated auth endpoints.
///
/// Login and registration run before any credential exists, so they
/// bypass the gateway; a successful login persists the returned
/// credential into the injected store.
pub struct AuthClient {
    host: ApiUrl,
    client: reqwest::Client,
    store: Arc<dyn CredentialStore>,
}

impl AuthClient {
    /// Create an auth client for the given host and credential store.
    pub fn new(host: ApiUrl, store: Arc<dyn CredentialStore>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            host,
            client,
            store,
        }
    }

    /// Authenticate and persist the returned credential.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] when the backend rejects
    /// the login, a transport error when it is unreachable, or a store
    /// error when the credential cannot be persisted.
    #[instrument(skip(self, password), fields(host = %self.host, identifier = %username_or_email))]
    pub async fn login(&self, username_or_email: &str, password: &str) -> Result<Credential, Error> {
        info!("logging in");

        let request = LoginRequest {
            username_or_email,
            password,
        };

        let response = self
            .client
            .post(self.host.endpoint_url(LOGIN))
            .header("ngrok-skip-browser-warning", "true")
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Transport(classify_transport(&e)))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(classify_transport(&e)))?;

        if !(200..300).contains(&status) {
            let message = error_message(&body)
                .unwrap_or_else(|| "username or password is incorrect".to_string());
            return Err(AuthError::InvalidCredentials { message }.into());
        }

        let login: LoginResponse = serde_json::from_slice(&body).map_err(|e| {
            Error::Api(ApiError::new(
                status,
                Some(format!("malformed login response: {}", e)),
            ))
        })?;

        let credential = Credential::new(login.token, login.fname, login.lname, login.avatar);
        self.store.save(&credential).await?;

        debug!("login succeeded, credential persisted");
        Ok(credential)
    }

    /// Register a new account. The account still has to log in afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] with the backend's message when registration
    /// is rejected (missing fields, duplicate email).
    #[instrument(skip(self, registration), fields(host = %self.host, email = %registration.email))]
    pub async fn register(&self, registration: &Registration) -> Result<(), Error> {
        info!("registering account");

        let response = self
            .client
            .post(self.host.endpoint_url(REGISTER))
            .header("ngrok-skip-browser-warning", "true")
            .json(registration)
            .send()
            .await
            .map_err(|e| Error::Transport(classify_transport(&e)))?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            return Ok(());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(classify_transport(&e)))?;
        Err(ApiError::new(status, error_message(&body)).into())
    }
}

impl std::fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthClient").field("host", &self.host).finish()
    }
}

fn error_message(body: &[u8]) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

impl Gateway {
    /// Check whether the stored token is still accepted by the backend.
    ///
    /// Runs through the session-expiry policy: a rejected or missing token
    /// clears the credential and notifies the expiry listener, so a
    /// `false` return means the caller is logged out.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> bool {
        self.send(ApiRequest::get(VERIFY)).await.is_success()
    }
}
