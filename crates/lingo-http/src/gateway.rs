//! The session-guarded request gateway.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, trace, warn};

use lingo_core::error::{ApiError, AuthError, Error, TransportError};
use lingo_core::{
    ApiRequest, ApiResponse, ApiUrl, CredentialStore, ExpiryListener, ExpiryReason, FormValue,
    RequestBody, ResponseClass,
};

/// Header sent with every request to bypass the tunneling host's
/// interstitial warning page.
const SKIP_BROWSER_WARNING: (&str, &str) = ("ngrok-skip-browser-warning", "true");

/// Session-guarded HTTP gateway to the backend.
///
/// Every authenticated call in the SDK flows through [`Gateway::send`], so
/// the whole application observes one consistent session-expiry policy:
/// a missing credential, a 401/403 response, or a transport failure all
/// clear the stored credential and notify the registered
/// [`ExpiryListener`], then surface a response-shaped value the caller can
/// branch on by status. No retry is attempted anywhere; the backend issues
/// short-lived tokens and the SDK fails fast toward re-login.
///
/// The gateway imposes no mutual exclusion: concurrent calls from
/// independent tasks are uncoordinated, and each session-ending call
/// produces its own clear+notify.
#[derive(Clone)]
pub struct Gateway {
    host: ApiUrl,
    client: reqwest::Client,
    store: Arc<dyn CredentialStore>,
    listener: Option<Arc<dyn ExpiryListener>>,
}

impl Gateway {
    /// Create a gateway for the given host with an injected credential store.
    pub fn new(host: ApiUrl, store: Arc<dyn CredentialStore>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lingo/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self {
            host,
            client,
            store,
            listener: None,
        }
    }

    /// Register the observer notified when the session ends.
    pub fn with_expiry_listener(mut self, listener: Arc<dyn ExpiryListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Returns the backend host this gateway is configured for.
    pub fn host(&self) -> &ApiUrl {
        &self.host
    }

    /// Perform a request under the session-expiry policy.
    ///
    /// Always resolves to an [`ApiResponse`]:
    ///
    /// - no stored credential: synthesized 401, no network call made;
    /// - 401/403 from the backend: the original response, unmodified;
    /// - transport failure: synthesized 500;
    /// - anything else (2xx and ordinary business 4xx/5xx): the original
    ///   response, unmodified, credential untouched.
    ///
    /// The first three clear the credential and fire the expiry listener
    /// before returning.
    #[instrument(skip(self, request), fields(host = %self.host, path = %request.path, method = request.method.as_str()))]
    pub async fn send(&self, request: ApiRequest) -> ApiResponse {
        let credential = match self.store.load().await {
            Ok(credential) => credential,
            Err(e) => {
                warn!(error = %e, "credential store read failed, treating as logged out");
                None
            }
        };

        let Some(credential) = credential else {
            debug!("no stored credential, short-circuiting");
            self.expire(ExpiryReason::MissingCredential).await;
            return ApiResponse::missing_credential();
        };

        match self.dispatch(&request, credential.token.as_str()).await {
            Ok(response) => {
                trace!(status = response.status, "response received");
                if response.class == ResponseClass::AuthFailure {
                    info!(status = response.status, "credential rejected by backend");
                    self.expire(ExpiryReason::Rejected(response.status)).await;
                }
                response
            }
            Err(e) => {
                let transport = classify_transport(&e);
                warn!(error = %transport, "request failed before a response was received");
                self.expire(ExpiryReason::Transport).await;
                ApiResponse::network_failure(&transport.to_string())
            }
        }
    }

    /// Send a request and deserialize a successful JSON body, converting
    /// the gateway's classified outcomes into SDK errors for the typed
    /// endpoint layer.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, Error> {
        let response = self.send(request).await;
        match response.class {
            ResponseClass::Success => response.json(),
            ResponseClass::AuthFailure => Err(AuthError::SessionExpired.into()),
            ResponseClass::NetworkFailure => Err(TransportError::Http {
                message: response
                    .error_message()
                    .unwrap_or_else(|| "request failed".to_string()),
            }
            .into()),
            ResponseClass::BusinessError => {
                Err(ApiError::new(response.status, response.error_message()).into())
            }
        }
    }

    /// Issue the HTTP request. Errors here are transport-level: the
    /// request never completed.
    async fn dispatch(
        &self,
        request: &ApiRequest,
        token: &str,
    ) -> Result<ApiResponse, reqwest::Error> {
        let url = self.host.endpoint_url(&request.path);
        debug!(%url, "dispatching request");

        let method = match request.method {
            lingo_core::Method::Get => reqwest::Method::GET,
            lingo_core::Method::Post => reqwest::Method::POST,
            lingo_core::Method::Put => reqwest::Method::PUT,
            lingo_core::Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        match &request.body {
            Some(RequestBody::Json(value)) => {
                builder = builder.body(serde_json::to_vec(value).unwrap_or_default());
            }
            Some(RequestBody::Raw(bytes)) => {
                builder = builder.body(bytes.clone());
            }
            Some(RequestBody::Multipart(parts)) => {
                let mut form = reqwest::multipart::Form::new();
                for part in parts {
                    form = match &part.value {
                        FormValue::Text(text) => form.text(part.name.clone(), text.clone()),
                        FormValue::File {
                            filename,
                            content_type,
                            bytes,
                        } => {
                            let file = reqwest::multipart::Part::bytes(bytes.clone())
                                .file_name(filename.clone())
                                .mime_str(content_type)
                                .unwrap_or_else(|_| {
                                    reqwest::multipart::Part::bytes(bytes.clone())
                                        .file_name(filename.clone())
                                });
                            form.part(part.name.clone(), file)
                        }
                    };
                }
                builder = builder.multipart(form);
            }
            None => {}
        }

        builder = builder.headers(self.build_headers(request, token));

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(ApiResponse::received(status, body.to_vec()))
    }

    /// Assemble the outgoing header map: bearer token, the tunneling
    /// diagnostic header, a JSON content-type default, then caller
    /// overrides. Caller-supplied `Content-Type` wins over the default;
    /// multipart bodies keep the boundary content-type set by the client.
    fn build_headers(&self, request: &ApiRequest, token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();

        let is_multipart = matches!(&request.body, Some(RequestBody::Multipart(_)));
        if !is_multipart && request.content_type().is_none() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        headers.insert(
            HeaderName::from_static(SKIP_BROWSER_WARNING.0),
            HeaderValue::from_static(SKIP_BROWSER_WARNING.1),
        );

        for (name, value) in &request.headers {
            let name = match HeaderName::try_from(name.as_str()) {
                Ok(name) => name,
                Err(_) => {
                    warn!(header = %name, "skipping invalid header name");
                    continue;
                }
            };
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(_) => warn!(header = %name, "skipping invalid header value"),
            }
        }

        // The bearer token goes last so caller overrides cannot replace it.
        match HeaderValue::from_str(&format!("Bearer {}", token)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("stored token contains invalid header characters"),
        }

        headers
    }

    /// Clear the credential and notify the listener. Failures to clear are
    /// logged but do not change the outcome surfaced to the caller.
    async fn expire(&self, reason: ExpiryReason) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "failed to clear stored credential");
        }
        info!(?reason, "session expired");
        if let Some(listener) = &self.listener {
            listener.on_session_expired(reason);
        }
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("host", &self.host)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

/// Map a reqwest error onto the SDK's transport taxonomy.
pub(crate) fn classify_transport(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}
