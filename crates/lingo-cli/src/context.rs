//! Shared construction of SDK clients for commands.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use lingo_core::{ApiUrl, ExpiryListener, ExpiryReason};
use lingo_file::FileCredentialStore;
use lingo_http::{AuthClient, Gateway};

use crate::output;

/// Backend host selection, shared by every networked command.
#[derive(Args, Debug)]
pub struct HostArgs {
    /// Backend base URL
    #[arg(long, env = "LINGO_HOST", default_value = "http://localhost:5000")]
    pub host: String,
}

impl HostArgs {
    pub fn api_url(&self) -> Result<ApiUrl> {
        ApiUrl::new(&self.host).context("Invalid backend URL")
    }
}

/// Prints a non-technical notice when the session ends.
struct SessionNotice;

impl ExpiryListener for SessionNotice {
    fn on_session_expired(&self, reason: ExpiryReason) {
        match reason {
            ExpiryReason::MissingCredential => {
                output::error("You are not logged in. Run 'lingo login' first.");
            }
            ExpiryReason::Rejected(_) | ExpiryReason::Transport => {
                output::error("Your session has expired. Please log in again.");
            }
        }
    }
}

/// Open the per-installation credential store.
pub fn store() -> Result<Arc<FileCredentialStore>> {
    Ok(Arc::new(
        FileCredentialStore::new().context("Failed to open credential store")?,
    ))
}

/// Build a session-guarded gateway for the given host.
pub fn gateway(host: &HostArgs) -> Result<Gateway> {
    Ok(Gateway::new(host.api_url()?, store()?).with_expiry_listener(Arc::new(SessionNotice)))
}

/// Build an auth client for the given host.
pub fn auth_client(host: &HostArgs) -> Result<AuthClient> {
    Ok(AuthClient::new(host.api_url()?, store()?))
}
