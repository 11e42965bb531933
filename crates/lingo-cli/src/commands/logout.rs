//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use lingo_core::CredentialStore;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs) -> Result<()> {
    let store = context::store()?;
    store.clear().await.context("Failed to clear credential")?;

    output::success("Logged out");

    Ok(())
}
