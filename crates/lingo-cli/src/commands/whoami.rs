//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use lingo_core::CredentialStore;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {}

pub async fn run(_args: WhoamiArgs) -> Result<()> {
    let store = context::store()?;
    let credential = store
        .load()
        .await
        .context("Failed to read credential store")?
        .context("No stored session. Run 'lingo login' first.")?;

    output::field("Name", &credential.display_name());
    if let Some(avatar) = &credential.avatar {
        output::field("Avatar", avatar);
    }

    Ok(())
}
