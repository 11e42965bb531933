//! Verify command implementation.

use anyhow::Result;
use clap::Args;

use crate::context::{self, HostArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub host: HostArgs,
}

pub async fn run(args: VerifyArgs) -> Result<()> {
    let gateway = context::gateway(&args.host)?;

    if gateway.verify().await {
        output::success("Token is valid");
    } else {
        // The expiry listener has already explained what happened.
        std::process::exit(1);
    }

    Ok(())
}
