//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::context::{self, HostArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username or email to authenticate with
    #[arg(long)]
    pub identifier: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    #[command(flatten)]
    pub host: HostArgs,
}

pub async fn run(args: LoginArgs) -> Result<()> {
    let auth = context::auth_client(&args.host)?;

    eprintln!("{}", "Logging in...".dimmed());

    let credential = auth
        .login(&args.identifier, &args.password)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Name", &credential.display_name());
    output::field("Host", &args.host.host);

    Ok(())
}
