//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use lingo_http::Registration;

use crate::context::{self, HostArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// First name
    #[arg(long)]
    pub fname: String,

    /// Last name
    #[arg(long)]
    pub lname: String,

    /// Email address (also the login identifier)
    #[arg(long)]
    pub email: String,

    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    #[command(flatten)]
    pub host: HostArgs,
}

pub async fn run(args: RegisterArgs) -> Result<()> {
    let auth = context::auth_client(&args.host)?;

    let registration = Registration {
        fname: args.fname,
        lname: args.lname,
        email: args.email,
        dob: args.dob,
        password: args.password,
    };

    auth.register(&registration)
        .await
        .context("Failed to register")?;

    output::success("Registration successful. Run 'lingo login' to sign in.");

    Ok(())
}
