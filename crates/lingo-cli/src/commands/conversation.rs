//! Conversation practice command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::context::{self, HostArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct ConversationCommand {
    #[command(subcommand)]
    pub command: ConversationSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConversationSubcommand {
    /// Start a conversation on a topic
    Start {
        /// Conversation topic
        #[arg(long)]
        topic: String,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Send a text turn in an existing conversation
    SendText {
        /// Session id from 'conversation start'
        #[arg(long)]
        session: String,

        /// What to say
        #[arg(long)]
        text: String,

        /// Conversation topic
        #[arg(long)]
        topic: String,

        #[command(flatten)]
        host: HostArgs,
    },
}

pub async fn handle(cmd: ConversationCommand) -> Result<()> {
    match cmd.command {
        ConversationSubcommand::Start { topic, host } => start(topic, host).await,
        ConversationSubcommand::SendText {
            session,
            text,
            topic,
            host,
        } => send_text(session, text, topic, host).await,
    }
}

async fn start(topic: String, host: HostArgs) -> Result<()> {
    let gateway = context::gateway(&host)?;
    let started = gateway
        .start_conversation(&topic)
        .await
        .context("Failed to start conversation")?;

    output::field("Session", &started.session_id);
    println!();
    println!("{} {}", "Partner:".bold(), started.greeting_text);

    Ok(())
}

async fn send_text(session: String, text: String, topic: String, host: HostArgs) -> Result<()> {
    let gateway = context::gateway(&host)?;
    let reply = gateway
        .send_conversation_text(&session, &text, &topic)
        .await
        .context("Failed to send turn")?;

    match reply.response_text {
        Some(response) => println!("{} {}", "Partner:".bold(), response),
        None => output::error("The partner had nothing to say"),
    }

    Ok(())
}
