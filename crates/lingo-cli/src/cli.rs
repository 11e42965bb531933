//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{conversation, exam, login, logout, questions, register, verify, whoami};

/// CLI for the lingo language-learning backend.
#[derive(Parser, Debug)]
#[command(name = "lingo")]
#[command(author, version = env!("LINGO_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and persist the session credential
    Login(login::LoginArgs),

    /// Register a new account
    Register(register::RegisterArgs),

    /// Clear the stored session credential
    Logout(logout::LogoutArgs),

    /// Display the stored session
    Whoami(whoami::WhoamiArgs),

    /// Check whether the stored token is still valid
    Verify(verify::VerifyArgs),

    /// Multiple-choice exam operations
    Exam(exam::ExamCommand),

    /// Speaking-question bank operations
    Questions(questions::QuestionsCommand),

    /// AI conversation practice
    Conversation(conversation::ConversationCommand),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
