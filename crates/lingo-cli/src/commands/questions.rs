//! Question bank command implementations.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;

use lingo_http::PracticeQuestion;

use crate::context::{self, HostArgs};

#[derive(Args, Debug)]
pub struct QuestionsCommand {
    #[command(subcommand)]
    pub command: QuestionsSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum QuestionsSubcommand {
    /// Fetch a random selection of practice questions
    Random {
        /// Number of questions to fetch
        #[arg(long, default_value_t = 5)]
        count: u32,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Generate new practice questions on a topic
    Generate {
        /// Topic to generate questions about
        #[arg(long)]
        topic: String,

        /// Difficulty: 0 = easy, 1 = medium, 2 = hard
        #[arg(long, default_value_t = 0)]
        difficulty: u8,

        /// Number of questions to generate
        #[arg(long, default_value_t = 5)]
        count: u32,

        #[command(flatten)]
        host: HostArgs,
    },
}

pub async fn handle(cmd: QuestionsCommand) -> Result<()> {
    match cmd.command {
        QuestionsSubcommand::Random { count, host } => {
            let gateway = context::gateway(&host)?;
            let questions = gateway
                .random_questions(count)
                .await
                .context("Failed to fetch questions")?;
            print_questions(&questions);
            Ok(())
        }
        QuestionsSubcommand::Generate {
            topic,
            difficulty,
            count,
            host,
        } => {
            let gateway = context::gateway(&host)?;
            let questions = gateway
                .generate_questions(&topic, difficulty, count)
                .await
                .context("Failed to generate questions")?;
            print_questions(&questions);
            Ok(())
        }
    }
}

fn print_questions(questions: &[PracticeQuestion]) {
    for question in questions {
        let difficulty = match question.difficulty {
            0 => "easy",
            1 => "medium",
            _ => "hard",
        };
        println!(
            "{} {}",
            format!("[{} / {}]", question.topic, difficulty).dimmed(),
            question.question
        );
    }
}
