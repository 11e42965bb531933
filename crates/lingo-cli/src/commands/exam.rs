//! Exam command implementations.

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::context::{self, HostArgs};
use crate::output;

#[derive(Args, Debug)]
pub struct ExamCommand {
    #[command(subcommand)]
    pub command: ExamSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ExamSubcommand {
    /// Fetch a freshly generated exam paper
    Fetch {
        /// Print the questions as JSON instead of formatted text
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        host: HostArgs,
    },

    /// Submit answers for grading
    Submit {
        /// Comma-separated option indices, -1 for unanswered (e.g. "0,2,-1,1")
        #[arg(long)]
        answers: String,

        #[command(flatten)]
        host: HostArgs,
    },
}

pub async fn handle(cmd: ExamCommand) -> Result<()> {
    match cmd.command {
        ExamSubcommand::Fetch { json, host } => fetch(json, host).await,
        ExamSubcommand::Submit { answers, host } => submit(answers, host).await,
    }
}

async fn fetch(json: bool, host: HostArgs) -> Result<()> {
    let gateway = context::gateway(&host)?;
    let paper = gateway.fetch_exam().await.context("Failed to fetch exam")?;

    if json {
        return output::json_pretty(&paper.questions);
    }

    println!(
        "{} ({} questions, {} minutes)",
        "Exam paper".bold(),
        paper.questions.len(),
        paper.duration / 60
    );
    println!();

    for question in &paper.questions {
        println!("{}. {}", question.id, question.question);
        for (idx, option) in question.options.iter().enumerate() {
            println!("   {}) {}", idx, option.dimmed());
        }
        println!();
    }

    Ok(())
}

async fn submit(answers: String, host: HostArgs) -> Result<()> {
    let answers = parse_answers(&answers)?;

    let gateway = context::gateway(&host)?;
    let outcome = gateway
        .submit_exam(&answers)
        .await
        .context("Failed to submit exam")?;

    output::success(&format!("Score: {:.1}", outcome.score));
    if let Some(message) = &outcome.message {
        println!("{}", message);
    }

    Ok(())
}

fn parse_answers(raw: &str) -> Result<Vec<i32>> {
    let answers = raw
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .context("Answers must be comma-separated integers")?;

    if answers.is_empty() {
        bail!("At least one answer is required");
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_answers() {
        assert_eq!(parse_answers("0,2,-1,1").unwrap(), vec![0, 2, -1, 1]);
    }

    #[test]
    fn tolerates_whitespace() {
        assert_eq!(parse_answers(" 1 , 0 ").unwrap(), vec![1, 0]);
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert!(parse_answers("1,a,2").is_err());
    }
}
