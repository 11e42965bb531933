//! Multiple-choice exam endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use lingo_core::ApiRequest;
use lingo_core::error::Error;

use crate::gateway::Gateway;

const GET_EXAM: &str = "api/get-ai-exam";
const SUBMIT_EXAM: &str = "api/submit-exam";

/// One multiple-choice question.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExamQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
}

/// A generated exam paper.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamPaper {
    pub questions: Vec<ExamQuestion>,
    /// Allotted time in seconds.
    #[serde(default = "default_duration")]
    pub duration: u32,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_duration() -> u32 {
    3600
}

/// Request body for exam submission.
#[derive(Debug, Serialize)]
struct SubmitExamRequest<'a> {
    /// Selected option index per question, `-1` for unanswered.
    answers: &'a [i32],
}

/// Graded exam result.
#[derive(Debug, Clone, Deserialize)]
pub struct ExamOutcome {
    pub score: f64,
    /// The corrected exam as returned by the backend.
    pub exam: Value,
    /// The answers the user submitted, echoed back.
    pub u_answers: Vec<i32>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Gateway {
    /// Fetch a freshly generated exam paper.
    #[instrument(skip(self))]
    pub async fn fetch_exam(&self) -> Result<ExamPaper, Error> {
        debug!("fetching exam paper");
        self.send_json(ApiRequest::get(GET_EXAM)).await
    }

    /// Submit exam answers for grading.
    ///
    /// `answers` holds the selected option index per question, `-1` for
    /// questions left unanswered.
    #[instrument(skip(self, answers), fields(count = answers.len()))]
    pub async fn submit_exam(&self, answers: &[i32]) -> Result<ExamOutcome, Error> {
        debug!("submitting exam");
        let body = serde_json::json!(SubmitExamRequest { answers });
        self.send_json(ApiRequest::post(SUBMIT_EXAM).json(body)).await
    }
}
