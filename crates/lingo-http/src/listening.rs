//! Listening test endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use lingo_core::ApiRequest;
use lingo_core::error::Error;

use crate::gateway::Gateway;

const GET_LISTENING_TEST: &str = "api/get-ai-listening-test";
const SUBMIT_LISTENING_TEST: &str = "api/submit-listening-test";

/// A question attached to a listening passage.
///
/// `type` discriminates multiple-choice from true/false questions, so the
/// correct answer is either an option string or a boolean.
#[derive(Debug, Clone, Deserialize)]
pub struct ListeningQuestion {
    pub question: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: Value,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Reference to the generated audio for a listening passage.
#[derive(Debug, Clone, Deserialize)]
pub struct ListeningAudio {
    pub filename: String,
    /// Backend-relative path for streaming the audio.
    pub full_path: String,
}

/// A generated listening test.
#[derive(Debug, Clone, Deserialize)]
pub struct ListeningTest {
    pub audio: ListeningAudio,
    pub questions: Vec<ListeningQuestion>,
    /// Transcript of the passage.
    pub text: String,
}

/// Request body for listening-test submission.
#[derive(Debug, Serialize)]
struct SubmitListeningRequest<'a> {
    answers: &'a [Value],
}

/// Graded listening-test result.
#[derive(Debug, Clone, Deserialize)]
pub struct ListeningOutcome {
    pub score: f64,
    #[serde(default)]
    pub results: Value,
    #[serde(default)]
    pub message: Option<String>,
}

impl Gateway {
    /// Fetch a generated listening test for a subject and exam type.
    #[instrument(skip(self))]
    pub async fn fetch_listening_test(
        &self,
        subject: &str,
        exam_type: &str,
    ) -> Result<ListeningTest, Error> {
        debug!("fetching listening test");
        let request = ApiRequest::get(GET_LISTENING_TEST)
            .query("subject", subject)
            .query("type", exam_type);
        self.send_json(request).await
    }

    /// Submit listening-test answers for grading.
    #[instrument(skip(self, answers), fields(count = answers.len()))]
    pub async fn submit_listening_test(&self, answers: &[Value]) -> Result<ListeningOutcome, Error> {
        debug!("submitting listening test");
        let body = serde_json::json!(SubmitListeningRequest { answers });
        self.send_json(ApiRequest::post(SUBMIT_LISTENING_TEST).json(body))
            .await
    }
}
