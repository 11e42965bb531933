//! Speaking-question bank endpoints.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use lingo_core::ApiRequest;
use lingo_core::error::Error;

use crate::gateway::Gateway;

const RANDOM_QUESTIONS: &str = "api/speaking-questions/random";
const GENERATE_QUESTIONS: &str = "api/speaking-questions/generate";

/// A practice question from the question bank.
#[derive(Debug, Clone, Deserialize)]
pub struct PracticeQuestion {
    #[serde(default)]
    pub id: Option<u32>,
    pub question: String,
    pub topic: String,
    /// 0 = easy, 1 = medium, 2 = hard.
    pub difficulty: u8,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: Vec<PracticeQuestion>,
}

/// Request body for question generation.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    topic: &'a str,
    difficulty: u8,
    count: u32,
}

impl Gateway {
    /// Fetch a random selection of practice questions.
    #[instrument(skip(self))]
    pub async fn random_questions(&self, count: u32) -> Result<Vec<PracticeQuestion>, Error> {
        debug!("fetching random questions");
        let request = ApiRequest::get(RANDOM_QUESTIONS).query("count", count.to_string());
        let response: QuestionsResponse = self.send_json(request).await?;
        Ok(response.questions)
    }

    /// Generate new practice questions on a topic.
    #[instrument(skip(self))]
    pub async fn generate_questions(
        &self,
        topic: &str,
        difficulty: u8,
        count: u32,
    ) -> Result<Vec<PracticeQuestion>, Error> {
        debug!("generating questions");
        let body = serde_json::json!(GenerateRequest {
            topic,
            difficulty,
            count,
        });
        let response: QuestionsResponse = self
            .send_json(ApiRequest::post(GENERATE_QUESTIONS).json(body))
            .await?;
        Ok(response.questions)
    }
}
