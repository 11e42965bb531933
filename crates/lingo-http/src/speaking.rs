//! Speaking exercise and pronunciation evaluation endpoints.
//!
//! Audio travels as opaque WAV bytes in multipart uploads; the SDK does no
//! codec handling.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use lingo_core::error::Error;
use lingo_core::{ApiRequest, FormPart};

use crate::gateway::Gateway;

const GET_SPEAKING_TEST: &str = "api/get-speaking-test";
const SUBMIT_SPEAKING_TEST: &str = "api/submit-speaking-test";
const CREATE_SPEAKING_EXERCISE: &str = "api/create-speaking-exercise";
const SUBMIT_SPEAKING_EXERCISE: &str = "api/submit-speaking-exercise";
const CHECK_SPEAKING_RECORDING: &str = "api/check-speaking-recording";
const EVALUATE_PRACTICE: &str = "api/speaking-practice/evaluate";
const SPEECH_TO_TEXT: &str = "api/stt";

/// One sentence of a speaking exercise.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakingItem {
    /// Backend-relative path to the reference audio.
    pub audio: String,
    /// Reference phoneme sequence.
    pub phonemes: String,
    /// The text to read aloud.
    pub text: String,
}

/// A generated speaking exercise session.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakingExercise {
    pub session_id: String,
    pub subject: String,
    pub difficulty: u8,
    pub items: Vec<SpeakingItem>,
}

/// Pronunciation evaluation for one recording.
///
/// The word-level analysis is backend-defined and deliberately left as raw
/// JSON; its shape changes with the evaluation model.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechEvaluation {
    pub accuracy_score: f64,
    #[serde(default)]
    pub expected_text: Option<String>,
    #[serde(default)]
    pub result_text: Option<String>,
    #[serde(default)]
    pub word_level_analysis: Value,
}

/// Result of checking one exercise recording.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingCheck {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub item_index: Option<u32>,
    #[serde(default)]
    pub evaluation: Option<SpeechEvaluation>,
}

/// Request body for exercise submission.
#[derive(Debug, Serialize)]
struct SubmitExerciseRequest<'a> {
    session_id: &'a str,
    subject: &'a str,
    difficulty: u8,
    #[serde(rename = "timeElapsed")]
    time_elapsed: u64,
}

/// Transcription of an uploaded recording.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub phonemes: Option<String>,
}

fn wav_part(bytes: Vec<u8>) -> FormPart {
    FormPart::file("audio", "speech.wav", "audio/wav", bytes)
}

impl Gateway {
    /// Fetch a generated speaking test for a subject and exam type.
    #[instrument(skip(self))]
    pub async fn fetch_speaking_test(
        &self,
        subject: &str,
        exam_type: &str,
    ) -> Result<Value, Error> {
        debug!("fetching speaking test");
        let request = ApiRequest::get(GET_SPEAKING_TEST)
            .query("subject", subject)
            .query("type", exam_type);
        self.send_json(request).await
    }

    /// Submit a completed speaking test.
    #[instrument(skip(self, submission))]
    pub async fn submit_speaking_test(&self, submission: Value) -> Result<Value, Error> {
        debug!("submitting speaking test");
        self.send_json(ApiRequest::post(SUBMIT_SPEAKING_TEST).json(submission))
            .await
    }

    /// Start a new speaking exercise session.
    #[instrument(skip(self))]
    pub async fn create_speaking_exercise(
        &self,
        subject: &str,
        difficulty: u8,
    ) -> Result<SpeakingExercise, Error> {
        debug!("creating speaking exercise");
        let request = ApiRequest::get(CREATE_SPEAKING_EXERCISE)
            .query("subject", subject)
            .query("difficulty", difficulty.to_string());
        self.send_json(request).await
    }

    /// Upload a recording for one exercise item and get it evaluated
    /// against the expected text.
    #[instrument(skip(self, audio_wav, expected_text), fields(session_id, item_index))]
    pub async fn check_speaking_recording(
        &self,
        session_id: &str,
        item_index: u32,
        expected_text: &str,
        audio_wav: Vec<u8>,
    ) -> Result<RecordingCheck, Error> {
        debug!("checking speaking recording");
        let parts = vec![
            wav_part(audio_wav),
            FormPart::text("session_id", session_id),
            FormPart::text("item_index", item_index.to_string()),
            FormPart::text("expected_text", expected_text),
        ];
        self.send_json(ApiRequest::post(CHECK_SPEAKING_RECORDING).multipart(parts))
            .await
    }

    /// Close out an exercise session and get the overall result.
    #[instrument(skip(self), fields(session_id))]
    pub async fn submit_speaking_exercise(
        &self,
        session_id: &str,
        subject: &str,
        difficulty: u8,
        time_elapsed: u64,
    ) -> Result<Value, Error> {
        debug!("submitting speaking exercise");
        let body = serde_json::json!(SubmitExerciseRequest {
            session_id,
            subject,
            difficulty,
            time_elapsed,
        });
        self.send_json(ApiRequest::post(SUBMIT_SPEAKING_EXERCISE).json(body))
            .await
    }

    /// Evaluate a free-form practice answer to a speaking question.
    #[instrument(skip(self, audio_wav, question))]
    pub async fn evaluate_speaking_practice(
        &self,
        question: &str,
        difficulty: u8,
        audio_wav: Vec<u8>,
    ) -> Result<SpeechEvaluation, Error> {
        debug!("evaluating speaking practice");
        let parts = vec![
            wav_part(audio_wav),
            FormPart::text("question", question),
            FormPart::text("difficulty", difficulty.to_string()),
        ];
        self.send_json(ApiRequest::post(EVALUATE_PRACTICE).multipart(parts))
            .await
    }

    /// Transcribe an uploaded recording.
    #[instrument(skip(self, audio_wav))]
    pub async fn transcribe(&self, audio_wav: Vec<u8>) -> Result<Transcription, Error> {
        debug!("transcribing recording");
        self.send_json(ApiRequest::post(SPEECH_TO_TEXT).multipart(vec![wav_part(audio_wav)]))
            .await
    }
}
