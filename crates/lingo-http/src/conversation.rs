//! AI conversation practice endpoints.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use lingo_core::error::Error;
use lingo_core::{ApiRequest, FormPart};

use crate::gateway::Gateway;

const START: &str = "api/conversation/start";
const SEND_TEXT: &str = "api/conversation/send-text";
const SEND_AUDIO: &str = "api/conversation/send-audio";

/// Request body for starting a conversation.
#[derive(Debug, Serialize)]
struct StartRequest<'a> {
    topic: &'a str,
}

/// A newly started conversation session.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationStart {
    pub success: bool,
    pub session_id: String,
    pub greeting_text: String,
    /// Backend-relative path to the spoken greeting.
    #[serde(default)]
    pub audio_path: Option<String>,
}

/// Request body for a text turn.
#[derive(Debug, Serialize)]
struct SendTextRequest<'a> {
    session_id: &'a str,
    text: &'a str,
    topic: &'a str,
}

/// The partner's reply to one conversation turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationReply {
    pub success: bool,
    #[serde(default)]
    pub response_text: Option<String>,
    /// What the backend heard, for audio turns.
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub audio_path: Option<String>,
}

impl Gateway {
    /// Start a conversation on a topic.
    #[instrument(skip(self))]
    pub async fn start_conversation(&self, topic: &str) -> Result<ConversationStart, Error> {
        debug!("starting conversation");
        let body = serde_json::json!(StartRequest { topic });
        self.send_json(ApiRequest::post(START).json(body)).await
    }

    /// Send a text turn.
    #[instrument(skip(self, text), fields(session_id))]
    pub async fn send_conversation_text(
        &self,
        session_id: &str,
        text: &str,
        topic: &str,
    ) -> Result<ConversationReply, Error> {
        debug!("sending text turn");
        let body = serde_json::json!(SendTextRequest {
            session_id,
            text,
            topic,
        });
        self.send_json(ApiRequest::post(SEND_TEXT).json(body)).await
    }

    /// Send a spoken turn as a WAV recording.
    #[instrument(skip(self, audio_wav), fields(session_id))]
    pub async fn send_conversation_audio(
        &self,
        session_id: &str,
        topic: &str,
        audio_wav: Vec<u8>,
    ) -> Result<ConversationReply, Error> {
        debug!("sending audio turn");
        let parts = vec![
            FormPart::file("audio", "speech.wav", "audio/wav", audio_wav),
            FormPart::text("session_id", session_id),
            FormPart::text("topic", topic),
        ];
        self.send_json(ApiRequest::post(SEND_AUDIO).multipart(parts))
            .await
    }
}
