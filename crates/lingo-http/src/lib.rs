//! lingo-http - Session-guarded HTTP transport for the lingo SDK.
//!
//! The central piece is the [`Gateway`]: every authenticated request flows
//! through it so the whole application observes a single session-expiry
//! policy (missing credential, 401/403, and transport failures all clear
//! the stored credential and notify the registered expiry listener).
//! Typed endpoint methods for exams, listening tests, speaking practice,
//! the question bank, and conversation practice are layered on top.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use lingo_core::{ApiUrl, MemoryCredentialStore};
//! use lingo_http::{AuthClient, Gateway};
//!
//! # async fn example() -> Result<(), lingo_core::Error> {
//! let host = ApiUrl::new("https://api.example.com")?;
//! let store = Arc::new(MemoryCredentialStore::new());
//!
//! let auth = AuthClient::new(host.clone(), store.clone());
//! auth.login("jane@example.com", "secret").await?;
//!
//! let gateway = Gateway::new(host, store);
//! let paper = gateway.fetch_exam().await?;
//! println!("{} questions", paper.questions.len());
//! # Ok(())
//! # }
//! ```

mod auth;
mod conversation;
mod exam;
mod gateway;
mod listening;
mod questions;
mod speaking;

pub use auth::{AuthClient, Registration};
pub use conversation::{ConversationReply, ConversationStart};
pub use exam::{ExamOutcome, ExamPaper, ExamQuestion};
pub use gateway::Gateway;
pub use listening::{ListeningAudio, ListeningOutcome, ListeningQuestion, ListeningTest};
pub use questions::PracticeQuestion;
pub use speaking::{
    RecordingCheck, SpeakingExercise, SpeakingItem, SpeechEvaluation, Transcription,
};
