#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod rules;

pub use rules::ReplyClassifier;

/// Author of a [`Message`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One immutable entry in the conversation history.
///
/// Messages are only ever appended to a transcript or replaced wholesale on
/// reset/restore; they are never edited in place. Ids are time-ordered v7
/// UUIDs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub id: Uuid,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a message stamped with the current time.
    #[must_use]
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            sender,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// The default first message shown when no stored transcript exists.
    #[must_use]
    pub fn welcome() -> Self {
        Self::new(
            Sender::Bot,
            "Hi, I'm a small rule-based chat assistant.\n\nAsk me a question, \
             say hello, or tell me what you're working on and I'll do my best \
             to respond.",
        )
    }
}

/// External advice lookup.
///
/// The single escape hatch out of rule-based replies. Implementations must
/// absorb every failure mode (transport, status, payload shape, timeout) and
/// report it as `None`; callers never see an error.
#[async_trait]
pub trait AdviceSource: Send + Sync {
    async fn fetch_advice(&self) -> Option<String>;
}

/// Persistence collaborator for the conversation transcript.
///
/// The engine hands over the full ordered history on every change and reads
/// it back once at startup. The storage medium is the implementor's concern.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Load the stored transcript, or `None` when absent or unusable.
    async fn load(&self) -> Option<Vec<Message>>;

    /// Persist the full transcript, replacing whatever was stored before.
    async fn save(&self, messages: &[Message]) -> anyhow::Result<()>;
}
