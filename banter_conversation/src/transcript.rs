//! The conversation state aggregate.

use banter_core::Message;
use tracing::warn;

/// Ordered message history plus the busy flag.
///
/// Owned exclusively by the engine: append-only during normal operation,
/// replaced wholesale on reset or restore. External collaborators only ever
/// see cloned snapshots.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
    awaiting_reply: bool,
}

impl Transcript {
    /// Start a fresh transcript containing only the welcome message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: vec![Message::welcome()],
            awaiting_reply: false,
        }
    }

    /// Adopt a stored snapshot.
    ///
    /// Falls back to a fresh transcript when the snapshot is absent, empty,
    /// or contains messages with no displayable text.
    #[must_use]
    pub fn from_snapshot(snapshot: Option<Vec<Message>>) -> Self {
        match snapshot {
            Some(messages) if is_well_formed(&messages) => Self {
                messages,
                awaiting_reply: false,
            },
            Some(_) => {
                warn!("stored transcript is unusable, starting fresh");
                Self::new()
            }
            None => Self::new(),
        }
    }

    pub(crate) fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub(crate) const fn set_awaiting(&mut self, awaiting: bool) {
        self.awaiting_reply = awaiting;
    }

    pub(crate) fn replace_with_welcome(&mut self) {
        self.messages = vec![Message::welcome()];
        self.awaiting_reply = false;
    }

    /// The ordered history.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True while a bot reply is pending.
    #[must_use]
    pub const fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Number of messages in the history.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

fn is_well_formed(messages: &[Message]) -> bool {
    !messages.is_empty() && messages.iter().all(|m| !m.text.trim().is_empty())
}
