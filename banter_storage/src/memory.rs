//! In-memory transcript store for tests and ephemeral sessions.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use banter_core::{Message, TranscriptStore};

/// Transcript store that keeps the snapshot in process memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<Vec<Message>>>,
}

impl MemoryStore {
    /// Create a store with nothing persisted yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Create a store pre-seeded with a snapshot, as if from a prior run.
    #[must_use]
    pub const fn with_snapshot(messages: Vec<Message>) -> Self {
        Self {
            inner: Mutex::new(Some(messages)),
        }
    }

    /// The currently persisted snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<Vec<Message>> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<Message>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TranscriptStore for MemoryStore {
    async fn load(&self) -> Option<Vec<Message>> {
        self.snapshot()
    }

    async fn save(&self, messages: &[Message]) -> anyhow::Result<()> {
        *self.lock() = Some(messages.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::Sender;

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn round_trips_in_place() {
        let store = MemoryStore::new();
        assert_eq!(store.load().await, None);

        let messages = vec![Message::new(Sender::Bot, "welcome")];
        store.save(&messages).await.expect("save snapshot");

        assert_eq!(store.load().await, Some(messages));
    }

    #[tokio::test]
    async fn seeded_store_loads_its_snapshot() {
        let messages = vec![
            Message::new(Sender::Bot, "welcome"),
            Message::new(Sender::User, "hi"),
        ];
        let store = MemoryStore::with_snapshot(messages.clone());
        assert_eq!(store.load().await, Some(messages));
    }
}
