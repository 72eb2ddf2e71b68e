//! JSON-file transcript store.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use banter_core::{Message, TranscriptStore};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a stored transcript could not be used.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no stored transcript")]
    Missing,

    #[error("failed to read transcript: {0}")]
    Io(#[from] io::Error),

    #[error("stored transcript is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stored transcript is empty")]
    Empty,
}

/// Transcript store backed by a single JSON file.
///
/// The whole history is rewritten on every save, mirroring how the engine
/// replaces state wholesale rather than editing it in place.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Default location: `~/.banter/transcript.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
        Ok(home.join(".banter").join("transcript.json"))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_snapshot(&self) -> Result<Vec<Message>, SnapshotError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotError::Missing);
            }
            Err(e) => return Err(e.into()),
        };

        let messages: Vec<Message> = serde_json::from_slice(&bytes)?;
        if messages.is_empty() {
            return Err(SnapshotError::Empty);
        }

        Ok(messages)
    }
}

#[async_trait]
impl TranscriptStore for FileStore {
    async fn load(&self) -> Option<Vec<Message>> {
        match self.read_snapshot().await {
            Ok(messages) => {
                debug!(
                    "loaded {} message(s) from {}",
                    messages.len(),
                    self.path.display()
                );
                Some(messages)
            }
            Err(SnapshotError::Missing) => {
                debug!("no transcript at {}", self.path.display());
                None
            }
            Err(e) => {
                warn!("ignoring stored transcript at {}: {e}", self.path.display());
                None
            }
        }
    }

    async fn save(&self, messages: &[Message]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_vec_pretty(messages)?;
        tokio::fs::write(&self.path, json).await?;

        debug!(
            "saved {} message(s) to {}",
            messages.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use banter_core::Sender;

    fn store_in(dir: &tempfile::TempDir) -> FileStore {
        FileStore::new(dir.path().join("transcript.json"))
    }

    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn temp_dir() -> tempfile::TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn round_trips_a_transcript() {
        let dir = temp_dir();
        let store = store_in(&dir);

        let messages = vec![
            Message::new(Sender::Bot, "welcome"),
            Message::new(Sender::User, "hi\nthere"),
        ];
        store.save(&messages).await.expect("save transcript");

        assert_eq!(store.load().await, Some(messages));
    }

    #[tokio::test]
    async fn absent_file_loads_as_none() {
        let dir = temp_dir();
        let store = store_in(&dir);
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn garbage_file_loads_as_none() {
        let dir = temp_dir();
        let store = store_in(&dir);

        tokio::fs::write(store.path(), b"{ not json")
            .await
            .expect("write garbage");
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn empty_list_loads_as_none() {
        let dir = temp_dir();
        let store = store_in(&dir);

        tokio::fs::write(store.path(), b"[]").await.expect("write empty list");
        assert_eq!(store.load().await, None);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn save_overwrites_the_previous_snapshot() {
        let dir = temp_dir();
        let store = store_in(&dir);

        let long = vec![
            Message::new(Sender::Bot, "welcome"),
            Message::new(Sender::User, "hello"),
            Message::new(Sender::Bot, "Hello! How can I help you today?"),
        ];
        store.save(&long).await.expect("save long transcript");

        let reset = vec![Message::new(Sender::Bot, "welcome")];
        store.save(&reset).await.expect("save reset transcript");

        assert_eq!(store.load().await, Some(reset));
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn save_creates_missing_directories() {
        let dir = temp_dir();
        let store = FileStore::new(dir.path().join("nested").join("transcript.json"));

        let messages = vec![Message::new(Sender::Bot, "welcome")];
        store.save(&messages).await.expect("save into nested dir");

        assert_eq!(store.load().await, Some(messages));
    }
}
