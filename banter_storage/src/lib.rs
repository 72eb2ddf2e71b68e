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

//! Transcript persistence.
//!
//! Implementations of [`banter_core::TranscriptStore`]: a JSON file under
//! the user's home directory for real sessions, and an in-memory store for
//! tests and ephemeral runs. Unusable stored data is logged and treated as
//! absent; the conversation core never sees a storage error.

mod file;
mod memory;

pub use file::{FileStore, SnapshotError};
pub use memory::MemoryStore;
