#![warn(
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

//! The conversation engine and its supporting pieces.
//!
//! Owns the message history and the Idle/AwaitingReply state machine,
//! schedules bot replies behind a simulated typing delay, and degrades
//! gracefully when the external advice lookup fails.
//!
//! # Key Properties
//! - At most one bot reply in flight; overlapping submissions are no-ops
//! - A user message is always observable before its bot reply
//! - `reset` cancels a pending reply so stale messages can never appear
//! - Every failure surfaces as a normal bot message, never as an error

mod engine;
mod latency;
mod transcript;

pub use engine::{ConversationEngine, EngineConfig};
pub use latency::LatencyModel;
pub use transcript::Transcript;
