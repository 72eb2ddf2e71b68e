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

//! Application configuration.
//!
//! Optional JSON config file under `~/.banter`; every field has a default,
//! so a missing file simply means stock settings.

mod schema;

pub use schema::{AdviceConfig, ChatConfig, Config, StorageConfig};
