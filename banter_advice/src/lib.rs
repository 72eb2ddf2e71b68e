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

//! External advice lookup over HTTP.
//!
//! Wraps the Advice Slip API behind [`banter_core::AdviceSource`]. Every
//! failure mode collapses to "no advice available"; callers never see an
//! error.

mod adviceslip;

pub use adviceslip::AdviceSlipClient;
