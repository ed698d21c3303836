//! Shared types for the constellation scenario core.
//!
//! This crate contains:
//! - **Id generation** — monotonic, prefixed id formatting (`platform-`, `sr-`)
//! - **Interface id parsing** — the `<node>/<local>` compound identifier shape

pub mod ids;

pub use chrono::{DateTime, Utc};
