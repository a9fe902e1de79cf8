//! Tracing setup for hubrecents.
//!
//! Every module logs through `tracing` macros. This module installs the subscriber
//! that turns those events into a plain-text log file:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → <data_dir>/hubrecents.log
//! ```
//!
//! # Configuration
//!
//! Level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`

mod init;

pub use init::{init_tracing, LOG_FILE_NAME};
