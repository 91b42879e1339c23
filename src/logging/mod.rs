//! Logging for pairsort
//!
//! This module provides:
//! - Custom log formatting with bracketed output
//! - Stdout logging, plus an optional log file

mod formatter;
mod setup;

pub use setup::setup_logging;
