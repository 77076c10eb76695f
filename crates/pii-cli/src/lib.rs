//! Command-line front ends for the DLP service
//!
//! Three binaries share this library:
//! - `detect-pii`: report findings (exit 2 when present) or redact
//! - `redact-pii`: redact text or images
//! - `redact`: redact text with `xxx`

pub mod cli;
pub mod commands;
pub mod input;
pub mod logging;
pub mod outcome;

pub use outcome::{Outcome, exit_code};
