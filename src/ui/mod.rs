//! User-facing output for the command line.
//!
//! Diagnostics go through the `log` facade; this module only prints the
//! final status lines a CI log reader looks for.

pub mod formatter;

pub use formatter::{
    display_error, display_outcome, display_status, display_success, outcome_message,
};
