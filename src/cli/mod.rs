//! Workflow layer between the command line and the library

pub mod orchestration;

pub use orchestration::{current_timestamp, run, run_update, UpdateOutcome};
