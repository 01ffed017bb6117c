pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logging;
pub mod patcher;
pub mod resolver;
pub mod ui;

pub use error::{QualifierError, Result};
