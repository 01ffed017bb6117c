//! Main workflow orchestration logic
//!
//! Runs resolver, qualifier policy and patcher in that order. Kept apart from
//! `main.rs` so the workflow can be driven programmatically without clap.

use log::info;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{QualifierConfig, SourceMode};
use crate::domain::{compute_qualifier, SourceState};
use crate::error::Result;
use crate::git::{self, SourceControl};
use crate::patcher;
use crate::resolver::SourceResolver;

/// Result of a single update run
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    /// Branch and tag the decision was based on
    pub state: SourceState,

    /// Computed qualifier, `None` for a release build
    pub qualifier: Option<String>,

    /// Occurrences replaced, or that would be replaced in a dry run
    pub replacements: usize,

    /// Whether the target file was left untouched on purpose
    pub dry_run: bool,
}

impl UpdateOutcome {
    /// Whether the target file was rewritten
    pub fn file_updated(&self) -> bool {
        self.qualifier.is_some() && !self.dry_run
    }
}

/// Current Unix time in whole seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Run the update workflow with an explicit backend and clock.
///
/// 1. Resolve branch and tag
/// 2. Compute the qualifier
/// 3. Rewrite the qualifier file, unless no qualifier is needed or `dry_run` is set
///
/// # Arguments
/// * `config` - Validated configuration
/// * `vcs` - Backend for git queries; may be `None` when literal values are configured
/// * `now` - Unix timestamp embedded in the qualifier
/// * `dry_run` - Count occurrences instead of rewriting the file
pub fn run_update(
    config: &QualifierConfig,
    vcs: Option<&dyn SourceControl>,
    now: u64,
    dry_run: bool,
) -> Result<UpdateOutcome> {
    let state = SourceResolver::new(config, vcs).resolve()?;
    let qualifier = compute_qualifier(&state, config, now);

    let replacements = match &qualifier {
        None => {
            info!("No qualifier needed for branch '{}'", state.branch);
            0
        }
        Some(qualifier) => {
            info!("The qualifier is '{}'", qualifier);
            if dry_run {
                patcher::count_occurrences(config, &config.qualifier_file)?
            } else {
                patcher::apply_qualifier(qualifier, config, &config.qualifier_file)?
            }
        }
    };

    Ok(UpdateOutcome {
        state,
        qualifier,
        replacements,
        dry_run,
    })
}

/// Run the update workflow using the configured backend and the system clock
pub fn run(config: &QualifierConfig, dry_run: bool) -> Result<UpdateOutcome> {
    match &config.source {
        SourceMode::Vcs { backend, repo_path } => {
            let vcs = git::open_backend(*backend, repo_path)?;
            run_update(config, Some(&*vcs), current_timestamp(), dry_run)
        }
        SourceMode::Literal { .. } => run_update(config, None, current_timestamp(), dry_run),
    }
}
