//! Git query abstraction layer
//!
//! The qualifier only needs two facts from version control: the name of the
//! checked-out branch and the tag sitting exactly on the current commit.
//! [SourceControl] captures those two queries so the resolver can run against
//! a real repository or a scripted mock.
//!
//! Implementations:
//!
//! - [repository::Git2SourceControl]: in-process queries using the `git2` crate
//! - [command::GitCommandSourceControl]: runs the `git` executable
//! - [mock::MockSourceControl]: scripted answers for testing

pub mod command;
pub mod mock;
pub mod repository;

pub use command::GitCommandSourceControl;
pub use mock::MockSourceControl;
pub use repository::Git2SourceControl;

use std::path::Path;

use crate::config::GitBackend;
use crate::error::Result;

/// Version control queries needed to derive a qualifier
///
/// ## Error Handling
///
/// A commit without a tag is an expected outcome and is reported as
/// `Ok(None)` by [SourceControl::exact_tag]. Every other failure (no
/// repository, missing `git` executable, unreadable output) is an error.
pub trait SourceControl {
    /// Name of the checked-out branch, or `HEAD` when detached
    fn current_branch(&self) -> Result<String>;

    /// Tag pointing exactly at the current commit
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The current commit is tagged
    /// * `Ok(None)` - No tag matches the current commit
    /// * `Err` - The query itself failed
    fn exact_tag(&self) -> Result<Option<String>>;
}

/// Open the source control backend selected in the configuration
pub fn open_backend(backend: GitBackend, repo_path: &Path) -> Result<Box<dyn SourceControl>> {
    match backend {
        GitBackend::Libgit2 => Ok(Box::new(Git2SourceControl::open(repo_path)?)),
        GitBackend::Cli => Ok(Box::new(GitCommandSourceControl::new(repo_path))),
    }
}
