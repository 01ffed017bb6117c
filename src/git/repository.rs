use git2::{DescribeFormatOptions, DescribeOptions, ErrorCode, Repository as Git2Repo};
use std::path::Path;

use crate::error::{QualifierError, Result};

/// libgit2-backed source control queries
pub struct Git2SourceControl {
    repo: Git2Repo,
}

impl Git2SourceControl {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2SourceControl { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2SourceControl { repo }
    }
}

impl super::SourceControl for Git2SourceControl {
    fn current_branch(&self) -> Result<String> {
        if self.repo.head_detached()? {
            return Ok("HEAD".to_string());
        }

        let head = self.repo.head()?;
        let name = head
            .shorthand()
            .ok_or_else(|| QualifierError::vcs("HEAD reference name is not valid UTF-8"))?;

        Ok(name.to_string())
    }

    fn exact_tag(&self) -> Result<Option<String>> {
        let mut options = DescribeOptions::new();
        options.describe_tags().max_candidates_tags(0);

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);

        Ok(Some(describe.format(Some(&format))?))
    }
}
