use std::cell::Cell;

use crate::error::{QualifierError, Result};
use crate::git::SourceControl;

/// Mock source control for testing without a repository
pub struct MockSourceControl {
    branch: Option<String>,
    tag: Option<String>,
    tag_error: Option<String>,
    branch_calls: Cell<usize>,
    tag_calls: Cell<usize>,
}

impl MockSourceControl {
    /// Create a mock reporting `branch` with no tag
    pub fn new(branch: impl Into<String>) -> Self {
        MockSourceControl {
            branch: Some(branch.into()),
            tag: None,
            tag_error: None,
            branch_calls: Cell::new(0),
            tag_calls: Cell::new(0),
        }
    }

    /// Create a mock whose branch query fails
    pub fn failing() -> Self {
        MockSourceControl {
            branch: None,
            ..Self::new("")
        }
    }

    /// Report `tag` as the exact tag of the current commit
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Make the tag query fail with a non "no tag" error
    pub fn with_tag_error(mut self, message: impl Into<String>) -> Self {
        self.tag_error = Some(message.into());
        self
    }

    pub fn branch_calls(&self) -> usize {
        self.branch_calls.get()
    }

    pub fn tag_calls(&self) -> usize {
        self.tag_calls.get()
    }
}

impl SourceControl for MockSourceControl {
    fn current_branch(&self) -> Result<String> {
        self.branch_calls.set(self.branch_calls.get() + 1);
        self.branch
            .clone()
            .ok_or_else(|| QualifierError::vcs("not a git repository"))
    }

    fn exact_tag(&self) -> Result<Option<String>> {
        self.tag_calls.set(self.tag_calls.get() + 1);
        match &self.tag_error {
            Some(message) => Err(QualifierError::vcs(message.clone())),
            None => Ok(self.tag.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_branch_and_tag() {
        let vcs = MockSourceControl::new("develop").with_tag("v1.0.0");

        assert_eq!(vcs.current_branch().unwrap(), "develop");
        assert_eq!(vcs.exact_tag().unwrap(), Some("v1.0.0".to_string()));
        assert_eq!(vcs.branch_calls(), 1);
        assert_eq!(vcs.tag_calls(), 1);
    }

    #[test]
    fn test_mock_failures() {
        assert!(MockSourceControl::failing().current_branch().is_err());
        assert!(MockSourceControl::new("main")
            .with_tag_error("boom")
            .exact_tag()
            .is_err());
    }
}
