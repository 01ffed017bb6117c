/// Branch and tag state of the working copy for a single run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceState {
    pub branch: String,
    /// Tag pointing exactly at the current commit, if any
    pub tag: Option<String>,
}

impl SourceState {
    /// Create a new source state
    pub fn new(branch: impl Into<String>, tag: Option<String>) -> Self {
        SourceState {
            branch: branch.into(),
            tag,
        }
    }

    /// Check if the current commit carries a tag
    pub fn is_tagged(&self) -> bool {
        self.tag.is_some()
    }

    /// Check if the checked-out branch has the same name as the tag
    pub fn branch_matches_tag(&self) -> bool {
        self.tag.as_deref() == Some(self.branch.as_str())
    }
}
