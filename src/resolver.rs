//! Branch and tag resolution
//!
//! Picks between the literal values from the configuration and the
//! [SourceControl] queries, depending on the configured [SourceMode].

use log::debug;

use crate::config::{QualifierConfig, SourceMode};
use crate::domain::SourceState;
use crate::error::{QualifierError, Result};
use crate::git::SourceControl;

/// Resolves the [SourceState] of one run
pub struct SourceResolver<'a> {
    config: &'a QualifierConfig,
    vcs: Option<&'a dyn SourceControl>,
}

impl<'a> SourceResolver<'a> {
    /// Create a resolver. `vcs` is only consulted when the configuration
    /// asks for version control queries.
    pub fn new(config: &'a QualifierConfig, vcs: Option<&'a dyn SourceControl>) -> Self {
        SourceResolver { config, vcs }
    }

    fn backend(&self) -> Result<&'a dyn SourceControl> {
        self.vcs.ok_or_else(|| {
            QualifierError::config("git is enabled but no source control backend was provided")
        })
    }

    pub fn resolve_branch(&self) -> Result<String> {
        match &self.config.source {
            SourceMode::Literal { branch, .. } => Ok(branch.clone()),
            SourceMode::Vcs { .. } => self.backend()?.current_branch(),
        }
    }

    /// Exact tag of the current commit; an untagged commit yields `Ok(None)`
    pub fn resolve_tag(&self) -> Result<Option<String>> {
        match &self.config.source {
            SourceMode::Literal { tag, .. } => Ok(tag.clone()),
            SourceMode::Vcs { .. } => {
                let tag = self.backend()?.exact_tag()?;
                if tag.is_none() {
                    debug!("Current commit is not tagged");
                }
                Ok(tag)
            }
        }
    }

    /// Resolve branch then tag
    pub fn resolve(&self) -> Result<SourceState> {
        let branch = self.resolve_branch()?;
        let tag = self.resolve_tag()?;

        debug!("Current branch is '{}', tag is {:?}", branch, tag);

        Ok(SourceState::new(branch, tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GitBackend;
    use crate::git::MockSourceControl;

    fn vcs_config() -> QualifierConfig {
        QualifierConfig::vcs(GitBackend::Libgit2, ".").unwrap()
    }

    #[test]
    fn test_literal_values_are_returned_verbatim() {
        let config = QualifierConfig::literal(" release/1.x ", Some("v1".to_string())).unwrap();
        let vcs = MockSourceControl::new("ignored").with_tag("ignored");
        let resolver = SourceResolver::new(&config, Some(&vcs));

        let state = resolver.resolve().unwrap();
        assert_eq!(state.branch, " release/1.x ");
        assert_eq!(state.tag.as_deref(), Some("v1"));
        assert_eq!(vcs.branch_calls(), 0);
        assert_eq!(vcs.tag_calls(), 0);
    }

    #[test]
    fn test_literal_mode_needs_no_backend() {
        let config = QualifierConfig::literal("develop", None).unwrap();
        let state = SourceResolver::new(&config, None).resolve().unwrap();
        assert_eq!(state, SourceState::new("develop", None));
    }

    #[test]
    fn test_vcs_values() {
        let config = vcs_config();
        let vcs = MockSourceControl::new("master").with_tag("v1.5.0");
        let state = SourceResolver::new(&config, Some(&vcs)).resolve().unwrap();

        assert_eq!(state, SourceState::new("master", Some("v1.5.0".to_string())));
        assert_eq!(vcs.branch_calls(), 1);
        assert_eq!(vcs.tag_calls(), 1);
    }

    #[test]
    fn test_vcs_no_tag_is_not_an_error() {
        let config = vcs_config();
        let vcs = MockSourceControl::new("feature-x");
        let resolver = SourceResolver::new(&config, Some(&vcs));

        assert_eq!(resolver.resolve_tag().unwrap(), None);
    }

    #[test]
    fn test_vcs_tag_failure_propagates() {
        let config = vcs_config();
        let vcs = MockSourceControl::new("master").with_tag_error("not a git repository");
        let resolver = SourceResolver::new(&config, Some(&vcs));

        assert!(matches!(resolver.resolve(), Err(QualifierError::Vcs(_))));
    }

    #[test]
    fn test_vcs_branch_failure_propagates() {
        let config = vcs_config();
        let vcs = MockSourceControl::failing();
        let resolver = SourceResolver::new(&config, Some(&vcs));

        assert!(resolver.resolve_branch().is_err());
        assert_eq!(vcs.tag_calls(), 0);
    }

    #[test]
    fn test_vcs_without_backend_fails() {
        let config = vcs_config();
        let resolver = SourceResolver::new(&config, None);
        assert!(matches!(
            resolver.resolve_branch(),
            Err(QualifierError::Config(_))
        ));
    }
}
