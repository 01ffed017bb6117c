use crate::config::QualifierConfig;
use crate::domain::SourceState;
use crate::error::{QualifierError, Result};

/// Placeholder substituted by the computed qualifier in a template
pub const PLACEHOLDER: &str = "{}";

/// Decide the qualifier for a build.
///
/// Returns `None` when the current commit is tagged and either the release
/// candidate branch or a branch named after the tag is checked out. Otherwise
/// the qualifier is the rc or dev prefix followed by `now` in decimal.
///
/// # Arguments
/// * `state` - Branch and exact tag of the current commit
/// * `config` - Validated qualifier configuration
/// * `now` - Unix timestamp in seconds
///
/// # Examples
/// ```ignore
/// compute_qualifier(&SourceState::new("master", None), &config, 1000)      // Some("rc1000")
/// compute_qualifier(&SourceState::new("feature-x", None), &config, 1000)   // Some(".dev1000")
/// ```
pub fn compute_qualifier(state: &SourceState, config: &QualifierConfig, now: u64) -> Option<String> {
    let on_rc_branch = state.branch == config.rc_branch;

    if state.is_tagged() && (on_rc_branch || state.branch_matches_tag()) {
        return None;
    }

    let prefix = if on_rc_branch {
        &config.rc_qualifier
    } else {
        &config.dev_qualifier
    };

    Some(format!("{}{}", prefix, now))
}

/// Template used to render the replacement for the qualifier expression
/// (e.g., `__QUALIFIER__ = "{}"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifierTemplate {
    pattern: String,
}

impl QualifierTemplate {
    /// Parse a template, requiring exactly one `{}` placeholder
    pub fn parse(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        match pattern.matches(PLACEHOLDER).count() {
            1 => Ok(QualifierTemplate { pattern }),
            0 => Err(QualifierError::template(format!(
                "'{}' has no {} placeholder",
                pattern, PLACEHOLDER
            ))),
            n => Err(QualifierError::template(format!(
                "'{}' has {} {} placeholders, expected exactly one",
                pattern, n, PLACEHOLDER
            ))),
        }
    }

    /// Render the template with the given qualifier
    pub fn render(&self, qualifier: &str) -> String {
        self.pattern.replacen(PLACEHOLDER, qualifier, 1)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> QualifierConfig {
        QualifierConfig::literal("unused", None).unwrap()
    }

    #[test]
    fn test_rc_branch_without_tag() {
        let state = SourceState::new("master", None);
        assert_eq!(
            compute_qualifier(&state, &config(), 1000),
            Some("rc1000".to_string())
        );
    }

    #[test]
    fn test_feature_branch_without_tag() {
        let state = SourceState::new("feature-x", None);
        assert_eq!(
            compute_qualifier(&state, &config(), 1000),
            Some(".dev1000".to_string())
        );
    }

    #[test]
    fn test_tagged_rc_branch_is_release() {
        let state = SourceState::new("master", Some("v1.5.0".to_string()));
        assert_eq!(compute_qualifier(&state, &config(), 1000), None);
    }

    #[test]
    fn test_tag_named_branch_is_release() {
        let state = SourceState::new("v1.5.0", Some("v1.5.0".to_string()));
        assert_eq!(compute_qualifier(&state, &config(), 1000), None);
    }

    #[test]
    fn test_tagged_feature_branch_gets_dev_qualifier() {
        let state = SourceState::new("feature-x", Some("v1.5.0".to_string()));
        assert_eq!(
            compute_qualifier(&state, &config(), 42),
            Some(".dev42".to_string())
        );
    }

    #[test]
    fn test_custom_prefixes_and_rc_branch() {
        let mut config = config();
        config.rc_branch = "release".to_string();
        config.rc_qualifier = "-rc.".to_string();
        config.dev_qualifier = "-dev.".to_string();

        let release = SourceState::new("release", None);
        let master = SourceState::new("master", None);

        assert_eq!(
            compute_qualifier(&release, &config, 7),
            Some("-rc.7".to_string())
        );
        assert_eq!(
            compute_qualifier(&master, &config, 7),
            Some("-dev.7".to_string())
        );
    }

    #[test]
    fn test_compute_qualifier_is_deterministic() {
        let config = config();
        let states = vec![
            SourceState::new("master", None),
            SourceState::new("master", Some("v1".to_string())),
            SourceState::new("v1", Some("v1".to_string())),
            SourceState::new("feature", Some("v1".to_string())),
            SourceState::new("feature", None),
        ];

        for state in states {
            let first = compute_qualifier(&state, &config, 1_700_000_000);
            for _ in 0..5 {
                assert_eq!(compute_qualifier(&state, &config, 1_700_000_000), first);
            }
        }
    }

    #[test]
    fn test_template_render() {
        let template = QualifierTemplate::parse("__QUALIFIER__ = \"{}\"").unwrap();
        assert_eq!(template.render(".dev1000"), "__QUALIFIER__ = \".dev1000\"");
    }

    #[test]
    fn test_template_render_keeps_braces_in_qualifier() {
        let template = QualifierTemplate::parse("Q={}").unwrap();
        assert_eq!(template.render("{}"), "Q={}");
    }

    #[test]
    fn test_template_without_placeholder() {
        let err = QualifierTemplate::parse("__QUALIFIER__ = \"\"").unwrap_err();
        assert!(err.to_string().contains("no {} placeholder"));
    }

    #[test]
    fn test_template_with_two_placeholders() {
        let err = QualifierTemplate::parse("{} and {}").unwrap_err();
        assert!(matches!(err, QualifierError::Template(_)));
    }
}
