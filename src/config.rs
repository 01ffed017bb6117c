use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::QualifierTemplate;
use crate::error::{QualifierError, Result};

/// Name of the settings file looked up in the working and user config directories
pub const CONFIG_FILE_NAME: &str = "qualifier.toml";

pub const DEFAULT_DEV_QUALIFIER: &str = ".dev";
pub const DEFAULT_RC_QUALIFIER: &str = "rc";
pub const DEFAULT_RC_BRANCH: &str = "master";
pub const DEFAULT_QUALIFIER_EXPRESSION: &str = "__QUALIFIER__ = \"\"";
pub const DEFAULT_QUALIFIER_TEMPLATE: &str = "__QUALIFIER__ = \"{}\"";
pub const DEFAULT_QUALIFIER_FILE: &str = "setup.py";

/// Backend used to query the branch and tag of the working copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GitBackend {
    /// In-process queries through libgit2
    #[default]
    Libgit2,
    /// Shell out to the `git` executable
    Cli,
}

/// Where branch and tag information comes from. The two modes are exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    /// Query the repository discovered from `repo_path`
    Vcs {
        backend: GitBackend,
        repo_path: PathBuf,
    },
    /// Use operator-supplied values verbatim
    Literal { branch: String, tag: Option<String> },
}

/// Validated configuration for one run.
///
/// Built through [`Settings::into_config`] or the [`QualifierConfig::literal`]
/// and [`QualifierConfig::vcs`] shortcuts, all of which enforce the sourcing rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifierConfig {
    pub dev_qualifier: String,
    pub rc_qualifier: String,
    pub rc_branch: String,
    pub qualifier_expression: String,
    pub qualifier_template: QualifierTemplate,
    pub qualifier_file: PathBuf,
    pub source: SourceMode,
}

impl QualifierConfig {
    /// Default configuration with literal branch and tag values
    pub fn literal(branch: impl Into<String>, tag: Option<String>) -> Result<Self> {
        Settings {
            use_git: Some(false),
            branch_name: Some(branch.into()),
            tag_name: tag,
            ..Settings::default()
        }
        .into_config()
    }

    /// Default configuration querying the repository at `repo_path`
    pub fn vcs(backend: GitBackend, repo_path: impl Into<PathBuf>) -> Result<Self> {
        Settings {
            use_git: Some(true),
            git_backend: Some(backend),
            repo: Some(repo_path.into()),
            ..Settings::default()
        }
        .into_config()
    }

    pub fn uses_vcs(&self) -> bool {
        matches!(self.source, SourceMode::Vcs { .. })
    }
}

/// Unvalidated settings as read from a TOML file or the command line.
///
/// Every field is optional so layers can be merged before validation; unset
/// fields fall back to the built-in defaults.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub dev_qualifier: Option<String>,

    #[serde(default)]
    pub rc_qualifier: Option<String>,

    #[serde(default)]
    pub use_git: Option<bool>,

    #[serde(default)]
    pub branch_name: Option<String>,

    #[serde(default)]
    pub tag_name: Option<String>,

    #[serde(default)]
    pub rc_branch: Option<String>,

    #[serde(default)]
    pub qualifier_expression: Option<String>,

    #[serde(default)]
    pub qualifier_template: Option<String>,

    #[serde(default)]
    pub qualifier_file_name: Option<PathBuf>,

    #[serde(default)]
    pub git_backend: Option<GitBackend>,

    #[serde(default)]
    pub repo: Option<PathBuf>,
}

impl Settings {
    /// Overlay `other` on top of `self`; values set in `other` win
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            dev_qualifier: other.dev_qualifier.or(self.dev_qualifier),
            rc_qualifier: other.rc_qualifier.or(self.rc_qualifier),
            use_git: other.use_git.or(self.use_git),
            branch_name: other.branch_name.or(self.branch_name),
            tag_name: other.tag_name.or(self.tag_name),
            rc_branch: other.rc_branch.or(self.rc_branch),
            qualifier_expression: other.qualifier_expression.or(self.qualifier_expression),
            qualifier_template: other.qualifier_template.or(self.qualifier_template),
            qualifier_file_name: other.qualifier_file_name.or(self.qualifier_file_name),
            git_backend: other.git_backend.or(self.git_backend),
            repo: other.repo.or(self.repo),
        }
    }

    /// Validate the settings and fill in defaults.
    ///
    /// # Returns
    /// * `Ok(QualifierConfig)` - Ready-to-use configuration
    /// * `Err(QualifierError::Config)` - If git is disabled without a branch name,
    ///   if git is enabled together with a branch or tag name, or if the
    ///   qualifier expression is empty
    /// * `Err(QualifierError::Template)` - If the template lacks exactly one `{}`
    pub fn into_config(self) -> Result<QualifierConfig> {
        let use_git = self.use_git.unwrap_or(true);
        let branch_name = self.branch_name.filter(|b| !b.is_empty());
        let tag_name = self.tag_name.filter(|t| !t.is_empty());

        let source = if use_git {
            if branch_name.is_some() || tag_name.is_some() {
                return Err(QualifierError::config(
                    "branch name and tag name must not be provided when git is used",
                ));
            }
            SourceMode::Vcs {
                backend: self.git_backend.unwrap_or_default(),
                repo_path: self.repo.unwrap_or_else(|| PathBuf::from(".")),
            }
        } else {
            let branch = branch_name.ok_or_else(|| {
                QualifierError::config("a branch name must be provided when git is not used")
            })?;
            SourceMode::Literal {
                branch,
                tag: tag_name,
            }
        };

        let qualifier_expression = self
            .qualifier_expression
            .unwrap_or_else(|| DEFAULT_QUALIFIER_EXPRESSION.to_string());
        if qualifier_expression.is_empty() {
            return Err(QualifierError::config("qualifier expression must not be empty"));
        }

        let qualifier_template = QualifierTemplate::parse(
            self.qualifier_template
                .unwrap_or_else(|| DEFAULT_QUALIFIER_TEMPLATE.to_string()),
        )?;

        Ok(QualifierConfig {
            dev_qualifier: self
                .dev_qualifier
                .unwrap_or_else(|| DEFAULT_DEV_QUALIFIER.to_string()),
            rc_qualifier: self
                .rc_qualifier
                .unwrap_or_else(|| DEFAULT_RC_QUALIFIER.to_string()),
            rc_branch: self
                .rc_branch
                .unwrap_or_else(|| DEFAULT_RC_BRANCH.to_string()),
            qualifier_expression,
            qualifier_template,
            qualifier_file: self
                .qualifier_file_name
                .unwrap_or_else(|| PathBuf::from(DEFAULT_QUALIFIER_FILE)),
            source,
        })
    }
}

/// Parse settings from TOML text
pub fn parse_settings(content: &str) -> Result<Settings> {
    toml::from_str(content).map_err(|e| QualifierError::config(format!("invalid settings: {}", e)))
}

/// Loads settings from file or returns empty settings.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `qualifier.toml` in `dir`
/// 3. Empty settings (defaults apply) if no file found
///
/// # Returns
/// * `Ok(Settings)` - Loaded or empty settings
/// * `Err` - If the custom file is missing, or a file exists but cannot be read or parsed
pub fn load_settings_in(dir: &Path, config_path: Option<&Path>) -> Result<Settings> {
    if let Some(path) = config_path {
        let content = fs::read_to_string(path).map_err(|e| {
            QualifierError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        return parse_settings(&content);
    }

    let local = dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return parse_settings(&fs::read_to_string(local)?);
    }

    Ok(Settings::default())
}

/// Loads settings for the current directory.
///
/// Same lookup as [`load_settings_in`] for `.`, with one extra step before
/// falling back to empty settings: `qualifier.toml` in the user config directory.
pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    if config_path.is_some() || Path::new(".").join(CONFIG_FILE_NAME).exists() {
        return load_settings_in(Path::new("."), config_path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join(CONFIG_FILE_NAME);
        if user_config.exists() {
            return parse_settings(&fs::read_to_string(user_config)?);
        }
    }

    Ok(Settings::default())
}
