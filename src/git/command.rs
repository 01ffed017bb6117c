use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use crate::error::{QualifierError, Result};

/// Stderr fragments printed by `git describe --exact-match` when nothing matches
const NO_TAG_MARKERS: &[&str] = &["no tag exactly matches", "No names found"];

/// Locale forced on every git invocation so stderr stays untranslated
const GIT_LOCALE: &str = "C";

/// Source control queries answered by the `git` executable
pub struct GitCommandSourceControl {
    program: String,
    work_dir: PathBuf,
}

impl GitCommandSourceControl {
    /// Run `git` from `PATH` inside `work_dir`
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        Self::with_program("git", work_dir)
    }

    /// Run a specific git executable inside `work_dir`
    pub fn with_program(program: impl Into<String>, work_dir: impl AsRef<Path>) -> Self {
        GitCommandSourceControl {
            program: program.into(),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("Running {} {}", self.program, args.join(" "));

        Command::new(&self.program)
            .args(args)
            .current_dir(&self.work_dir)
            .env("LC_ALL", GIT_LOCALE)
            .env_remove("LANGUAGE")
            .output()
            .map_err(|e| {
                QualifierError::vcs(format!(
                    "failed to execute {} {}: {}",
                    self.program,
                    args.join(" "),
                    e
                ))
            })
    }

    fn failure(&self, args: &[&str], output: &Output) -> QualifierError {
        QualifierError::vcs(format!(
            "{} {} failed with exit code {}: {}",
            self.program,
            args.join(" "),
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        ))
    }
}

/// Decode command output as UTF-8 with surrounding whitespace removed
fn decode_stdout(output: &Output) -> Result<String> {
    let text = std::str::from_utf8(&output.stdout)
        .map_err(|e| QualifierError::vcs(format!("git output is not valid UTF-8: {}", e)))?;
    Ok(text.trim().to_string())
}

/// Check whether a failed describe only means that no tag is on the commit
pub fn is_no_tag_message(stderr: &str) -> bool {
    NO_TAG_MARKERS.iter().any(|marker| stderr.contains(marker))
}

impl super::SourceControl for GitCommandSourceControl {
    fn current_branch(&self) -> Result<String> {
        let args = ["rev-parse", "--abbrev-ref", "HEAD"];
        let output = self.run(&args)?;

        if !output.status.success() {
            return Err(self.failure(&args, &output));
        }

        decode_stdout(&output)
    }

    fn exact_tag(&self) -> Result<Option<String>> {
        let args = ["describe", "--tags", "--exact-match"];
        let output = self.run(&args)?;

        if !output.status.success() {
            if is_no_tag_message(&String::from_utf8_lossy(&output.stderr)) {
                return Ok(None);
            }
            return Err(self.failure(&args, &output));
        }

        let tag = decode_stdout(&output)?;
        Ok(if tag.is_empty() { None } else { Some(tag) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::SourceControl;

    #[test]
    fn test_no_tag_messages() {
        assert!(is_no_tag_message(
            "fatal: no tag exactly matches 'a1b2c3d4e5f6'"
        ));
        assert!(is_no_tag_message(
            "fatal: No names found, cannot describe anything."
        ));
        assert!(!is_no_tag_message(
            "fatal: not a git repository (or any of the parent directories): .git"
        ));
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let vcs = GitCommandSourceControl::with_program(
            "/nonexistent/path/to/git",
            std::env::temp_dir(),
        );

        let err = vcs.exact_tag().unwrap_err();
        assert!(matches!(err, QualifierError::Vcs(_)));
        assert!(err.to_string().contains("failed to execute"));

        assert!(vcs.current_branch().is_err());
    }
}
