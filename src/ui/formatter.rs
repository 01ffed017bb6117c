//! Pure formatting functions for UI output.

use crate::cli::UpdateOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Describe the result of a run in one line.
///
/// # Arguments
/// * `outcome` - Result of the workflow
/// * `file` - Name of the qualifier file, as shown to the user
pub fn outcome_message(outcome: &UpdateOutcome, file: &str) -> String {
    match (&outcome.qualifier, outcome.dry_run) {
        (None, _) => match &outcome.state.tag {
            Some(tag) => format!(
                "Release build of tag '{}' on branch '{}', {} left unchanged",
                tag, outcome.state.branch, file
            ),
            None => format!("No qualifier needed, {} left unchanged", file),
        },
        (Some(qualifier), true) => format!(
            "Dry run: would apply qualifier '{}' to {} ({} occurrence(s))",
            qualifier, file, outcome.replacements
        ),
        (Some(qualifier), false) => format!(
            "Applied qualifier '{}' to {} ({} occurrence(s))",
            qualifier, file, outcome.replacements
        ),
    }
}

/// Print the result of a run, as a status line for dry runs and release
/// builds and as a success line otherwise.
pub fn display_outcome(outcome: &UpdateOutcome, file: &str) {
    let message = outcome_message(outcome, file);
    if outcome.file_updated() {
        display_success(&message);
    } else {
        display_status(&message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SourceState;

    fn outcome(tag: Option<&str>, qualifier: Option<&str>, dry_run: bool) -> UpdateOutcome {
        UpdateOutcome {
            state: SourceState::new("master", tag.map(str::to_string)),
            qualifier: qualifier.map(str::to_string),
            replacements: 1,
            dry_run,
        }
    }

    #[test]
    fn test_release_message() {
        let msg = outcome_message(&outcome(Some("v1.5.0"), None, false), "setup.py");
        assert!(msg.contains("Release build of tag 'v1.5.0'"));
        assert!(msg.contains("setup.py left unchanged"));
    }

    #[test]
    fn test_applied_message() {
        let msg = outcome_message(&outcome(None, Some("rc1000"), false), "setup.py");
        assert_eq!(msg, "Applied qualifier 'rc1000' to setup.py (1 occurrence(s))");
    }

    #[test]
    fn test_dry_run_message() {
        let msg = outcome_message(&outcome(None, Some("rc1000"), true), "setup.py");
        assert!(msg.starts_with("Dry run: would apply qualifier 'rc1000'"));
    }

    #[test]
    fn test_untagged_release_message() {
        let msg = outcome_message(&outcome(None, None, false), "VERSION");
        assert_eq!(msg, "No qualifier needed, VERSION left unchanged");
    }
}
