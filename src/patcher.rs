//! Rewrites the qualifier expression inside the target file.
//!
//! The file is streamed line by line into a temporary file in the same
//! directory, which then replaces the original with a single rename. The
//! original is never written in place.

use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::config::QualifierConfig;
use crate::error::Result;

/// Replace every occurrence of the qualifier expression in `target`.
///
/// The replacement is the configured template rendered with `qualifier`.
/// Matching is plain substring matching within each line. A file without any
/// occurrence is rewritten unchanged.
///
/// # Arguments
/// * `qualifier` - The computed qualifier (e.g., ".dev1700000000")
/// * `config` - Supplies the expression to find and the template to render
/// * `target` - File to rewrite
///
/// # Returns
/// * `Ok(usize)` - Number of occurrences replaced
/// * `Err` - If the file cannot be read or the replacement cannot be committed
pub fn apply_qualifier(qualifier: &str, config: &QualifierConfig, target: &Path) -> Result<usize> {
    let expression = config.qualifier_expression.as_str();
    let replacement = config.qualifier_template.render(qualifier);

    let source = File::open(target)?;
    let permissions = source.metadata()?.permissions();

    let mut temp = NamedTempFile::new_in(parent_dir(target))?;
    let mut replaced = 0;

    {
        let mut reader = BufReader::new(source);
        let mut writer = BufWriter::new(temp.as_file_mut());
        let mut line = String::new();

        while reader.read_line(&mut line)? > 0 {
            let count = line.matches(expression).count();
            if count > 0 {
                replaced += count;
                writer.write_all(line.replace(expression, &replacement).as_bytes())?;
            } else {
                writer.write_all(line.as_bytes())?;
            }
            line.clear();
        }

        writer.flush()?;
    }

    temp.as_file().set_permissions(permissions)?;
    temp.as_file().sync_all()?;
    temp.persist(target)?;

    if replaced == 0 {
        warn!(
            "'{}' not found in {}, file left unchanged",
            expression,
            target.display()
        );
    } else {
        debug!(
            "Replaced {} occurrence(s) of '{}' in {}",
            replaced,
            expression,
            target.display()
        );
    }

    Ok(replaced)
}

/// Count the occurrences of the qualifier expression in `target` without
/// modifying it
pub fn count_occurrences(config: &QualifierConfig, target: &Path) -> Result<usize> {
    let reader = BufReader::new(File::open(target)?);
    let mut total = 0;

    for line in reader.lines() {
        total += line?.matches(config.qualifier_expression.as_str()).count();
    }

    Ok(total)
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
