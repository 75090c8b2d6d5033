//! Rewrite the generated region of each component README.
//!
//! The region is delimited by two marker lines. The match is anchored to the
//! whole file: the start marker must be the very first line and the end
//! marker the very last, with no trailing newline. Anything else leaves the
//! file untouched.

use crate::buffer::FragmentBuffer;
use anyhow::{Context, Result};
use regex::{NoExpand, Regex};
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use std::thread;
use tracing::{error, info, warn};

pub const START_MARKER: &str = "<!-- docgen-tsdoc-replacer:start -->";
pub const END_MARKER: &str = "<!-- docgen-tsdoc-replacer:end -->";

// TODO: drop the \A / \z anchors once READMEs with content around the
// generated region have been checked against the new output.
static RE_REGION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)\A{}.*{}\z",
        regex::escape(START_MARKER),
        regex::escape(END_MARKER)
    ))
    .unwrap()
});

/// Settings for [`flush`].
#[derive(Debug, Clone)]
pub struct PatchConfig {
    /// Directory holding one sub-directory per component.
    pub packages_dir: PathBuf,
    /// Only keys containing this substring are written.
    pub component: String,
    /// Return patched content instead of writing it.
    pub dry_run: bool,
}

/// What happened to a single README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The region was replaced and the file written.
    Updated,
    /// Markers were not at the file boundaries; content written back as-is.
    Unchanged,
    /// Dry run: the content that would have been written.
    DryRun(String),
}

/// Result of patching one grouping key.
#[derive(Debug)]
pub struct KeyReport {
    pub key: String,
    pub path: PathBuf,
    pub result: Result<PatchOutcome>,
}

/// `<packages_dir>/<key>/README.md`
pub fn readme_path(packages_dir: &Path, key: &str) -> PathBuf {
    packages_dir.join(key).join("README.md")
}

/// Replace everything between the markers with `body`.
///
/// Returns the input unchanged when the markers do not span the whole content.
pub fn replace_region<'a>(content: &'a str, body: &str) -> Cow<'a, str> {
    let replacement = format!("{}\n{}\n{}", START_MARKER, body, END_MARKER);
    RE_REGION.replace(content, NoExpand(&replacement))
}

/// Read, patch and write back one README.
pub fn patch_readme(path: &Path, body: &str, dry_run: bool) -> Result<PatchOutcome> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let found = RE_REGION.is_match(&content);
    if !found {
        warn!(
            path = %path.display(),
            "markers are not the first and last lines; leaving content unchanged"
        );
    }
    let patched = replace_region(&content, body);

    if dry_run {
        return Ok(PatchOutcome::DryRun(patched.into_owned()));
    }

    fs::write(path, patched.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    Ok(if found {
        PatchOutcome::Updated
    } else {
        PatchOutcome::Unchanged
    })
}

/// Write every eligible key of `buffer` to its README.
///
/// Keys are patched concurrently; a failure on one key is logged and does not
/// affect the others. Reports come back in buffer key order.
pub fn flush(buffer: &FragmentBuffer, config: &PatchConfig) -> Vec<KeyReport> {
    let eligible: Vec<&str> = buffer
        .keys()
        .filter(|key| key.contains(config.component.as_str()))
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = eligible
            .into_iter()
            .map(|key| {
                scope.spawn(move || {
                    let path = readme_path(&config.packages_dir, key);
                    info!("-- generating docs for {}", path.display());

                    let body = buffer.joined(key).unwrap_or_default();
                    let result = patch_readme(&path, &body, config.dry_run);
                    match &result {
                        Ok(PatchOutcome::DryRun(_)) => {
                            info!("~~ rendered {} (dry run, not written)", path.display())
                        }
                        Ok(_) => info!("~~ generated {}", path.display()),
                        Err(e) => error!("{:#}", e),
                    }

                    KeyReport {
                        key: key.to_string(),
                        path,
                        result,
                    }
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    })
}
