//! Template validation and the `create` orchestration.
//!
//! A legitimate template root is a directory carrying its own project
//! descriptor (`<DirName>.uproject`). Creation purges the target, builds the
//! replacement map, and hands off to the replicator.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::log_status;
use crate::replace::{self, ReplacementMap, TokenPair};
use crate::replicate::{replicate, ReplicateReport};

/// Extension of the project descriptor a template root must contain.
pub const PROJECT_DESCRIPTOR_EXT: &str = "uproject";

#[derive(Debug, Serialize)]
pub struct CreateOutput {
    pub command: &'static str,
    pub source: String,
    pub target: String,
    pub source_base: String,
    pub target_base: String,
    pub purged_existing: bool,
    pub replacements: Vec<TokenPair>,
    pub report: ReplicateReport,
}

/// Check that `source` is a template root and return its base name.
pub fn validate_template(source: &Path) -> Result<String> {
    if !source.is_dir() {
        return Err(Error::template_not_found(source.display().to_string()));
    }

    let dir_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            Error::validation_invalid_argument("source", "Source path has no directory name")
        })?;

    let descriptor = format!("{}.{}", dir_name, PROJECT_DESCRIPTOR_EXT);
    if !source.join(&descriptor).is_file() {
        return Err(Error::template_invalid(
            source.display().to_string(),
            descriptor,
        ));
    }

    let base = replace::base_name(source).unwrap_or_default();
    if base.is_empty() {
        return Err(Error::validation_invalid_argument(
            "source",
            "Source directory name must contain more than the 'Game' suffix",
        ));
    }

    Ok(base)
}

/// Clone `source` into `target`, renaming `source`'s base name to `target`'s
/// and optionally substituting the copyright header. An existing target is
/// refused unless `force`, in which case it is purged first. The collision
/// guard runs before anything on disk is touched.
pub fn create(
    source: &Path,
    target: &Path,
    copyright: Option<&str>,
    force: bool,
) -> Result<CreateOutput> {
    let source_base = validate_template(source)?;

    let target_base = replace::base_name(target).ok_or_else(|| {
        Error::validation_invalid_argument("target", "Target path has no directory name")
    })?;

    replace::check_collision(&source_base, &target_base)?;

    let mut purged_existing = false;
    if target.exists() {
        if !force {
            return Err(Error::target_exists(target.display().to_string()));
        }
        log_status!("create", "Purging target folder {}", target.display());
        let remove = if target.is_dir() {
            fs::remove_dir_all(target)
        } else {
            fs::remove_file(target)
        };
        remove.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("purge {}", target.display())))
        })?;
        purged_existing = true;
    }

    let map = ReplacementMap::new(&source_base, &target_base, copyright);

    log_status!(
        "create",
        "Copying template project {} to {}",
        source.display(),
        target.display()
    );
    let report = replicate(source, target, &map)?;

    Ok(CreateOutput {
        command: "create",
        source: source.display().to_string(),
        target: target.display().to_string(),
        source_base,
        target_base,
        purged_existing,
        replacements: map.pairs,
        report,
    })
}
