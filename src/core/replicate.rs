//! Tree replication — mirror a template tree at a new root with renaming.
//!
//! Walks the source tree depth-first, mirroring its structure at the target
//! path (base-name substitution applied to every path segment) and rewriting
//! file contents according to classification:
//! 1. Text files get every replacement pair applied across the whole file
//! 2. Engine assets get a single byte-level pass over the base name
//! 3. Everything else is copied byte-for-byte
//!
//! One failing entry never aborts the walk: it is recorded in the report and
//! traversal continues with siblings.

use filetime::FileTime;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

use crate::classify::{classify, Classification};
use crate::error::{Error, Result};
use crate::log_status;
use crate::replace::ReplacementMap;

/// A recoverable failure on one entry, with both sides of the copy.
#[derive(Debug, Clone, Serialize)]
pub struct ReplicateError {
    pub source: String,
    pub destination: String,
    pub message: String,
}

/// Outcome of a replication run. A run with a non-empty error list still
/// completed; callers decide whether that counts as success.
#[derive(Debug, Default, Serialize)]
pub struct ReplicateReport {
    pub directories_created: usize,
    pub files_copied: usize,
    pub files_rewritten: usize,
    pub errors: Vec<ReplicateError>,
}

impl ReplicateReport {
    fn record(&mut self, source: &Path, destination: &Path, err: &io::Error) {
        log_status!(
            "copy",
            "{} -> {}: {}",
            source.display(),
            destination.display(),
            err
        );
        self.errors.push(ReplicateError {
            source: source.display().to_string(),
            destination: destination.display().to_string(),
            message: err.to_string(),
        });
    }
}

/// Replicate `source` at `target`, rewriting paths and contents through
/// `map`. The target directory is created if absent. An unreadable source
/// root is fatal and writes nothing; failures below the root are recorded
/// in the report and the walk continues.
pub fn replicate(source: &Path, target: &Path, map: &ReplacementMap) -> Result<ReplicateReport> {
    if !source.is_dir() {
        return Err(Error::template_not_found(source.display().to_string()));
    }

    let mut report = ReplicateReport::default();

    walk(source, target, map, &mut report)
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("copy {}", source.display()))))?;

    Ok(report)
}

/// Process one directory level. The returned error covers this level's own
/// listing/creation only; the caller treats it as a per-entry failure of the
/// directory itself, which is what makes subtree failures recoverable while
/// a failure at the root stays fatal.
fn walk(
    source: &Path,
    target: &Path,
    map: &ReplacementMap,
    report: &mut ReplicateReport,
) -> io::Result<()> {
    let mut entries: Vec<fs::DirEntry> =
        fs::read_dir(source)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    fs::create_dir_all(target)?;
    report.directories_created += 1;

    for entry in &entries {
        let src_path = entry.path();
        let name = entry.file_name();
        let dst_name = match name.to_str() {
            Some(s) => map.apply_path_segment(s),
            // Non-UTF-8 names carry no token to rewrite
            None => name.to_string_lossy().into_owned(),
        };
        let dst_path = target.join(dst_name);

        let outcome = if src_path.is_dir() {
            walk(&src_path, &dst_path, map, report)
        } else {
            copy_entry(&src_path, &dst_path, map, report)
        };

        if let Err(e) = outcome {
            report.record(&src_path, &dst_path, &e);
        }
    }

    // Directory metadata last, once the children exist
    if let Err(e) = copy_metadata(source, target) {
        if e.kind() != io::ErrorKind::Unsupported {
            report.record(source, target, &e);
        }
    }

    Ok(())
}

/// Copy one file and rewrite its content in place according to its class.
fn copy_entry(
    source: &Path,
    destination: &Path,
    map: &ReplacementMap,
    report: &mut ReplicateReport,
) -> io::Result<()> {
    fs::copy(source, destination)?;
    report.files_copied += 1;

    match classify(destination) {
        Classification::Text => {
            let content = fs::read(destination)?;
            if let Some(rewritten) = map.apply_text(&content) {
                write_atomic(destination, &rewritten)?;
                report.files_rewritten += 1;
            }
        }
        Classification::BinaryAsset => {
            let data = fs::read(destination)?;
            if let Some(rewritten) = map.apply_binary(&data) {
                write_atomic(destination, &rewritten)?;
                report.files_rewritten += 1;
            }
        }
        Classification::Opaque => {}
    }

    match copy_metadata(source, destination) {
        Err(e) if e.kind() != io::ErrorKind::Unsupported => Err(e),
        _ => Ok(()),
    }
}

/// Atomic write: write to a sibling temp file, then rename into place, so a
/// failure mid-write never leaves a half-rewritten destination.
fn write_atomic(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
    let filename = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

    let tmp_path = parent.join(format!("{}.tmp", filename.to_string_lossy()));

    if let Err(e) = fs::write(&tmp_path, content).and_then(|()| fs::rename(&tmp_path, path)) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

/// Propagate permission bits and access/modification times from `source`
/// onto `destination`.
fn copy_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    fs::set_permissions(destination, meta.permissions())?;

    let atime = FileTime::from_last_access_time(&meta);
    let mtime = FileTime::from_last_modification_time(&meta);
    filetime::set_file_times(destination, atime, mtime)
}
