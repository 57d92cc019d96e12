//! File classification for the content-rewrite pass.
//!
//! Classification is by extension only; file contents are never inspected.

use std::path::Path;

/// How a copied file's content is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Token substitution applied across the whole file.
    Text,
    /// Raw byte-sequence substitution of the base name only.
    BinaryAsset,
    /// Copied byte-for-byte, never rewritten.
    Opaque,
}

/// Extensions that receive the text substitution pass (case-sensitive).
const TEXT_EXTENSIONS: &[&str] = &[
    "cs", "cpp", "h", "xml", "csproj", "ini", "txt", "bat", "cmd", "plist", "json", "uproject",
    "rc",
];

/// Engine asset extensions that receive the byte-level substitution pass.
const BINARY_ASSET_EXTENSIONS: &[&str] = &["uasset", "umap"];

/// Classify a path by its extension.
pub fn classify(path: &Path) -> Classification {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Classification::Opaque;
    };

    if TEXT_EXTENSIONS.contains(&ext) {
        Classification::Text
    } else if BINARY_ASSET_EXTENSIONS.contains(&ext) {
        Classification::BinaryAsset
    } else {
        Classification::Opaque
    }
}
