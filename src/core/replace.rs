//! Replacement map construction and substitution primitives.
//!
//! A clone run renames the template's base name to the target's base name in
//! three case shapes (as-is, lowercase, UPPERCASE) and optionally swaps the
//! stock engine copyright header for a user-supplied one. The base name is
//! the project directory's name with the literal `Game` suffix convention
//! stripped out.

use serde::Serialize;
use std::path::Path;

use crate::error::{Error, Result};

/// The stock copyright header shipped in engine templates, replaced when the
/// caller supplies a copyright string.
pub const ENGINE_COPYRIGHT_HEADER: &str =
    "// Copyright 1998-2014 Epic Games, Inc. All Rights Reserved.";

/// A single token substitution.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub from: String,
    pub to: String,
    pub label: String,
}

/// Ordered token substitutions for one clone run.
///
/// Pair order is insertion order and is applied as-is, so a run is
/// reproducible. Pairs whose `from` duplicates an earlier pair are dropped
/// (a base name that is already all-lowercase would otherwise carry the same
/// token twice).
#[derive(Debug, Clone)]
pub struct ReplacementMap {
    pub source_base: String,
    pub target_base: String,
    pub pairs: Vec<TokenPair>,
}

impl ReplacementMap {
    pub fn new(source_base: &str, target_base: &str, copyright: Option<&str>) -> Self {
        let mut pairs = vec![TokenPair {
            from: source_base.to_string(),
            to: target_base.to_string(),
            label: "base".to_string(),
        }];

        pairs.push(TokenPair {
            from: source_base.to_lowercase(),
            to: target_base.to_lowercase(),
            label: "lowercase".to_string(),
        });
        pairs.push(TokenPair {
            from: source_base.to_uppercase(),
            to: target_base.to_uppercase(),
            label: "UPPERCASE".to_string(),
        });

        // Drop case shapes that collapse to an earlier token
        let mut seen: Vec<String> = Vec::new();
        pairs.retain(|p| {
            if p.from.is_empty() || seen.contains(&p.from) {
                false
            } else {
                seen.push(p.from.clone());
                true
            }
        });

        if let Some(text) = copyright {
            pairs.push(TokenPair {
                from: ENGINE_COPYRIGHT_HEADER.to_string(),
                to: text.to_string(),
                label: "copyright".to_string(),
            });
        }

        ReplacementMap {
            source_base: source_base.to_string(),
            target_base: target_base.to_string(),
            pairs,
        }
    }

    /// Apply every pair, in order, across all occurrences. Operates on raw
    /// bytes — tokens are ASCII-derived, so text in legacy encodings
    /// (Windows-1252 resource scripts and the like) is rewritten without
    /// mangling bytes outside the matches. Returns `None` when no pair
    /// matched.
    pub fn apply_text(&self, content: &[u8]) -> Option<Vec<u8>> {
        let mut out: Option<Vec<u8>> = None;
        for pair in &self.pairs {
            let current = out.as_deref().unwrap_or(content);
            if let Some(replaced) = replace_bytes(current, pair.from.as_bytes(), pair.to.as_bytes())
            {
                out = Some(replaced);
            }
        }
        out
    }

    /// Rewrite a single path segment. Only the primary base token is
    /// substituted; case shapes and the copyright pair never appear in
    /// template paths.
    pub fn apply_path_segment(&self, name: &str) -> String {
        name.replace(&self.source_base, &self.target_base)
    }

    /// Byte-level substitution for engine assets. Substitutes only the
    /// primary base-name byte sequence and returns `None` when the sequence
    /// does not occur, so an untouched asset is never rewritten.
    ///
    /// Case shapes are deliberately not applied here, matching the text/
    /// binary asymmetry this tool has always had; see the pinned test below
    /// before widening it.
    pub fn apply_binary(&self, data: &[u8]) -> Option<Vec<u8>> {
        replace_bytes(data, self.source_base.as_bytes(), self.target_base.as_bytes())
    }
}

/// Derive the base name of a project directory: the directory name with
/// every literal `Game` removed.
pub fn base_name(dir: &Path) -> Option<String> {
    let name = dir.file_name()?.to_str()?;
    Some(name.replace("Game", ""))
}

/// Refuse the run when the source base is a substring of the target base.
/// Substituting the shorter template token inside the longer target token
/// would corrupt already-rewritten names, so this aborts before any
/// filesystem mutation.
pub fn check_collision(source_base: &str, target_base: &str) -> Result<()> {
    if target_base.contains(source_base) {
        return Err(Error::target_name_collision(source_base, target_base));
    }
    Ok(())
}

/// Replace every occurrence of `needle` in `haystack`, returning `None` when
/// there is no occurrence. Bytes outside matches are preserved bit-for-bit.
fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Option<Vec<u8>> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }

    let mut out: Vec<u8> = Vec::with_capacity(haystack.len());
    let mut pos = 0;
    let mut matched = false;

    while pos + needle.len() <= haystack.len() {
        if &haystack[pos..pos + needle.len()] == needle {
            out.extend_from_slice(replacement);
            pos += needle.len();
            matched = true;
        } else {
            out.push(haystack[pos]);
            pos += 1;
        }
    }
    out.extend_from_slice(&haystack[pos..]);

    if matched {
        Some(out)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn base_name_strips_game() {
        assert_eq!(base_name(&PathBuf::from("/work/ShooterGame")).unwrap(), "Shooter");
        assert_eq!(base_name(&PathBuf::from("MyGame")).unwrap(), "My");
        assert_eq!(base_name(&PathBuf::from("Platformer")).unwrap(), "Platformer");
    }

    #[test]
    fn map_generates_three_case_shapes() {
        let map = ReplacementMap::new("Shooter", "Puzzle", None);
        let tokens: Vec<&str> = map.pairs.iter().map(|p| p.from.as_str()).collect();
        assert_eq!(tokens, vec!["Shooter", "shooter", "SHOOTER"]);
    }

    #[test]
    fn map_dedups_collapsed_case_shapes() {
        // An all-lowercase base collapses base and lowercase into one pair.
        let map = ReplacementMap::new("shooter", "puzzle", None);
        let tokens: Vec<&str> = map.pairs.iter().map(|p| p.from.as_str()).collect();
        assert_eq!(tokens, vec!["shooter", "SHOOTER"]);
    }

    #[test]
    fn copyright_pair_only_when_supplied() {
        let without = ReplacementMap::new("Foo", "Bar", None);
        assert!(without.pairs.iter().all(|p| p.label != "copyright"));

        let with = ReplacementMap::new("Foo", "Bar", Some("// Copyright 2026 Acme."));
        let pair = with.pairs.last().unwrap();
        assert_eq!(pair.label, "copyright");
        assert_eq!(pair.from, ENGINE_COPYRIGHT_HEADER);
        assert_eq!(pair.to, "// Copyright 2026 Acme.");
    }

    #[test]
    fn text_rewrite_covers_all_case_shapes_independently() {
        let map = ReplacementMap::new("Foo", "Bar", None);
        let rewritten = map
            .apply_text(b"class Foo uses foo and FOO but not FoO")
            .unwrap();
        assert_eq!(rewritten, b"class Bar uses bar and BAR but not FoO".to_vec());
    }

    #[test]
    fn text_rewrite_is_idempotent() {
        let map = ReplacementMap::new("Foo", "Bar", None);
        let once = map.apply_text(b"Foo foo FOO mixed FoO").unwrap();
        // source tokens are gone, so a second pass finds nothing
        assert!(map.apply_text(&once).is_none());
    }

    #[test]
    fn text_rewrite_preserves_non_utf8_bytes() {
        // Windows-1252 copyright sign, not valid UTF-8
        let map = ReplacementMap::new("Foo", "Bar", None);
        let rewritten = map.apply_text(b"// \xa9 Foo resources, foo.ico").unwrap();
        assert_eq!(rewritten, b"// \xa9 Bar resources, bar.ico".to_vec());
    }

    #[test]
    fn text_rewrite_untouched_content_returns_none() {
        let map = ReplacementMap::new("Foo", "Bar", None);
        assert!(map.apply_text(b"nothing of interest").is_none());
    }

    #[test]
    fn path_segment_uses_primary_token_only() {
        let map = ReplacementMap::new("Shooter", "Puzzle", None);
        assert_eq!(map.apply_path_segment("ShooterCharacter.cpp"), "PuzzleCharacter.cpp");
        // lowercase shape is not applied to paths
        assert_eq!(map.apply_path_segment("shooter_notes.txt"), "shooter_notes.txt");
    }

    #[test]
    fn collision_guard_refuses_embedded_base() {
        assert!(check_collision("Shooter", "MyShooter").is_err());
        assert!(check_collision("Shooter", "Shooter2").is_err());
        assert!(check_collision("Shooter", "Puzzle").is_ok());
    }

    #[test]
    fn binary_rewrite_replaces_only_exact_sequence() {
        let map = ReplacementMap::new("Foo", "Bar", None);
        let data = b"\x00\x01Foo\xffFoo\x02tail".to_vec();
        let out = map.apply_binary(&data).unwrap();
        assert_eq!(out, b"\x00\x01Bar\xffBar\x02tail".to_vec());
    }

    #[test]
    fn binary_rewrite_untouched_when_no_match() {
        let map = ReplacementMap::new("Foo", "Bar", None);
        assert!(map.apply_binary(b"\x00\x01\x02nothing here").is_none());
    }

    #[test]
    fn binary_rewrite_handles_length_changes() {
        let map = ReplacementMap::new("Foo", "Longer", None);
        let out = map.apply_binary(b"aFoob").unwrap();
        assert_eq!(out, b"aLongerb".to_vec());

        let map = ReplacementMap::new("Shooter", "Px", None);
        let out = map.apply_binary(b"xShootery").unwrap();
        assert_eq!(out, b"xPxy".to_vec());
    }

    #[test]
    fn binary_rewrite_skips_case_shapes() {
        // Known boundary: the byte pass only substitutes the primary case,
        // unlike the text pass. Widening this is a behavior change.
        let map = ReplacementMap::new("Foo", "Bar", None);
        assert!(map.apply_binary(b"foo FOO").is_none());
    }
}
