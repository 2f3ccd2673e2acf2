//! Regression digests
//!
//! SHA-256 over the canonical IR text, rendered as lowercase hex. The digest
//! is an opaque fingerprint for golden-hash gating, not a security boundary.

use super::{compile, serialize};
use crate::types::FieldNode;
use sha2::{Digest, Sha256};
use std::fmt::Write;
use thiserror::Error;

/// Number of canonical-text characters kept in a [`GoldenMismatch`]
pub const SNAPSHOT_PREFIX_LEN: usize = 300;

/// A fixture whose digest no longer matches its recorded golden value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Golden IR hash mismatch for {name}\nExpected: {expected}\nActual:   {actual}\nIR Snapshot: {snapshot}...")]
pub struct GoldenMismatch {
    /// Fixture name
    pub name: String,
    /// Recorded digest
    pub expected: String,
    /// Digest of the current compiler output
    pub actual: String,
    /// Leading part of the canonical text
    pub snapshot: String,
}

/// SHA-256 of `text` as 64 lowercase hex characters
pub fn hash(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Digest of a tree: `hash(serialize(compile(root)))`
pub fn fingerprint(root: Option<&FieldNode>) -> String {
    hash(&serialize(&compile(root)))
}

/// Compare a tree's digest against a recorded golden value.
///
/// Returns the actual digest on success.
pub fn check_golden(
    name: &str,
    root: Option<&FieldNode>,
    expected: &str,
) -> Result<String, GoldenMismatch> {
    let text = serialize(&compile(root));
    let actual = hash(&text);
    if actual == expected {
        log::debug!("golden {name}: ok");
        return Ok(actual);
    }

    log::warn!("golden {name}: expected {expected}, got {actual}");
    Err(GoldenMismatch {
        name: name.to_string(),
        expected: expected.to_string(),
        actual,
        snapshot: text.chars().take(SNAPSHOT_PREFIX_LEN).collect(),
    })
}
