//! Diff computation engine

use crate::change::{ChangeKind, EditOp};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiffError {
    #[error("Invalid edit operation {op:?}: {reason}")]
    InvalidOp { op: EditOp, reason: &'static str },
}

/// Sequence matching algorithm used to produce edit operations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<Algorithm> for similar::Algorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Myers => similar::Algorithm::Myers,
            Algorithm::Patience => similar::Algorithm::Patience,
            Algorithm::Lcs => similar::Algorithm::Lcs,
        }
    }
}

/// Byte counts per kind of change in an op sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffStats {
    /// Bytes present only in the target
    pub insertions: usize,
    /// Bytes present only in the source
    pub deletions: usize,
    /// Target bytes that replace source bytes
    pub replacements: usize,
}

impl DiffStats {
    pub fn from_ops(ops: &[EditOp]) -> Self {
        let mut stats = Self::default();
        for op in ops {
            match op.kind {
                ChangeKind::Insert => stats.insertions += op.target.len(),
                ChangeKind::Delete => stats.deletions += op.source.len(),
                ChangeKind::Replace => stats.replacements += op.target.len(),
                ChangeKind::Equal => {}
            }
        }
        stats
    }

    /// Check if any byte differs
    pub fn has_changes(&self) -> bool {
        self.insertions + self.deletions + self.replacements > 0
    }
}

/// The main diff engine
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffEngine {
    algorithm: Algorithm,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Compute the edit operations turning `old` into `new`
    pub fn diff_bytes(&self, old: &[u8], new: &[u8]) -> Vec<EditOp> {
        let ops: Vec<EditOp> = similar::capture_diff_slices(self.algorithm.into(), old, new)
            .into_iter()
            .map(EditOp::from)
            .collect();
        log::debug!(
            "diffed {} -> {} bytes into {} ops with {:?}",
            old.len(),
            new.len(),
            ops.len(),
            self.algorithm
        );
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rebuild `new` from `old` and the ops, the way a consumer would.
    fn apply(old: &[u8], new: &[u8], ops: &[EditOp]) -> Vec<u8> {
        let mut out = Vec::new();
        for op in ops {
            match op.kind {
                ChangeKind::Equal => out.extend_from_slice(&old[op.source.clone()]),
                ChangeKind::Insert | ChangeKind::Replace => {
                    out.extend_from_slice(&new[op.target.clone()])
                }
                ChangeKind::Delete => {}
            }
        }
        out
    }

    #[test]
    fn test_simple_replace() {
        let engine = DiffEngine::new();
        let old = b"ABCDEFGHIJKLMNOP";
        let new = b"ABCDEXGHIJKLMNOP";

        let ops = engine.diff_bytes(old, new);

        assert_eq!(
            ops,
            vec![
                EditOp::equal(0..5, 0..5),
                EditOp::replace(5..6, 5..6),
                EditOp::equal(6..16, 6..16),
            ]
        );
        let stats = DiffStats::from_ops(&ops);
        assert_eq!(stats.replacements, 1);
        assert!(stats.has_changes());
    }

    #[test]
    fn test_no_changes() {
        let engine = DiffEngine::new();
        let data = b"same bytes";

        let ops = engine.diff_bytes(data, data);

        assert!(ops.iter().all(|op| op.kind == ChangeKind::Equal));
        assert!(!DiffStats::from_ops(&ops).has_changes());
    }

    #[test]
    fn test_insertion() {
        let engine = DiffEngine::new();
        let old = b"0123456789";
        let new = b"0123XYZ456789";

        let ops = engine.diff_bytes(old, new);

        assert!(ops.contains(&EditOp::insert(4, 4..7)));
        assert_eq!(DiffStats::from_ops(&ops).insertions, 3);
    }

    #[test]
    fn test_ops_are_valid_and_reconstruct_target() {
        let old = b"the quick brown fox jumps over the lazy dog";
        let new = b"the quick red fox leaps over a lazy dog!";
        for algorithm in [Algorithm::Myers, Algorithm::Patience, Algorithm::Lcs] {
            let ops = DiffEngine::new().with_algorithm(algorithm).diff_bytes(old, new);
            assert!(ops.iter().all(|op| op.validate().is_ok()));
            assert_eq!(apply(old, new, &ops), new.to_vec(), "{algorithm:?}");
        }
    }
}
