//! Edit operation representation

use crate::diff::DiffError;
use serde::{Deserialize, Serialize};
use similar::{DiffOp, DiffTag};
use std::fmt;
use std::ops::Range;

/// The kind of change an edit operation describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Bytes are unchanged
    Equal,
    /// Bytes were added to the target
    Insert,
    /// Bytes were removed from the source
    Delete,
    /// Source bytes were replaced by target bytes
    Replace,
}

impl ChangeKind {
    /// Check if this is an actual change (not just context)
    pub fn is_change(self) -> bool {
        self != ChangeKind::Equal
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeKind::Equal => "equal",
            ChangeKind::Insert => "insert",
            ChangeKind::Delete => "delete",
            ChangeKind::Replace => "replace",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DiffTag> for ChangeKind {
    fn from(tag: DiffTag) -> Self {
        match tag {
            DiffTag::Equal => ChangeKind::Equal,
            DiffTag::Insert => ChangeKind::Insert,
            DiffTag::Delete => ChangeKind::Delete,
            DiffTag::Replace => ChangeKind::Replace,
        }
    }
}

/// One tagged span mapping a source byte range onto a target byte range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    /// The kind of change
    pub kind: ChangeKind,
    /// Byte range in the source (older) buffer
    pub source: Range<usize>,
    /// Byte range in the target (newer) buffer
    pub target: Range<usize>,
}

impl EditOp {
    pub fn new(kind: ChangeKind, source: Range<usize>, target: Range<usize>) -> Self {
        Self {
            kind,
            source,
            target,
        }
    }

    pub fn equal(source: Range<usize>, target: Range<usize>) -> Self {
        Self::new(ChangeKind::Equal, source, target)
    }

    /// An insertion at `at` in the source
    pub fn insert(at: usize, target: Range<usize>) -> Self {
        Self::new(ChangeKind::Insert, at..at, target)
    }

    /// A deletion landing at `at` in the target
    pub fn delete(source: Range<usize>, at: usize) -> Self {
        Self::new(ChangeKind::Delete, source, at..at)
    }

    pub fn replace(source: Range<usize>, target: Range<usize>) -> Self {
        Self::new(ChangeKind::Replace, source, target)
    }

    /// Check the range invariants for this op's kind
    pub fn validate(&self) -> Result<(), DiffError> {
        let reason = if self.source.start > self.source.end {
            Some("reversed source range")
        } else if self.target.start > self.target.end {
            Some("reversed target range")
        } else if self.kind == ChangeKind::Insert && !self.source.is_empty() {
            Some("insert with a non-empty source range")
        } else if self.kind == ChangeKind::Delete && !self.target.is_empty() {
            Some("delete with a non-empty target range")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(DiffError::InvalidOp {
                op: self.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }
}

impl From<DiffOp> for EditOp {
    fn from(op: DiffOp) -> Self {
        let (tag, source, target) = op.as_tag_tuple();
        Self::new(tag.into(), source, target)
    }
}
