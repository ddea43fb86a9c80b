//! Byte buffers and the diffs between them

use crate::change::EditOp;
use crate::diff::DiffEngine;
use crate::render::RenderError;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Raw bytes of one object under comparison
///
/// Text is encoded as UTF-8 when the buffer is built, so everything past
/// this point only ever sees bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: Vec<u8>,
}

impl ByteBuffer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Slice out `range`, failing instead of panicking when it does not fit
    pub fn slice(&self, range: &Range<usize>) -> Result<&[u8], RenderError> {
        self.data
            .get(range.clone())
            .ok_or(RenderError::OutOfBounds {
                start: range.start,
                end: range.end,
                len: self.data.len(),
            })
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl From<String> for ByteBuffer {
    fn from(text: String) -> Self {
        Self {
            data: text.into_bytes(),
        }
    }
}

impl From<&str> for ByteBuffer {
    fn from(text: &str) -> Self {
        Self {
            data: text.as_bytes().to_vec(),
        }
    }
}

/// Edit operations turning object `target - 1` into object `target`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    /// Index of the newer object; the older one sits right before it
    pub target: usize,
    /// Edit operations in buffer order
    pub opcodes: Vec<EditOp>,
}

impl Diff {
    pub fn new(target: usize, opcodes: Vec<EditOp>) -> Self {
        Self { target, opcodes }
    }

    /// A diff that marks all `len` bytes of `target` as unchanged
    pub fn identity(target: usize, len: usize) -> Self {
        Self::new(target, vec![EditOp::equal(0..len, 0..len)])
    }

    /// Check if any op is an actual change
    pub fn has_changes(&self) -> bool {
        self.opcodes.iter().any(|op| op.kind.is_change())
    }
}

/// Ordered objects and the diffs between consecutive ones
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub objects: Vec<ByteBuffer>,
    pub diffs: Vec<Diff>,
    engine: DiffEngine,
}

impl Model {
    pub fn new(objects: Vec<ByteBuffer>, diffs: Vec<Diff>) -> Self {
        Self {
            objects,
            diffs,
            engine: DiffEngine::default(),
        }
    }

    pub fn with_engine(mut self, engine: DiffEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Append an object, diffing it against the previous one if there is one
    pub fn push(&mut self, data: impl Into<ByteBuffer>) -> &mut Self {
        let data = data.into();
        let target = self.objects.len();
        if let Some(previous) = self.objects.last() {
            let opcodes = self.engine.diff_bytes(previous.as_bytes(), data.as_bytes());
            self.diffs.push(Diff::new(target, opcodes));
        }
        self.objects.push(data);
        self
    }

    pub fn object(&self, index: usize) -> Result<&ByteBuffer, RenderError> {
        self.objects
            .get(index)
            .ok_or(RenderError::MissingObject { index })
    }
}
