//! Row-aligned hexdump assembly
//!
//! Spans of any length arrive one edit operation at a time and are packed
//! into rows of [`ROW_WIDTH`] bytes. A span that is empty on the driving
//! side (a deletion, or a genuinely empty op) leaves a single highlighted
//! space in the hex column so the change stays visible without shifting
//! the byte columns after it.

use crate::change::ChangeKind;
use crate::style::Highlight;

/// Bytes per row
pub const ROW_WIDTH: usize = 16;

/// Which rows are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every row of the target, with an ASCII gutter
    Dump,
    /// Only rows holding a change, without a gutter
    Diff,
}

/// The row currently being filled
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowState {
    /// Offset of the first byte of this row
    pub address: usize,
    /// Bytes placed in this row so far
    pub len: usize,
    pub hex: String,
    pub ascii: String,
    /// Set by a placeholder: the next separator is already in place
    pub skip_space: bool,
    /// Set once anything other than unchanged bytes lands in the row
    pub marked: bool,
}

impl RowState {
    pub fn is_full(&self) -> bool {
        self.len >= ROW_WIDTH
    }

    pub fn remaining(&self) -> usize {
        ROW_WIDTH.saturating_sub(self.len)
    }

    fn separate(&mut self) {
        if self.skip_space {
            self.skip_space = false;
        } else {
            self.hex.push(' ');
        }
    }

    /// Fill the unused byte columns with blanks
    fn pad(&mut self) {
        let missing = self.remaining();
        self.hex.push_str(&"   ".repeat(missing));
        self.ascii.push_str(&" ".repeat(missing));
    }

    /// Close this row, leaving an empty one at the next address
    pub fn advance(&mut self) -> RowState {
        let next = RowState {
            address: self.address + ROW_WIDTH,
            ..RowState::default()
        };
        std::mem::replace(self, next)
    }
}

/// Incremental hexdump encoder
#[derive(Debug, Clone)]
pub struct RowEncoder {
    highlight: Highlight,
    view: View,
    row: RowState,
    output: String,
}

impl RowEncoder {
    pub fn new(highlight: Highlight, view: View) -> Self {
        Self {
            highlight,
            view,
            row: RowState::default(),
            output: String::new(),
        }
    }

    pub fn row(&self) -> &RowState {
        &self.row
    }

    /// Add the bytes of one edit operation.
    ///
    /// `target` drives rows and addresses. `source` is only consulted in the
    /// diff view, where it is the empty slice for insertions.
    pub fn append(&mut self, source: &[u8], target: &[u8], kind: ChangeKind) {
        if target.is_empty() {
            log::trace!(
                "{kind} placeholder at {:#x} ({} source bytes)",
                self.row.address + self.row.len,
                source.len()
            );
            self.push_placeholder(kind);
            return;
        }

        let mut rest = target;
        while !rest.is_empty() {
            if self.row.is_full() {
                self.flush();
            }
            let (chunk, tail) = rest.split_at(rest.len().min(self.row.remaining()));
            self.push_hex(chunk, kind);
            if self.view == View::Dump {
                self.push_ascii(chunk, kind);
            }
            self.row.len += chunk.len();
            rest = tail;
        }
    }

    /// Pad the last row, flush it and hand back everything produced
    pub fn finish(mut self) -> String {
        self.row.pad();
        self.flush();
        self.output
    }

    fn push_placeholder(&mut self, kind: ChangeKind) {
        self.row.hex.push_str(&self.highlight.paint(" ", kind));
        self.row.skip_space = true;
        self.row.marked |= kind.is_change();
    }

    fn push_hex(&mut self, chunk: &[u8], kind: ChangeKind) {
        self.row.separate();
        let hex = chunk
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect::<Vec<_>>()
            .join(" ");
        self.row.hex.push_str(&self.highlight.paint(&hex, kind));
        self.row.marked |= kind.is_change();
    }

    fn push_ascii(&mut self, chunk: &[u8], kind: ChangeKind) {
        let ascii: String = chunk
            .iter()
            .map(|&byte| {
                if (0x20..=0x7e).contains(&byte) {
                    byte as char
                } else {
                    '.'
                }
            })
            .collect();
        self.row.ascii.push_str(&self.highlight.paint(&ascii, kind));
    }

    fn flush(&mut self) {
        self.row.separate();
        let row = self.row.advance();
        match self.view {
            View::Dump => {
                if !self.output.is_empty() {
                    self.output.push('\n');
                }
                self.output
                    .push_str(&format!("{:06x}:{}|{}|", row.address, row.hex, row.ascii));
            }
            View::Diff if row.marked => {
                self.output
                    .push_str(&format!("{:06x}:{}\n", row.address, row.hex));
            }
            View::Diff => {
                log::trace!("suppressed unchanged row {:#08x}", row.address);
            }
        }
    }
}
