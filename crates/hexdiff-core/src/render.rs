//! Rendering diffs through an encoder

use crate::diff::DiffError;
use crate::encode::{Encoder, Encoding};
use crate::model::{Diff, Model};
use crate::row::View;
use crate::style::Highlight;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("Unknown style: {0}")]
    UnknownStyle(String),
    #[error("No object at index {index}")]
    MissingObject { index: usize },
    #[error("Diff against object 0 has no source object")]
    NoSource,
    #[error("Range {start}..{end} out of bounds for buffer of {len} bytes")]
    OutOfBounds { start: usize, end: usize, len: usize },
    #[error("Data is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error(transparent)]
    InvalidOp(#[from] DiffError),
}

/// Output settings for a [`Renderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub encoding: Encoding,
    pub style: Highlight,
    /// Hard-wrap output lines at this many columns
    pub width: Option<NonZeroUsize>,
}

impl RenderConfig {
    /// Build a config from encoding and style names
    pub fn from_names(
        encoding: &str,
        style: &str,
        width: Option<usize>,
    ) -> Result<Self, RenderError> {
        Ok(Self {
            encoding: encoding.parse()?,
            style: style.parse()?,
            width: width.and_then(NonZeroUsize::new),
        })
    }
}

/// Renders diffs of a [`Model`] to display text
#[derive(Debug, Clone, Copy, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the target object of `diff` with its changes highlighted
    pub fn render(&self, model: &Model, diff: &Diff) -> Result<String, RenderError> {
        let target = model.object(diff.target)?;
        log::debug!(
            "rendering object {} ({} bytes, {} ops) as {:?}",
            diff.target,
            target.len(),
            diff.opcodes.len(),
            self.config.encoding
        );

        let mut encoder = self.encoder(View::Dump);
        for op in &diff.opcodes {
            op.validate()?;
            encoder.append(&[], target.slice(&op.target)?, op.kind)?;
        }
        Ok(self.wrap(encoder.finish()))
    }

    /// Render only what changed between object `diff.target - 1` and `diff.target`
    pub fn diff_render(&self, model: &Model, diff: &Diff) -> Result<String, RenderError> {
        let target = model.object(diff.target)?;
        let source_index = diff.target.checked_sub(1).ok_or(RenderError::NoSource)?;
        let source = model.object(source_index)?;
        log::debug!(
            "diff rendering objects {source_index} -> {} ({} ops) as {:?}",
            diff.target,
            diff.opcodes.len(),
            self.config.encoding
        );

        let mut encoder = self.encoder(View::Diff);
        for op in &diff.opcodes {
            op.validate()?;
            encoder.append(source.slice(&op.source)?, target.slice(&op.target)?, op.kind)?;
        }
        let output = encoder.finish();
        Ok(self.wrap(output.trim_end().to_string()))
    }

    /// Render every diff of the model, one after another
    pub fn dumps(&self, model: &Model) -> Result<String, RenderError> {
        let mut dump = String::new();
        for diff in &model.diffs {
            dump.push_str(&self.render(model, diff)?);
            dump.push('\n');
        }
        Ok(dump)
    }

    fn encoder(&self, view: View) -> Encoder {
        Encoder::new(self.config.encoding, self.config.style, view)
    }

    fn wrap(&self, output: String) -> String {
        match self.config.width {
            Some(width) => wrap_lines(&output, width.get()),
            None => output,
        }
    }
}

/// Hard-break every line wider than `width` display columns.
///
/// Escape sequences are copied through and take no columns.
pub fn wrap_lines(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / width.max(1));
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut column = 0;
        let mut chars = line.chars();
        while let Some(ch) = chars.next() {
            if ch == '\x1b' {
                out.push(ch);
                for next in chars.by_ref() {
                    out.push(next);
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
                continue;
            }
            let ch_width = ch.width().unwrap_or(0);
            if column > 0 && column + ch_width > width {
                out.push('\n');
                column = 0;
            }
            out.push(ch);
            column += ch_width;
        }
    }
    out
}
