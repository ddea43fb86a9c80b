//! Output encoders
//!
//! Every encoder takes the bytes of one edit operation at a time and
//! produces a string once the last operation went in.

use crate::change::ChangeKind;
use crate::render::RenderError;
use crate::row::{RowEncoder, View};
use crate::style::Highlight;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The output format of a render
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Address, hex bytes and ASCII gutter, 16 bytes per row
    #[default]
    #[serde(alias = "row")]
    Hexdump,
    /// One continuous hex digest
    Hex,
    /// The bytes decoded as UTF-8
    #[serde(alias = "utf8", alias = "utf-8")]
    Text,
}

impl FromStr for Encoding {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hexdump" | "row" => Ok(Encoding::Hexdump),
            "hex" => Ok(Encoding::Hex),
            "text" | "utf8" | "utf-8" => Ok(Encoding::Text),
            _ => Err(RenderError::UnknownEncoding(s.to_string())),
        }
    }
}

/// Concatenates highlighted UTF-8 text
#[derive(Debug, Clone)]
pub struct TextEncoder {
    highlight: Highlight,
    output: String,
}

impl TextEncoder {
    pub fn new(highlight: Highlight) -> Self {
        Self {
            highlight,
            output: String::new(),
        }
    }

    pub fn append(&mut self, bytes: &[u8], kind: ChangeKind) -> Result<(), RenderError> {
        let text = std::str::from_utf8(bytes)?;
        self.output.push_str(&self.highlight.paint(text, kind));
        Ok(())
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// Concatenates highlighted hex digests
#[derive(Debug, Clone)]
pub struct HexEncoder {
    highlight: Highlight,
    output: String,
}

impl HexEncoder {
    pub fn new(highlight: Highlight) -> Self {
        Self {
            highlight,
            output: String::new(),
        }
    }

    pub fn append(&mut self, bytes: &[u8], kind: ChangeKind) {
        let hex: String = bytes.iter().map(|byte| format!("{byte:02x}")).collect();
        self.output.push_str(&self.highlight.paint(&hex, kind));
    }

    pub fn finish(self) -> String {
        self.output
    }
}

/// An encoder chosen once per render
#[derive(Debug, Clone)]
pub enum Encoder {
    Row(RowEncoder),
    Hex(HexEncoder, View),
    Text(TextEncoder, View),
}

impl Encoder {
    pub fn new(encoding: Encoding, highlight: Highlight, view: View) -> Self {
        match encoding {
            Encoding::Hexdump => Encoder::Row(RowEncoder::new(highlight, view)),
            Encoding::Hex => Encoder::Hex(HexEncoder::new(highlight), view),
            Encoding::Text => Encoder::Text(TextEncoder::new(highlight), view),
        }
    }

    /// Add the source and target bytes of one edit operation.
    ///
    /// In the dump view `source` is always empty.
    pub fn append(
        &mut self,
        source: &[u8],
        target: &[u8],
        kind: ChangeKind,
    ) -> Result<(), RenderError> {
        match self {
            Encoder::Row(encoder) => encoder.append(source, target, kind),
            Encoder::Hex(encoder, view) => encoder.append(visible(*view, source, target), kind),
            Encoder::Text(encoder, view) => {
                encoder.append(visible(*view, source, target), kind)?
            }
        }
        Ok(())
    }

    pub fn finish(self) -> String {
        match self {
            Encoder::Row(encoder) => encoder.finish(),
            Encoder::Hex(encoder, _) => encoder.finish(),
            Encoder::Text(encoder, _) => encoder.finish(),
        }
    }
}

/// The bytes a gridless encoder shows: the target, or what was deleted
fn visible<'a>(view: View, source: &'a [u8], target: &'a [u8]) -> &'a [u8] {
    match view {
        View::Diff if target.is_empty() => source,
        _ => target,
    }
}
