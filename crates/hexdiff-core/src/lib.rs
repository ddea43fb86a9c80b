//! Hexdiff Core - Highlighted hexdumps of byte-level diffs
//!
//! This library turns edit operations between byte buffers into
//! row-aligned hexdumps, either of a whole target buffer or of only the
//! rows that changed.

pub mod change;
pub mod diff;
pub mod encode;
pub mod model;
pub mod render;
pub mod row;
pub mod style;

pub use change::{ChangeKind, EditOp};
pub use diff::{Algorithm, DiffEngine, DiffError, DiffStats};
pub use encode::{Encoder, Encoding, HexEncoder, TextEncoder};
pub use model::{ByteBuffer, Diff, Model};
pub use render::{wrap_lines, RenderConfig, RenderError, Renderer};
pub use row::{RowEncoder, RowState, View, ROW_WIDTH};
pub use style::Highlight;
