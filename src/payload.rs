//! Per-occurrence token payload packing.
//!
//! Every indexed token occurrence carries a u32 payload on the wire that
//! records where the token appeared and how it should be weighted:
//!
//! - bits 0..19   line index (truncated via bitmask)
//! - bits 20..27  position within the line (saturating at 255)
//! - bit 28       the line contains a declaration-like keyword
//! - bit 29       the token comes from the file path, not the content
//!
//! This is the one place where bit-field widths must stay synchronized with
//! the remote engine's assumptions; everything else goes through
//! [`encode`] / [`Payload::decode`].

/// Width of the line-index field in bits.
pub const LINE_BITS: u32 = 20;

/// Mask for the line-index field (bits 0..19).
pub const LINE_MASK: u32 = (1 << LINE_BITS) - 1;

/// Shift of the position-in-line field.
pub const POS_SHIFT: u32 = 20;

/// Mask for the position-in-line field, after shifting.
pub const POS_MASK: u32 = 0xFF;

/// Flag bit: the token's line contains an important keyword.
pub const FLAG_IMPORTANT_LINE: u32 = 1 << 28;

/// Flag bit: the token was lexed from the file's path.
pub const FLAG_IN_PATH: u32 = 1 << 29;

/// Added to line indexes of path-stream tokens so they never collide with
/// content line numbers (content lines top out at `LINE_MASK`, but real
/// files stay far below this).
pub const PATH_LINE_OFFSET: u32 = 1_000_000;

/// Decoded payload fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    pub line_index: u32,
    pub position_in_line: u32,
    pub important_line: bool,
    pub in_path: bool,
}

/// Pack token occurrence metadata into a u32.
///
/// The line index (after adding `line_offset`) is truncated to 20 bits via
/// bitmask; the position saturates at 255. Out-of-range inputs are clipped,
/// never an error.
pub fn encode(
    line_index: u32,
    position_in_line: u32,
    important_line: bool,
    in_path: bool,
    line_offset: u32,
) -> u32 {
    let line = line_index.wrapping_add(line_offset) & LINE_MASK;
    let pos = position_in_line.min(POS_MASK);

    let mut payload = line | (pos << POS_SHIFT);
    if important_line {
        payload |= FLAG_IMPORTANT_LINE;
    }
    if in_path {
        payload |= FLAG_IN_PATH;
    }
    payload
}

impl Payload {
    /// Unpack a payload. Total over all 2^32 inputs; bits outside the
    /// declared fields are ignored.
    pub fn decode(payload: u32) -> Self {
        Self {
            line_index: payload & LINE_MASK,
            position_in_line: (payload >> POS_SHIFT) & POS_MASK,
            important_line: payload & FLAG_IMPORTANT_LINE != 0,
            in_path: payload & FLAG_IN_PATH != 0,
        }
    }

    /// The content line number this payload refers to, or `None` for
    /// path-stream payloads.
    pub fn content_line(&self) -> Option<u32> {
        if self.in_path {
            None
        } else {
            Some(self.line_index)
        }
    }
}
