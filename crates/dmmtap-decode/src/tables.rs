//! Frame layout constants and segment table.
//!
//! Seven-segment bit assignment of a digit byte:
//!
//! ```text
//!         0x01
//!        ______
//!       |      |
//!  0x10 |      | 0x02
//!       | 0x20 |
//!       |______|
//!       |      |
//!  0x40 |      | 0x04
//!       |______|
//!         0x08
//! ```

/// Number of bytes in a frame, terminator included.
pub const FRAME_LENGTH: usize = 22;

/// Last byte of every frame.
pub const END_OF_DATA: u8 = 0x55;

/// Segment patterns indexed by the digit they display.
pub const DIGITS: [u8; 10] = [0x5f, 0x06, 0x6b, 0x2f, 0x36, 0x3d, 0x7d, 0x07, 0x7f, 0x3f];

pub const SEGMENT_MASK: u8 = 0x7f;
pub const MARKER_BIT: u8 = 0x80;

/// Digit bytes, most significant first.
pub const DIGIT_BYTES: [usize; 4] = [7, 6, 5, 4];

/// Sign, bargraph enable and part of the mode annunciators.
pub const STATUS_BYTE: usize = 8;
pub const SIGN_BIT: u8 = 0x80;
pub const BARGRAPH_BIT: u8 = 0x40;

/// First bargraph byte and number of bytes in the run.
pub const BARGRAPH_START: usize = 9;
pub const BARGRAPH_BYTES: usize = 8;
/// Only the low nibble of the last bargraph byte carries segments.
pub const BARGRAPH_TAIL_MASK: u8 = 0x0f;

/// A single annunciator bit: byte offset and mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bit {
    pub byte: usize,
    pub mask: u8,
}

impl Bit {
    pub const fn new(byte: usize, mask: u8) -> Self {
        Self { byte, mask }
    }

    pub fn is_set(&self, data: &[u8]) -> bool {
        data.get(self.byte).is_some_and(|b| b & self.mask != 0)
    }
}
