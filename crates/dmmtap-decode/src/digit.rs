use crate::tables::{DIGITS, SEGMENT_MASK};

/// Decode the segment pattern of `byte`, ignoring the marker bit.
///
/// Returns `None` when the pattern is not a digit (blank or partially lit
/// display positions).
pub fn try_digit_of(byte: u8) -> Option<u8> {
    let segments = byte & SEGMENT_MASK;
    DIGITS.iter().position(|&p| p == segments).map(|d| d as u8)
}

/// Decode the segment pattern of `byte`. Unknown patterns read as `0`.
pub fn digit_of(byte: u8) -> u8 {
    try_digit_of(byte).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_entry_decodes_to_its_index() {
        for (i, &pattern) in DIGITS.iter().enumerate() {
            assert_eq!(digit_of(pattern), i as u8);
            assert_eq!(digit_of(pattern | 0x80), i as u8);
        }
    }

    #[test]
    fn unknown_pattern_reads_as_zero() {
        assert_eq!(try_digit_of(0x00), None);
        assert_eq!(digit_of(0x00), 0);
        assert_eq!(digit_of(0x80), 0);
        assert_eq!(digit_of(0x01), 0);
        assert_eq!(digit_of(0x7e), 0);
    }

    #[test]
    fn no_pattern_outside_the_table_matches() {
        let hits = (0u8..=0x7f).filter(|&b| try_digit_of(b).is_some()).count();
        assert_eq!(hits, DIGITS.len());
    }
}
