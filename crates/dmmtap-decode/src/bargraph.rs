use crate::tables::{
    BARGRAPH_BIT, BARGRAPH_BYTES, BARGRAPH_START, BARGRAPH_TAIL_MASK, FRAME_LENGTH, STATUS_BYTE,
};

/// Segments available on the bargraph.
pub const BARGRAPH_SEGMENTS: u32 =
    (BARGRAPH_BYTES as u32 - 1) * 8 + BARGRAPH_TAIL_MASK.count_ones();

/// Number of lit bargraph segments, `None` when the bargraph is off.
pub fn bargraph_count(data: &[u8; FRAME_LENGTH]) -> Option<u8> {
    if data[STATUS_BYTE] & BARGRAPH_BIT == 0 {
        return None;
    }
    let run = &data[BARGRAPH_START..BARGRAPH_START + BARGRAPH_BYTES];
    let (tail, body) = run.split_last()?;
    let lit = body.iter().map(|b| b.count_ones()).sum::<u32>()
        + (tail & BARGRAPH_TAIL_MASK).count_ones();
    Some(lit as u8)
}

/// One `#` per lit segment.
pub fn render_bars(count: u8) -> String {
    "#".repeat(usize::from(count))
}
