use std::io::Cursor;
use std::time::{Duration, UNIX_EPOCH};

use dmmtap_decode::{Frame, FrameSync, Mode, Multiplier, Reading, SyncError, SyncEvent, Unit};

/// -3.271 V, DC, AUTO, bargraph at 28 segments.
const CAPTURE: [u8; 22] = [
    0x00, 0x00, 0x00, 0x00, 0x06, 0x07, 0xeb, 0x2f, 0xc6, 0xff, 0xff, 0xff, 0x0f, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x08, 0x00, 0x55,
];

/// 4.70 kΩ with REL and MIN held.
const RESISTANCE: [u8; 22] = [
    0x00, 0x00, 0x00, 0x00, 0x5f, 0x87, 0x36, 0x5f, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x20, 0x00, 0x02, 0x20, 0x55,
];

fn at(data: [u8; 22], millis: u64) -> Frame {
    Frame::new(data, UNIX_EPOCH + Duration::from_millis(millis)).unwrap()
}

#[test]
fn golden_capture() {
    let r = Reading::decode(&at(CAPTURE, 1_696_000_000_000));
    assert_eq!(r.magnitude, 3271);
    assert!(r.negative);
    assert_eq!(r.decimal_exponent, -3);
    assert_eq!(r.value, -3.271);
    assert_eq!(r.multiplier, None);
    assert_eq!(r.unit, Some(Unit::Volt));
    assert_eq!(r.modes.iter().collect::<Vec<_>>(), vec![Mode::Dc, Mode::Auto]);
    assert_eq!(r.bargraph, Some(28));
    assert_eq!(
        r.to_string(),
        format!("1696000000.000 -3.271 V  28 [DC][AUTO]{}", "#".repeat(28))
    );
}

#[test]
fn golden_resistance() {
    let r = Reading::decode(&at(RESISTANCE, 0));
    assert_eq!(r.magnitude, 470);
    assert_eq!(r.decimal_exponent, -2);
    assert_eq!(r.multiplier, Some(Multiplier::Kilo));
    assert_eq!(r.unit, Some(Unit::Ohm));
    assert_eq!(r.value, 4700.0);
    assert_eq!(r.bargraph, None);
    assert_eq!(r.to_string(), "0.000 4700 kΩ  0 [REL][MIN]");
}

#[test]
fn micro_and_mega_readings() {
    let mut micro = RESISTANCE;
    micro[17] = 0x01;
    micro[19] = 0x04;
    let r = Reading::decode(&at(micro, 0));
    assert_eq!(r.multiplier, Some(Multiplier::Micro));
    assert_eq!(r.unit, Some(Unit::Ampere));
    assert_eq!(r.value, 4.7e-9);
    assert_eq!(r.to_string(), "0.000 4.7e-9 µA  0 [REL][MIN]");

    let mut mega = RESISTANCE;
    mega[17] = 0x10;
    let r = Reading::decode(&at(mega, 0));
    assert_eq!(r.multiplier, Some(Multiplier::Mega));
    assert_eq!(r.value, 4_700_000.0);
    assert_eq!(r.to_string(), "0.000 4700000 MΩ  0 [REL][MIN]");
}

#[test]
fn terminator_inside_data_splits_the_frame() {
    let mut corrupt = CAPTURE;
    corrupt[10] = 0x55;
    let mut stream = corrupt.to_vec();
    stream.extend_from_slice(&CAPTURE);

    let mut sync = FrameSync::new(Cursor::new(stream));
    let short = SyncEvent::Dropped(SyncError::FrameTooShort { len: 11 });
    assert_eq!(sync.next_frame().unwrap(), short);
    assert_eq!(sync.next_frame().unwrap(), short);
    match sync.next_frame().unwrap() {
        SyncEvent::Frame(frame) => {
            assert_eq!(frame.data(), &CAPTURE);
            assert_eq!(Reading::decode(&frame).value, -3.271);
        }
        other => panic!("expected frame, got {other:?}"),
    }
    assert_eq!(sync.next_frame().unwrap(), SyncEvent::EndOfStream);
}

#[test]
fn stream_with_truncated_head() {
    let mut stream = vec![0x2f, 0x06, 0x55];
    stream.extend_from_slice(&CAPTURE);
    stream.extend_from_slice(&RESISTANCE);
    stream.extend_from_slice(&CAPTURE[..10]);

    let mut sync = FrameSync::new(Cursor::new(stream));
    let mut readings = Vec::new();
    loop {
        match sync.next_frame().unwrap() {
            SyncEvent::Frame(frame) => readings.push(Reading::decode(&frame)),
            SyncEvent::Dropped(_) => {}
            SyncEvent::EndOfStream => break,
        }
    }

    let values: Vec<f64> = readings.iter().map(|r| r.value).collect();
    assert_eq!(values, vec![-3.271, 4700.0]);
    let stats = sync.stats();
    assert_eq!((stats.frames, stats.too_short, stats.too_long), (2, 1, 0));
}
