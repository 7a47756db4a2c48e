//! Frame boundary recovery.
//!
//! The meter has no start marker and no escaping: a frame is whatever ends
//! on `0x55` after exactly 22 bytes. A `0x55` inside the data bytes will
//! split a frame; the next terminator brings the stream back in sync.

use std::io::{self, ErrorKind, Read};
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, trace};
use thiserror::Error;

use crate::tables::{END_OF_DATA, FRAME_LENGTH};

/// Minimal read contract the synchronizer needs.
pub trait ByteSource {
    /// Next byte, or `None` once the source is exhausted.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

impl<R: Read> ByteSource for R {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

/// A complete, terminated frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    data: [u8; FRAME_LENGTH],
    received_at: SystemTime,
}

impl Frame {
    /// Build a frame from raw bytes. `None` unless the terminator is last.
    pub fn new(data: [u8; FRAME_LENGTH], received_at: SystemTime) -> Option<Self> {
        (data[FRAME_LENGTH - 1] == END_OF_DATA).then_some(Self { data, received_at })
    }

    pub fn data(&self) -> &[u8; FRAME_LENGTH] {
        &self.data
    }

    /// When the first byte of this frame was read.
    pub fn received_at(&self) -> SystemTime {
        self.received_at
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> u64 {
        self.received_at
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Why a run of bytes was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("no terminator within {len} bytes")]
    FrameTooLong { len: usize },
    #[error("terminator after only {len} bytes")]
    FrameTooShort { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    Frame(Frame),
    Dropped(SyncError),
    EndOfStream,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub frames: u64,
    pub too_long: u64,
    pub too_short: u64,
}

impl SyncStats {
    pub fn dropped(&self) -> u64 {
        self.too_long + self.too_short
    }
}

/// Accumulates bytes from a [`ByteSource`] into frames.
pub struct FrameSync<S> {
    source: S,
    buf: Vec<u8>,
    started_at: Option<SystemTime>,
    stats: SyncStats,
}

impl<S: ByteSource> FrameSync<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            buf: Vec::with_capacity(FRAME_LENGTH + 1),
            started_at: None,
            stats: SyncStats::default(),
        }
    }

    pub fn stats(&self) -> SyncStats {
        self.stats
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    /// Read until a frame completes, a run is dropped, or the source ends.
    ///
    /// Bytes of an unfinished frame stay buffered across calls that end in
    /// an error, but are discarded at end of stream.
    pub fn next_frame(&mut self) -> io::Result<SyncEvent> {
        loop {
            let Some(byte) = self.source.read_byte()? else {
                if !self.buf.is_empty() {
                    trace!("end of stream with {} buffered bytes", self.buf.len());
                }
                self.reset();
                return Ok(SyncEvent::EndOfStream);
            };

            if self.buf.is_empty() {
                self.started_at = Some(SystemTime::now());
            }
            self.buf.push(byte);

            if self.buf.len() > FRAME_LENGTH {
                let err = SyncError::FrameTooLong { len: self.buf.len() };
                self.stats.too_long += 1;
                debug!("bad frame, drop data: {err}");
                self.reset();
                return Ok(SyncEvent::Dropped(err));
            }

            if byte != END_OF_DATA {
                continue;
            }

            if self.buf.len() < FRAME_LENGTH {
                let err = SyncError::FrameTooShort { len: self.buf.len() };
                self.stats.too_short += 1;
                debug!("short frame, drop data: {err}");
                self.reset();
                return Ok(SyncEvent::Dropped(err));
            }

            let mut data = [0u8; FRAME_LENGTH];
            data.copy_from_slice(&self.buf);
            let received_at = self.started_at.unwrap_or_else(SystemTime::now);
            self.reset();

            if let Some(frame) = Frame::new(data, received_at) {
                self.stats.frames += 1;
                return Ok(SyncEvent::Frame(frame));
            }
        }
    }

    /// Iterate over complete frames only, skipping dropped runs.
    pub fn frames(&mut self) -> Frames<'_, S> {
        Frames { sync: self }
    }

    fn reset(&mut self) {
        self.buf.clear();
        self.started_at = None;
    }
}

pub struct Frames<'a, S> {
    sync: &'a mut FrameSync<S>,
}

impl<S: ByteSource> Iterator for Frames<'_, S> {
    type Item = io::Result<Frame>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.sync.next_frame() {
                Ok(SyncEvent::Frame(frame)) => return Some(Ok(frame)),
                Ok(SyncEvent::Dropped(_)) => continue,
                Ok(SyncEvent::EndOfStream) => return None,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
