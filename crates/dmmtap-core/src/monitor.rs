//! Blocking decode loop.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use dmmtap_decode::{ByteSource, FrameSync, Reading, SyncEvent, SyncStats};
use log::{debug, info, warn};

use crate::Error;

/// Asks a running [`Monitor`] to stop after the frame in progress.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Sender<()>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.try_send(());
    }
}

pub struct Monitor<S> {
    sync: FrameSync<S>,
    stop_rx: Receiver<()>,
    stop_tx: Sender<()>,
}

impl<S: ByteSource> Monitor<S> {
    pub fn new(source: S) -> Self {
        let (stop_tx, stop_rx) = bounded(1);
        Self {
            sync: FrameSync::new(source),
            stop_rx,
            stop_tx,
        }
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop_tx.clone(),
        }
    }

    pub fn stats(&self) -> SyncStats {
        self.sync.stats()
    }

    fn stop_requested(&self) -> bool {
        // the monitor holds a sender itself, so Disconnected never happens
        !matches!(self.stop_rx.try_recv(), Err(TryRecvError::Empty))
    }

    /// Decode frames until the source ends or a stop is requested, handing
    /// each reading to `on_reading`. Dropped frames are logged and skipped.
    pub fn run(&mut self, mut on_reading: impl FnMut(Reading)) -> Result<SyncStats, Error> {
        self.run_with(|event| {
            if let MonitorEvent::Reading(reading) = event {
                on_reading(reading);
            }
        })
    }

    pub(crate) fn run_with(
        &mut self,
        mut emit: impl FnMut(MonitorEvent),
    ) -> Result<SyncStats, Error> {
        loop {
            if self.stop_requested() {
                info!("stop requested");
                break;
            }
            match self.sync.next_frame()? {
                SyncEvent::Frame(frame) => {
                    debug!("# {}", hex::encode(frame.data()));
                    emit(MonitorEvent::Reading(Reading::decode(&frame)));
                }
                SyncEvent::Dropped(reason) => {
                    if self.sync.stats().frames > 0 {
                        warn!("dropped frame: {reason}");
                    }
                    emit(MonitorEvent::Dropped(reason));
                }
                SyncEvent::EndOfStream => {
                    info!("end of stream");
                    break;
                }
            }
        }
        let stats = self.sync.stats();
        debug!(
            "{} frames decoded, {} dropped ({} too long, {} too short)",
            stats.frames,
            stats.dropped(),
            stats.too_long,
            stats.too_short
        );
        Ok(stats)
    }
}

#[derive(Debug, Clone)]
pub enum MonitorEvent {
    Reading(Reading),
    Dropped(dmmtap_decode::SyncError),
    Ended(SyncStats),
    Error(String),
}
