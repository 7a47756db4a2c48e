use crossbeam_channel::{unbounded, Receiver};
use dmmtap_decode::ByteSource;
use std::thread::JoinHandle;

use crate::monitor::{Monitor, MonitorEvent, StopHandle};

/// A [`Monitor`] running on its own thread, publishing events on a channel.
///
/// The stream ends with either `Ended` or `Error`, after which the channel
/// disconnects.
pub struct MonitorService {
    stop: StopHandle,
    rx_evt: Receiver<MonitorEvent>,
    worker: Option<JoinHandle<()>>,
}

impl MonitorService {
    pub fn spawn<S>(source: S) -> Self
    where
        S: ByteSource + Send + 'static,
    {
        let (tx_evt, rx_evt) = unbounded::<MonitorEvent>();
        let mut monitor = Monitor::new(source);
        let stop = monitor.stop_handle();

        let worker = std::thread::spawn(move || {
            let result = monitor.run_with(|event| {
                let _ = tx_evt.send(event);
            });
            let last = match result {
                Ok(stats) => MonitorEvent::Ended(stats),
                Err(e) => MonitorEvent::Error(e.to_string()),
            };
            let _ = tx_evt.send(last);
        });

        Self {
            stop,
            rx_evt,
            worker: Some(worker),
        }
    }

    pub fn events(&self) -> &Receiver<MonitorEvent> {
        &self.rx_evt
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request a stop. The worker exits once its current read completes.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// Wait for the worker thread to finish.
    pub fn join(mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
