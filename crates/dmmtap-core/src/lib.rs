//! Core functionalities: byte sources, decode loop, background service.

pub mod error;
pub mod monitor;
pub mod service;
pub mod source;

pub use error::Error;
pub use monitor::{Monitor, MonitorEvent, StopHandle};
pub use service::MonitorService;
pub use source::{list_ports, open_source, PortInfo, SerialConfig, SerialSource, Source};
