use serialport::{SerialPort, SerialPortInfo, SerialPortType};
use std::fmt;
use std::fs::File;
use std::io::{self, ErrorKind, Read, Stdin};
use std::path::Path;
use std::time::Duration;

use log::{debug, info, warn};

use crate::Error;

/// A serial port as shown by `--list-ports`.
#[derive(Debug, Clone, PartialEq)]
pub struct PortInfo {
    pub port_name: String,
    pub kind: &'static str,
    /// USB vendor and product id.
    pub usb_id: Option<(u16, u16)>,
}

impl From<SerialPortInfo> for PortInfo {
    fn from(info: SerialPortInfo) -> Self {
        let (kind, usb_id) = match info.port_type {
            SerialPortType::UsbPort(usb) => ("USB", Some((usb.vid, usb.pid))),
            SerialPortType::PciPort => ("PCI", None),
            SerialPortType::BluetoothPort => ("Bluetooth", None),
            SerialPortType::Unknown => ("Unknown", None),
        };
        Self {
            port_name: info.port_name,
            kind,
            usb_id,
        }
    }
}

impl fmt::Display for PortInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.port_name, self.kind)?;
        if let Some((vid, pid)) = self.usb_id {
            write!(f, " ({vid:04X}:{pid:04X})")?;
        }
        Ok(())
    }
}

/// Serial ports on this machine. A failed enumeration lists nothing.
pub fn list_ports() -> Vec<PortInfo> {
    match serialport::available_ports() {
        Ok(ports) => ports.into_iter().map(PortInfo::from).collect(),
        Err(e) => {
            warn!("cannot enumerate serial ports: {e}");
            Vec::new()
        }
    }
}

/// Line settings for the meter's serial link, 2400 baud 8N1 by default.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: serialport::DataBits,
    pub parity: serialport::Parity,
    pub stop_bits: serialport::StopBits,
    pub flow_control: serialport::FlowControl,
    /// How long a single read waits before polling again.
    pub poll_interval: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 2400,
            data_bits: serialport::DataBits::Eight,
            parity: serialport::Parity::None,
            stop_bits: serialport::StopBits::One,
            flow_control: serialport::FlowControl::None,
            poll_interval: Duration::from_millis(50),
        }
    }
}

/// Serial port whose reads never time out.
///
/// The port is opened with a short timeout and reads are retried until a
/// byte arrives, so the decode loop sees a plain blocking reader.
pub struct SerialSource {
    port: Box<dyn SerialPort>,
}

impl SerialSource {
    pub fn open(port_name: &str, cfg: &SerialConfig) -> Result<Self, Error> {
        let port = serialport::new(port_name, cfg.baud_rate)
            .data_bits(cfg.data_bits)
            .parity(cfg.parity)
            .stop_bits(cfg.stop_bits)
            .flow_control(cfg.flow_control)
            .timeout(cfg.poll_interval)
            .open()?;
        Ok(Self { port })
    }
}

impl Read for SerialSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.port.read(buf) {
                Err(e) if e.kind() == ErrorKind::TimedOut => continue,
                other => return other,
            }
        }
    }
}

/// Where meter bytes come from.
pub enum Source {
    Serial(SerialSource),
    File(File),
    Stdin(Stdin),
}

impl Source {
    pub fn describe(&self) -> &'static str {
        match self {
            Source::Serial(_) => "serial",
            Source::File(_) => "file",
            Source::Stdin(_) => "stdin",
        }
    }
}

impl Read for Source {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Source::Serial(port) => port.read(buf),
            Source::File(file) => file.read(buf),
            Source::Stdin(stdin) => stdin.read(buf),
        }
    }
}

/// Open `path` as a serial device, falling back to a plain file (captures
/// replayed from disk). Without a path, read standard input.
pub fn open_source(path: Option<&Path>, cfg: &SerialConfig) -> Result<Source, Error> {
    let Some(path) = path else {
        info!("reading from stdin");
        return Ok(Source::Stdin(io::stdin()));
    };

    let name = path.to_string_lossy();
    match SerialSource::open(&name, cfg) {
        Ok(port) => {
            info!("opened serial port {name} at {} baud", cfg.baud_rate);
            Ok(Source::Serial(port))
        }
        Err(serial_err) => {
            debug!("{name} is not a serial port ({serial_err}), trying as a file");
            let file = File::open(path).map_err(|source| Error::Open {
                path: name.to_string(),
                source,
            })?;
            info!("reading from file {name}");
            Ok(Source::File(file))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serialport::UsbPortInfo;
    use std::io::Write;

    #[test]
    fn default_line_settings() {
        let cfg = SerialConfig::default();
        assert_eq!(cfg.baud_rate, 2400);
        assert_eq!(cfg.data_bits, serialport::DataBits::Eight);
        assert_eq!(cfg.parity, serialport::Parity::None);
    }

    #[test]
    fn usb_port_listing() {
        let info = SerialPortInfo {
            port_name: "/dev/ttyUSB0".to_string(),
            port_type: SerialPortType::UsbPort(UsbPortInfo {
                vid: 0x1a86,
                pid: 0x7523,
                serial_number: None,
                manufacturer: None,
                product: None,
            }),
        };
        let port = PortInfo::from(info);
        assert_eq!(port.usb_id, Some((0x1a86, 0x7523)));
        assert_eq!(port.to_string(), "/dev/ttyUSB0 USB (1A86:7523)");
    }

    #[test]
    fn plain_port_listing() {
        let info = SerialPortInfo {
            port_name: "/dev/ttyS0".to_string(),
            port_type: SerialPortType::Unknown,
        };
        assert_eq!(PortInfo::from(info).to_string(), "/dev/ttyS0 Unknown");
    }

    #[test]
    fn falls_back_to_file() {
        let name = format!("dmmtap-source-{}.bin", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::File::create(&path).unwrap().write_all(&[1, 2, 3]).unwrap();

        let mut source = open_source(Some(&path), &SerialConfig::default()).unwrap();
        assert_eq!(source.describe(), "file");
        let mut buf = Vec::new();
        source.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, vec![1, 2, 3]);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_path_is_an_open_error() {
        let path = Path::new("/nonexistent/dmmtap/meter");
        let err = open_source(Some(path), &SerialConfig::default()).err().unwrap();
        assert!(matches!(err, Error::Open { .. }));
    }
}
