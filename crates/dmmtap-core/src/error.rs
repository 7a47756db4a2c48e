use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("serial port: {0}")]
    Serial(#[from] serialport::Error),

    #[error("cannot open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}
