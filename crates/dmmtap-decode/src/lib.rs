//! Frame synchronization and display decoding for the 22-byte multimeter
//! telemetry stream.

pub mod bargraph;
pub mod digit;
pub mod frame;
pub mod mode;
pub mod reading;
pub mod tables;
pub mod unit;
pub mod value;

pub use bargraph::{bargraph_count, render_bars};
pub use digit::{digit_of, try_digit_of};
pub use frame::{ByteSource, Frame, FrameSync, Frames, SyncError, SyncEvent, SyncStats};
pub use mode::{Mode, Modes};
pub use reading::Reading;
pub use unit::{resolve_multiplier, resolve_unit, Multiplier, Unit};
pub use value::DisplayValue;
