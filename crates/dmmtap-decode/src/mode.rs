use std::fmt;

use serde::{Serialize, Serializer};

use crate::tables::Bit;

/// Mode annunciators. Any combination may be lit at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Buzzer,
    Dc,
    Ac,
    Diode,
    Relative,
    Auto,
    Min,
    Max,
}

impl Mode {
    pub fn tag(&self) -> &'static str {
        match self {
            Mode::Buzzer => "BUZZ",
            Mode::Dc => "DC",
            Mode::Ac => "AC",
            Mode::Diode => "DIODE",
            Mode::Relative => "REL",
            Mode::Auto => "AUTO",
            Mode::Min => "MIN",
            Mode::Max => "MAX",
        }
    }

    fn flag(self) -> u8 {
        1 << (self as u8)
    }
}

/// Test order, which is also the rendering order.
pub const MODE_BITS: [(Bit, Mode); 8] = [
    (Bit::new(20, 0x80), Mode::Buzzer),
    (Bit::new(8, 0x04), Mode::Dc),
    (Bit::new(8, 0x08), Mode::Ac),
    (Bit::new(20, 0x40), Mode::Diode),
    (Bit::new(8, 0x01), Mode::Relative),
    (Bit::new(8, 0x02), Mode::Auto),
    (Bit::new(20, 0x20), Mode::Min),
    (Bit::new(20, 0x10), Mode::Max),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modes(u8);

impl Modes {
    pub fn from_frame(data: &[u8]) -> Self {
        let mut modes = Modes::default();
        for (bit, mode) in MODE_BITS.iter() {
            if bit.is_set(data) {
                modes.insert(*mode);
            }
        }
        modes
    }

    pub fn insert(&mut self, mode: Mode) {
        self.0 |= mode.flag();
    }

    pub fn contains(&self, mode: Mode) -> bool {
        self.0 & mode.flag() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Mode> + '_ {
        MODE_BITS
            .iter()
            .map(|&(_, mode)| mode)
            .filter(move |&mode| self.contains(mode))
    }
}

/// Bracketed tags with no separator, e.g. `[DC][AUTO]`.
impl fmt::Display for Modes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mode in self.iter() {
            write!(f, "[{}]", mode.tag())?;
        }
        Ok(())
    }
}

impl Serialize for Modes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|m| m.tag()))
    }
}
