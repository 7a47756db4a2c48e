//! Multiplier prefix and measurement unit.
//!
//! Annunciator bits are not exclusive at the hardware level, so both are
//! resolved by walking a priority table top to bottom and keeping the first
//! hit. Reordering a table changes which unit wins when several bits are lit.

use serde::{Deserialize, Serialize};

use crate::tables::Bit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Multiplier {
    Nano,
    Micro,
    Milli,
    Kilo,
    Mega,
}

impl Multiplier {
    pub fn symbol(&self) -> &'static str {
        match self {
            Multiplier::Nano => "n",
            Multiplier::Micro => "µ",
            Multiplier::Milli => "m",
            Multiplier::Kilo => "k",
            Multiplier::Mega => "M",
        }
    }

    /// Power of ten applied to the display value.
    ///
    /// Nano and micro sit three decades below their SI value.
    pub fn exponent(&self) -> i32 {
        match self {
            Multiplier::Nano => -12,
            Multiplier::Micro => -9,
            Multiplier::Milli => -3,
            Multiplier::Kilo => 3,
            Multiplier::Mega => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Hfe,
    Percent,
    Farad,
    Fahrenheit,
    Celsius,
    Hertz,
    Volt,
    Ampere,
    Ohm,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Hfe => "hFE",
            Unit::Percent => "%",
            Unit::Farad => "F",
            Unit::Fahrenheit => "°F",
            Unit::Celsius => "°C",
            Unit::Hertz => "Hz",
            Unit::Volt => "V",
            Unit::Ampere => "A",
            Unit::Ohm => "Ω",
        }
    }
}

pub const MULTIPLIER_PRIORITY: [(Bit, Multiplier); 6] = [
    (Bit::new(18, 0x40), Multiplier::Nano),
    (Bit::new(18, 0x20), Multiplier::Micro),
    (Bit::new(17, 0x01), Multiplier::Micro),
    (Bit::new(17, 0x02), Multiplier::Milli),
    (Bit::new(17, 0x20), Multiplier::Kilo),
    (Bit::new(17, 0x10), Multiplier::Mega),
];

pub const UNIT_PRIORITY: [(Bit, Unit); 10] = [
    (Bit::new(19, 0x10), Unit::Hfe),
    (Bit::new(19, 0x20), Unit::Percent),
    (Bit::new(18, 0x80), Unit::Farad),
    (Bit::new(18, 0x02), Unit::Fahrenheit),
    (Bit::new(18, 0x01), Unit::Celsius),
    (Bit::new(19, 0x80), Unit::Hertz),
    (Bit::new(19, 0x40), Unit::Percent),
    (Bit::new(19, 0x08), Unit::Volt),
    (Bit::new(19, 0x04), Unit::Ampere),
    (Bit::new(19, 0x02), Unit::Ohm),
];

fn first_match<T: Copy>(table: &[(Bit, T)], data: &[u8]) -> Option<T> {
    table
        .iter()
        .find(|(bit, _)| bit.is_set(data))
        .map(|&(_, value)| value)
}

pub fn resolve_multiplier(data: &[u8]) -> Option<Multiplier> {
    first_match(&MULTIPLIER_PRIORITY, data)
}

pub fn resolve_unit(data: &[u8]) -> Option<Unit> {
    first_match(&UNIT_PRIORITY, data)
}
