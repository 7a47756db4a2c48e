use std::fmt;

use serde::Serialize;

use crate::bargraph::{bargraph_count, render_bars};
use crate::frame::Frame;
use crate::mode::Modes;
use crate::unit::{resolve_multiplier, resolve_unit, Multiplier, Unit};
use crate::value::DisplayValue;

/// One decoded display snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Milliseconds since the Unix epoch at which the frame started.
    pub timestamp: u64,
    pub value: f64,
    pub magnitude: u32,
    pub negative: bool,
    pub decimal_exponent: i32,
    pub multiplier: Option<Multiplier>,
    pub unit: Option<Unit>,
    pub modes: Modes,
    /// Lit bargraph segments, `None` when the bargraph is off.
    pub bargraph: Option<u8>,
}

impl Reading {
    pub fn decode(frame: &Frame) -> Self {
        let data = frame.data();
        let display = DisplayValue::from_frame(data);
        let multiplier = resolve_multiplier(data);
        let value = display.scaled(multiplier.map_or(0, |m| m.exponent()));

        Self {
            timestamp: frame.timestamp_millis(),
            value,
            magnitude: display.magnitude,
            negative: display.negative,
            decimal_exponent: display.decimal_exponent,
            multiplier,
            unit: resolve_unit(data),
            modes: Modes::from_frame(data),
            bargraph: bargraph_count(data),
        }
    }

    /// Prefix symbol, empty without a multiplier.
    pub fn subunit(&self) -> &'static str {
        self.multiplier.map_or("", |m| m.symbol())
    }

    /// Unit symbol, empty when no unit annunciator is lit.
    pub fn unit_symbol(&self) -> &'static str {
        self.unit.map_or("", |u| u.symbol())
    }

    pub fn bargraph_count(&self) -> u8 {
        self.bargraph.unwrap_or(0)
    }
}

/// Plain decimal, or exponent notation below `1e-4` and from `1e16` up.
struct Value(f64);

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.abs();
        if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
            write!(f, "{:e}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// `<seconds> <value> <subunit><unit>  <bargraph> <modes><bars>`
impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:03} {} {}{}  {} {}{}",
            self.timestamp / 1000,
            self.timestamp % 1000,
            Value(self.value),
            self.subunit(),
            self.unit_symbol(),
            self.bargraph_count(),
            self.modes,
            render_bars(self.bargraph_count()),
        )
    }
}
