use crate::digit::digit_of;
use crate::tables::{DIGIT_BYTES, FRAME_LENGTH, MARKER_BIT, SIGN_BIT, STATUS_BYTE};

/// The four display digits as an integer plus the decimal point position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayValue {
    pub magnitude: u32,
    pub negative: bool,
    /// Power of ten contributed by the decimal point, `0` or negative.
    pub decimal_exponent: i32,
}

impl DisplayValue {
    /// Read sign, digits and decimal point out of a frame.
    ///
    /// Once a digit carries the point marker every less significant digit
    /// is counted as fractional, whatever its own marker bit says.
    pub fn from_frame(data: &[u8; FRAME_LENGTH]) -> Self {
        let negative = data[STATUS_BYTE] & SIGN_BIT != 0;

        let mut magnitude = 0u32;
        let mut decimal_exponent = 0i32;
        let mut decimal = false;
        for &offset in DIGIT_BYTES.iter() {
            let byte = data[offset];
            if byte & MARKER_BIT != 0 || decimal {
                decimal = true;
                decimal_exponent -= 1;
            }
            magnitude = magnitude * 10 + u32::from(digit_of(byte));
        }

        Self {
            magnitude,
            negative,
            decimal_exponent,
        }
    }

    /// Signed value with the extra multiplier exponent applied.
    pub fn scaled(&self, multiplier_exponent: i32) -> f64 {
        if self.magnitude == 0 {
            return 0.0;
        }
        let exponent = self.decimal_exponent + multiplier_exponent;
        let magnitude = f64::from(self.magnitude);
        // divide for negative exponents so 1234e-2 lands exactly on 12.34
        let value = if exponent >= 0 {
            magnitude * 10f64.powi(exponent)
        } else {
            magnitude / 10f64.powi(-exponent)
        };
        if self.negative {
            -value
        } else {
            value
        }
    }
}
