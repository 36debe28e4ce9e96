//! Fixed-point price arithmetic for exact candle comparisons without floating point errors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scale factor for 8 decimal places (100,000,000)
pub const SCALE: i64 = 100_000_000;

/// Fixed-point price representation using i64 with 8 decimal precision
///
/// Containment tests and fractal extremes compare prices for exact equality,
/// so prices are stored as integers scaled by SCALE (1e8) rather than floats.
///
/// Example:
/// - 3245.67 → 324567000000
/// - 1.5 → 150000000
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Price(pub i64);

impl Price {
    /// Create Price from string representation
    ///
    /// # Arguments
    ///
    /// * `s` - Decimal string (e.g., "3245.67")
    ///
    /// # Returns
    ///
    /// Result containing Price or parse error
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, PriceError> {
        if s.is_empty() {
            return Err(PriceError::InvalidFormat);
        }

        // Split on decimal point
        let parts: Vec<&str> = s.split('.').collect();
        if parts.len() > 2 {
            return Err(PriceError::InvalidFormat);
        }

        // Parse integer part
        let integer_part: i64 = parts[0].parse().map_err(|_| PriceError::InvalidFormat)?;

        // Parse fractional part without intermediate String padding: parse the
        // digits directly and scale by 10^(8-len)
        let fractional_part = if parts.len() == 2 {
            let frac_str = parts[1];
            let frac_len = frac_str.len();
            if frac_len > 8 {
                return Err(PriceError::TooManyDecimals);
            }

            // e.g., "5" (1 digit) → 5 * 10^7 = 50_000_000
            // e.g., "12345678" (8 digits) → 12345678 * 10^0 = 12345678
            const POWERS: [i64; 9] = [
                100_000_000, 10_000_000, 1_000_000, 100_000, 10_000, 1_000, 100, 10, 1,
            ];
            let frac_digits: i64 = frac_str.parse().map_err(|_| PriceError::InvalidFormat)?;
            frac_digits * POWERS[frac_len]
        } else {
            0
        };

        // Combine parts with proper sign handling
        let scaled = integer_part
            .checked_mul(SCALE)
            .ok_or(PriceError::Overflow)?;
        let result = if integer_part >= 0 {
            scaled.checked_add(fractional_part)
        } else {
            scaled.checked_sub(fractional_part)
        }
        .ok_or(PriceError::Overflow)?;

        Ok(Price(result))
    }

    /// Convert Price to string representation with 8 decimal places
    #[allow(clippy::inherent_to_string_shadow_display)]
    pub fn to_string(&self) -> String {
        let abs_value = self.0.abs();
        let integer_part = abs_value / SCALE;
        let fractional_part = abs_value % SCALE;

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:08}", sign, integer_part, fractional_part)
    }

    /// Convert to f64 for user-friendly output
    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / SCALE as f64
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Price::from_str(s)
    }
}

/// Price parsing and arithmetic errors
#[derive(Debug, Clone, PartialEq)]
pub enum PriceError {
    /// Invalid number format
    InvalidFormat,
    /// Too many decimal places (>8)
    TooManyDecimals,
    /// Arithmetic overflow
    Overflow,
}

impl fmt::Display for PriceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceError::InvalidFormat => write!(f, "Invalid number format"),
            PriceError::TooManyDecimals => write!(f, "Too many decimal places (max 8)"),
            PriceError::Overflow => write!(f, "Arithmetic overflow"),
        }
    }
}

impl std::error::Error for PriceError {}
