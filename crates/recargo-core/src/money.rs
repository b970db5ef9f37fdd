//! # Money Module
//!
//! Rounding and display rules for monetary values.
//!
//! ## Why Step-wise Rounding?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ROUNDING AT EVERY STEP                                                 │
//! │                                                                         │
//! │  F = 12000.00                                                           │
//! │  H = round(F × 0.018)   = 216.00                                        │
//! │  J = round(F × 0.1104)  = 1324.80                                       │
//! │  L = round((H+J) × 0.21) = round(323.568) = 323.57                      │
//! │                                                                         │
//! │  Each figure is what the acquirer prints on the settlement slip, so     │
//! │  later steps consume the ROUNDED value, never the exact product.        │
//! │  Rounding only at the end drifts by a cent on real settlements.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use recargo_core::money::{format_currency, Precision};
//! use rust_decimal_macros::dec;
//!
//! let cents = Precision::new(2);
//! assert_eq!(cents.round(dec!(323.568)), dec!(323.57));
//! assert_eq!(format_currency(dec!(1234.56)), "$\u{a0}1.234,56");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::GlobalParams;
use crate::DEFAULT_DECIMALS;

/// Non-breaking space, used by the es-AR number format between symbol and digits.
const NBSP: char = '\u{a0}';

// =============================================================================
// Precision
// =============================================================================

/// Number of decimal places intermediate figures are rounded to.
///
/// Rounds half away from zero: `0.125 → 0.13`, `-0.125 → -0.13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Precision(u32);

impl Precision {
    /// Creates a precision of `decimals` places.
    #[inline]
    pub const fn new(decimals: u32) -> Self {
        Precision(decimals)
    }

    /// Returns the number of decimal places.
    #[inline]
    pub const fn decimals(&self) -> u32 {
        self.0
    }

    /// Rounds `value` to this precision, midpoint away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use recargo_core::money::Precision;
    /// use rust_decimal_macros::dec;
    ///
    /// assert_eq!(Precision::new(2).round(dec!(0.125)), dec!(0.13));
    /// assert_eq!(Precision::new(2).round(dec!(-0.125)), dec!(-0.13));
    /// assert_eq!(Precision::new(0).round(dec!(2.5)), dec!(3));
    /// ```
    #[inline]
    pub fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.0, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision(DEFAULT_DECIMALS)
    }
}

impl From<&GlobalParams> for Precision {
    fn from(params: &GlobalParams) -> Self {
        Precision(params.redondeo_decimales)
    }
}

// =============================================================================
// Display Formatting (es-AR)
// =============================================================================

/// Formats an amount as Argentine pesos: `$ 1.234,56`.
///
/// Always two decimals; `.` groups thousands and `,` separates decimals.
/// The space after the symbol is a non-breaking space.
///
/// ## Example
/// ```rust
/// use recargo_core::money::format_currency;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_currency(dec!(9535.63)), "$\u{a0}9.535,63");
/// assert_eq!(format_currency(dec!(-5.5)), "-$\u{a0}5,50");
/// ```
pub fn format_currency(value: Decimal) -> String {
    let rounded = Precision::new(2).round(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${NBSP}{}", group_es_ar(rounded.abs(), 2))
}

/// Formats a fraction as a percentage: `0.1234 → 12,34 %`.
///
/// ## Example
/// ```rust
/// use recargo_core::money::format_percentage;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(format_percentage(dec!(0.1234)), "12,34\u{a0}%");
/// assert_eq!(format_percentage(dec!(0.2)), "20,00\u{a0}%");
/// ```
pub fn format_percentage(fraction: Decimal) -> String {
    let rounded = Precision::new(2).round(fraction * Decimal::ONE_HUNDRED);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{NBSP}%", group_es_ar(rounded.abs(), 2))
}

/// Renders a non-negative, already rounded value with es-AR separators.
fn group_es_ar(value: Decimal, decimals: u32) -> String {
    let mut padded = value;
    padded.rescale(decimals);
    let text = padded.to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*digit);
    }

    if let Some(frac_part) = frac_part {
        grouped.push(',');
        grouped.push_str(frac_part);
    }
    grouped
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_two_decimals() {
        let p = Precision::new(2);
        assert_eq!(p.round(dec!(1324.8)), dec!(1324.80));
        assert_eq!(p.round(dec!(323.568)), dec!(323.57));
        assert_eq!(p.round(dec!(323.565)), dec!(323.57));
        assert_eq!(p.round(dec!(323.5649)), dec!(323.56));
    }

    #[test]
    fn test_round_midpoint_away_from_zero() {
        let p = Precision::new(2);
        assert_eq!(p.round(dec!(-0.005)), dec!(-0.01));
        assert_eq!(p.round(dec!(0.005)), dec!(0.01));
    }

    #[test]
    fn test_round_four_decimals() {
        let p = Precision::new(4);
        assert_eq!(p.round(dec!(12000.148147)), dec!(12000.1481));
        assert!(p.round(dec!(12000.148147)).scale() <= 4);
    }

    #[test]
    fn test_round_does_not_pad() {
        // 12000 stays 12000: equality is numeric, scale is not forced up.
        assert_eq!(Precision::new(2).round(dec!(12000)), dec!(12000.00));
    }

    #[test]
    fn test_precision_from_global_params() {
        let params = GlobalParams {
            redondeo_decimales: 4,
            incluir_iva_como_costo: false,
        };
        assert_eq!(Precision::from(&params).decimals(), 4);
        assert_eq!(Precision::default().decimals(), 2);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.56)), "$\u{a0}1.234,56");
        assert_eq!(format_currency(dec!(0)), "$\u{a0}0,00");
        assert_eq!(format_currency(dec!(12000)), "$\u{a0}12.000,00");
        assert_eq!(format_currency(dec!(1234567.891)), "$\u{a0}1.234.567,89");
        assert_eq!(format_currency(dec!(999.995)), "$\u{a0}1.000,00");
        assert_eq!(format_currency(dec!(-584)), "-$\u{a0}584,00");
    }

    #[test]
    fn test_format_currency_negative_zero_has_no_sign() {
        assert_eq!(format_currency(dec!(-0.001)), "$\u{a0}0,00");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(dec!(0.1234)), "12,34\u{a0}%");
        assert_eq!(format_percentage(dec!(0.018)), "1,80\u{a0}%");
        assert_eq!(format_percentage(dec!(0)), "0,00\u{a0}%");
        assert_eq!(format_percentage(dec!(12.5)), "1.250,00\u{a0}%");
    }
}
