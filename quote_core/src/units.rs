//! # Unit Types
//!
//! Lightweight newtype wrappers for the quantities a quote deals with.
//! They serialize as bare numbers so the JSON stays readable.
//!
//! - Mass: grams (g), kilograms (kg)
//! - Time: minutes (min), hours (h), days (d)
//! - Ratios: percentages (%)
//!
//! Prices are plain `f64` currency amounts; the shop works in a single
//! currency and never converts.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::units::{Grams, Kilograms, Minutes, Hours, Percent};
//!
//! let weight: Kilograms = Grams(250.0).into();
//! assert_eq!(weight.0, 0.25);
//!
//! let time: Hours = Minutes(90.0).into();
//! assert_eq!(time.0, 1.5);
//!
//! assert_eq!(Percent(10.0).factor(), 1.1);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in grams
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grams(pub f64);

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

impl From<Grams> for Kilograms {
    fn from(g: Grams) -> Self {
        Kilograms(g.0 / 1000.0)
    }
}

impl From<Kilograms> for Grams {
    fn from(kg: Kilograms) -> Self {
        Grams(kg.0 * 1000.0)
    }
}

// ============================================================================
// Time Units
// ============================================================================

/// Duration in minutes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Minutes(pub f64);

/// Duration in hours
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hours(pub f64);

/// Duration in days (24 h)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Days(pub f64);

impl From<Minutes> for Hours {
    fn from(min: Minutes) -> Self {
        Hours(min.0 / 60.0)
    }
}

impl From<Hours> for Minutes {
    fn from(h: Hours) -> Self {
        Minutes(h.0 * 60.0)
    }
}

impl From<Days> for Hours {
    fn from(d: Days) -> Self {
        Hours(d.0 * 24.0)
    }
}

// ============================================================================
// Ratios
// ============================================================================

/// Percentage, stored as the human number (10.0 means 10 %)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl Percent {
    /// Multiplier for applying this percentage on top of a base: `1 + p/100`
    pub fn factor(self) -> f64 {
        1.0 + self.0 / 100.0
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Grams);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Minutes);
impl_arithmetic!(Hours);
impl_arithmetic!(Days);

// ============================================================================
// Text Input
// ============================================================================

/// Parse a number typed by the operator.
///
/// Accepts either `.` or `,` as the decimal separator ("12,5" == 12.5)
/// and surrounding whitespace. Empty or non-numeric text, and NaN/infinity,
/// are rejected as `InvalidInput` for `field`.
pub fn parse_decimal(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_input(field, text, "A number is required"));
    }

    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::invalid_input(field, text, "Not a valid number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_to_kilograms() {
        let kg: Kilograms = Grams(1500.0).into();
        assert_eq!(kg.0, 1.5);
    }

    #[test]
    fn test_time_conversions() {
        let h: Hours = Minutes(45.0).into();
        assert_eq!(h.0, 0.75);

        let h: Hours = Days(2.0).into();
        assert_eq!(h.0, 48.0);
    }

    #[test]
    fn test_percent_factor() {
        assert_eq!(Percent(0.0).factor(), 1.0);
        assert_eq!(Percent(100.0).factor(), 2.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = Hours(10.0);
        let b = Hours(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_parse_decimal_accepts_comma() {
        assert_eq!(parse_decimal("weight_g", "12,5").unwrap(), 12.5);
        assert_eq!(parse_decimal("weight_g", " 80 ").unwrap(), 80.0);
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        let err = parse_decimal("weight_g", "doce").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(parse_decimal("weight_g", "").is_err());
        assert!(parse_decimal("weight_g", "inf").is_err());
    }
}
