//! # Print Duration
//!
//! Print time is entered two ways: a single value with a unit ("2 hs",
//! "90 min") or a days/hours/minutes split ("1d 4h 30m"). Both reduce to
//! total hours, which is the only value the pricing engine reads. The
//! variant is kept so the record row shows what the operator typed.
//!
//! No rounding is applied on either path: `Minutes(90.0)`, `Hours(1.5)` and
//! `Split { days: 0, hours: 1, minutes: 30 }` are exactly 1.5 h.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::duration::PrintDuration;
//!
//! let d: PrintDuration = "0d 1h 30m".parse().unwrap();
//! assert_eq!(d.total_hours(), 1.5);
//! assert_eq!(d.display_text(), "0d 1h 30m");
//!
//! let m: PrintDuration = "90m".parse().unwrap();
//! assert_eq!(m.total_hours(), d.total_hours());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{parse_decimal, Days, Hours, Minutes};

/// How long a print job runs.
///
/// ## JSON Example
///
/// ```json
/// { "unit": "Split", "days": 0, "hours": 1, "minutes": 30 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit")]
pub enum PrintDuration {
    /// Single value in hours
    Hours { value: f64 },
    /// Single value in minutes
    Minutes { value: f64 },
    /// Days (24 h), hours and minutes entered separately
    Split { days: u32, hours: u32, minutes: u32 },
}

impl PrintDuration {
    pub fn hours(value: f64) -> Self {
        PrintDuration::Hours { value }
    }

    pub fn minutes(value: f64) -> Self {
        PrintDuration::Minutes { value }
    }

    pub fn split(days: u32, hours: u32, minutes: u32) -> Self {
        PrintDuration::Split { days, hours, minutes }
    }

    /// Normalize to total hours.
    pub fn total_hours(&self) -> f64 {
        match *self {
            PrintDuration::Hours { value } => value,
            PrintDuration::Minutes { value } => Hours::from(Minutes(value)).value(),
            PrintDuration::Split { days, hours, minutes } => {
                let total = Hours::from(Days(days as f64))
                    + Hours(hours as f64)
                    + Hours::from(Minutes(minutes as f64));
                total.value()
            }
        }
    }

    /// Check the duration can be priced: finite, nonnegative and nonzero.
    pub fn validate(&self) -> CalcResult<()> {
        let raw = match *self {
            PrintDuration::Hours { value } | PrintDuration::Minutes { value } => value,
            PrintDuration::Split { .. } => self.total_hours(),
        };
        if !raw.is_finite() || raw < 0.0 {
            return Err(CalcError::invalid_input(
                "duration",
                self.display_text(),
                "Duration must be a nonnegative number",
            ));
        }
        if self.total_hours() == 0.0 {
            return Err(CalcError::invalid_input(
                "duration",
                self.display_text(),
                "Print time cannot be zero",
            ));
        }
        Ok(())
    }

    /// Text stored in the record row ("2 hs", "90 min", "1d 4h 30m").
    pub fn display_text(&self) -> String {
        match *self {
            PrintDuration::Hours { value } => format!("{} hs", value),
            PrintDuration::Minutes { value } => format!("{} min", value),
            PrintDuration::Split { days, hours, minutes } => {
                format!("{}d {}h {}m", days, hours, minutes)
            }
        }
    }
}

impl fmt::Display for PrintDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_text())
    }
}

impl FromStr for PrintDuration {
    type Err = CalcError;

    /// Accepted forms:
    ///
    /// - `"2"`, `"2h"`, `"2 hs"`, `"1,5 horas"`: hours
    /// - `"90m"`, `"90 min"`: minutes
    /// - `"1d 2h 30m"`, `"1h30m"`, `"2 h 30 min"`, `"3d"`: days/hours/minutes split
    ///
    /// Units are matched case-insensitively against the same aliases in
    /// both forms. A bare number means hours.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_lowercase();
        let invalid = |reason: String| CalcError::invalid_input("duration", s, reason);

        let parts = tokenize(&text).map_err(invalid)?;
        match parts.as_slice() {
            [] => Err(invalid("Print time is required".to_string())),
            [(number, unit)] => {
                let unit = time_unit(unit).ok_or_else(|| invalid(format!("Unknown time unit '{}'", unit)))?;
                match unit {
                    TimeUnit::Hours => Ok(PrintDuration::hours(parse_decimal("duration", number)?)),
                    TimeUnit::Minutes => Ok(PrintDuration::minutes(parse_decimal("duration", number)?)),
                    TimeUnit::Days => parse_split(&parts).map_err(invalid),
                }
            }
            _ => parse_split(&parts).map_err(invalid),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeUnit {
    Days,
    Hours,
    Minutes,
}

/// Unit aliases, lowercase. The empty unit is hours.
fn time_unit(alias: &str) -> Option<TimeUnit> {
    match alias {
        "d" | "dia" | "día" | "dias" | "días" | "day" | "days" => Some(TimeUnit::Days),
        "" | "h" | "hs" | "hr" | "hrs" | "hora" | "horas" | "hour" | "hours" => Some(TimeUnit::Hours),
        "m" | "min" | "mins" | "minuto" | "minutos" | "minute" | "minutes" => Some(TimeUnit::Minutes),
        _ => None,
    }
}

/// Break text into (number, unit) runs: "1h30m" and "1 h 30 m" both give
/// `[("1", "h"), ("30", "m")]`. Either half of a run may be empty.
fn tokenize(text: &str) -> Result<Vec<(String, String)>, String> {
    let is_number = |c: char| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+');
    let mut parts = Vec::new();
    let mut chars = text.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&next) = chars.peek() else {
            break;
        };

        let mut number = String::new();
        while let Some(c) = chars.next_if(|&c| is_number(c)) {
            number.push(c);
        }
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut unit = String::new();
        while let Some(c) = chars.next_if(|c| c.is_alphabetic()) {
            unit.push(c);
        }

        if number.is_empty() && unit.is_empty() {
            return Err(format!("Unexpected character '{}'", next));
        }
        parts.push((number, unit));
    }
    Ok(parts)
}

fn parse_split(parts: &[(String, String)]) -> Result<PrintDuration, String> {
    let (mut days, mut hours, mut minutes) = (None, None, None);

    for (number, unit) in parts {
        let value: u32 = number
            .parse()
            .map_err(|_| "Days, hours and minutes must be whole numbers".to_string())?;
        let slot = match time_unit(unit) {
            Some(TimeUnit::Days) => &mut days,
            Some(TimeUnit::Hours) if !unit.is_empty() => &mut hours,
            Some(TimeUnit::Minutes) => &mut minutes,
            _ => return Err("Expected parts like '1d 2h 30m'".to_string()),
        };
        if slot.replace(value).is_some() {
            return Err(format!("'{}' given more than once", unit));
        }
    }

    Ok(PrintDuration::split(
        days.unwrap_or(0),
        hours.unwrap_or(0),
        minutes.unwrap_or(0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_paths_agree() {
        let by_minutes = PrintDuration::minutes(90.0).total_hours();
        let by_hours = PrintDuration::hours(1.5).total_hours();
        let by_split = PrintDuration::split(0, 1, 30).total_hours();
        assert_eq!(by_minutes, 1.5);
        assert_eq!(by_hours, 1.5);
        assert_eq!(by_split, 1.5);
    }

    #[test]
    fn test_day_is_24_hours() {
        assert_eq!(PrintDuration::split(1, 1, 30).total_hours(), 25.5);
    }

    #[test]
    fn test_parse_single_values() {
        assert_eq!("2".parse::<PrintDuration>().unwrap(), PrintDuration::hours(2.0));
        assert_eq!("2 hs".parse::<PrintDuration>().unwrap(), PrintDuration::hours(2.0));
        assert_eq!("1,5h".parse::<PrintDuration>().unwrap(), PrintDuration::hours(1.5));
        assert_eq!("90 min".parse::<PrintDuration>().unwrap(), PrintDuration::minutes(90.0));
        assert_eq!("45m".parse::<PrintDuration>().unwrap(), PrintDuration::minutes(45.0));
    }

    #[test]
    fn test_parse_split() {
        assert_eq!(
            "1d 2h 30m".parse::<PrintDuration>().unwrap(),
            PrintDuration::split(1, 2, 30)
        );
        assert_eq!(
            "2h 15m".parse::<PrintDuration>().unwrap(),
            PrintDuration::split(0, 2, 15)
        );
        assert_eq!("3d".parse::<PrintDuration>().unwrap(), PrintDuration::split(3, 0, 0));
    }

    #[test]
    fn test_parse_split_spacing_and_aliases() {
        let expected = PrintDuration::split(0, 1, 30);
        assert_eq!("1h 30min".parse::<PrintDuration>().unwrap(), expected);
        assert_eq!("1h30m".parse::<PrintDuration>().unwrap(), expected);
        assert_eq!("1 hora 30 minutos".parse::<PrintDuration>().unwrap(), expected);
        assert_eq!("1HS 30M".parse::<PrintDuration>().unwrap(), expected);
        assert_eq!(
            "2 h 30 m".parse::<PrintDuration>().unwrap(),
            PrintDuration::split(0, 2, 30)
        );
        assert_eq!(
            "1 día 2hs".parse::<PrintDuration>().unwrap(),
            PrintDuration::split(1, 2, 0)
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!("".parse::<PrintDuration>().is_err());
        assert!("two hours".parse::<PrintDuration>().is_err());
        assert!("5 weeks".parse::<PrintDuration>().is_err());
        assert!("1h 1h".parse::<PrintDuration>().is_err());
        assert!("1.5d 2h".parse::<PrintDuration>().is_err());
        assert!("2 30".parse::<PrintDuration>().is_err());
        assert!("1h 30x".parse::<PrintDuration>().is_err());
        assert!("1h; 30m".parse::<PrintDuration>().is_err());
    }

    #[test]
    fn test_validate_zero_and_negative() {
        assert!(PrintDuration::hours(0.0).validate().is_err());
        assert!(PrintDuration::split(0, 0, 0).validate().is_err());
        assert!(PrintDuration::minutes(-10.0).validate().is_err());
        assert!(PrintDuration::hours(f64::NAN).validate().is_err());
        assert!(PrintDuration::split(0, 0, 1).validate().is_ok());
    }

    #[test]
    fn test_display_text() {
        assert_eq!(PrintDuration::hours(2.0).display_text(), "2 hs");
        assert_eq!(PrintDuration::minutes(90.0).display_text(), "90 min");
        assert_eq!(PrintDuration::split(0, 1, 30).display_text(), "0d 1h 30m");
    }

    #[test]
    fn test_serialization() {
        let d = PrintDuration::split(0, 1, 30);
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"unit":"Split","days":0,"hours":1,"minutes":30}"#);
        let roundtrip: PrintDuration = serde_json::from_str(&json).unwrap();
        assert_eq!(d, roundtrip);
    }
}
