//! # Measurement Module
//!
//! Turns whatever the order form sent for a length into inches.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input (string / number / null)          Measurement          Inches   │
//! │  ─────────────────────────────────       ─────────────────    ──────   │
//! │  null, "", "   "                         Empty                0        │
//! │  "16 1/2", "16-1/2"                      Fraction{16,1,2}     16.5     │
//! │  "3/4"                                   Fraction{0,3,4}      0.75     │
//! │  "20", "20.25", 20.25                    Decimal              20.25    │
//! │  "16.5in"                                Decimal (prefix)     16.5     │
//! │  "1/0"                                   Decimal (prefix)     1        │
//! │  "abc"                                   Decimal(0)           0        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing never fails. The form layer owns validation; by the time an
//! order reaches the engine every length is resolved to a float.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A length as entered by a person.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Measurement {
    /// Nothing entered.
    #[default]
    Empty,
    /// A plain decimal (also the fallback for unparseable text, as `0.0`).
    Decimal(f64),
    /// `whole numerator/denominator`; `whole` is 0 for a simple fraction.
    Fraction {
        whole: f64,
        numerator: f64,
        denominator: f64,
    },
}

impl Measurement {
    /// Parses free-form text.
    ///
    /// ## Example
    /// ```rust
    /// use framequote_core::measurement::Measurement;
    ///
    /// assert_eq!(Measurement::parse("16 1/2").value(), 16.5);
    /// assert_eq!(Measurement::parse("2-1/2").value(), 2.5);
    /// assert_eq!(Measurement::parse("3/4").value(), 0.75);
    /// assert_eq!(Measurement::parse("").value(), 0.0);
    /// assert_eq!(Measurement::parse("abc").value(), 0.0);
    /// ```
    pub fn parse(input: &str) -> Self {
        let text = input.trim();
        if text.is_empty() {
            return Measurement::Empty;
        }

        if let Some(fraction) = parse_fraction(text) {
            return fraction;
        }

        Measurement::Decimal(leading_decimal(text).unwrap_or(0.0))
    }

    /// Wraps an already-numeric value.
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() {
            Measurement::Decimal(value)
        } else {
            Measurement::Decimal(0.0)
        }
    }

    /// Resolves to inches.
    pub fn value(&self) -> f64 {
        match *self {
            Measurement::Empty => 0.0,
            Measurement::Decimal(v) => v,
            Measurement::Fraction {
                whole,
                numerator,
                denominator,
            } => {
                // Negative whole part: "-2 1/2" means -2.5, not -1.5
                let frac = numerator / denominator;
                if whole < 0.0 {
                    whole - frac
                } else {
                    whole + frac
                }
            }
        }
    }

    /// Resolves to a non-negative whole count (quantities, openings).
    pub fn count(&self) -> u32 {
        let v = self.value().floor();
        if v <= 0.0 {
            0
        } else if v >= u32::MAX as f64 {
            u32::MAX
        } else {
            v as u32
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Measurement::Empty)
    }
}

/// Shorthand for `Measurement::parse(input).value()`.
pub fn parse_measurement(input: &str) -> f64 {
    Measurement::parse(input).value()
}

/// `"W N/D"`, `"W-N/D"` or `"N/D"`.
fn parse_fraction(text: &str) -> Option<Measurement> {
    let (head, tail) = text.split_once('/')?;
    let denominator = parse_plain(tail)?;
    if denominator == 0.0 {
        return None;
    }

    let head = head.trim_end();
    // Split the whole part off at the last space or hyphen, but keep a
    // leading minus sign attached to the number.
    let split_at = head
        .char_indices()
        .rev()
        .find(|&(i, c)| c == ' ' || (c == '-' && i > 0))
        .map(|(i, _)| i);

    let (whole, numerator) = match split_at {
        Some(i) => {
            let whole = parse_plain(&head[..i])?;
            let numerator = parse_plain(&head[i + 1..])?;
            (whole, numerator)
        }
        None => (0.0, parse_plain(head)?),
    };

    Some(Measurement::Fraction {
        whole,
        numerator,
        denominator,
    })
}

/// Strict decimal parse of a fraction component.
fn parse_plain(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest leading numeric prefix: `"16.5in"` → 16.5, `"in16"` → None.
fn leading_decimal(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;

    if matches!(bytes.first(), Some(b'-') | Some(b'+')) {
        end = 1;
    }
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    text[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Serde
// =============================================================================

/// Wire shape: `"16 1/2"`, `16.5` or `null`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMeasurement {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Measurement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Anything else (bools, arrays) is a form bug, not a length; treat as empty.
        let raw = Option::<RawMeasurement>::deserialize(deserializer).unwrap_or(None);
        Ok(match raw {
            Some(RawMeasurement::Number(v)) => Measurement::from_number(v),
            Some(RawMeasurement::Text(s)) => Measurement::parse(&s),
            None => Measurement::Empty,
        })
    }
}

impl Serialize for Measurement {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Measurement::Empty => serializer.serialize_none(),
            Measurement::Decimal(v) => serializer.serialize_f64(*v),
            Measurement::Fraction { .. } => serializer.collect_str(self),
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Empty => Ok(()),
            Measurement::Decimal(v) => write!(f, "{}", v),
            Measurement::Fraction {
                whole,
                numerator,
                denominator,
            } => {
                if *whole == 0.0 {
                    write!(f, "{}/{}", numerator, denominator)
                } else {
                    write!(f, "{} {}/{}", whole, numerator, denominator)
                }
            }
        }
    }
}

impl From<f64> for Measurement {
    fn from(value: f64) -> Self {
        Measurement::from_number(value)
    }
}

impl From<&str> for Measurement {
    fn from(value: &str) -> Self {
        Measurement::parse(value)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_fractions() {
        assert_eq!(parse_measurement("16 1/2"), 16.5);
        assert_eq!(parse_measurement("2-1/2"), 2.5);
        assert_eq!(parse_measurement("  8   3/8 "), 8.375);
        assert_eq!(parse_measurement("-2 1/2"), -2.5);
    }

    #[test]
    fn test_simple_fraction() {
        assert_eq!(parse_measurement("3/4"), 0.75);
        assert_eq!(parse_measurement("3 / 4"), 0.75);
        assert_eq!(parse_measurement("-3/4"), -0.75);
    }

    #[test]
    fn test_empty_and_garbage() {
        assert_eq!(parse_measurement(""), 0.0);
        assert_eq!(parse_measurement("   "), 0.0);
        assert_eq!(parse_measurement("abc"), 0.0);
        assert_eq!(parse_measurement("1/0"), 1.0);
        assert_eq!(parse_measurement("a/b"), 0.0);
        assert!(Measurement::parse("").is_empty());
    }

    #[test]
    fn test_decimals() {
        assert_eq!(parse_measurement("20"), 20.0);
        assert_eq!(parse_measurement("20.25"), 20.25);
        assert_eq!(parse_measurement("16.5in"), 16.5);
        assert_eq!(parse_measurement(".5"), 0.5);
        assert_eq!(parse_measurement("-"), 0.0);
    }

    #[test]
    fn test_count_clamps_and_floors() {
        assert_eq!(Measurement::parse("3").count(), 3);
        assert_eq!(Measurement::parse("2.9").count(), 2);
        assert_eq!(Measurement::parse("-4").count(), 0);
        assert_eq!(Measurement::Empty.count(), 0);
    }

    #[test]
    fn test_deserialize_string_number_null() {
        #[derive(Deserialize)]
        struct Form {
            a: Measurement,
            b: Measurement,
            c: Measurement,
            #[serde(default)]
            d: Measurement,
            e: Measurement,
        }

        let form: Form =
            serde_json::from_str(r#"{"a":"16 1/2","b":20,"c":null,"e":true}"#).unwrap();
        assert_eq!(form.a.value(), 16.5);
        assert_eq!(form.b.value(), 20.0);
        assert!(form.c.is_empty());
        assert!(form.d.is_empty());
        assert!(form.e.is_empty());
    }

    #[test]
    fn test_display_round_trips_fraction_text() {
        let m = Measurement::parse("16 1/2");
        assert_eq!(m.to_string(), "16 1/2");
        assert_eq!(Measurement::parse(&m.to_string()), m);
    }
}
