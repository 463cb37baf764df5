//! # Localized number formatting
//!
//! Renders plain `f64` values the way the board displays them: pt-BR
//! separators (comma for decimals, dot for thousands), scientific notation
//! with an HTML superscript exponent, and a *fixed exponent* variant that
//! re-expresses a number with a chosen power of ten so that different bodies
//! line up on the same scale.
//!
//! ## Pass-through
//!
//! Values flowing through the derivation are [`Field`]s. Every `Field`-level
//! formatter only acts on finite numbers: [`Field::Absent`], [`Field::Text`]
//! and non-finite numbers are returned unchanged. This lets a "not selected
//! yet" value travel through a whole formatting chain and come out as an
//! empty display slot, without a check at each step.
//!
//! ## Examples
//!
//! ```rust
//! use planet_ratio::formatting::{self, Field};
//!
//! assert_eq!(formatting::exponent_of(1.496e8), Field::Number(8.0));
//! assert_eq!(formatting::mantissa_of(1.496e8), Field::Text("1.496".into()));
//! assert_eq!(
//!     formatting::to_scientific_notation(9.177e-3),
//!     Field::Text("9,177x10<sup>-3</sup>".into())
//! );
//! assert_eq!(
//!     formatting::to_fixed_exponent_notation(1.496e8, 6),
//!     Field::Text("149,6x10<sup>6</sup>".into())
//! );
//! assert_eq!(
//!     formatting::add_thousands_separator(149_600_000_000.0),
//!     Field::Text("149.600.000.000".into())
//! );
//! assert_eq!(formatting::to_scientific_notation(Field::Absent), Field::Absent);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, PoisonError};

use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::constants::Exponent;
use crate::ratio_errors::RatioError;

/// A value threaded through the formatting chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Field {
    /// Nothing to show yet (missing selection, undefined quotient, ...).
    #[default]
    Absent,
    Number(f64),
    Text(String),
}

impl Field {
    /// The wrapped number, if this field holds a finite one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(x) if x.is_finite() => Some(*x),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.as_number().is_some()
    }

    /// Display form of the field: text as is, numbers with `Display`, absent as `None`.
    pub fn into_display(self) -> Option<String> {
        match self {
            Field::Absent => None,
            Field::Number(x) => Some(x.to_string()),
            Field::Text(s) => Some(s),
        }
    }
}

impl From<f64> for Field {
    fn from(x: f64) -> Self {
        Field::Number(x)
    }
}

impl From<Option<f64>> for Field {
    fn from(x: Option<f64>) -> Self {
        x.map_or(Field::Absent, Field::Number)
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl From<Option<String>> for Field {
    fn from(s: Option<String>) -> Self {
        s.map_or(Field::Absent, Field::Text)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Absent => Ok(()),
            Field::Number(x) => write!(f, "{x}"),
            Field::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Separators used to render and read numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub thousands_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::PT_BR
    }
}

/// Localized input patterns, compiled once per format.
static INPUT_PATTERNS: Lazy<Mutex<HashMap<NumberFormat, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Split `x` into its normalized mantissa and base-10 exponent, from the
/// shortest representation that round-trips (`1.496e8` → `("1.496", 8)`).
fn scientific_parts(x: f64) -> (String, Exponent) {
    let repr = format!("{x:e}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => (mantissa.to_string(), exponent.parse().unwrap_or(0)),
        None => (repr, 0),
    }
}

/// Group a string of ASCII digits by three from the right.
fn group_digits(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    chars
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(&separator.to_string())
}

/// Round `x` to `decimals` mantissa decimals (`9.1771e-3`, 3 → `9.177e-3`).
pub fn round_significant(x: f64, decimals: usize) -> f64 {
    format!("{x:.decimals$e}").parse().unwrap_or(x)
}

/// Round `x` to `places` fractional digits.
pub fn round_to_places(x: f64, places: usize) -> f64 {
    format!("{x:.places$}").parse().unwrap_or(x)
}

impl NumberFormat {
    /// Brazilian Portuguese: `1.234.567,89`.
    pub const PT_BR: NumberFormat = NumberFormat {
        decimal_separator: ',',
        thousands_separator: '.',
    };

    /// Plain English: `1,234,567.89`.
    pub const EN_US: NumberFormat = NumberFormat {
        decimal_separator: '.',
        thousands_separator: ',',
    };

    pub const fn new(decimal_separator: char, thousands_separator: char) -> Self {
        NumberFormat {
            decimal_separator,
            thousands_separator,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Typed renderers
    // ---------------------------------------------------------------------------------------------

    /// Base-10 exponent of `x` in normalized scientific form.
    pub fn exponent(&self, x: f64) -> Exponent {
        scientific_parts(x).1
    }

    /// Mantissa of `x` in normalized scientific form, with a `.` decimal point.
    pub fn mantissa(&self, x: f64) -> String {
        scientific_parts(x).0
    }

    /// Replace the `.` decimal point of a plain rendering by the locale separator.
    fn localize_point(&self, repr: &str) -> String {
        repr.replacen('.', &self.decimal_separator.to_string(), 1)
    }

    /// Shortest representation of `x` with the locale decimal separator and no grouping.
    pub fn locale_decimal(&self, x: f64) -> String {
        self.localize_point(&x.to_string())
    }

    /// `mantissa x10<sup>exponent</sup>`, e.g. `1,496x10<sup>11</sup>`.
    pub fn scientific(&self, x: f64) -> String {
        let (mantissa, exponent) = scientific_parts(x);
        html_base10(&self.localize_point(&mantissa), exponent)
    }

    /// Scientific notation with `target` as the power of ten.
    ///
    /// The decimal point of the mantissa walks through its digits: to the
    /// right when the natural exponent is at least `target` (padding with
    /// zeros so one fractional digit remains, grouping an integer part longer
    /// than three digits), to the left otherwise (prepending zeros).
    ///
    /// Arguments
    /// -----------------
    /// * `x`: the number to render.
    /// * `target`: the power of ten shown in the result.
    ///
    /// Return
    /// ----------
    /// * `(1.496e8, 6)` → `"149,6x10<sup>6</sup>"`
    /// * `(3.84e5, 6)` → `"0,384x10<sup>6</sup>"`
    pub fn fixed_exponent(&self, x: f64, target: Exponent) -> String {
        let sign = if x.is_sign_negative() && x != 0.0 { "-" } else { "" };
        let (mantissa, exponent) = scientific_parts(x.abs());
        let mut digits = mantissa.replace('.', "");
        let shift = exponent - target;

        let body = if shift >= 0 {
            let shift = shift as usize;
            while digits.len() < shift + 2 {
                digits.push('0');
            }
            let (integer, fraction) = digits.split_at(shift + 1);
            let integer = if integer.len() > 3 {
                group_digits(integer, self.thousands_separator)
            } else {
                integer.to_string()
            };
            format!("{integer}{}{fraction}", self.decimal_separator)
        } else {
            let padded = format!("{}{digits}", "0".repeat(shift.unsigned_abs() as usize));
            let (head, tail) = padded.split_at(1);
            format!("{head}{}{tail}", self.decimal_separator)
        };

        html_base10(&format!("{sign}{body}"), target)
    }

    /// Group the integer part of `x` by thousands; the fraction (if any) is kept
    /// as printed and joined with the locale decimal separator.
    pub fn thousands(&self, x: f64) -> String {
        self.group_plain(&x.to_string())
    }

    /// Group the integer part of `x`, optionally rounded to `places` fractional digits first.
    pub fn decimal(&self, x: f64, places: Option<usize>) -> String {
        let repr = match places {
            Some(places) => format!("{x:.places$}"),
            None => x.to_string(),
        };
        self.group_plain(&repr)
    }

    /// Localize a plain `-1234.5`-style rendering.
    fn group_plain(&self, repr: &str) -> String {
        let (sign, unsigned) = match repr.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", repr),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (unsigned, None),
        };

        let mut out = format!("{sign}{}", group_digits(integer, self.thousands_separator));
        if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        out
    }

    /// Read a number typed by a user.
    ///
    /// Localized input (`"0,01"`, `"1.000,5"`) is tried first; a plain Rust
    /// float literal (`"0.01"`, `"1e-2"`) is accepted as a fallback. A string
    /// such as `"1.000"` is therefore read as one thousand under pt-BR.
    pub fn parse(&self, text: &str) -> Result<f64, RatioError> {
        let text = text.trim();
        let localized = self.input_pattern();

        let parsed = if localized.is_match(text) {
            text.replace(self.thousands_separator, "")
                .replace(self.decimal_separator, ".")
                .parse::<f64>()
                .ok()
        } else {
            text.parse::<f64>().ok()
        };

        parsed
            .filter(|x| x.is_finite())
            .ok_or_else(|| RatioError::InvalidNumberInput(text.to_string()))
    }

    /// `^[+-]?(\d{1,3}(T\d{3})+|\d+)(D\d+)?$` for this format's separators.
    fn input_pattern(&self) -> Regex {
        let mut cache = INPUT_PATTERNS
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        cache
            .entry(*self)
            .or_insert_with(|| {
                let t = regex::escape(&self.thousands_separator.to_string());
                let d = regex::escape(&self.decimal_separator.to_string());
                Regex::new(&format!(r"^[+-]?(\d{{1,3}}({t}\d{{3}})+|\d+)({d}\d+)?$"))
                    .expect("separators are escaped literals")
            })
            .clone()
    }

    // ---------------------------------------------------------------------------------------------
    // Field-level formatters (pass-through for non-numeric values)
    // ---------------------------------------------------------------------------------------------

    pub fn exponent_of(&self, value: impl Into<Field>) -> Field {
        map_numeric(value.into(), |x| Field::Number(self.exponent(x) as f64))
    }

    pub fn mantissa_of(&self, value: impl Into<Field>) -> Field {
        map_numeric(value.into(), |x| Field::Text(self.mantissa(x)))
    }

    pub fn to_scientific_notation(&self, value: impl Into<Field>) -> Field {
        map_numeric(value.into(), |x| Field::Text(self.scientific(x)))
    }

    pub fn to_fixed_exponent_notation(&self, value: impl Into<Field>, target: Exponent) -> Field {
        map_numeric(value.into(), |x| Field::Text(self.fixed_exponent(x, target)))
    }

    pub fn add_thousands_separator(&self, value: impl Into<Field>) -> Field {
        map_numeric(value.into(), |x| Field::Text(self.thousands(x)))
    }

    pub fn format_decimal(&self, value: impl Into<Field>, places: Option<usize>) -> Field {
        map_numeric(value.into(), |x| Field::Text(self.decimal(x, places)))
    }

    pub fn to_locale_decimal(&self, value: impl Into<Field>) -> Field {
        map_numeric(value.into(), |x| Field::Text(self.locale_decimal(x)))
    }
}

fn map_numeric(value: Field, f: impl FnOnce(f64) -> Field) -> Field {
    match value.as_number() {
        Some(x) => f(x),
        None => value,
    }
}

/// `mantissa x10<sup>exponent</sup>`
pub(crate) fn html_base10(mantissa: &str, exponent: Exponent) -> String {
    format!("{mantissa}x10<sup>{exponent}</sup>")
}

// -------------------------------------------------------------------------------------------------
// pt-BR shortcuts
// -------------------------------------------------------------------------------------------------

pub fn exponent_of(value: impl Into<Field>) -> Field {
    NumberFormat::PT_BR.exponent_of(value)
}

pub fn mantissa_of(value: impl Into<Field>) -> Field {
    NumberFormat::PT_BR.mantissa_of(value)
}

pub fn to_scientific_notation(value: impl Into<Field>) -> Field {
    NumberFormat::PT_BR.to_scientific_notation(value)
}

pub fn to_fixed_exponent_notation(value: impl Into<Field>, target: Exponent) -> Field {
    NumberFormat::PT_BR.to_fixed_exponent_notation(value, target)
}

pub fn add_thousands_separator(value: impl Into<Field>) -> Field {
    NumberFormat::PT_BR.add_thousands_separator(value)
}

pub fn format_decimal(value: impl Into<Field>, places: Option<usize>) -> Field {
    NumberFormat::PT_BR.format_decimal(value, places)
}

pub fn to_locale_decimal(value: impl Into<Field>) -> Field {
    NumberFormat::PT_BR.to_locale_decimal(value)
}
