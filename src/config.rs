//! # Board configuration
//!
//! [`BoardConfig`] gathers the knobs of the worked derivation: number
//! separators, the initial scale factor and unknown symbol, and the rounding
//! applied to displayed results. It can be built in code with the `with_*`
//! methods or read from a TOML document:
//!
//! ```rust
//! use planet_ratio::config::BoardConfig;
//!
//! let cfg = BoardConfig::from_toml_str(
//!     r#"
//!     unknown_symbol = "d"
//!     initial_scale = 0.5
//!
//!     [number_format]
//!     decimal_separator = "."
//!     thousands_separator = ","
//!     "#,
//! )
//! .unwrap();
//! assert_eq!(cfg.unknown_symbol, "d");
//! assert_eq!(cfg.number_format.decimal_separator, '.');
//! assert_eq!(cfg.scientific_decimals, 3);
//! ```

use serde::Deserialize;

use crate::constants::{DEFAULT_SCALE, DEFAULT_UNKNOWN_SYMBOL, QUOTIENT_DECIMALS, SCIENTIFIC_DECIMALS};
use crate::formatting::NumberFormat;
use crate::ratio_errors::RatioError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Separators used for every rendered number
    pub number_format: NumberFormat,
    /// Scale factor in effect before the student changes it
    pub initial_scale: f64,
    /// Label of the unknown term
    pub unknown_symbol: String,
    /// Mantissa decimals kept for results shown in scientific notation
    pub scientific_decimals: usize,
    /// Decimals kept for the quotient of the two mantissas
    pub quotient_decimals: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            number_format: NumberFormat::PT_BR,
            initial_scale: DEFAULT_SCALE,
            unknown_symbol: DEFAULT_UNKNOWN_SYMBOL.to_string(),
            scientific_decimals: SCIENTIFIC_DECIMALS,
            quotient_decimals: QUOTIENT_DECIMALS,
        }
    }
}

impl BoardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, RatioError> {
        let cfg: BoardConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_number_format(mut self, number_format: NumberFormat) -> Self {
        self.number_format = number_format;
        self
    }

    pub fn with_initial_scale(mut self, scale: f64) -> Self {
        self.initial_scale = scale;
        self
    }

    pub fn with_unknown_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.unknown_symbol = symbol.into();
        self
    }

    pub fn with_scientific_decimals(mut self, decimals: usize) -> Self {
        self.scientific_decimals = decimals;
        self
    }

    pub fn with_quotient_decimals(mut self, decimals: usize) -> Self {
        self.quotient_decimals = decimals;
        self
    }

    /// Reject configurations the board cannot render unambiguously.
    pub fn validate(&self) -> Result<(), RatioError> {
        let fmt = &self.number_format;
        if fmt.decimal_separator == fmt.thousands_separator {
            return Err(RatioError::InvalidConfig(format!(
                "decimal and thousands separators are both {:?}",
                fmt.decimal_separator
            )));
        }
        if fmt.decimal_separator.is_ascii_digit() || fmt.thousands_separator.is_ascii_digit() {
            return Err(RatioError::InvalidConfig(
                "separators cannot be digits".to_string(),
            ));
        }
        if !self.initial_scale.is_finite() || self.initial_scale == 0.0 {
            return Err(RatioError::InvalidConfig(format!(
                "initial scale must be finite and non-zero, got {}",
                self.initial_scale
            )));
        }
        if self.unknown_symbol.trim().is_empty() {
            return Err(RatioError::InvalidConfig(
                "unknown symbol cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = BoardConfig::default();
        assert_eq!(cfg.number_format, NumberFormat::PT_BR);
        assert_eq!(cfg.initial_scale, 1.0);
        assert_eq!(cfg.unknown_symbol, "x");
        assert_eq!(cfg.quotient_decimals, 4);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(BoardConfig::from_toml_str("").unwrap(), BoardConfig::default());
    }

    #[test]
    fn test_invalid_configs() {
        let same_sep = BoardConfig::new().with_number_format(NumberFormat::new(',', ','));
        assert!(matches!(
            same_sep.validate(),
            Err(RatioError::InvalidConfig(_))
        ));

        let zero_scale = BoardConfig::new().with_initial_scale(0.0);
        assert!(zero_scale.validate().is_err());

        let blank = BoardConfig::new().with_unknown_symbol("  ");
        assert!(blank.validate().is_err());

        assert!(matches!(
            BoardConfig::from_toml_str("initial_scale = \"big\""),
            Err(RatioError::ConfigParse(_))
        ));
        assert!(matches!(
            BoardConfig::from_toml_str("initial_scale = 0.0"),
            Err(RatioError::InvalidConfig(_))
        ));
    }
}
