//! # Constants and type definitions for planet_ratio
//!
//! This module centralizes the **unit conversion factors**, the **display
//! defaults** and the **type aliases** shared by the formatting utility and the
//! derivation engine.
//!
//! ## Overview
//!
//! - Length conversions (km ↔ m, m ↔ cm, m ↔ mm)
//! - Fixed exponents used by the distance panels
//! - Default rounding applied to the worked derivation
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Unit conversions
// -------------------------------------------------------------------------------------------------

/// Meters in one kilometer
pub const METERS_PER_KM: f64 = 1_000.0;

/// Centimeters in one meter
pub const CM_PER_METER: f64 = 100.0;

/// Millimeters in one meter
pub const MM_PER_METER: f64 = 1_000.0;

/// Power of ten used to align planetary distances expressed in kilometers
pub const DISTANCE_KM_FIXED_EXPONENT: i32 = 6;

/// Power of ten used to align planetary distances expressed in meters
pub const DISTANCE_M_FIXED_EXPONENT: i32 = 9;

// -------------------------------------------------------------------------------------------------
// Derivation defaults
// -------------------------------------------------------------------------------------------------

/// Default scale factor applied to the selected body's quantity
pub const DEFAULT_SCALE: f64 = 1.0;

/// Default label of the unknown term of the proportion
pub const DEFAULT_UNKNOWN_SYMBOL: &str = "x";

/// Mantissa decimals kept when a result is shown in scientific notation
pub const SCIENTIFIC_DECIMALS: usize = 3;

/// Decimals kept for the quotient of the two mantissas
pub const QUOTIENT_DECIMALS: usize = 4;

/// Number of paragraphs on the board
pub const PARAGRAPH_COUNT: usize = 18;

/// Field count of every paragraph, by paragraph index
pub const PARAGRAPH_SHAPE: [usize; PARAGRAPH_COUNT] =
    [2, 3, 4, 4, 6, 4, 1, 3, 1, 14, 6, 4, 1, 7, 1, 7, 1, 7];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Distance in kilometers
pub type Kilometer = f64;
/// Distance in meters
pub type Meter = f64;
/// Base-10 exponent of a number in normalized scientific form
pub type Exponent = i32;
/// One rendered line of the board: formatted fields, left to right
pub type Paragraph = Vec<Option<String>>;
