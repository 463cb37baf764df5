//! # planet_ratio
//!
//! Reactive core of a planetary proportions board: pick a body, a quantity
//! (diameter or distance) and a reference base, set a scale, and the board
//! re-derives the rule of three `standard / scale = body / x` as 18 fixed
//! paragraphs of pt-BR formatted HTML fragments.
//!
//! Start from [`board::Board`].

pub mod board;
pub mod bodies;
pub mod config;
pub mod constants;
pub mod formatting;
pub mod panels;
pub mod ratio_errors;
pub mod reactive;
pub mod registry;

pub use board::Board;
pub use bodies::{CalculationKind, CelestialBody, ReferenceBase};
pub use config::BoardConfig;
pub use formatting::{Field, NumberFormat};
pub use ratio_errors::RatioError;
