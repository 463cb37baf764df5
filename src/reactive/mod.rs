//! # Propagation core
//!
//! The board state is a small subject/observer network:
//!
//! ```text
//! Subject<CelestialBody>  ─┐
//! Subject<CalculationKind> ├─ notify ──▶ DerivationState ──▶ paragraphs ──▶ listeners
//! Subject<ReferenceBase>  ─┘                 ▲
//!                         set_scale / set_unknown_symbol (explicit recompute)
//! ```
//!
//! - [`subject`] – observable selections and the [`Observer`](subject::Observer) trait.
//! - [`derivation`] – the observer: memoized derived fields of the rule of three.
//! - [`layout`] – the 18 paragraphs assembled from the derived fields.
//!
//! Everything is single-threaded (`Rc`/`RefCell`); a `set` completes its whole
//! cascade before returning.

pub mod derivation;
pub mod layout;
pub mod subject;
