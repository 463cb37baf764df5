//! # Derivation engine
//!
//! [`DerivationState`] is the single observer of the three selection subjects.
//! On every notification it re-reads the selections, throws away its memo
//! cache, rebuilds the 18 paragraphs of the worked rule of three and hands
//! them to the registered publish listeners.
//!
//! ## Derived fields
//!
//! Given the calculation kind `K`, the body `B`, the reference base `R` and
//! the scale factor `S`:
//!
//! ```text
//! numerator   = (K = Diameter ? B.diameter_m : B.distance_m) × S
//! denominator = K = Diameter ? Sun.diameter_m : R.standard_m
//! result      = numerator / denominator            (absent if denominator is absent or 0)
//! power sum   = exponent(numerator) + (-exponent(denominator))
//! ```
//!
//! Each field is computed lazily on first access within a pass and cached in
//! a [`OnceCell`] slot. A slot distinguishes "not computed yet" from
//! "computed, and absent".
//!
//! ## See also
//! ------------
//! * [`Subject`](crate::reactive::subject::Subject) – Source of the notifications.
//! * [`assemble`](crate::reactive::layout::assemble) – Paragraph layout built from these fields.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use once_cell::unsync::OnceCell;
use tracing::{debug, trace};

use crate::bodies::{CalculationKind, CelestialBody, ReferenceBase, SUN};
use crate::config::BoardConfig;
use crate::constants::{Exponent, Meter, Paragraph, CM_PER_METER, MM_PER_METER};
use crate::formatting::{round_significant, round_to_places, Field, NumberFormat};
use crate::reactive::layout;
use crate::reactive::subject::{Observer, Subject};

/// Units the result is finally expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Meter,
    Centimeter,
    Millimeter,
}

impl LengthUnit {
    pub const ALL: [LengthUnit; 3] = [LengthUnit::Meter, LengthUnit::Centimeter, LengthUnit::Millimeter];

    pub fn per_meter(&self) -> f64 {
        match self {
            LengthUnit::Meter => 1.0,
            LengthUnit::Centimeter => CM_PER_METER,
            LengthUnit::Millimeter => MM_PER_METER,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "m",
            LengthUnit::Centimeter => "cm",
            LengthUnit::Millimeter => "mm",
        }
    }

    pub fn plural_name(&self) -> &'static str {
        match self {
            LengthUnit::Meter => "metros",
            LengthUnit::Centimeter => "centímetros",
            LengthUnit::Millimeter => "milímetros",
        }
    }

    /// Fractional digits shown when the result is written out in full.
    pub fn decimal_places(&self) -> usize {
        match self {
            LengthUnit::Meter => 3,
            LengthUnit::Centimeter => 2,
            LengthUnit::Millimeter => 1,
        }
    }
}

/// Memo cache of one recomputation pass. Replaced wholesale, never patched.
#[derive(Debug, Default)]
struct DerivedCache {
    reference_label: OnceCell<Option<&'static str>>,
    quantity_label: OnceCell<Option<String>>,
    standard_value: OnceCell<Option<Meter>>,
    body_value: OnceCell<Option<Meter>>,
    numerator: OnceCell<Option<Meter>>,
    result: OnceCell<Option<f64>>,
    mantissa_quotient: OnceCell<Option<f64>>,
    misses: Cell<usize>,
}

impl DerivedCache {
    fn miss(&self, slot: &'static str) {
        self.misses.set(self.misses.get() + 1);
        trace!(slot, "derived field computed");
    }
}

/// Receives the paragraphs and the result of every pass.
///
/// Runs while the state is mutably borrowed: everything a listener needs is
/// in its arguments.
pub type PublishListener = Box<dyn FnMut(&[Paragraph], Option<f64>)>;

pub struct DerivationState {
    body_subject: Rc<Subject<CelestialBody>>,
    calculation_subject: Rc<Subject<CalculationKind>>,
    base_subject: Rc<Subject<ReferenceBase>>,

    body: Option<CelestialBody>,
    calculation: Option<CalculationKind>,
    base: Option<ReferenceBase>,
    scale: f64,
    unknown_symbol: String,

    number_format: NumberFormat,
    scientific_decimals: usize,
    quotient_decimals: usize,

    cache: DerivedCache,
    paragraphs: Vec<Paragraph>,
    passes: u64,
    listeners: Vec<PublishListener>,
}

impl DerivationState {
    /// Build an observer watching the three subjects.
    ///
    /// The caller still has to attach it to the subjects; nothing is computed
    /// until the first notification or [`recompute`](DerivationState::recompute).
    pub fn new(
        body_subject: Rc<Subject<CelestialBody>>,
        calculation_subject: Rc<Subject<CalculationKind>>,
        base_subject: Rc<Subject<ReferenceBase>>,
        config: &BoardConfig,
    ) -> Self {
        DerivationState {
            body_subject,
            calculation_subject,
            base_subject,
            body: None,
            calculation: None,
            base: None,
            scale: config.initial_scale,
            unknown_symbol: config.unknown_symbol.clone(),
            number_format: config.number_format,
            scientific_decimals: config.scientific_decimals,
            quotient_decimals: config.quotient_decimals,
            cache: DerivedCache::default(),
            paragraphs: Vec::new(),
            passes: 0,
            listeners: Vec::new(),
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Inputs
    // ---------------------------------------------------------------------------------------------

    pub fn body(&self) -> Option<CelestialBody> {
        self.body
    }

    pub fn calculation(&self) -> Option<CalculationKind> {
        self.calculation
    }

    pub fn base(&self) -> Option<ReferenceBase> {
        self.base
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn unknown_symbol(&self) -> &str {
        &self.unknown_symbol
    }

    pub fn number_format(&self) -> &NumberFormat {
        &self.number_format
    }

    /// Change the scale factor and rebuild the board.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        // the scale is not a Subject: no notification will reach on_notify
        self.recompute();
    }

    /// Change the label of the unknown term and rebuild the board.
    pub fn set_unknown_symbol(&mut self, symbol: impl Into<String>) {
        self.unknown_symbol = symbol.into();
        self.recompute();
    }

    pub fn add_publish_listener(&mut self, listener: PublishListener) {
        self.listeners.push(listener);
    }

    // ---------------------------------------------------------------------------------------------
    // Outputs
    // ---------------------------------------------------------------------------------------------

    /// Paragraphs published by the last pass (empty before the first one).
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Number of completed recomputation passes.
    pub fn recomputations(&self) -> u64 {
        self.passes
    }

    /// Derived fields computed (cache misses) since the last invalidation.
    pub fn cache_misses(&self) -> usize {
        self.cache.misses.get()
    }

    /// Invalidate the cache, rebuild every paragraph and publish them.
    pub fn recompute(&mut self) {
        self.cache = DerivedCache::default();
        self.paragraphs = layout::assemble(self);
        self.passes += 1;

        debug!(
            pass = self.passes,
            body = self.body.map(|b| b.name),
            calculation = ?self.calculation,
            base = ?self.base,
            scale = self.scale,
            result = ?self.result(),
            "board recomputed"
        );

        let result = self.result();
        let paragraphs = &self.paragraphs;
        for listener in self.listeners.iter_mut() {
            listener(paragraphs, result);
        }
    }

    // ---------------------------------------------------------------------------------------------
    // Derived fields
    // ---------------------------------------------------------------------------------------------

    /// Label of the known term: `"Diâmetro Sol"` or `"Distância Terra-Sol"`.
    pub fn reference_label(&self) -> Option<&'static str> {
        *self.cache.reference_label.get_or_init(|| {
            self.cache.miss("reference_label");
            match self.calculation? {
                CalculationKind::Diameter => Some(ReferenceBase::SunDiameter.short_label()),
                CalculationKind::Distance => self.base.map(|b| b.short_label()),
            }
        })
    }

    /// Label of the unknown magnitude, e.g. `"Diâmetro Terra"`.
    pub fn quantity_label(&self) -> Option<String> {
        self.cache
            .quantity_label
            .get_or_init(|| {
                self.cache.miss("quantity_label");
                let body = self.body?;
                let kind = self.calculation?;
                Some(format!("{} {}", kind.label(), body.name))
            })
            .clone()
    }

    /// Known term of the proportion (the denominator), in meters.
    pub fn standard_value(&self) -> Option<Meter> {
        *self.cache.standard_value.get_or_init(|| {
            self.cache.miss("standard_value");
            match self.calculation? {
                CalculationKind::Diameter => Some(SUN.diameter_m()),
                CalculationKind::Distance => self.base.map(|b| b.standard_m()),
            }
        })
    }

    /// Same as [`standard_value`](DerivationState::standard_value).
    pub fn denominator(&self) -> Option<Meter> {
        self.standard_value()
    }

    /// Compared magnitude of the selected body before scaling, in meters.
    pub fn body_value(&self) -> Option<Meter> {
        *self.cache.body_value.get_or_init(|| {
            self.cache.miss("body_value");
            let body = self.body?;
            Some(self.calculation?.magnitude_of(&body))
        })
    }

    /// Body magnitude times the scale factor.
    pub fn numerator(&self) -> Option<Meter> {
        *self.cache.numerator.get_or_init(|| {
            self.cache.miss("numerator");
            Some(self.body_value()? * self.scale).filter(|x| x.is_finite())
        })
    }

    /// `numerator / denominator`, absent until both exist and the denominator is non-zero.
    pub fn result(&self) -> Option<f64> {
        *self.cache.result.get_or_init(|| {
            self.cache.miss("result");
            let denominator = self.denominator().filter(|d| *d != 0.0)?;
            Some(self.numerator()? / denominator).filter(|x| x.is_finite())
        })
    }

    /// Quotient of the two mantissas, ignoring the powers of ten.
    pub fn mantissa_quotient(&self) -> Option<f64> {
        *self.cache.mantissa_quotient.get_or_init(|| {
            self.cache.miss("mantissa_quotient");
            let denominator = self.denominator().filter(|d| *d != 0.0)?;
            let top: f64 = self.number_format.mantissa(self.numerator()?).parse().ok()?;
            let bottom: f64 = self.number_format.mantissa(denominator).parse().ok()?;
            Some(round_to_places(top / bottom, self.quotient_decimals))
        })
    }

    pub fn numerator_exponent(&self) -> Option<Exponent> {
        self.numerator().map(|x| self.number_format.exponent(x))
    }

    /// Exponent of the denominator once moved up: "what is below rises with its sign inverted".
    pub fn raised_denominator_exponent(&self) -> Option<Exponent> {
        self.denominator().map(|x| -self.number_format.exponent(x))
    }

    pub fn power_sum(&self) -> Option<Exponent> {
        Some(self.numerator_exponent()? + self.raised_denominator_exponent()?)
    }

    // ---------------------------------------------------------------------------------------------
    // Formatted fields
    // ---------------------------------------------------------------------------------------------

    pub fn scientific(&self, value: Option<f64>) -> Field {
        self.number_format.to_scientific_notation(value)
    }

    pub fn scale_text(&self) -> String {
        self.number_format.locale_decimal(self.scale)
    }

    pub fn mantissa_quotient_text(&self) -> Field {
        self.number_format.to_locale_decimal(self.mantissa_quotient())
    }

    /// Exponent of `value` as text, optionally negated, with a `+` on positives when `signed`.
    pub fn power_text(value: Option<Exponent>, signed: bool) -> Field {
        match value {
            Some(p) if signed && p > 0 => Field::Text(format!("+{p}")),
            Some(p) => Field::Text(p.to_string()),
            None => Field::Absent,
        }
    }

    /// `10<sup>±p</sup>` for the given exponent.
    pub fn base10_text(value: Option<Exponent>) -> Field {
        match Self::power_text(value, true) {
            Field::Text(p) => Field::Text(format!("10<sup>{p}</sup>")),
            other => other,
        }
    }

    /// Result converted to `unit`, in scientific notation with rounded mantissa.
    pub fn result_scientific(&self, unit: LengthUnit) -> Field {
        let converted = self
            .result()
            .map(|r| round_significant(r * unit.per_meter(), self.scientific_decimals));
        self.number_format.to_scientific_notation(converted)
    }

    /// Result converted to `unit`, written out with grouped thousands.
    pub fn result_decimal(&self, unit: LengthUnit) -> Field {
        let converted = self.result().map(|r| r * unit.per_meter());
        self.number_format
            .format_decimal(converted, Some(unit.decimal_places()))
    }
}

impl Observer for DerivationState {
    fn on_notify(&mut self) {
        self.body = self.body_subject.get();
        self.calculation = self.calculation_subject.get();
        self.base = self.base_subject.get();
        self.recompute();
    }
}

impl fmt::Debug for DerivationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationState")
            .field("body", &self.body)
            .field("calculation", &self.calculation)
            .field("base", &self.base)
            .field("scale", &self.scale)
            .field("unknown_symbol", &self.unknown_symbol)
            .field("passes", &self.passes)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
