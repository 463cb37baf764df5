//! # Board: the façade used by the rendering side
//!
//! [`Board`] wires the three exclusive selection subjects to one
//! [`DerivationState`] and exposes the inbound setters and outbound readers
//! the widget needs:
//!
//! | inbound | outbound |
//! |---|---|
//! | [`select_body`](Board::select_body) | [`paragraphs`](Board::paragraphs) |
//! | [`select_calculation`](Board::select_calculation) | [`current_result`](Board::current_result) |
//! | [`select_base`](Board::select_base) | [`on_publish`](Board::on_publish) |
//! | [`set_scale`](Board::set_scale) / [`set_scale_input`](Board::set_scale_input) | [`recomputations`](Board::recomputations) |
//! | [`set_unknown_symbol`](Board::set_unknown_symbol) | |
//!
//! Every inbound call runs the full cascade (notify → invalidate → recompute →
//! publish) before returning. The outbound readers serve a copy of the last
//! published pass, so a publish listener may read the board while the
//! derivation is still borrowed.
//!
//! ```rust
//! use planet_ratio::board::Board;
//! use planet_ratio::bodies::{CalculationKind, EARTH};
//!
//! let board = Board::new().unwrap();
//! board.select_body(EARTH).unwrap();
//! board.select_calculation(CalculationKind::Diameter).unwrap();
//!
//! let paragraphs = board.paragraphs();
//! assert_eq!(paragraphs.len(), 18);
//! assert_eq!(paragraphs[1][0].as_deref(), Some("Diâmetro Terra"));
//! assert!((board.current_result().unwrap() - 9.177e-3).abs() < 1e-6);
//! ```

use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::bodies::{CalculationKind, CelestialBody, ReferenceBase};
use crate::config::BoardConfig;
use crate::constants::Paragraph;
use crate::formatting::NumberFormat;
use crate::ratio_errors::RatioError;
use crate::reactive::derivation::DerivationState;
use crate::reactive::subject::{Observer, ObserverRef, Subject};

/// Copy of the last pass, kept outside the derivation.
#[derive(Debug, Default)]
struct Published {
    paragraphs: Vec<Paragraph>,
    result: Option<f64>,
    passes: u64,
}

pub struct Board {
    body: Rc<Subject<CelestialBody>>,
    calculation: Rc<Subject<CalculationKind>>,
    base: Rc<Subject<ReferenceBase>>,
    derivation: Rc<RefCell<DerivationState>>,
    published: Rc<RefCell<Published>>,
    scale: Cell<f64>,
    number_format: NumberFormat,
}

impl Board {
    /// Board with the default (pt-BR) configuration.
    pub fn new() -> Result<Self, RatioError> {
        Self::with_config(BoardConfig::default())
    }

    /// Build the subjects, attach the derivation observer to each of them and
    /// publish a first, empty board.
    ///
    /// Arguments
    /// -----------------
    /// * `config`: validated with [`BoardConfig::validate`] before use.
    ///
    /// Return
    /// ----------
    /// * The wired board, or the configuration / attachment error.
    pub fn with_config(config: BoardConfig) -> Result<Self, RatioError> {
        config.validate()?;

        let body = Rc::new(Subject::exclusive("body"));
        let calculation = Rc::new(Subject::exclusive("calculation"));
        let base = Rc::new(Subject::exclusive("base"));

        let derivation = Rc::new(RefCell::new(DerivationState::new(
            Rc::clone(&body),
            Rc::clone(&calculation),
            Rc::clone(&base),
            &config,
        )));

        let observer: ObserverRef = derivation.clone();
        body.attach(&observer)?;
        calculation.attach(&observer)?;
        base.attach(&observer)?;

        // registered first: user listeners already see the new pass
        let published = Rc::new(RefCell::new(Published::default()));
        let sink = Rc::clone(&published);
        derivation
            .borrow_mut()
            .add_publish_listener(Box::new(move |paragraphs, result| {
                let mut last = sink.borrow_mut();
                last.paragraphs = paragraphs.to_vec();
                last.result = result;
                last.passes += 1;
            }));

        derivation.borrow_mut().recompute();
        debug!(?config, "board ready");

        Ok(Board {
            body,
            calculation,
            base,
            derivation,
            published,
            scale: Cell::new(config.initial_scale),
            number_format: config.number_format,
        })
    }

    fn derivation_mut(&self, input: &'static str) -> Result<RefMut<'_, DerivationState>, RatioError> {
        self.derivation
            .try_borrow_mut()
            .map_err(|_| RatioError::ReentrantNotification(input))
    }

    // ---------------------------------------------------------------------------------------------
    // Inbound
    // ---------------------------------------------------------------------------------------------

    pub fn select_body(&self, body: impl Into<Option<CelestialBody>>) -> Result<(), RatioError> {
        let body = body.into();
        debug!(body = body.map(|b| b.name), "body selected");
        self.body.set(body)
    }

    /// Select the calculation kind.
    ///
    /// A reference base chosen earlier is dropped in the same cascade, so the
    /// student picks it again for a new distance calculation and a diameter
    /// calculation never carries a stale base.
    pub fn select_calculation(
        &self,
        kind: impl Into<Option<CalculationKind>>,
    ) -> Result<(), RatioError> {
        let kind = kind.into();
        debug!(calculation = ?kind, "calculation selected");
        if self.base.is_set() {
            // refuse before touching the base if a pass is still running
            drop(self.derivation_mut("calculation")?);
            self.base.clear_silently();
        }
        self.calculation.set(kind)
    }

    pub fn select_base(&self, base: impl Into<Option<ReferenceBase>>) -> Result<(), RatioError> {
        let base = base.into();
        debug!(base = ?base, "reference base selected");
        self.base.set(base)
    }

    /// Change the scale factor; it must be finite and non-zero.
    pub fn set_scale(&self, scale: f64) -> Result<(), RatioError> {
        if !scale.is_finite() || scale == 0.0 {
            warn!(scale, "scale rejected");
            return Err(RatioError::InvalidNumberInput(scale.to_string()));
        }
        let mut derivation = self.derivation_mut("scale")?;
        self.scale.set(scale);
        derivation.set_scale(scale);
        Ok(())
    }

    /// Read the scale typed by the student (`"0,01"`) and apply it.
    pub fn set_scale_input(&self, text: &str) -> Result<(), RatioError> {
        match self.number_format.parse(text) {
            Ok(scale) => self.set_scale(scale),
            Err(err) => {
                warn!(input = text, "scale input rejected");
                Err(err)
            }
        }
    }

    pub fn set_unknown_symbol(&self, symbol: &str) -> Result<(), RatioError> {
        self.derivation_mut("unknown_symbol")?
            .set_unknown_symbol(symbol);
        Ok(())
    }

    /// Run one more notification pass without changing any input.
    pub fn refresh(&self) -> Result<(), RatioError> {
        self.derivation_mut("refresh")?.on_notify();
        Ok(())
    }

    /// Register a callback receiving the paragraphs and the result after every pass.
    pub fn on_publish(
        &self,
        listener: impl FnMut(&[Paragraph], Option<f64>) + 'static,
    ) -> Result<(), RatioError> {
        self.derivation_mut("listener")?
            .add_publish_listener(Box::new(listener));
        Ok(())
    }

    // ---------------------------------------------------------------------------------------------
    // Outbound
    // ---------------------------------------------------------------------------------------------

    pub fn paragraphs(&self) -> Vec<Paragraph> {
        self.published.borrow().paragraphs.clone()
    }

    pub fn current_result(&self) -> Option<f64> {
        self.published.borrow().result
    }

    pub fn recomputations(&self) -> u64 {
        self.published.borrow().passes
    }

    pub fn selected_body(&self) -> Option<CelestialBody> {
        self.body.get()
    }

    pub fn selected_calculation(&self) -> Option<CalculationKind> {
        self.calculation.get()
    }

    pub fn selected_base(&self) -> Option<ReferenceBase> {
        self.base.get()
    }

    pub fn scale(&self) -> f64 {
        self.scale.get()
    }

    pub fn number_format(&self) -> NumberFormat {
        self.number_format
    }

    /// Read access to the derived fields of the last pass.
    ///
    /// Return
    /// ----------
    /// * [`RatioError::ReentrantNotification`] when called from a publish
    ///   listener, while the pass still holds the derivation.
    pub fn derivation(&self) -> Result<Ref<'_, DerivationState>, RatioError> {
        self.derivation
            .try_borrow()
            .map_err(|_| RatioError::ReentrantNotification("derivation"))
    }
}
