//! # Sealed constant registries
//!
//! A [`ConstantRegistry`] is a closed, named collection of value objects. It is
//! filled exactly once through [`ConstantRegistry::initialize`] and then only
//! hands out shared references: no entry can be added, removed or reassigned
//! afterwards, and the values keep their insertion order for iteration.
//!
//! The [`Catalog`] groups the three registries the board needs (bodies,
//! calculation kinds and reference bases). [`Catalog::global`] builds the
//! standard catalog on first use and reuses it for the rest of the process.
//!
//! ```rust
//! use planet_ratio::registry::Catalog;
//!
//! let catalog = Catalog::global().unwrap();
//! let earth = catalog.require_body("EARTH").unwrap();
//! assert_eq!(earth.name, "Terra");
//! assert_eq!(catalog.bodies.len(), 11);
//! ```

use std::collections::HashMap;

use itertools::Itertools;
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::bodies::{CalculationKind, CelestialBody, ReferenceBase, STANDARD_BODIES};
use crate::ratio_errors::RatioError;

#[derive(Debug)]
struct SealedEntries<T> {
    names: Vec<String>,
    values: Vec<T>,
    index: HashMap<String, usize>,
}

/// Name → value collection that can be initialized once and never mutated.
#[derive(Debug)]
pub struct ConstantRegistry<T> {
    label: &'static str,
    entries: OnceCell<SealedEntries<T>>,
}

impl<T> ConstantRegistry<T> {
    /// Create an empty, unsealed registry.
    ///
    /// Arguments
    /// -----------------
    /// * `label`: a short name used in error messages and logs (e.g. `"bodies"`).
    pub const fn new(label: &'static str) -> Self {
        ConstantRegistry {
            label,
            entries: OnceCell::new(),
        }
    }

    /// Fill and seal the registry.
    ///
    /// All entries must be passed in a single call; their order is the
    /// iteration order of [`values`](ConstantRegistry::values).
    ///
    /// Arguments
    /// -----------------
    /// * `entries`: name → value pairs.
    ///
    /// Return
    /// ----------
    /// * `Ok(())` once sealed.
    /// * [`RatioError::RegistrySealed`] if the registry was already initialized.
    /// * [`RatioError::DuplicateConstant`] if a name appears twice in `entries`.
    pub fn initialize<I, K>(&self, entries: I) -> Result<(), RatioError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
    {
        if self.is_sealed() {
            warn!(registry = self.label, "second initialization rejected");
            return Err(RatioError::RegistrySealed(self.label.to_string()));
        }

        let (names, values): (Vec<String>, Vec<T>) =
            entries.into_iter().map(|(k, v)| (k.into(), v)).unzip();

        if let Some(dup) = names.iter().duplicates().next() {
            return Err(RatioError::DuplicateConstant(format!(
                "{}.{}",
                self.label, dup
            )));
        }

        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        self.entries
            .set(SealedEntries {
                names,
                values,
                index,
            })
            .map_err(|_| RatioError::RegistrySealed(self.label.to_string()))?;

        debug!(registry = self.label, size = self.len(), "registry sealed");
        Ok(())
    }

    pub fn is_sealed(&self) -> bool {
        self.entries.get().is_some()
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Value registered under `name`, if the registry is sealed and knows it.
    pub fn get(&self, name: &str) -> Option<&T> {
        let entries = self.entries.get()?;
        entries.index.get(name).map(|&i| &entries.values[i])
    }

    /// Same as [`get`](ConstantRegistry::get) but reports unknown names.
    pub fn require(&self, name: &str) -> Result<&T, RatioError> {
        self.get(name)
            .ok_or_else(|| RatioError::UnknownConstant(format!("{}.{}", self.label, name)))
    }

    /// All values, in insertion order. Empty before sealing.
    pub fn values(&self) -> &[T] {
        self.entries
            .get()
            .map(|e| e.values.as_slice())
            .unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .get()
            .into_iter()
            .flat_map(|e| e.names.iter().map(String::as_str))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.names().zip(self.values().iter())
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The three registries of the board, built once.
#[derive(Debug)]
pub struct Catalog {
    pub bodies: ConstantRegistry<CelestialBody>,
    pub calculations: ConstantRegistry<CalculationKind>,
    pub bases: ConstantRegistry<ReferenceBase>,
}

static GLOBAL_CATALOG: OnceCell<Catalog> = OnceCell::new();

impl Catalog {
    /// Build and seal a catalog holding the standard bodies, both calculation
    /// kinds and both reference bases.
    pub fn standard() -> Result<Self, RatioError> {
        let catalog = Catalog {
            bodies: ConstantRegistry::new("bodies"),
            calculations: ConstantRegistry::new("calculations"),
            bases: ConstantRegistry::new("bases"),
        };

        catalog.bodies.initialize(STANDARD_BODIES)?;
        catalog
            .calculations
            .initialize(CalculationKind::ALL.map(|k| (k.key(), k)))?;
        catalog
            .bases
            .initialize(ReferenceBase::ALL.map(|b| (b.key(), b)))?;

        Ok(catalog)
    }

    /// Process-wide standard catalog, built on first access.
    pub fn global() -> Result<&'static Catalog, RatioError> {
        GLOBAL_CATALOG.get_or_try_init(Catalog::standard)
    }

    pub fn require_body(&self, key: &str) -> Result<CelestialBody, RatioError> {
        self.bodies.require(key).copied()
    }

    pub fn require_calculation(&self, key: &str) -> Result<CalculationKind, RatioError> {
        self.calculations.require(key).copied()
    }

    pub fn require_base(&self, key: &str) -> Result<ReferenceBase, RatioError> {
        self.bases.require(key).copied()
    }

    /// Body whose display name is `name` (e.g. `"Marte"`).
    pub fn body_named(&self, name: &str) -> Option<CelestialBody> {
        self.bodies.values().iter().find(|b| b.name == name).copied()
    }
}
