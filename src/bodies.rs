//! # Value objects of the proportion board
//!
//! Three immutable records describe what a student can select:
//!
//! - [`CelestialBody`] – a body of the solar system with its diameter and its
//!   mean distance to the Sun, both stored in kilometers.
//! - [`CalculationKind`] – whether the worked example compares diameters or
//!   distances.
//! - [`ReferenceBase`] – the known term of the proportion when distances are
//!   compared (Sun diameter or Earth–Sun distance).
//!
//! The standard bodies are `const` items so they can seed the
//! [`Catalog`](crate::registry::Catalog) without any runtime construction.
//!
//! ## See also
//! ------------
//! * [`ConstantRegistry`](crate::registry::ConstantRegistry) – Sealed name → value collection.
//! * [`DerivationState`](crate::reactive::derivation::DerivationState) – Consumer of these records.

use std::fmt;

use crate::constants::{Kilometer, Meter, METERS_PER_KM};

/// A celestial body with the two magnitudes the board can compare.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub diameter_km: Kilometer,
    pub distance_km: Kilometer,
}

impl CelestialBody {
    pub const fn new(name: &'static str, diameter_km: Kilometer, distance_km: Kilometer) -> Self {
        CelestialBody {
            name,
            diameter_km,
            distance_km,
        }
    }

    pub fn diameter_m(&self) -> Meter {
        self.diameter_km * METERS_PER_KM
    }

    pub fn distance_m(&self) -> Meter {
        self.distance_km * METERS_PER_KM
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

// -------------------------------------------------------------------------------------------------
// Standard bodies (mean values, km)
// -------------------------------------------------------------------------------------------------

pub const SUN: CelestialBody = CelestialBody::new("Sol", 1.39e6, 0.0);
pub const MERCURY: CelestialBody = CelestialBody::new("Mercúrio", 4.879e3, 5.79e7);
pub const VENUS: CelestialBody = CelestialBody::new("Vênus", 1.2104e4, 1.082e8);
pub const EARTH: CelestialBody = CelestialBody::new("Terra", 1.2756e4, 1.496e8);
pub const MOON: CelestialBody = CelestialBody::new("Lua", 3.475e3, 3.84e5);
pub const MARS: CelestialBody = CelestialBody::new("Marte", 6.792e3, 2.279e8);
pub const JUPITER: CelestialBody = CelestialBody::new("Júpiter", 1.42984e5, 7.786e8);
pub const SATURN: CelestialBody = CelestialBody::new("Saturno", 1.20536e5, 1.4335e9);
pub const URANUS: CelestialBody = CelestialBody::new("Urano", 5.1118e4, 2.8725e9);
pub const NEPTUNE: CelestialBody = CelestialBody::new("Netuno", 4.9528e4, 4.4951e9);
pub const PLUTO: CelestialBody = CelestialBody::new("Plutão", 2.39e3, 5.87e9);

/// Registry keys and records of the standard bodies, in table order.
pub const STANDARD_BODIES: [(&str, CelestialBody); 11] = [
    ("SUN", SUN),
    ("MERCURY", MERCURY),
    ("VENUS", VENUS),
    ("EARTH", EARTH),
    ("MOON", MOON),
    ("MARS", MARS),
    ("JUPITER", JUPITER),
    ("SATURN", SATURN),
    ("URANUS", URANUS),
    ("NEPTUNE", NEPTUNE),
    ("PLUTO", PLUTO),
];

/// The magnitude compared by the worked example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationKind {
    Diameter,
    Distance,
}

impl CalculationKind {
    pub const ALL: [CalculationKind; 2] = [CalculationKind::Diameter, CalculationKind::Distance];

    pub fn label(&self) -> &'static str {
        match self {
            CalculationKind::Diameter => "Diâmetro",
            CalculationKind::Distance => "Distância",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            CalculationKind::Diameter => "DIAMETER",
            CalculationKind::Distance => "DISTANCE",
        }
    }

    /// Magnitude of `body` this kind compares, in meters.
    pub fn magnitude_of(&self, body: &CelestialBody) -> Meter {
        match self {
            CalculationKind::Diameter => body.diameter_m(),
            CalculationKind::Distance => body.distance_m(),
        }
    }
}

impl fmt::Display for CalculationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Known term of a distance proportion.
///
/// `dom_id` is an opaque handle of the rendering side (the label element of
/// the matching radio button); the core never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceBase {
    SunDiameter,
    EarthSunDistance,
}

impl ReferenceBase {
    pub const ALL: [ReferenceBase; 2] = [ReferenceBase::SunDiameter, ReferenceBase::EarthSunDistance];

    pub fn label(&self) -> &'static str {
        match self {
            ReferenceBase::SunDiameter => "Diâmetro do Sol",
            ReferenceBase::EarthSunDistance => "Distância da Terra ao Sol",
        }
    }

    pub fn dom_id(&self) -> &'static str {
        match self {
            ReferenceBase::SunDiameter => "base__diametro-sol-label",
            ReferenceBase::EarthSunDistance => "base__distancia-terra-sol-label",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            ReferenceBase::SunDiameter => "SUN_DIAMETER",
            ReferenceBase::EarthSunDistance => "EARTH_SUN_DISTANCE",
        }
    }

    /// Short label used on the first line of the board.
    pub fn short_label(&self) -> &'static str {
        match self {
            ReferenceBase::SunDiameter => "Diâmetro Sol",
            ReferenceBase::EarthSunDistance => "Distância Terra-Sol",
        }
    }

    /// Standard value of this base in kilometers.
    pub fn standard_km(&self) -> Kilometer {
        match self {
            ReferenceBase::SunDiameter => SUN.diameter_km,
            ReferenceBase::EarthSunDistance => EARTH.distance_km,
        }
    }

    /// Standard value of this base in meters.
    pub fn standard_m(&self) -> Meter {
        match self {
            ReferenceBase::SunDiameter => SUN.diameter_m(),
            ReferenceBase::EarthSunDistance => EARTH.distance_m(),
        }
    }
}

impl fmt::Display for ReferenceBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
