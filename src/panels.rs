//! # Info panels
//!
//! Besides the worked derivation, the widget shows the raw data of the
//! current selection in three small panels. They are plain summaries of a
//! value object, rendered with the shared [`NumberFormat`]:
//!
//! - [`DiameterPanel`] – body diameter in km and m (grouped) and m (scientific);
//! - [`DistancePanel`] – body distance in km and m, aligned on the powers of
//!   ten [`DISTANCE_KM_FIXED_EXPONENT`] and [`DISTANCE_M_FIXED_EXPONENT`] so
//!   every planet reads on the same scale;
//! - [`ReferencePanel`] – the selected reference base in the same units.

use crate::bodies::{CelestialBody, ReferenceBase, EARTH, SUN};
use crate::constants::{DISTANCE_KM_FIXED_EXPONENT, DISTANCE_M_FIXED_EXPONENT};
use crate::formatting::NumberFormat;

#[derive(Debug, Clone, PartialEq)]
pub struct DiameterPanel {
    pub name: String,
    pub km: String,
    pub m: String,
    pub scientific: String,
}

impl DiameterPanel {
    pub fn for_body(body: &CelestialBody, fmt: &NumberFormat) -> Self {
        DiameterPanel {
            name: body.name.to_string(),
            km: fmt.thousands(body.diameter_km),
            m: fmt.thousands(body.diameter_m()),
            scientific: fmt.scientific(body.diameter_m()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistancePanel {
    pub label: String,
    pub name: String,
    pub km: String,
    pub m: String,
    pub scientific: String,
}

impl DistancePanel {
    pub fn for_body(body: &CelestialBody, fmt: &NumberFormat) -> Self {
        DistancePanel {
            label: "Distância ".to_string(),
            name: body.name.to_string(),
            km: fmt.fixed_exponent(body.distance_km, DISTANCE_KM_FIXED_EXPONENT),
            m: fmt.fixed_exponent(body.distance_m(), DISTANCE_M_FIXED_EXPONENT),
            scientific: fmt.scientific(body.distance_m()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePanel {
    pub label: String,
    pub km: String,
    pub m: String,
    pub scientific: String,
}

impl ReferencePanel {
    /// The Sun diameter is written out in full; the Earth–Sun distance uses
    /// the same aligned powers of ten as [`DistancePanel`].
    pub fn for_base(base: ReferenceBase, fmt: &NumberFormat) -> Self {
        let label = format!("{}:", base.short_label());
        match base {
            ReferenceBase::SunDiameter => ReferencePanel {
                label,
                km: fmt.thousands(SUN.diameter_km),
                m: fmt.thousands(SUN.diameter_m()),
                scientific: fmt.scientific(SUN.diameter_m()),
            },
            ReferenceBase::EarthSunDistance => ReferencePanel {
                label,
                km: fmt.fixed_exponent(EARTH.distance_km, DISTANCE_KM_FIXED_EXPONENT),
                m: fmt.fixed_exponent(EARTH.distance_m(), DISTANCE_M_FIXED_EXPONENT),
                scientific: fmt.scientific(EARTH.distance_m()),
            },
        }
    }
}

/// Header line naming the selected body: `". Terra ."`.
pub fn decorated_header(body: &CelestialBody) -> String {
    format!(". {} .", body.name)
}
