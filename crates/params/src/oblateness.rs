//! Oblateness (J2 zonal) parameters and spin-axis orientations.
//!
//! The source tables this crate descends from reference oblateness but do
//! not list coefficients; the values here are IAU working-group constants
//! (poles in the J2000 equatorial frame). Discrepancies against any other
//! constant set should be resolved in favour of the IAU reports.

/// J2 zonal coefficient and body-fixed axis data for an oblate planet.
#[derive(Debug, Clone, Copy)]
pub struct Oblateness {
    pub j2: f64,
    pub equatorial_radius_m: f64,
    /// Right ascension of the north pole, J2000 equatorial (degrees).
    pub pole_ra_deg: f64,
    /// Declination of the north pole, J2000 equatorial (degrees).
    pub pole_dec_deg: f64,
}

static OBLATENESS: &[(&str, Oblateness)] = &[
    (
        "Earth",
        Oblateness {
            j2: 1.08263e-3,
            equatorial_radius_m: 6.378137e6,
            pole_ra_deg: 0.0,
            pole_dec_deg: 90.0,
        },
    ),
    (
        "Mars",
        Oblateness {
            j2: 1.96045e-3,
            equatorial_radius_m: 3.39619e6,
            pole_ra_deg: 317.68143,
            pole_dec_deg: 52.88650,
        },
    ),
    (
        "Jupiter",
        Oblateness {
            j2: 1.4736e-2,
            equatorial_radius_m: 7.1492e7,
            pole_ra_deg: 268.056595,
            pole_dec_deg: 64.495303,
        },
    ),
    (
        "Saturn",
        Oblateness {
            j2: 1.6298e-2,
            equatorial_radius_m: 6.0268e7,
            pole_ra_deg: 40.589,
            pole_dec_deg: 83.537,
        },
    ),
    (
        "Uranus",
        Oblateness {
            j2: 3.34343e-3,
            equatorial_radius_m: 2.5559e7,
            pole_ra_deg: 257.311,
            pole_dec_deg: -15.175,
        },
    ),
    (
        "Neptune",
        Oblateness {
            j2: 3.411e-3,
            equatorial_radius_m: 2.4764e7,
            pole_ra_deg: 299.36,
            pole_dec_deg: 43.46,
        },
    ),
];

/// Oblateness data for the named planet, if it is modeled as oblate.
pub fn oblateness(name: &str) -> Option<&'static Oblateness> {
    OBLATENESS
        .iter()
        .find(|(body, _)| *body == name)
        .map(|(_, data)| data)
}
