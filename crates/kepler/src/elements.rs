//! Osculating orbital elements and the two table forms they are
//! propagated from.
//!
//! Planet rows follow the Standish long-form tables (element values plus
//! per-century rates, valid 3000 BC through AD 3000); dwarf planets,
//! asteroids, comets, and moon fallbacks use osculating elements in
//! perihelion-passage form.

use orrery_core::time::Instant;
use serde::{Deserialize, Serialize};

/// Osculating Keplerian elements at a specific instant.
///
/// Field order and units follow the ephemeris convention used throughout
/// the workspace: AU for the semi-major axis, degrees for all angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_anomaly_deg: f64,
    pub arg_perihelion_deg: f64,
    pub long_asc_node_deg: f64,
}

/// Additional mean-anomaly terms b·T² + c·cos(f·T) + s·sin(f·T) required
/// for Jupiter through Pluto over the full 3000 BC – AD 3000 interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeanAnomalyCorrection {
    pub b: f64,
    pub c: f64,
    pub s: f64,
    pub f_deg: f64,
}

impl MeanAnomalyCorrection {
    fn evaluate(&self, centuries: f64) -> f64 {
        let angle = (self.f_deg * centuries).to_radians();
        self.b * centuries * centuries + self.c * angle.cos() + self.s * angle.sin()
    }
}

/// Long-form planetary elements: values at J2000 and rates per Julian
/// century, in the order (a, e, I, L, ϖ, Ω) of the source tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanetaryElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub mean_longitude_deg: f64,
    pub long_perihelion_deg: f64,
    pub long_asc_node_deg: f64,
    pub semi_major_axis_au_per_cy: f64,
    pub eccentricity_per_cy: f64,
    pub inclination_deg_per_cy: f64,
    pub mean_longitude_deg_per_cy: f64,
    pub long_perihelion_deg_per_cy: f64,
    pub long_asc_node_deg_per_cy: f64,
    /// Present only for the outer planets; `None` disables the correction.
    pub correction: Option<MeanAnomalyCorrection>,
}

impl PlanetaryElements {
    /// Propagate the table row to osculating elements at `instant`.
    pub fn at(&self, instant: &Instant) -> OrbitalElements {
        let t = instant.centuries_past_j2000();
        let semi_major_axis_au = self.semi_major_axis_au + self.semi_major_axis_au_per_cy * t;
        let eccentricity = self.eccentricity + self.eccentricity_per_cy * t;
        let inclination_deg = self.inclination_deg + self.inclination_deg_per_cy * t;
        let mean_longitude = self.mean_longitude_deg + self.mean_longitude_deg_per_cy * t;
        let long_perihelion = self.long_perihelion_deg + self.long_perihelion_deg_per_cy * t;
        let long_asc_node_deg = self.long_asc_node_deg + self.long_asc_node_deg_per_cy * t;

        let mut mean_anomaly_deg = mean_longitude - long_perihelion;
        if let Some(correction) = &self.correction {
            mean_anomaly_deg += correction.evaluate(t);
        }

        OrbitalElements {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            mean_anomaly_deg: normalize_degrees(mean_anomaly_deg),
            arg_perihelion_deg: normalize_degrees(long_perihelion - long_asc_node_deg),
            long_asc_node_deg: normalize_degrees(long_asc_node_deg),
        }
    }
}

/// Osculating elements in perihelion-passage form, as published for small
/// bodies: fixed shape, mean anomaly driven by the mean motion and the
/// epoch of perihelion passage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmallBodyElements {
    pub semi_major_axis_au: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub arg_perihelion_deg: f64,
    pub long_asc_node_deg: f64,
    pub perihelion_passage_jd: f64,
    pub mean_motion_deg_per_day: f64,
}

impl SmallBodyElements {
    /// Osculating elements at `instant`.
    pub fn at(&self, instant: &Instant) -> OrbitalElements {
        let days_since_perihelion = instant.julian_date() - self.perihelion_passage_jd;
        OrbitalElements {
            semi_major_axis_au: self.semi_major_axis_au,
            eccentricity: self.eccentricity,
            inclination_deg: self.inclination_deg,
            mean_anomaly_deg: normalize_degrees(
                self.mean_motion_deg_per_day * days_since_perihelion,
            ),
            arg_perihelion_deg: self.arg_perihelion_deg,
            long_asc_node_deg: self.long_asc_node_deg,
        }
    }
}

/// The table form a body's elements are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ElementSet {
    Planetary(PlanetaryElements),
    SmallBody(SmallBodyElements),
}

impl ElementSet {
    /// Osculating elements at `instant`.
    pub fn at(&self, instant: &Instant) -> OrbitalElements {
        match self {
            ElementSet::Planetary(row) => row.at(instant),
            ElementSet::SmallBody(row) => row.at(instant),
        }
    }
}

/// Reduce an angle in degrees to [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(360.0);
    // rem_euclid can return 360.0 when the remainder rounds up.
    if reduced >= 360.0 {
        reduced - 360.0
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jupiter_row() -> PlanetaryElements {
        PlanetaryElements {
            semi_major_axis_au: 5.20248019,
            eccentricity: 0.04853590,
            inclination_deg: 1.29861416,
            mean_longitude_deg: 34.33479152,
            long_perihelion_deg: 14.27495244,
            long_asc_node_deg: 100.29282654,
            semi_major_axis_au_per_cy: -0.00002864,
            eccentricity_per_cy: 0.00018026,
            inclination_deg_per_cy: -0.00322699,
            mean_longitude_deg_per_cy: 3034.90371757,
            long_perihelion_deg_per_cy: 0.18199196,
            long_asc_node_deg_per_cy: 0.13024619,
            correction: Some(MeanAnomalyCorrection {
                b: -0.00012452,
                c: 0.06064060,
                s: -0.35635438,
                f_deg: 38.35125000,
            }),
        }
    }

    #[test]
    fn epoch_elements_match_the_table() {
        let row = jupiter_row();
        let at_epoch = row.at(&Instant::J2000);
        assert_eq!(at_epoch.semi_major_axis_au, row.semi_major_axis_au);
        assert_eq!(at_epoch.eccentricity, row.eccentricity);
        // At T = 0 the augmentation reduces to the constant c term.
        let expected_m =
            normalize_degrees(34.33479152 - 14.27495244 + row.correction.unwrap().c);
        assert!((at_epoch.mean_anomaly_deg - expected_m).abs() < 1e-12);
    }

    #[test]
    fn correction_is_skipped_when_absent() {
        let mut row = jupiter_row();
        row.correction = None;
        let at_epoch = row.at(&Instant::J2000);
        let expected_m = normalize_degrees(34.33479152 - 14.27495244);
        assert!((at_epoch.mean_anomaly_deg - expected_m).abs() < 1e-12);
    }

    #[test]
    fn small_body_mean_anomaly_grows_with_mean_motion() {
        let row = SmallBodyElements {
            semi_major_axis_au: 2.767409329208225,
            eccentricity: 0.07560729117115973,
            inclination_deg: 10.59321706277403,
            arg_perihelion_deg: 73.02374264688446,
            long_asc_node_deg: 80.3088826123586,
            perihelion_passage_jd: 2458236.411182414352,
            mean_motion_deg_per_day: 0.2140888123385267,
        };
        let at_passage = row.at(&Instant::from_julian_date(row.perihelion_passage_jd));
        assert!(at_passage.mean_anomaly_deg.abs() < 1e-9);
        let ten_days = row.at(&Instant::from_julian_date(row.perihelion_passage_jd + 10.0));
        assert!((ten_days.mean_anomaly_deg - 10.0 * row.mean_motion_deg_per_day).abs() < 1e-9);
    }

    #[test]
    fn degrees_normalize_into_range() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-12);
    }
}
