//! Compiled-in physical and orbital parameters for the bodies of the
//! solar system: masses, standard gravitational parameters, diameters,
//! Keplerian element tables, and body classification.
//!
//! The registry is a static read-only table; no runtime files are needed.
//! Masses are NSSDC fact-sheet values, μ values come from the HORIZONS
//! documentation (known to greater accuracy than G or M individually),
//! planet element rows are the Standish 3000 BC – AD 3000 tables, and
//! small bodies carry JPL SBDB osculating elements.

pub mod oblateness;

mod tables;

use orrery_core::constants::GRAVITATIONAL_CONSTANT;
use orrery_kepler::ElementSet;
use thiserror::Error;

pub use oblateness::Oblateness;
pub use tables::BODIES;

/// Requested body name is not in the registry.
#[derive(Debug, Clone, Error)]
#[error("unknown body `{0}`")]
pub struct UnknownBody(pub String);

/// How a body participates in the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyClass {
    Star,
    /// Shown on a heliocentric orbit; includes the dwarf planets,
    /// asteroids, and comets of the catalogue.
    Planet,
    /// Carries a center-body association.
    Moon,
}

/// One registry row.
#[derive(Debug, Clone)]
pub struct BodyRecord {
    pub name: &'static str,
    pub class: BodyClass,
    pub mass_kg: f64,
    /// Measured standard gravitational parameter, when one exists.
    mu_m3_s2: Option<f64>,
    pub diameter_m: f64,
    /// Keplerian fallback elements; heliocentric for planet-class bodies,
    /// relative to the center body for moons.
    pub elements: Option<ElementSet>,
    /// Name of the center body, for moon-class records.
    pub center_body: Option<&'static str>,
}

impl BodyRecord {
    /// Standard gravitational parameter in m³/s².
    ///
    /// Falls back to G·m for bodies whose μ has not been measured.
    pub fn mu_m3_s2(&self) -> f64 {
        self.mu_m3_s2
            .unwrap_or(GRAVITATIONAL_CONSTANT * self.mass_kg)
    }
}

/// Look up a body by its (case-sensitive) name.
pub fn body(name: &str) -> Result<&'static BodyRecord, UnknownBody> {
    BODIES
        .iter()
        .find(|record| record.name == name)
        .ok_or_else(|| UnknownBody(name.to_string()))
}

/// All planet-class bodies (everything on a heliocentric orbit).
pub fn planets() -> impl Iterator<Item = &'static BodyRecord> {
    BODIES
        .iter()
        .filter(|record| record.class == BodyClass::Planet)
}

/// All moons of the given planet.
pub fn moons_of(planet: &str) -> impl Iterator<Item = &'static BodyRecord> + '_ {
    BODIES
        .iter()
        .filter(move |record| record.center_body == Some(planet))
}

/// The planet a moon orbits, if the name denotes a moon.
pub fn planet_of_moon(moon: &str) -> Option<&'static str> {
    body(moon).ok().and_then(|record| record.center_body)
}
