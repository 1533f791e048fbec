//! Kepler mechanics: solvers for Kepler's equation, osculating element
//! tables with secular rates, and conversions between elements and
//! Cartesian states.

pub mod elements;
pub mod solve;
pub mod state;

pub use elements::{
    ElementSet, MeanAnomalyCorrection, OrbitalElements, PlanetaryElements, SmallBodyElements,
};
pub use solve::ConvergenceError;
