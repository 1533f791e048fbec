//! Gravitational particle systems.
//!
//! The heliocentric system and the per-planet moon subsystems share one
//! engine: Newtonian pairwise gravity over the force-exerting particles,
//! an optional first-order post-Newtonian correction, an optional J2
//! zonal term for oblate bodies, and two integrators (single-step RK4 and
//! the four-step Adams-Bashforth-Moulton predictor-corrector).

pub mod oblate;
pub mod particle;
pub mod system;

use thiserror::Error;

pub use oblate::{OblateBody, PlanetSubsystem};
pub use particle::Particle;
pub use system::ParticleSystem;

/// Errors raised by particle-system operations.
#[derive(Debug, Error)]
pub enum NbodyError {
    /// An advance produced a non-finite component; the system state was
    /// rolled back to the pre-step snapshot.
    #[error("integration produced a non-finite state for `{particle}`")]
    NonFinite { particle: String },
    #[error("unknown particle `{0}`")]
    UnknownParticle(String),
}
