//! Pluggable ephemeris sources.
//!
//! Every source answers position/velocity queries for a set of bodies
//! over a validity window, in a heliocentric J2000 ecliptic frame with SI
//! units at the boundary. The composite source dispatches per body and
//! instant across an approximate Keplerian provider (valid 3000 BC
//! through AD 3000) and kernel-backed providers with narrow, high-fidelity
//! windows.

pub mod composite;
pub mod kepler_source;
pub mod spk;

mod file_source;

use orrery_core::state::State;
use orrery_core::time::Instant;
use orrery_core::vector::Vector3D;
use orrery_kepler::ConvergenceError;
use orrery_params::UnknownBody;
use thiserror::Error;

pub use composite::SolarSystemEphemeris;
pub use file_source::{KernelWindow, PlanetKernelEphemeris, PlanetSystemKernelEphemeris};
pub use kepler_source::KeplerianEphemeris;

/// Errors surfaced by ephemeris queries.
#[derive(Debug, Error)]
pub enum EphemerisError {
    #[error("unknown body `{0}`")]
    UnknownBody(String),
    #[error("instant {instant} is outside the validity window of {source_name}")]
    OutOfRange {
        source_name: &'static str,
        instant: Instant,
    },
    #[error("numerical failure: {0}")]
    Numerical(#[from] ConvergenceError),
    #[error("{operation} is not supported by {source_name}")]
    Unsupported {
        source_name: &'static str,
        operation: &'static str,
    },
    #[error("ephemeris kernel I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UnknownBody> for EphemerisError {
    fn from(err: UnknownBody) -> Self {
        EphemerisError::UnknownBody(err.0)
    }
}

/// A position/velocity provider for a set of bodies over a validity
/// window.
///
/// States are heliocentric J2000 ecliptic in metres and metres per
/// second, except where a planet-system source documents planetocentric
/// output (such sources are wrapped by the composite before they reach
/// the public boundary).
pub trait EphemerisSource {
    /// Short provider name used in error messages.
    fn name(&self) -> &'static str;

    /// Earliest instant this source answers for.
    fn first_valid(&self) -> Instant;

    /// Latest instant this source answers for.
    fn last_valid(&self) -> Instant;

    /// Names of the bodies this source can answer for.
    fn bodies(&self) -> Vec<&'static str>;

    /// Position and velocity of `body` at `instant`.
    fn state(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError>;

    /// Position only.
    fn position(&self, body: &str, instant: &Instant) -> Result<Vector3D, EphemerisError> {
        self.state(body, instant).map(|state| state.position)
    }

    /// Velocity only.
    fn velocity(&self, body: &str, instant: &Instant) -> Result<Vector3D, EphemerisError> {
        self.state(body, instant).map(|state| state.velocity)
    }

    /// State relative to the solar-system barycenter, for providers that
    /// model one.
    fn state_barycentric(&self, _body: &str, _instant: &Instant) -> Result<State, EphemerisError> {
        Err(EphemerisError::Unsupported {
            source_name: self.name(),
            operation: "barycentric query",
        })
    }

    /// Whether this source can answer for `(body, instant)`.
    fn covers(&self, body: &str, instant: &Instant) -> bool {
        *instant >= self.first_valid()
            && *instant <= self.last_valid()
            && self.bodies().iter().any(|candidate| *candidate == body)
    }
}
