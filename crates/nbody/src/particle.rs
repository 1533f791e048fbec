//! Point-mass particles.

use orrery_core::state::State;
use orrery_core::vector::Vector3D;

use crate::oblate::OblateBody;

/// Number of (velocity, acceleration) samples the multi-step integrator
/// keeps per particle.
pub(crate) const HISTORY_LEN: usize = 4;

/// A point mass in a particle system.
///
/// Force-exerting ("massive") particles pull on everything; massless
/// particles feel gravity but exert none and carry μ = 0 by construction.
#[derive(Debug, Clone)]
pub struct Particle {
    mass_kg: f64,
    mu_m3_s2: f64,
    exerts_gravity: bool,
    position: Vector3D,
    velocity: Vector3D,
    oblateness: Option<OblateBody>,
    /// Cyclic (velocity, acceleration) samples for the ABM4 scheme; slot
    /// rotation and validity are owned by the containing system.
    pub(crate) history: [(Vector3D, Vector3D); HISTORY_LEN],
}

impl Particle {
    /// A force-exerting particle. μ is taken separately from the mass
    /// because it is measured more precisely than either G or m.
    pub fn massive(mass_kg: f64, mu_m3_s2: f64, position: Vector3D, velocity: Vector3D) -> Self {
        Self {
            mass_kg,
            mu_m3_s2,
            exerts_gravity: true,
            position,
            velocity,
            oblateness: None,
            history: [(Vector3D::ZERO, Vector3D::ZERO); HISTORY_LEN],
        }
    }

    /// A particle that feels gravity but exerts none.
    pub fn massless(mass_kg: f64, position: Vector3D, velocity: Vector3D) -> Self {
        Self {
            mass_kg,
            mu_m3_s2: 0.0,
            exerts_gravity: false,
            position,
            velocity,
            oblateness: None,
            history: [(Vector3D::ZERO, Vector3D::ZERO); HISTORY_LEN],
        }
    }

    /// Attach an oblateness model; nearby particles will see the J2 term
    /// of this particle's field.
    pub fn with_oblateness(mut self, oblateness: OblateBody) -> Self {
        self.oblateness = Some(oblateness);
        self
    }

    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    pub fn mu_m3_s2(&self) -> f64 {
        self.mu_m3_s2
    }

    pub fn exerts_gravity(&self) -> bool {
        self.exerts_gravity
    }

    pub fn position(&self) -> Vector3D {
        self.position
    }

    pub fn velocity(&self) -> Vector3D {
        self.velocity
    }

    pub fn state(&self) -> State {
        State::new(self.position, self.velocity)
    }

    pub fn oblateness(&self) -> Option<&OblateBody> {
        self.oblateness.as_ref()
    }

    pub(crate) fn set_mass_kg(&mut self, mass_kg: f64) {
        self.mass_kg = mass_kg;
    }

    pub(crate) fn set_position(&mut self, position: Vector3D) {
        self.position = position;
    }

    pub(crate) fn set_velocity(&mut self, velocity: Vector3D) {
        self.velocity = velocity;
    }
}
