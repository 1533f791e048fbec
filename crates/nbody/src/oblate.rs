//! Oblateness-aware acceleration and the per-planet moon subsystem.

use orrery_core::frame::pole_direction_ecliptic;
use orrery_core::state::State;
use orrery_core::vector::Vector3D;
use orrery_params::Oblateness;

use crate::particle::Particle;
use crate::system::ParticleSystem;
use crate::NbodyError;

/// Default oblateness cutoff, in equatorial radii. Generous enough that
/// Earth's Moon (at roughly sixty radii) still sees the J2 term.
pub const DEFAULT_CUTOFF_RADII: f64 = 100.0;

/// The J2 zonal field of an oblate body, evaluated in the ecliptic frame.
#[derive(Debug, Clone)]
pub struct OblateBody {
    j2: f64,
    equatorial_radius_m: f64,
    /// Unit spin axis in the ecliptic frame.
    pole: Vector3D,
    cutoff_radius_m: f64,
}

impl OblateBody {
    pub fn new(oblateness: &Oblateness, cutoff_radius_m: f64) -> Self {
        Self {
            j2: oblateness.j2,
            equatorial_radius_m: oblateness.equatorial_radius_m,
            pole: pole_direction_ecliptic(oblateness.pole_ra_deg, oblateness.pole_dec_deg),
            cutoff_radius_m,
        }
    }

    /// Oblateness model for the named planet with the default cutoff, if
    /// the parameter tables carry one.
    pub fn for_planet(name: &str) -> Option<Self> {
        orrery_params::oblateness::oblateness(name).map(|data| {
            Self::new(data, DEFAULT_CUTOFF_RADII * data.equatorial_radius_m)
        })
    }

    /// J2 contribution to the acceleration of a particle at
    /// `offset_from_center`, for a central body with parameter `mu`.
    /// Zero outside the cutoff radius.
    pub fn acceleration(&self, mu_m3_s2: f64, offset_from_center: &Vector3D) -> Vector3D {
        let r = offset_from_center.norm();
        if r > self.cutoff_radius_m {
            return Vector3D::ZERO;
        }
        // Axial coordinate in the body-fixed frame.
        let z = offset_from_center.dot(&self.pole);
        let scale = 1.5 * self.j2 * mu_m3_s2 * self.equatorial_radius_m * self.equatorial_radius_m
            / (r * r * r * r * r);
        let ratio = z / r;
        -scale * (*offset_from_center * (1.0 - 5.0 * ratio * ratio) + self.pole * (2.0 * z))
    }
}

/// A planet's moons, integrated in the planet's local frame.
///
/// The subsystem is a plain particle system whose central particle is the
/// planet (usually carrying an oblateness model) pinned at the local
/// origin between macro steps. Before integration the orchestrator
/// anchors the subsystem at the planet's heliocentric state; afterwards
/// it re-pins the planet to the origin. The dynamics are translation
/// invariant, so the anchoring is pure bookkeeping.
#[derive(Debug, Clone)]
pub struct PlanetSubsystem {
    planet: String,
    system: ParticleSystem,
}

impl PlanetSubsystem {
    /// Create a subsystem with the planet particle at the local origin.
    pub fn new(planet: impl Into<String>, planet_particle: Particle) -> Self {
        let planet = planet.into();
        let mut system = ParticleSystem::new();
        system.add_particle(planet.clone(), planet_particle);
        Self { planet, system }
    }

    pub fn planet_name(&self) -> &str {
        &self.planet
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    /// Add a moon (or nearby spacecraft) with a planetocentric state.
    pub fn add_particle(&mut self, name: impl Into<String>, particle: Particle) {
        self.system.add_particle(name, particle);
    }

    pub fn remove_particle(&mut self, name: &str) -> Option<Particle> {
        self.system.remove_particle(name)
    }

    /// Planetocentric state of a subsystem member.
    pub fn member_state(&self, name: &str) -> Option<State> {
        Some(self.system.particle(name)?.state() - self.planet_state())
    }

    /// Overwrite a member's planetocentric state.
    pub fn set_member_state(&mut self, name: &str, state: State) -> Result<(), NbodyError> {
        let absolute = self.planet_state() + state;
        self.system.set_state(name, absolute)
    }

    pub fn set_mass(&mut self, name: &str, mass_kg: f64) -> Result<(), NbodyError> {
        self.system.set_mass(name, mass_kg)
    }

    pub fn set_post_newtonian(&mut self, flag: bool) {
        self.system.set_post_newtonian(flag);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.system.particle(name).is_some()
    }

    /// Current state of the planet particle in subsystem coordinates.
    pub fn planet_state(&self) -> State {
        self.system
            .particle(&self.planet)
            .map(|planet| planet.state())
            .unwrap_or(State::ZERO)
    }

    /// Advance all members by one RK4 step.
    pub fn advance_rk4(&mut self, dt_s: f64) -> Result<(), NbodyError> {
        self.system.advance_rk4(dt_s)
    }

    /// Move the subsystem so the planet sits at `anchor` (its current
    /// heliocentric state), ahead of integration.
    pub fn correct_drift_to_anchor(&mut self, anchor: &State) {
        let delta = *anchor - self.planet_state();
        self.system.translate(&delta);
    }

    /// Re-pin the planet to the local origin after integration.
    pub fn correct_drift(&mut self) {
        let planet = self.planet_state();
        self.system.correct_drift_by(&planet);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_params::oblateness::oblateness;

    const MU_EARTH: f64 = 3.9860043289693922e14;
    const EARTH_MASS: f64 = 5.9723e24;

    fn earth_j2() -> OblateBody {
        OblateBody::new(oblateness("Earth").unwrap(), 1.0e9)
    }

    #[test]
    fn equatorial_perturbation_points_inward() {
        let field = earth_j2();
        let r = 7.0e6;
        // Earth's pole in the ecliptic frame is tilted about the x-axis,
        // so the x-axis itself lies in the equator plane.
        let offset = Vector3D::new(r, 0.0, 0.0);
        let accel = field.acceleration(MU_EARTH, &offset);
        assert!(accel.dot(&offset) < 0.0, "equatorial J2 term must be inward");
        let expected = 1.5 * 1.08263e-3 * MU_EARTH * 6.378137e6 * 6.378137e6 / r.powi(4);
        assert!((accel.norm() - expected).abs() < 1e-6 * expected);
    }

    #[test]
    fn polar_perturbation_points_outward() {
        let field = earth_j2();
        let pole_offset = field.pole * 7.0e6;
        let accel = field.acceleration(MU_EARTH, &pole_offset);
        assert!(accel.dot(&pole_offset) > 0.0, "polar J2 term must be outward");
    }

    #[test]
    fn field_vanishes_outside_the_cutoff() {
        let field = OblateBody::new(oblateness("Earth").unwrap(), 1.0e7);
        let accel = field.acceleration(MU_EARTH, &Vector3D::new(2.0e7, 0.0, 0.0));
        assert_eq!(accel, Vector3D::ZERO);
    }

    #[test]
    fn anchoring_round_trips() {
        let mut subsystem = PlanetSubsystem::new(
            "Earth",
            Particle::massive(EARTH_MASS, MU_EARTH, Vector3D::ZERO, Vector3D::ZERO),
        );
        let moon_state = State::new(
            Vector3D::new(3.844e8, 0.0, 0.0),
            Vector3D::new(0.0, 1_018.0, 0.0),
        );
        subsystem.add_particle(
            "Moon",
            Particle::massive(7.346e22, 4.9028e12, moon_state.position, moon_state.velocity),
        );

        let anchor = State::new(
            Vector3D::new(1.4e11, 2.0e10, 0.0),
            Vector3D::new(-5_000.0, 29_000.0, 0.0),
        );
        subsystem.correct_drift_to_anchor(&anchor);
        assert_eq!(subsystem.planet_state(), anchor);
        // Planetocentric member states are unchanged by anchoring.
        let relative = subsystem.member_state("Moon").unwrap();
        assert!(relative.position.distance(&moon_state.position) < 1e-3);

        subsystem.correct_drift();
        assert_eq!(subsystem.planet_state(), State::ZERO);
    }

    #[test]
    fn moon_orbit_survives_integration() {
        let mut subsystem = PlanetSubsystem::new(
            "Earth",
            Particle::massive(EARTH_MASS, MU_EARTH, Vector3D::ZERO, Vector3D::ZERO)
                .with_oblateness(earth_j2()),
        );
        let radius = 3.844e8;
        // Circular speed of the relative orbit uses the combined mu.
        let speed = ((MU_EARTH + 4.9028e12) / radius).sqrt();
        subsystem.add_particle(
            "Moon",
            Particle::massive(
                7.346e22,
                4.9028e12,
                Vector3D::new(radius, 0.0, 0.0),
                Vector3D::new(0.0, speed, 0.0),
            ),
        );
        // A day of ten-minute sub-steps.
        for _ in 0..144 {
            subsystem.advance_rk4(600.0).unwrap();
        }
        subsystem.correct_drift();
        let r = subsystem.member_state("Moon").unwrap().position.norm();
        assert!(
            (r - radius).abs() < 5_000.0,
            "lunar orbit radius drifted by {} m in a day",
            (r - radius).abs()
        );
    }
}
