//! The solar-system orchestrator.
//!
//! Owns the heliocentric particle system, one nested subsystem per
//! modeled planet, the display body arena, the spacecraft trajectories,
//! and the event schedule. A macro tick advances the subsystems in
//! bounded sub-steps, advances the heliocentric system (RK4 under the
//! post-Newtonian flag, two half-length ABM4 steps otherwise), corrects
//! drift, refreshes the Earth-Moon barycenter, moves the clock, applies
//! any due event, and brings the display bodies up to date.

use orrery_core::state::State;
use orrery_core::time::Instant;
use orrery_ephem::{EphemerisError, EphemerisSource, SolarSystemEphemeris};
use orrery_kepler::state::sample_orbit_from_state;
use orrery_nbody::{NbodyError, OblateBody, Particle, ParticleSystem, PlanetSubsystem};
use orrery_params::{self as params, BodyClass, UnknownBody};
use thiserror::Error;

use crate::body::{Body, BodyArena};
use crate::events::{EventSchedule, SpacecraftEvent};
use crate::spacecraft::{Trajectory, TrajectoryRegistry};

/// Length of one macro step (seconds).
pub const MACRO_STEP_S: f64 = 3_600.0;

/// Upper bound on a planet-subsystem sub-step (seconds).
const SUBSYSTEM_MAX_STEP_S: f64 = 600.0;

/// Default mass for particles whose mass does not matter (spacecraft).
const DEFAULT_MASS_KG: f64 = 1.0;

/// Where the orchestrator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationPhase {
    /// Not seeded, or a fatal error rolled the simulation back here.
    Unseeded,
    Ready,
    Advancing,
    EventPending,
}

/// Errors surfaced by the orchestrator.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error(transparent)]
    Nbody(#[from] NbodyError),
    #[error("unknown body `{0}`")]
    UnknownBody(String),
    #[error("no trajectory registered for `{0}`")]
    UnknownTrajectory(String),
}

impl From<UnknownBody> for SimulationError {
    fn from(err: UnknownBody) -> Self {
        SimulationError::UnknownBody(err.0)
    }
}

/// The simulator: a heliocentric system, nested planet subsystems, and
/// the bookkeeping that keeps them consistent with the ephemeris.
pub struct SolarSystem {
    ephemeris: SolarSystemEphemeris,
    heliocentric: ParticleSystem,
    subsystems: Vec<PlanetSubsystem>,
    bodies: BodyArena,
    trajectories: Vec<(String, Box<dyn Trajectory>)>,
    registry: TrajectoryRegistry,
    events: EventSchedule,
    clock: Instant,
    earth_moon_barycenter: State,
    phase: SimulationPhase,
}

impl SolarSystem {
    /// Create the solar system and seed every body from the ephemeris at
    /// `start`.
    pub fn new(ephemeris: SolarSystemEphemeris, start: &Instant) -> Result<Self, SimulationError> {
        let mut simulation = SolarSystem {
            ephemeris,
            heliocentric: ParticleSystem::new(),
            subsystems: Vec::new(),
            bodies: BodyArena::new(),
            trajectories: Vec::new(),
            registry: TrajectoryRegistry::new(),
            events: EventSchedule::new(),
            clock: *start,
            earth_moon_barycenter: State::ZERO,
            phase: SimulationPhase::Unseeded,
        };
        simulation.build_heliocentric(start)?;
        simulation.build_bodies()?;
        simulation.update_earth_moon_barycenter();
        simulation.events.rewind(start);
        simulation.phase = SimulationPhase::Ready;
        Ok(simulation)
    }

    /// Current simulation time.
    pub fn time(&self) -> Instant {
        self.clock
    }

    pub fn phase(&self) -> SimulationPhase {
        self.phase
    }

    pub fn post_newtonian(&self) -> bool {
        self.heliocentric.post_newtonian()
    }

    /// Flip the post-Newtonian correction everywhere; the multi-step
    /// histories are dropped.
    pub fn set_post_newtonian(&mut self, flag: bool) {
        self.heliocentric.set_post_newtonian(flag);
        for subsystem in &mut self.subsystems {
            subsystem.set_post_newtonian(flag);
        }
    }

    /// Whether the heliocentric multi-step history is primed.
    pub fn abm4_valid(&self) -> bool {
        self.heliocentric.abm4_valid()
    }

    /// Derived Earth-Moon barycenter, μ-weighted from the Earth and Moon
    /// particles.
    pub fn earth_moon_barycenter(&self) -> State {
        self.earth_moon_barycenter
    }

    /// Display record for a body, if one exists.
    pub fn body(&self, name: &str) -> Option<&Body> {
        self.bodies.by_name(name)
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(|body| !body.name.is_empty())
    }

    /// Names of the planets that currently carry a moon subsystem.
    pub fn planet_systems(&self) -> Vec<&str> {
        self.subsystems
            .iter()
            .map(PlanetSubsystem::planet_name)
            .collect()
    }

    /// Number of scheduled events that have not fired yet.
    pub fn pending_events(&self) -> usize {
        self.events.remaining()
    }

    // ------------------------------------------------------------------
    // Seeding
    // ------------------------------------------------------------------

    fn build_heliocentric(&mut self, start: &Instant) -> Result<(), SimulationError> {
        let sun = params::body("Sun")?;
        self.heliocentric.add_particle(
            "Sun",
            Particle::massive(
                sun.mass_kg,
                sun.mu_m3_s2(),
                State::ZERO.position,
                State::ZERO.velocity,
            ),
        );

        // A body exerts force iff it is at least as massive as Pluto;
        // lighter catalogue members ride along as massless particles.
        let force_threshold_kg = params::body("Pluto")?.mass_kg;
        for record in params::planets() {
            let state = self.ephemeris.state(record.name, start)?;
            let particle = if record.mass_kg >= force_threshold_kg {
                let mut particle = Particle::massive(
                    record.mass_kg,
                    record.mu_m3_s2(),
                    state.position,
                    state.velocity,
                );
                if record.name == "Earth" {
                    // The Moon and near-Earth spacecraft orbit inside the
                    // heliocentric system and see Earth's J2 term.
                    if let Some(oblateness) = OblateBody::for_planet("Earth") {
                        particle = particle.with_oblateness(oblateness);
                    }
                }
                particle
            } else {
                Particle::massless(record.mass_kg, state.position, state.velocity)
            };
            self.heliocentric.add_particle(record.name, particle);
        }

        // Earth's moon lives in the heliocentric system and pulls on
        // everything.
        let moon = params::body("Moon")?;
        let moon_state = self.ephemeris.state("Moon", start)?;
        self.heliocentric.add_particle(
            "Moon",
            Particle::massive(
                moon.mass_kg,
                moon.mu_m3_s2(),
                moon_state.position,
                moon_state.velocity,
            ),
        );
        Ok(())
    }

    fn build_bodies(&mut self) -> Result<(), SimulationError> {
        let sun = params::body("Sun")?;
        let sun_index = self.bodies.push(Body {
            name: "Sun".to_string(),
            diameter_m: sun.diameter_m,
            state: State::ZERO,
            orbit: Vec::new(),
            center: None,
        });

        let mu_sun = sun.mu_m3_s2();
        for record in params::planets() {
            let state = self
                .heliocentric
                .particle(record.name)
                .expect("heliocentric system was just seeded")
                .state();
            self.bodies.push(Body {
                name: record.name.to_string(),
                diameter_m: record.diameter_m,
                state,
                orbit: sample_orbit_from_state(&state.position, &state.velocity, mu_sun),
                center: Some(sun_index),
            });
        }

        let moon = params::body("Moon")?;
        let earth_index = self
            .bodies
            .index_of("Earth")
            .expect("Earth is in the arena");
        let earth_state = self.bodies.get(earth_index).state;
        let moon_state = self
            .heliocentric
            .particle("Moon")
            .expect("Moon particle exists")
            .state();
        let relative = moon_state - earth_state;
        let mu_earth = params::body("Earth")?.mu_m3_s2();
        self.bodies.push(Body {
            name: "Moon".to_string(),
            diameter_m: moon.diameter_m,
            state: moon_state,
            orbit: sample_orbit_from_state(&relative.position, &relative.velocity, mu_earth),
            center: Some(earth_index),
        });
        Ok(())
    }

    /// Re-seed every particle from the ephemeris (and spacecraft from
    /// their trajectories) at `t`, drop the multi-step histories, and
    /// move the clock.
    pub fn set_time(&mut self, t: &Instant) -> Result<(), SimulationError> {
        // Cheap validation before any mutation.
        self.ephemeris.state("Sun", t)?;

        self.phase = SimulationPhase::Unseeded;

        let names: Vec<String> = self.heliocentric.names().map(str::to_string).collect();
        for name in &names {
            if name == "Sun" {
                self.heliocentric.set_state(name, State::ZERO)?;
                continue;
            }
            let state = match self.trajectory_of(name) {
                Some(trajectory) => {
                    let clamped = trajectory.clamp(t);
                    trajectory.state(&clamped)
                }
                None => self.ephemeris.state(name, t)?,
            };
            self.heliocentric.set_state(name, state)?;
        }

        for index in 0..self.subsystems.len() {
            let planet = self.subsystems[index].planet_name().to_string();
            let planet_state = self.ephemeris.state(&planet, t)?;
            let members: Vec<String> = self.subsystems[index]
                .system()
                .names()
                .filter(|member| *member != planet)
                .map(str::to_string)
                .collect();
            for member in &members {
                let heliocentric = self.ephemeris.state(member, t)?;
                self.subsystems[index].set_member_state(member, heliocentric - planet_state)?;
            }
        }

        self.clock = *t;
        self.heliocentric.invalidate_abm4();
        self.update_earth_moon_barycenter();
        self.events.rewind(t);
        self.refresh_bodies()?;
        self.phase = SimulationPhase::Ready;
        Ok(())
    }

    /// Bring the display bodies' states up to date with the live
    /// particles. Runs after every tick; the orbit rings only change
    /// when the simulation is (re-)seeded.
    fn refresh_body_states(&mut self) -> Result<(), SimulationError> {
        let names: Vec<String> = self
            .bodies
            .iter()
            .map(|body| body.name.clone())
            .filter(|name| !name.is_empty() && name != "Sun")
            .collect();
        for name in &names {
            let state = self.state_of(name)?;
            if let Some(body) = self.bodies.by_name_mut(name) {
                body.state = state;
            }
        }
        Ok(())
    }

    /// Full refresh: live states plus recomputed orbit rings. Runs on
    /// every seed.
    fn refresh_bodies(&mut self) -> Result<(), SimulationError> {
        let mu_sun = params::body("Sun")?.mu_m3_s2();
        let names: Vec<String> = self
            .bodies
            .iter()
            .map(|body| body.name.clone())
            .filter(|name| !name.is_empty())
            .collect();
        for name in &names {
            if name == "Sun" {
                continue;
            }
            let state = self.state_of(name)?;
            let ring = match params::body(name) {
                Ok(record) if record.class == BodyClass::Planet => Some(
                    sample_orbit_from_state(&state.position, &state.velocity, mu_sun),
                ),
                Ok(record) if record.class == BodyClass::Moon => {
                    let planet = record.center_body.expect("moons have a center body");
                    let planet_state = self.state_of(planet)?;
                    let relative = state - planet_state;
                    Some(sample_orbit_from_state(
                        &relative.position,
                        &relative.velocity,
                        params::body(planet)?.mu_m3_s2(),
                    ))
                }
                _ => None,
            };
            if let Some(body) = self.bodies.by_name_mut(name) {
                body.state = state;
                if let Some(ring) = ring {
                    body.orbit = ring;
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Planet subsystems
    // ------------------------------------------------------------------

    /// Start modeling the moons of `planet` as a nested subsystem.
    ///
    /// Moons without ephemeris coverage at the current time (kernel-only
    /// moons with no kernel attached) are left out of the subsystem.
    pub fn create_planet_system(&mut self, planet: &str) -> Result<(), SimulationError> {
        if self.subsystem_index(planet).is_some() {
            return Ok(());
        }
        let record = params::body(planet)?;
        let planet_helio = self.ephemeris.state(planet, &self.clock)?;

        let mut planet_particle = Particle::massive(
            record.mass_kg,
            record.mu_m3_s2(),
            State::ZERO.position,
            State::ZERO.velocity,
        );
        if let Some(oblateness) = OblateBody::for_planet(planet) {
            planet_particle = planet_particle.with_oblateness(oblateness);
        }
        let mut subsystem = PlanetSubsystem::new(planet, planet_particle);
        subsystem.set_post_newtonian(self.heliocentric.post_newtonian());

        let planet_index = self.bodies.index_of(planet);
        for moon in params::moons_of(planet) {
            if moon.name == "Moon" {
                // Earth's moon stays in the heliocentric system.
                continue;
            }
            let heliocentric = match self.ephemeris.state(moon.name, &self.clock) {
                Ok(state) => state,
                Err(EphemerisError::OutOfRange { .. }) | Err(EphemerisError::UnknownBody(_)) => {
                    continue
                }
                Err(other) => return Err(other.into()),
            };
            let relative = heliocentric - planet_helio;
            subsystem.add_particle(
                moon.name,
                Particle::massive(
                    moon.mass_kg,
                    moon.mu_m3_s2(),
                    relative.position,
                    relative.velocity,
                ),
            );
            if self.bodies.index_of(moon.name).is_none() {
                self.bodies.push(Body {
                    name: moon.name.to_string(),
                    diameter_m: moon.diameter_m,
                    state: heliocentric,
                    orbit: sample_orbit_from_state(
                        &relative.position,
                        &relative.velocity,
                        record.mu_m3_s2(),
                    ),
                    center: planet_index,
                });
            }
        }

        self.subsystems.push(subsystem);
        Ok(())
    }

    /// Stop modeling the moons of `planet`.
    pub fn remove_planet_system(&mut self, planet: &str) {
        if let Some(index) = self.subsystem_index(planet) {
            let subsystem = self.subsystems.remove(index);
            for member in subsystem.system().names() {
                if member != planet {
                    self.bodies.remove_by_name(member);
                }
            }
        }
    }

    fn subsystem_index(&self, planet: &str) -> Option<usize> {
        self.subsystems
            .iter()
            .position(|subsystem| subsystem.planet_name() == planet)
    }

    // ------------------------------------------------------------------
    // Advancing
    // ------------------------------------------------------------------

    /// Advance forward by `steps` macro steps of one hour.
    pub fn advance_forward(&mut self, steps: usize) -> Result<(), SimulationError> {
        for _ in 0..steps {
            self.macro_tick(MACRO_STEP_S)?;
        }
        Ok(())
    }

    /// Advance backward by `steps` macro steps of one hour.
    pub fn advance_backward(&mut self, steps: usize) -> Result<(), SimulationError> {
        for _ in 0..steps {
            self.macro_tick(-MACRO_STEP_S)?;
        }
        Ok(())
    }

    /// Advance a single step of at most one hour in either direction,
    /// always through RK4.
    pub fn advance_single_step(&mut self, dt_s: f64) -> Result<(), SimulationError> {
        let dt = dt_s.clamp(-MACRO_STEP_S, MACRO_STEP_S);
        self.phase = SimulationPhase::Advancing;
        let result = self.single_step_inner(dt);
        self.finish_tick(result)
    }

    fn macro_tick(&mut self, dt: f64) -> Result<(), SimulationError> {
        self.phase = SimulationPhase::Advancing;
        let result = self.macro_tick_inner(dt);
        self.finish_tick(result)
    }

    fn finish_tick(&mut self, result: Result<(), SimulationError>) -> Result<(), SimulationError> {
        match result {
            Ok(()) => {
                self.phase = SimulationPhase::Ready;
                Ok(())
            }
            Err(err) => {
                self.phase = SimulationPhase::Unseeded;
                Err(err)
            }
        }
    }

    fn macro_tick_inner(&mut self, dt: f64) -> Result<(), SimulationError> {
        self.advance_subsystems(dt)?;
        if self.heliocentric.post_newtonian() {
            self.heliocentric.advance_rk4(dt)?;
        } else {
            let half = dt / 2.0;
            self.heliocentric.advance_abm4(half)?;
            self.heliocentric.advance_abm4(half)?;
        }
        self.heliocentric.correct_drift();
        self.update_earth_moon_barycenter();
        self.clock = self.clock.plus_seconds(dt);
        if dt > 0.0 {
            self.apply_due_event()?;
        }
        self.refresh_body_states()?;
        Ok(())
    }

    fn single_step_inner(&mut self, dt: f64) -> Result<(), SimulationError> {
        self.advance_subsystems(dt)?;
        self.heliocentric.advance_rk4(dt)?;
        self.heliocentric.correct_drift();
        self.update_earth_moon_barycenter();
        self.clock = self.clock.plus_seconds(dt);
        if dt > 0.0 {
            self.apply_due_event()?;
        }
        self.refresh_body_states()?;
        Ok(())
    }

    /// Advance every planet subsystem across `dt` in sub-steps of at
    /// most ten minutes, anchored to the heliocentric planet states.
    fn advance_subsystems(&mut self, dt: f64) -> Result<(), SimulationError> {
        if self.subsystems.is_empty() || dt == 0.0 {
            return Ok(());
        }
        for subsystem in &mut self.subsystems {
            let planet = self
                .heliocentric
                .particle(subsystem.planet_name())
                .ok_or_else(|| {
                    SimulationError::UnknownBody(subsystem.planet_name().to_string())
                })?
                .state();
            subsystem.correct_drift_to_anchor(&planet);
        }
        let sign = dt.signum();
        for subsystem in &mut self.subsystems {
            let mut remaining = dt.abs();
            while remaining > 0.0 {
                let sub_step = remaining.min(SUBSYSTEM_MAX_STEP_S);
                subsystem.advance_rk4(sign * sub_step)?;
                remaining -= sub_step;
            }
            subsystem.correct_drift();
        }
        Ok(())
    }

    fn apply_due_event(&mut self) -> Result<(), SimulationError> {
        if let Some(event) = self.events.pop_due(&self.clock) {
            self.phase = SimulationPhase::EventPending;
            self.apply_override(&event)?;
        }
        Ok(())
    }

    /// Re-seat the named particle at exactly the event state. The
    /// multi-step history is dropped by the override.
    fn apply_override(&mut self, event: &SpacecraftEvent) -> Result<(), SimulationError> {
        if self.heliocentric.particle(&event.body).is_some() {
            self.heliocentric.set_state(&event.body, event.state)?;
            return Ok(());
        }
        for index in 0..self.subsystems.len() {
            let planet = self.subsystems[index].planet_name().to_string();
            if planet != event.body && self.subsystems[index].contains(&event.body) {
                let planet_state = self
                    .heliocentric
                    .particle(&planet)
                    .ok_or(SimulationError::UnknownBody(planet))?
                    .state();
                self.subsystems[index]
                    .set_member_state(&event.body, event.state - planet_state)?;
                return Ok(());
            }
        }
        // Events may address bodies that are not currently modeled.
        Ok(())
    }

    fn update_earth_moon_barycenter(&mut self) {
        let earth = self.heliocentric.particle("Earth");
        let moon = self.heliocentric.particle("Moon");
        if let (Some(earth), Some(moon)) = (earth, moon) {
            let total_mu = earth.mu_m3_s2() + moon.mu_m3_s2();
            let position = (earth.position() * earth.mu_m3_s2()
                + moon.position() * moon.mu_m3_s2())
                * (1.0 / total_mu);
            let velocity = (earth.velocity() * earth.mu_m3_s2()
                + moon.velocity() * moon.mu_m3_s2())
                * (1.0 / total_mu);
            self.earth_moon_barycenter = State::new(position, velocity);
        }
    }

    // ------------------------------------------------------------------
    // Particle access
    // ------------------------------------------------------------------

    /// Heliocentric state of a particle, the derived barycenter, or a
    /// subsystem moon (translated by its planet).
    pub fn state_of(&self, name: &str) -> Result<State, SimulationError> {
        if let Some(particle) = self.heliocentric.particle(name) {
            return Ok(particle.state());
        }
        if name == "EarthMoonBarycenter" {
            return Ok(self.earth_moon_barycenter);
        }
        for subsystem in &self.subsystems {
            if subsystem.planet_name() != name && subsystem.contains(name) {
                let planet = self
                    .heliocentric
                    .particle(subsystem.planet_name())
                    .ok_or_else(|| {
                        SimulationError::UnknownBody(subsystem.planet_name().to_string())
                    })?
                    .state();
                let relative = subsystem
                    .member_state(name)
                    .expect("member was just checked");
                return Ok(planet + relative);
            }
        }
        Err(SimulationError::UnknownBody(name.to_string()))
    }

    pub fn position_of(&self, name: &str) -> Result<orrery_core::Vector3D, SimulationError> {
        self.state_of(name).map(|state| state.position)
    }

    pub fn velocity_of(&self, name: &str) -> Result<orrery_core::Vector3D, SimulationError> {
        self.state_of(name).map(|state| state.velocity)
    }

    pub fn mass_of(&self, name: &str) -> Result<f64, SimulationError> {
        self.find_particle(name)
            .map(|particle| particle.mass_kg())
            .ok_or_else(|| SimulationError::UnknownBody(name.to_string()))
    }

    pub fn mu_of(&self, name: &str) -> Result<f64, SimulationError> {
        self.find_particle(name)
            .map(|particle| particle.mu_m3_s2())
            .ok_or_else(|| SimulationError::UnknownBody(name.to_string()))
    }

    /// Change a particle's mass everywhere it is modeled. The multi-step
    /// histories are dropped.
    pub fn set_mass(&mut self, name: &str, mass_kg: f64) -> Result<(), SimulationError> {
        let mut found = false;
        if self.heliocentric.particle(name).is_some() {
            self.heliocentric.set_mass(name, mass_kg)?;
            found = true;
        }
        for subsystem in &mut self.subsystems {
            if subsystem.contains(name) {
                subsystem.set_mass(name, mass_kg)?;
                found = true;
            }
        }
        if found {
            Ok(())
        } else {
            Err(SimulationError::UnknownBody(name.to_string()))
        }
    }

    /// Overwrite a particle's heliocentric state (subsystem moons are
    /// translated into their planet frame).
    pub fn set_state_of(&mut self, name: &str, state: State) -> Result<(), SimulationError> {
        let event = SpacecraftEvent {
            instant: self.clock,
            body: name.to_string(),
            state,
        };
        if self.heliocentric.particle(name).is_none()
            && !self
                .subsystems
                .iter()
                .any(|subsystem| subsystem.contains(name))
        {
            return Err(SimulationError::UnknownBody(name.to_string()));
        }
        self.apply_override(&event)
    }

    fn find_particle(&self, name: &str) -> Option<&Particle> {
        if let Some(particle) = self.heliocentric.particle(name) {
            return Some(particle);
        }
        self.subsystems
            .iter()
            .find_map(|subsystem| subsystem.system().particle(name))
    }

    // ------------------------------------------------------------------
    // Spacecraft and events
    // ------------------------------------------------------------------

    /// Register a trajectory constructor under a craft name.
    pub fn register_trajectory(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn Fn() -> Box<dyn Trajectory>>,
    ) {
        self.registry.register(name, factory);
    }

    /// Add a spacecraft from a registered trajectory.
    pub fn add_spacecraft(&mut self, name: &str) -> Result<(), SimulationError> {
        let trajectory = self
            .registry
            .create(name)
            .ok_or_else(|| SimulationError::UnknownTrajectory(name.to_string()))?;
        self.add_spacecraft_with(name, trajectory)
    }

    /// Add a spacecraft with an explicit trajectory: a massless particle
    /// seeded from the trajectory at the current time.
    pub fn add_spacecraft_with(
        &mut self,
        name: &str,
        trajectory: Box<dyn Trajectory>,
    ) -> Result<(), SimulationError> {
        let clamped = trajectory.clamp(&self.clock);
        let state = trajectory.state(&clamped);
        self.heliocentric.add_particle(
            name,
            Particle::massless(DEFAULT_MASS_KG, state.position, state.velocity),
        );
        let sun = self.bodies.index_of("Sun");
        self.bodies.push(Body {
            name: name.to_string(),
            diameter_m: 0.0,
            state,
            orbit: Vec::new(),
            center: sun,
        });
        self.trajectories.push((name.to_string(), trajectory));
        Ok(())
    }

    /// Remove a spacecraft and prune its scheduled events.
    pub fn remove_spacecraft(&mut self, name: &str) {
        self.events.remove_for(name);
        self.trajectories.retain(|(craft, _)| craft != name);
        self.heliocentric.remove_particle(name);
        self.bodies.remove_by_name(name);
    }

    /// Schedule an event; ordering by instant is maintained.
    pub fn add_event(&mut self, event: SpacecraftEvent) {
        self.events.add(event);
    }

    fn trajectory_of(&self, name: &str) -> Option<&dyn Trajectory> {
        self.trajectories
            .iter()
            .find(|(craft, _)| craft == name)
            .map(|(_, trajectory)| trajectory.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spacecraft::TableTrajectory;
    use orrery_core::vector::Vector3D;

    fn simulation_at_j2000() -> SolarSystem {
        SolarSystem::new(SolarSystemEphemeris::new(), &Instant::J2000).unwrap()
    }

    #[test]
    fn construction_seeds_all_catalogue_bodies() {
        let simulation = simulation_at_j2000();
        assert_eq!(simulation.phase(), SimulationPhase::Ready);
        for name in ["Sun", "Mercury", "Earth", "Moon", "Pluto", "Ceres", "Halley"] {
            assert!(
                simulation.state_of(name).is_ok(),
                "missing particle for {name}"
            );
        }
        // The derived barycenter sits between the Earth and the Moon.
        let earth = simulation.position_of("Earth").unwrap();
        let moon = simulation.position_of("Moon").unwrap();
        let barycenter = simulation.earth_moon_barycenter().position;
        assert!(barycenter.distance(&earth) < earth.distance(&moon));
    }

    #[test]
    fn advancing_moves_the_clock_both_ways() {
        let mut simulation = simulation_at_j2000();
        simulation.advance_forward(3).unwrap();
        assert_eq!(
            simulation.time().seconds_past_j2000(),
            3.0 * MACRO_STEP_S
        );
        simulation.advance_backward(3).unwrap();
        assert_eq!(simulation.time().seconds_past_j2000(), 0.0);
        assert_eq!(simulation.phase(), SimulationPhase::Ready);
    }

    #[test]
    fn set_time_re_seeds_from_the_ephemeris() {
        let mut simulation = simulation_at_j2000();
        simulation.advance_forward(10).unwrap();
        let target = Instant::from_utc(2031, 5, 1, 0, 0, 0);
        simulation.set_time(&target).unwrap();
        assert_eq!(simulation.time(), target);
        assert!(!simulation.abm4_valid());
        let expected = SolarSystemEphemeris::new()
            .state("Mars", &target)
            .unwrap();
        let seeded = simulation.state_of("Mars").unwrap();
        assert_eq!(seeded, expected);
    }

    #[test]
    fn events_reseat_particles_exactly() {
        let mut simulation = simulation_at_j2000();
        let event_state = State::new(
            Vector3D::new(1.0e11, 2.0e10, 3.0e9),
            Vector3D::new(10.0, 20.0, 30.0),
        );
        simulation.add_event(SpacecraftEvent {
            instant: Instant::from_seconds_past_j2000(1.5 * MACRO_STEP_S),
            body: "Ceres".to_string(),
            state: event_state,
        });
        simulation.advance_forward(2).unwrap();
        assert_eq!(simulation.state_of("Ceres").unwrap(), event_state);
        assert!(!simulation.abm4_valid());
    }

    #[test]
    fn spacecraft_lifecycle_prunes_events() {
        let mut simulation = simulation_at_j2000();
        let trajectory = TableTrajectory::new(vec![(
            Instant::J2000,
            State::new(Vector3D::new(1.5e11, 0.0, 0.0), Vector3D::new(0.0, 3.0e4, 0.0)),
        )]);
        simulation
            .add_spacecraft_with("probe", Box::new(trajectory))
            .unwrap();
        assert!(simulation.state_of("probe").is_ok());
        simulation.add_event(SpacecraftEvent {
            instant: Instant::from_seconds_past_j2000(7.0 * MACRO_STEP_S),
            body: "probe".to_string(),
            state: State::ZERO,
        });
        simulation.remove_spacecraft("probe");
        assert!(simulation.state_of("probe").is_err());
        assert_eq!(simulation.pending_events(), 0);
    }

    #[test]
    fn planet_system_creation_and_removal() {
        let mut simulation = simulation_at_j2000();
        simulation.create_planet_system("Jupiter").unwrap();
        assert_eq!(simulation.planet_systems(), ["Jupiter"]);
        // The Galilean moons carry fallback elements, so they are
        // modeled even without kernels.
        let io = simulation.state_of("Io").unwrap();
        let jupiter = simulation.state_of("Jupiter").unwrap();
        let separation = io.position.distance(&jupiter.position);
        assert!(
            (3.0e8..=6.0e8).contains(&separation),
            "Io-Jupiter distance {separation} m is implausible"
        );
        simulation.advance_forward(2).unwrap();
        simulation.remove_planet_system("Jupiter");
        assert!(simulation.planet_systems().is_empty());
        assert!(simulation.state_of("Io").is_err());
    }

    #[test]
    fn registered_trajectories_are_an_extension_point() {
        let mut simulation = simulation_at_j2000();
        simulation.register_trajectory(
            "pioneer",
            Box::new(|| {
                Box::new(TableTrajectory::new(vec![(
                    Instant::J2000,
                    State::new(Vector3D::new(7.0e11, 0.0, 0.0), Vector3D::ZERO),
                )])) as Box<dyn Trajectory>
            }),
        );
        simulation.add_spacecraft("pioneer").unwrap();
        assert_eq!(
            simulation.position_of("pioneer").unwrap(),
            Vector3D::new(7.0e11, 0.0, 0.0)
        );
        assert!(matches!(
            simulation.add_spacecraft("voyager-9"),
            Err(SimulationError::UnknownTrajectory(_))
        ));
    }
}
