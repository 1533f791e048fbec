//! The particle system: acceleration summation and integrators.

use orrery_core::constants::SPEED_OF_LIGHT_M_S;
use orrery_core::state::State;
use orrery_core::vector::Vector3D;

use crate::particle::{Particle, HISTORY_LEN};
use crate::NbodyError;

/// A set of named point masses advanced as one system.
///
/// Particle states live in whatever inertial frame the caller seeds them
/// in; the dynamics are translation-invariant. Only the owner mutates the
/// system, and every advance is transactional: a step that produces a
/// non-finite component rolls the whole system back and reports a
/// numerical failure.
#[derive(Debug, Clone, Default)]
pub struct ParticleSystem {
    names: Vec<String>,
    particles: Vec<Particle>,
    post_newtonian: bool,
    /// Number of valid (velocity, acceleration) samples in the cyclic
    /// histories; the ABM4 scheme needs all four.
    abm4_samples: usize,
    abm4_cursor: usize,
    /// Sign of the last multi-step advance; a reversal invalidates the
    /// histories.
    last_step_direction: f64,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a particle under the given name.
    pub fn add_particle(&mut self, name: impl Into<String>, particle: Particle) {
        let name = name.into();
        match self.index_of(&name) {
            Some(index) => self.particles[index] = particle,
            None => {
                self.names.push(name);
                self.particles.push(particle);
            }
        }
        self.invalidate_abm4();
    }

    /// Remove a particle; returns it if it existed.
    pub fn remove_particle(&mut self, name: &str) -> Option<Particle> {
        let index = self.index_of(name)?;
        self.names.remove(index);
        self.invalidate_abm4();
        Some(self.particles.remove(index))
    }

    pub fn particle(&self, name: &str) -> Option<&Particle> {
        self.index_of(name).map(|index| &self.particles[index])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn post_newtonian(&self) -> bool {
        self.post_newtonian
    }

    /// Enable or disable the post-Newtonian correction.
    pub fn set_post_newtonian(&mut self, flag: bool) {
        if self.post_newtonian != flag {
            self.post_newtonian = flag;
            self.invalidate_abm4();
        }
    }

    /// Overwrite a particle's kinematic state (external override).
    pub fn set_state(&mut self, name: &str, state: State) -> Result<(), NbodyError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| NbodyError::UnknownParticle(name.to_string()))?;
        self.particles[index].set_position(state.position);
        self.particles[index].set_velocity(state.velocity);
        self.invalidate_abm4();
        Ok(())
    }

    /// Change a particle's mass. μ is left untouched: it is measured
    /// independently of the mass.
    pub fn set_mass(&mut self, name: &str, mass_kg: f64) -> Result<(), NbodyError> {
        let index = self
            .index_of(name)
            .ok_or_else(|| NbodyError::UnknownParticle(name.to_string()))?;
        self.particles[index].set_mass_kg(mass_kg);
        self.invalidate_abm4();
        Ok(())
    }

    /// Whether the multi-step histories are fully primed.
    pub fn abm4_valid(&self) -> bool {
        self.abm4_samples == HISTORY_LEN
    }

    /// Drop the multi-step histories; the next ABM4 advances bootstrap
    /// through RK4 again.
    pub fn invalidate_abm4(&mut self) {
        self.abm4_samples = 0;
        self.abm4_cursor = 0;
        self.last_step_direction = 0.0;
    }

    /// Advance the whole system by one classical RK4 step.
    pub fn advance_rk4(&mut self, dt_s: f64) -> Result<(), NbodyError> {
        if dt_s == 0.0 || self.is_empty() {
            return Ok(());
        }
        let snapshot = self.clone_kinematics();
        self.rk4_step(dt_s);
        self.invalidate_abm4();
        self.commit_or_rollback(snapshot)
    }

    /// Advance the whole system by one ABM4 step.
    ///
    /// While the histories are invalid the scheme bootstraps through RK4
    /// for four sub-steps, recording samples as it goes, then switches to
    /// the predictor-corrector.
    pub fn advance_abm4(&mut self, dt_s: f64) -> Result<(), NbodyError> {
        if dt_s == 0.0 || self.is_empty() {
            return Ok(());
        }
        if self.last_step_direction != 0.0 && dt_s.signum() != self.last_step_direction {
            self.invalidate_abm4();
        }
        let snapshot = self.clone_kinematics();
        if self.abm4_samples < HISTORY_LEN {
            self.rk4_step(dt_s);
            self.push_history();
            self.abm4_samples += 1;
        } else {
            self.abm4_step(dt_s);
        }
        self.last_step_direction = dt_s.signum();
        self.commit_or_rollback(snapshot)
    }

    /// Re-anchor the frame: subtract the Sun's state from every particle
    /// when a particle named "Sun" exists, the mass-weighted
    /// center-of-mass state otherwise.
    pub fn correct_drift(&mut self) {
        let anchor = match self.particle("Sun") {
            Some(sun) => sun.state(),
            None => self.center_of_mass_state(),
        };
        self.correct_drift_by(&anchor);
    }

    /// Subtract the given state from every particle.
    pub fn correct_drift_by(&mut self, anchor: &State) {
        let delta = State::ZERO - *anchor;
        self.translate(&delta);
    }

    /// Shift every particle by the given state offset.
    pub fn translate(&mut self, delta: &State) {
        for particle in &mut self.particles {
            let shifted = particle.state() + *delta;
            particle.set_position(shifted.position);
            particle.set_velocity(shifted.velocity);
        }
    }

    /// Mass-weighted center-of-mass state over the force-exerting
    /// particles.
    pub fn center_of_mass_state(&self) -> State {
        let mut position = Vector3D::ZERO;
        let mut velocity = Vector3D::ZERO;
        let mut total_mass = 0.0;
        for particle in self.particles.iter().filter(|p| p.exerts_gravity()) {
            position += particle.position() * particle.mass_kg();
            velocity += particle.velocity() * particle.mass_kg();
            total_mass += particle.mass_kg();
        }
        if total_mass == 0.0 {
            return State::ZERO;
        }
        State::new(position * (1.0 / total_mass), velocity * (1.0 / total_mass))
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|candidate| candidate == name)
    }

    /// Accelerations for the given trial positions and velocities.
    ///
    /// The summation runs over force-exerting sources only, skipping
    /// self-interaction by index identity. Oblate sources add their J2
    /// term inside the cutoff radius; the post-Newtonian flag adds the
    /// Schwarzschild-style correction around the most massive body.
    fn accelerations(&self, positions: &[Vector3D], velocities: &[Vector3D]) -> Vec<Vector3D> {
        let count = positions.len();
        let mut accelerations = vec![Vector3D::ZERO; count];
        for i in 0..count {
            for (j, source) in self.particles.iter().enumerate() {
                if i == j || !source.exerts_gravity() {
                    continue;
                }
                let offset = positions[j] - positions[i];
                let distance = offset.norm();
                let mu = source.mu_m3_s2();
                accelerations[i] += offset * (mu / (distance * distance * distance));
                if let Some(oblate) = source.oblateness() {
                    let from_center = positions[i] - positions[j];
                    accelerations[i] += oblate.acceleration(mu, &from_center);
                }
            }
        }

        if self.post_newtonian {
            if let Some(central) = self.most_massive_index() {
                let mu = self.particles[central].mu_m3_s2();
                let c_squared = SPEED_OF_LIGHT_M_S * SPEED_OF_LIGHT_M_S;
                for i in 0..count {
                    if i == central {
                        continue;
                    }
                    let r_vec = positions[i] - positions[central];
                    let v_vec = velocities[i] - velocities[central];
                    let r = r_vec.norm();
                    let radial = 4.0 * mu / r - v_vec.norm_squared();
                    let correction = (r_vec * radial + v_vec * (4.0 * r_vec.dot(&v_vec)))
                        * (mu / (c_squared * r * r * r));
                    accelerations[i] += correction;
                }
            }
        }

        accelerations
    }

    fn most_massive_index(&self) -> Option<usize> {
        self.particles
            .iter()
            .enumerate()
            .filter(|(_, p)| p.exerts_gravity())
            .max_by(|(_, a), (_, b)| {
                a.mass_kg()
                    .partial_cmp(&b.mass_kg())
                    .expect("masses are finite")
            })
            .map(|(index, _)| index)
    }

    /// One un-checked classical RK4 step over the whole system.
    fn rk4_step(&mut self, h: f64) {
        let p0: Vec<Vector3D> = self.particles.iter().map(Particle::position).collect();
        let v0: Vec<Vector3D> = self.particles.iter().map(Particle::velocity).collect();

        let a1 = self.accelerations(&p0, &v0);
        let p2 = shifted(&p0, &v0, h / 2.0);
        let v2 = shifted(&v0, &a1, h / 2.0);
        let a2 = self.accelerations(&p2, &v2);
        let p3 = shifted(&p0, &v2, h / 2.0);
        let v3 = shifted(&v0, &a2, h / 2.0);
        let a3 = self.accelerations(&p3, &v3);
        let p4 = shifted(&p0, &v3, h);
        let v4 = shifted(&v0, &a3, h);
        let a4 = self.accelerations(&p4, &v4);

        for (index, particle) in self.particles.iter_mut().enumerate() {
            let dp = (v0[index] + 2.0 * v2[index] + 2.0 * v3[index] + v4[index]) * (h / 6.0);
            let dv = (a1[index] + 2.0 * a2[index] + 2.0 * a3[index] + a4[index]) * (h / 6.0);
            particle.set_position(p0[index] + dp);
            particle.set_velocity(v0[index] + dv);
        }
    }

    /// One un-checked ABM4 predictor-corrector step. The histories must
    /// be fully primed, with the newest sample taken at the current
    /// state.
    fn abm4_step(&mut self, h: f64) {
        let n0 = self.abm4_cursor;
        let n1 = (self.abm4_cursor + HISTORY_LEN - 1) % HISTORY_LEN;
        let n2 = (self.abm4_cursor + HISTORY_LEN - 2) % HISTORY_LEN;
        let n3 = (self.abm4_cursor + HISTORY_LEN - 3) % HISTORY_LEN;

        let p0: Vec<Vector3D> = self.particles.iter().map(Particle::position).collect();
        let v0: Vec<Vector3D> = self.particles.iter().map(Particle::velocity).collect();

        // Adams-Bashforth predictor.
        let mut predicted_positions = Vec::with_capacity(p0.len());
        let mut predicted_velocities = Vec::with_capacity(v0.len());
        for (index, particle) in self.particles.iter().enumerate() {
            let history = &particle.history;
            let dp = (55.0 * history[n0].0 - 59.0 * history[n1].0 + 37.0 * history[n2].0
                - 9.0 * history[n3].0)
                * (h / 24.0);
            let dv = (55.0 * history[n0].1 - 59.0 * history[n1].1 + 37.0 * history[n2].1
                - 9.0 * history[n3].1)
                * (h / 24.0);
            predicted_positions.push(p0[index] + dp);
            predicted_velocities.push(v0[index] + dv);
        }

        // Adams-Moulton corrector using the derivative at the prediction.
        let predicted_accelerations =
            self.accelerations(&predicted_positions, &predicted_velocities);
        for (index, particle) in self.particles.iter_mut().enumerate() {
            let history = &particle.history;
            let dp = (9.0 * predicted_velocities[index] + 19.0 * history[n0].0
                - 5.0 * history[n1].0
                + history[n2].0)
                * (h / 24.0);
            let dv = (9.0 * predicted_accelerations[index] + 19.0 * history[n0].1
                - 5.0 * history[n1].1
                + history[n2].1)
                * (h / 24.0);
            particle.set_position(p0[index] + dp);
            particle.set_velocity(v0[index] + dv);
        }

        self.push_history();
    }

    /// Record (velocity, acceleration) at the current state as the newest
    /// history sample.
    fn push_history(&mut self) {
        let positions: Vec<Vector3D> = self.particles.iter().map(Particle::position).collect();
        let velocities: Vec<Vector3D> = self.particles.iter().map(Particle::velocity).collect();
        let accelerations = self.accelerations(&positions, &velocities);
        self.abm4_cursor = (self.abm4_cursor + 1) % HISTORY_LEN;
        let cursor = self.abm4_cursor;
        for (index, particle) in self.particles.iter_mut().enumerate() {
            particle.history[cursor] = (velocities[index], accelerations[index]);
        }
    }

    fn clone_kinematics(&self) -> Vec<Particle> {
        self.particles.clone()
    }

    fn commit_or_rollback(&mut self, snapshot: Vec<Particle>) -> Result<(), NbodyError> {
        let bad = self
            .particles
            .iter()
            .position(|particle| !particle.state().is_finite());
        match bad {
            None => Ok(()),
            Some(index) => {
                let name = self.names[index].clone();
                self.particles = snapshot;
                self.invalidate_abm4();
                Err(NbodyError::NonFinite { particle: name })
            }
        }
    }
}

fn shifted(base: &[Vector3D], rate: &[Vector3D], h: f64) -> Vec<Vector3D> {
    base.iter()
        .zip(rate)
        .map(|(value, slope)| *value + *slope * h)
        .collect()
}
