//! Spacecraft trajectories.
//!
//! A trajectory is a pure function of time over a validity window; the
//! orchestrator samples it to seed and re-seed the craft's massless
//! particle. Concrete trajectories register through a factory map keyed
//! by craft name, which is the extension point mission definitions plug
//! into.

use std::collections::HashMap;

use orrery_core::state::State;
use orrery_core::time::Instant;

/// A spacecraft path: heliocentric state as a pure function of time,
/// defined over a validity window.
pub trait Trajectory {
    fn first_valid(&self) -> Instant;
    fn last_valid(&self) -> Instant;

    /// State at `instant`; callers clamp the instant into the validity
    /// window first.
    fn state(&self, instant: &Instant) -> State;

    /// The instant clamped into this trajectory's window.
    fn clamp(&self, instant: &Instant) -> Instant {
        if *instant < self.first_valid() {
            self.first_valid()
        } else if *instant > self.last_valid() {
            self.last_valid()
        } else {
            *instant
        }
    }
}

/// Factory map from craft name to trajectory constructor.
#[derive(Default)]
pub struct TrajectoryRegistry {
    factories: HashMap<String, Box<dyn Fn() -> Box<dyn Trajectory>>>,
}

impl TrajectoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under a craft name, replacing any previous
    /// registration.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: Box<dyn Fn() -> Box<dyn Trajectory>>,
    ) {
        self.factories.insert(name.into(), factory);
    }

    /// Build the trajectory registered under `name`.
    pub fn create(&self, name: &str) -> Option<Box<dyn Trajectory>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

/// A trajectory defined by time-ordered state samples, interpolated
/// linearly. Good enough for cruise segments between events; manoeuvres
/// are modeled by the event schedule re-seating the craft.
pub struct TableTrajectory {
    samples: Vec<(Instant, State)>,
}

impl TableTrajectory {
    /// Build from samples sorted by instant. At least one sample is
    /// required.
    pub fn new(mut samples: Vec<(Instant, State)>) -> Self {
        assert!(!samples.is_empty(), "a trajectory needs at least one sample");
        samples.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .expect("trajectory sample instants are finite")
        });
        Self { samples }
    }
}

impl Trajectory for TableTrajectory {
    fn first_valid(&self) -> Instant {
        self.samples[0].0
    }

    fn last_valid(&self) -> Instant {
        self.samples[self.samples.len() - 1].0
    }

    fn state(&self, instant: &Instant) -> State {
        let clamped = self.clamp(instant);
        let after = self
            .samples
            .partition_point(|(sample_instant, _)| *sample_instant <= clamped);
        if after == 0 {
            return self.samples[0].1;
        }
        if after == self.samples.len() {
            return self.samples[self.samples.len() - 1].1;
        }
        let (t0, s0) = &self.samples[after - 1];
        let (t1, s1) = &self.samples[after];
        let span = t1.seconds_past_j2000() - t0.seconds_past_j2000();
        if span == 0.0 {
            return *s0;
        }
        let fraction = (clamped.seconds_past_j2000() - t0.seconds_past_j2000()) / span;
        State::new(
            s0.position + (s1.position - s0.position) * fraction,
            s0.velocity + (s1.velocity - s0.velocity) * fraction,
        )
    }
}
