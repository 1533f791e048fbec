//! Approximate Keplerian ephemeris, valid 3000 BC through AD 3000.
//!
//! Positions come from the registry's element tables: long-form rows with
//! secular rates for the planets (including the outer-planet mean-anomaly
//! augmentation) and perihelion-passage rows for small bodies. Velocities
//! are the analytic two-body derivatives, never numerical differences.
//!
//! Convention note: the long-form "Earth" row describes the Earth-Moon
//! barycenter; this source interprets it as Earth proper, as its source
//! tables historically have. The Moon is propagated around that Earth and
//! reported heliocentrically.

use orrery_core::state::State;
use orrery_core::time::Instant;
use orrery_kepler::state::position_velocity_from_elements;
use orrery_params::{self as params, BodyClass, BodyRecord};

use crate::{EphemerisError, EphemerisSource};

/// The all-time fallback source.
#[derive(Debug, Default)]
pub struct KeplerianEphemeris;

impl KeplerianEphemeris {
    pub fn new() -> Self {
        Self
    }

    fn record_state(
        &self,
        record: &BodyRecord,
        instant: &Instant,
    ) -> Result<State, EphemerisError> {
        match record.class {
            BodyClass::Star => Ok(State::ZERO),
            BodyClass::Planet => {
                let elements = record.elements.as_ref().ok_or_else(|| {
                    EphemerisError::UnknownBody(record.name.to_string())
                })?;
                let mu_sun = params::body("Sun")?.mu_m3_s2();
                let (position, velocity) =
                    position_velocity_from_elements(&elements.at(instant), mu_sun)?;
                Ok(State::new(position, velocity))
            }
            BodyClass::Moon => {
                let elements = record.elements.as_ref().ok_or_else(|| {
                    EphemerisError::UnknownBody(record.name.to_string())
                })?;
                let planet_name = record
                    .center_body
                    .expect("moon-class records carry a center body");
                let planet = params::body(planet_name)?;
                let (position, velocity) =
                    position_velocity_from_elements(&elements.at(instant), planet.mu_m3_s2())?;
                let planet_state = self.state(planet_name, instant)?;
                Ok(planet_state + State::new(position, velocity))
            }
        }
    }
}

impl EphemerisSource for KeplerianEphemeris {
    fn name(&self) -> &'static str {
        "approximate Keplerian ephemeris"
    }

    fn first_valid(&self) -> Instant {
        Instant::from_utc(-2999, 1, 1, 0, 0, 0)
    }

    fn last_valid(&self) -> Instant {
        Instant::from_utc(3000, 12, 31, 23, 59, 59)
    }

    fn bodies(&self) -> Vec<&'static str> {
        params::BODIES
            .iter()
            .filter(|record| record.class == BodyClass::Star || record.elements.is_some())
            .map(|record| record.name)
            .collect()
    }

    fn state(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        if *instant < self.first_valid() || *instant > self.last_valid() {
            return Err(EphemerisError::OutOfRange {
                source_name: self.name(),
                instant: *instant,
            });
        }
        let record = params::body(body)?;
        if record.class != BodyClass::Star && record.elements.is_none() {
            return Err(EphemerisError::UnknownBody(body.to_string()));
        }
        self.record_state(record, instant)
    }
}
