//! Composite solar-system ephemeris.
//!
//! Dispatches each `(body, instant)` query to the covering source with
//! the narrowest validity window, so kernel-backed providers win over the
//! all-time Keplerian fallback wherever they apply. Planet-system sources
//! answer planetocentrically and are translated here by adding the owning
//! planet's heliocentric state.

use orrery_core::state::State;
use orrery_core::time::Instant;

use crate::file_source::{PlanetKernelEphemeris, PlanetSystemKernelEphemeris};
use crate::kepler_source::KeplerianEphemeris;
use crate::{EphemerisError, EphemerisSource};

/// The provider the rest of the system talks to.
pub struct SolarSystemEphemeris {
    kepler: KeplerianEphemeris,
    planet_kernel: Option<PlanetKernelEphemeris>,
    moon_systems: Vec<PlanetSystemKernelEphemeris>,
}

enum Candidate<'a> {
    Heliocentric(&'a dyn EphemerisSource),
    MoonSystem(&'a PlanetSystemKernelEphemeris),
}

impl Candidate<'_> {
    fn window_seconds(&self) -> f64 {
        let (first, last) = match self {
            Candidate::Heliocentric(source) => (source.first_valid(), source.last_valid()),
            Candidate::MoonSystem(source) => (source.first_valid(), source.last_valid()),
        };
        last.seconds_past_j2000() - first.seconds_past_j2000()
    }
}

impl SolarSystemEphemeris {
    /// A composite with only the approximate Keplerian fallback.
    pub fn new() -> Self {
        Self {
            kepler: KeplerianEphemeris::new(),
            planet_kernel: None,
            moon_systems: Vec::new(),
        }
    }

    /// Attach a DE-series planet kernel source.
    pub fn with_planet_kernel(mut self, kernel: PlanetKernelEphemeris) -> Self {
        self.planet_kernel = Some(kernel);
        self
    }

    /// Attach a kernel-backed planet-system (moon) source.
    pub fn with_moon_system(mut self, system: PlanetSystemKernelEphemeris) -> Self {
        self.moon_systems.push(system);
        self
    }

    fn candidates<'a>(&'a self, body: &str, instant: &Instant) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::new();
        for system in &self.moon_systems {
            if system.covers(body, instant) {
                candidates.push(Candidate::MoonSystem(system));
            }
        }
        if let Some(kernel) = &self.planet_kernel {
            if kernel.covers(body, instant) {
                candidates.push(Candidate::Heliocentric(kernel));
            }
        }
        if self.kepler.covers(body, instant) {
            candidates.push(Candidate::Heliocentric(&self.kepler));
        }
        candidates
    }

    fn body_is_known(&self, body: &str) -> bool {
        self.bodies().iter().any(|candidate| *candidate == body)
    }
}

impl Default for SolarSystemEphemeris {
    fn default() -> Self {
        Self::new()
    }
}

impl EphemerisSource for SolarSystemEphemeris {
    fn name(&self) -> &'static str {
        "solar-system ephemeris"
    }

    fn first_valid(&self) -> Instant {
        self.kepler.first_valid()
    }

    fn last_valid(&self) -> Instant {
        self.kepler.last_valid()
    }

    fn bodies(&self) -> Vec<&'static str> {
        let mut bodies = self.kepler.bodies();
        if let Some(kernel) = &self.planet_kernel {
            bodies.extend(kernel.bodies());
        }
        for system in &self.moon_systems {
            bodies.extend(system.bodies());
        }
        bodies.sort_unstable();
        bodies.dedup();
        bodies
    }

    fn state(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        let candidates = self.candidates(body, instant);

        // Narrower window means higher fidelity.
        let best = candidates.into_iter().min_by(|a, b| {
            a.window_seconds()
                .partial_cmp(&b.window_seconds())
                .expect("validity windows are finite")
        });

        match best {
            Some(Candidate::Heliocentric(source)) => source.state(body, instant),
            Some(Candidate::MoonSystem(system)) => {
                let planetocentric = system.state(body, instant)?;
                let planet = self.state(system.planet(), instant)?;
                Ok(planet + planetocentric)
            }
            None if self.body_is_known(body) => Err(EphemerisError::OutOfRange {
                source_name: self.name(),
                instant: *instant,
            }),
            None => Err(EphemerisError::UnknownBody(body.to_string())),
        }
    }

    fn state_barycentric(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        match &self.planet_kernel {
            Some(kernel) if kernel.covers(body, instant) => {
                kernel.state_barycentric(body, instant)
            }
            _ => Err(EphemerisError::Unsupported {
                source_name: self.name(),
                operation: "barycentric query",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_source::KernelWindow;
    use crate::spk::{SpkError, SpkReader, SpkSegment};
    use orrery_core::constants::SECONDS_PER_DAY;

    /// Synthetic kernel with circular equatorial orbits keyed by target id.
    struct CircularKernel;

    impl CircularKernel {
        fn radius_km(target: i32) -> f64 {
            5.0e5 + 2.0e3 * f64::from(target)
        }
    }

    impl SpkReader for CircularKernel {
        fn segments(&self) -> Vec<SpkSegment> {
            Vec::new()
        }

        fn state_km(
            &self,
            seconds_past_j2000: f64,
            target_id: i32,
            _observer_id: i32,
        ) -> Result<([f64; 3], [f64; 3]), SpkError> {
            let radius = Self::radius_km(target_id);
            let rate = 2.0e-7;
            let angle = rate * seconds_past_j2000;
            let (sin_a, cos_a) = angle.sin_cos();
            let speed_km_day = radius * rate * SECONDS_PER_DAY;
            Ok((
                [radius * cos_a, radius * sin_a, 0.0],
                [-speed_km_day * sin_a, speed_km_day * cos_a, 0.0],
            ))
        }
    }

    fn saturn_windows() -> Vec<KernelWindow> {
        vec![
            KernelWindow::new(
                Box::new(CircularKernel),
                Instant::from_utc(1970, 1, 1, 0, 0, 0),
                Instant::from_utc(2000, 1, 1, 0, 0, 0),
            ),
            KernelWindow::new(
                Box::new(CircularKernel),
                Instant::from_utc(2000, 1, 1, 0, 0, 0),
                Instant::from_utc(2030, 1, 1, 0, 0, 0),
            ),
        ]
    }

    #[test]
    fn moons_are_translated_to_heliocentric_output() {
        let composite = SolarSystemEphemeris::new()
            .with_moon_system(PlanetSystemKernelEphemeris::saturn_system(saturn_windows()));
        let instant = Instant::from_utc(2004, 7, 1, 0, 0, 0);
        let saturn = composite.state("Saturn", &instant).unwrap();
        let titan = composite.state("Titan", &instant).unwrap();
        let separation = titan.position.distance(&saturn.position);
        let expected_km =
            (CircularKernel::radius_km(606) - CircularKernel::radius_km(699)).abs();
        assert!(
            (separation / 1_000.0 - expected_km).abs() < 1.0,
            "Titan should sit {expected_km} km from Saturn, got {} km",
            separation / 1_000.0
        );
    }

    #[test]
    fn kernel_sources_win_over_the_fallback() {
        let kernel = PlanetKernelEphemeris::new(KernelWindow::new(
            Box::new(CircularKernel),
            Instant::from_utc(1550, 1, 1, 0, 0, 0),
            Instant::from_utc(2650, 1, 1, 0, 0, 0),
        ));
        let composite = SolarSystemEphemeris::new().with_planet_kernel(kernel);
        let instant = Instant::from_utc(2010, 1, 1, 0, 0, 0);
        let jupiter = composite.state("Jupiter", &instant).unwrap();
        // The synthetic kernel's Jupiter is far inside the real orbit, so
        // the radius tells which source answered.
        assert!(
            jupiter.position.norm() < 1.0e10,
            "expected the kernel's state, got the Keplerian fallback"
        );
    }

    #[test]
    fn fallback_answers_outside_kernel_windows() {
        let composite = SolarSystemEphemeris::new()
            .with_moon_system(PlanetSystemKernelEphemeris::saturn_system(saturn_windows()));
        let before_kernels = Instant::from_utc(1800, 1, 1, 0, 0, 0);
        // Titan carries fallback elements, Mimas is kernel-only.
        assert!(composite.state("Titan", &before_kernels).is_ok());
        assert!(matches!(
            composite.state("Mimas", &before_kernels),
            Err(EphemerisError::OutOfRange { .. })
        ));
        assert!(matches!(
            composite.state("Xanadu", &before_kernels),
            Err(EphemerisError::UnknownBody(_))
        ));
    }

    #[test]
    fn barycentric_queries_need_a_planet_kernel() {
        let composite = SolarSystemEphemeris::new();
        assert!(matches!(
            composite.state_barycentric("Earth", &Instant::J2000),
            Err(EphemerisError::Unsupported { .. })
        ));
    }
}
