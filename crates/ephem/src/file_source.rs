//! Ephemeris sources backed by precomputed SPK kernels.
//!
//! Readers hand back kilometres and kilometres per day in the J2000
//! equatorial frame; these sources convert to SI units and rotate into
//! the ecliptic. Planet-system sources answer planetocentrically (moon
//! minus planet, both relative to the system barycenter) and are
//! translated to heliocentric output by the composite dispatcher.

use orrery_core::constants::SECONDS_PER_DAY;
use orrery_core::frame::ecliptic_from_equatorial;
use orrery_core::state::State;
use orrery_core::time::Instant;
use orrery_core::vector::Vector3D;

use crate::spk::{SpkError, SpkReader, EARTH_MOON_BARYCENTER, SSB, SUN};
use crate::{EphemerisError, EphemerisSource};

const KM_PER_DAY_TO_M_PER_S: f64 = 1_000.0 / SECONDS_PER_DAY;

/// One kernel and the window over which it is trusted.
pub struct KernelWindow {
    reader: Box<dyn SpkReader>,
    first_valid: Instant,
    last_valid: Instant,
}

impl KernelWindow {
    pub fn new(reader: Box<dyn SpkReader>, first_valid: Instant, last_valid: Instant) -> Self {
        Self {
            reader,
            first_valid,
            last_valid,
        }
    }

    fn covers(&self, instant: &Instant) -> bool {
        *instant >= self.first_valid && *instant <= self.last_valid
    }

    fn state_si(
        &self,
        instant: &Instant,
        target: i32,
        observer: i32,
        source: &'static str,
    ) -> Result<State, EphemerisError> {
        let et = instant.seconds_past_j2000();
        let (pos_km, vel_km_day) = self
            .reader
            .state_km(et, target, observer)
            .map_err(|err| convert_spk_error(err, source, instant))?;
        let position = Vector3D::new(pos_km[0], pos_km[1], pos_km[2]) * 1_000.0;
        let velocity =
            Vector3D::new(vel_km_day[0], vel_km_day[1], vel_km_day[2]) * KM_PER_DAY_TO_M_PER_S;
        Ok(State::new(
            ecliptic_from_equatorial(&position),
            ecliptic_from_equatorial(&velocity),
        ))
    }
}

fn convert_spk_error(err: SpkError, source: &'static str, instant: &Instant) -> EphemerisError {
    match err {
        SpkError::OutOfRange { .. } => EphemerisError::OutOfRange {
            source_name: source,
            instant: *instant,
        },
        SpkError::Io(io) => EphemerisError::Io(io),
    }
}

/// Heliocentric planet ephemeris backed by a DE-series kernel.
///
/// The kernel is expected to carry barycentric segments for the planet
/// barycenters, the Sun, and the Earth/Moon relative to their common
/// barycenter, which is the layout of the DE440-family files.
pub struct PlanetKernelEphemeris {
    window: KernelWindow,
}

impl PlanetKernelEphemeris {
    pub fn new(window: KernelWindow) -> Self {
        Self { window }
    }

    /// Chain of (target, observer) legs summing to the barycentric state.
    fn route(body: &str) -> Option<&'static [(i32, i32)]> {
        let route: &[(i32, i32)] = match body {
            "Sun" => &[(SUN, SSB)],
            "Mercury" => &[(1, SSB)],
            "Venus" => &[(2, SSB)],
            "Earth" => &[(EARTH_MOON_BARYCENTER, SSB), (399, EARTH_MOON_BARYCENTER)],
            "Moon" => &[(EARTH_MOON_BARYCENTER, SSB), (301, EARTH_MOON_BARYCENTER)],
            "Mars" => &[(4, SSB)],
            "Jupiter" => &[(5, SSB)],
            "Saturn" => &[(6, SSB)],
            "Uranus" => &[(7, SSB)],
            "Neptune" => &[(8, SSB)],
            "Pluto" => &[(9, SSB)],
            _ => return None,
        };
        Some(route)
    }

    fn barycentric(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        let route =
            Self::route(body).ok_or_else(|| EphemerisError::UnknownBody(body.to_string()))?;
        let mut state = State::ZERO;
        for (target, observer) in route {
            state = state + self.window.state_si(instant, *target, *observer, self.name())?;
        }
        Ok(state)
    }
}

impl EphemerisSource for PlanetKernelEphemeris {
    fn name(&self) -> &'static str {
        "planet kernel ephemeris"
    }

    fn first_valid(&self) -> Instant {
        self.window.first_valid
    }

    fn last_valid(&self) -> Instant {
        self.window.last_valid
    }

    fn bodies(&self) -> Vec<&'static str> {
        vec![
            "Sun", "Mercury", "Venus", "Earth", "Moon", "Mars", "Jupiter", "Saturn", "Uranus",
            "Neptune", "Pluto",
        ]
    }

    fn state(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        if !self.window.covers(instant) {
            return Err(EphemerisError::OutOfRange {
                source_name: self.name(),
                instant: *instant,
            });
        }
        if body == "Sun" {
            return Ok(State::ZERO);
        }
        let body_state = self.barycentric(body, instant)?;
        let sun_state = self.barycentric("Sun", instant)?;
        Ok(body_state - sun_state)
    }

    fn state_barycentric(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        if !self.window.covers(instant) {
            return Err(EphemerisError::OutOfRange {
                source_name: self.name(),
                instant: *instant,
            });
        }
        self.barycentric(body, instant)
    }
}

/// Planetocentric ephemeris for the moons of one planet, backed by one or
/// more kernel windows (Saturn ships as two concatenated excerpts).
pub struct PlanetSystemKernelEphemeris {
    name: &'static str,
    planet: &'static str,
    planet_target: i32,
    observer: i32,
    targets: &'static [(&'static str, i32)],
    windows: Vec<KernelWindow>,
}

impl PlanetSystemKernelEphemeris {
    fn new(
        name: &'static str,
        planet: &'static str,
        planet_target: i32,
        observer: i32,
        targets: &'static [(&'static str, i32)],
        windows: Vec<KernelWindow>,
    ) -> Self {
        assert!(!windows.is_empty(), "a kernel source needs at least one window");
        Self {
            name,
            planet,
            planet_target,
            observer,
            targets,
            windows,
        }
    }

    pub fn jupiter_system(windows: Vec<KernelWindow>) -> Self {
        Self::new(
            "Jupiter system kernel ephemeris",
            "Jupiter",
            599,
            5,
            &[("Io", 501), ("Europa", 502), ("Ganymede", 503), ("Callisto", 504)],
            windows,
        )
    }

    pub fn saturn_system(windows: Vec<KernelWindow>) -> Self {
        Self::new(
            "Saturn system kernel ephemeris",
            "Saturn",
            699,
            6,
            &[
                ("Mimas", 601),
                ("Enceladus", 602),
                ("Tethys", 603),
                ("Dione", 604),
                ("Rhea", 605),
                ("Titan", 606),
                ("Hyperion", 607),
                ("Iapetus", 608),
                ("Phoebe", 609),
            ],
            windows,
        )
    }

    pub fn uranus_system(windows: Vec<KernelWindow>) -> Self {
        Self::new(
            "Uranus system kernel ephemeris",
            "Uranus",
            799,
            7,
            &[
                ("Ariel", 701),
                ("Umbriel", 702),
                ("Titania", 703),
                ("Oberon", 704),
                ("Miranda", 705),
            ],
            windows,
        )
    }

    pub fn neptune_system(windows: Vec<KernelWindow>) -> Self {
        Self::new(
            "Neptune system kernel ephemeris",
            "Neptune",
            899,
            8,
            &[("Triton", 801)],
            windows,
        )
    }

    /// The planet whose moons this source describes.
    pub fn planet(&self) -> &'static str {
        self.planet
    }

    fn window_for(&self, instant: &Instant) -> Result<&KernelWindow, EphemerisError> {
        self.windows
            .iter()
            .find(|window| window.covers(instant))
            .ok_or(EphemerisError::OutOfRange {
                source_name: self.name,
                instant: *instant,
            })
    }
}

impl EphemerisSource for PlanetSystemKernelEphemeris {
    fn name(&self) -> &'static str {
        self.name
    }

    fn first_valid(&self) -> Instant {
        self.windows
            .iter()
            .map(|window| window.first_valid)
            .fold(self.windows[0].first_valid, |a, b| if b < a { b } else { a })
    }

    fn last_valid(&self) -> Instant {
        self.windows
            .iter()
            .map(|window| window.last_valid)
            .fold(self.windows[0].last_valid, |a, b| if b > a { b } else { a })
    }

    fn bodies(&self) -> Vec<&'static str> {
        self.targets.iter().map(|(name, _)| *name).collect()
    }

    /// Planetocentric state of a moon: target minus planet, both relative
    /// to the system barycenter.
    fn state(&self, body: &str, instant: &Instant) -> Result<State, EphemerisError> {
        let (_, target) = self
            .targets
            .iter()
            .find(|(name, _)| *name == body)
            .ok_or_else(|| EphemerisError::UnknownBody(body.to_string()))?;
        let window = self.window_for(instant)?;
        let moon = window.state_si(instant, *target, self.observer, self.name)?;
        let planet = window.state_si(instant, self.planet_target, self.observer, self.name)?;
        Ok(moon - planet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spk::SpkSegment;
    use orrery_core::frame::equatorial_from_ecliptic;

    /// Synthetic kernel: every target rides a circular equatorial-frame
    /// orbit around the observer, radius keyed off the target id. All
    /// targets share one angular rate, so differences stay radial.
    struct CircularKernel {
        jd_start: f64,
        jd_end: f64,
    }

    const RATE_RAD_S: f64 = 1.2e-6;

    impl CircularKernel {
        fn radius_km(target: i32) -> f64 {
            1.0e5 + 1.0e3 * f64::from(target)
        }
    }

    impl SpkReader for CircularKernel {
        fn segments(&self) -> Vec<SpkSegment> {
            vec![SpkSegment {
                target_id: 0,
                observer_id: 0,
                jd_start: self.jd_start,
                jd_end: self.jd_end,
                record_type: 3,
            }]
        }

        fn state_km(
            &self,
            seconds_past_j2000: f64,
            target_id: i32,
            _observer_id: i32,
        ) -> Result<([f64; 3], [f64; 3]), SpkError> {
            let radius = Self::radius_km(target_id);
            let angle = RATE_RAD_S * seconds_past_j2000;
            let (sin_a, cos_a) = angle.sin_cos();
            let position = [radius * cos_a, radius * sin_a, 0.0];
            let speed_km_day = radius * RATE_RAD_S * SECONDS_PER_DAY;
            let velocity = [-speed_km_day * sin_a, speed_km_day * cos_a, 0.0];
            Ok((position, velocity))
        }
    }

    fn window(first_year: i32, last_year: i32) -> KernelWindow {
        KernelWindow::new(
            Box::new(CircularKernel {
                jd_start: 0.0,
                jd_end: 0.0,
            }),
            Instant::from_utc(first_year, 1, 1, 0, 0, 0),
            Instant::from_utc(last_year, 1, 1, 0, 0, 0),
        )
    }

    #[test]
    fn moon_states_are_planetocentric() {
        let source = PlanetSystemKernelEphemeris::saturn_system(vec![window(1970, 2030)]);
        let instant = Instant::from_utc(2005, 7, 1, 0, 0, 0);
        let titan = source.state("Titan", &instant).unwrap();
        let expected_radius_km =
            CircularKernel::radius_km(606) - CircularKernel::radius_km(699);
        // Both bodies share phase in the synthetic kernel, so the
        // difference keeps the radial direction.
        assert!(
            (titan.position.norm() / 1_000.0 - expected_radius_km.abs()).abs() < 1.0,
            "unexpected planetocentric radius {} km",
            titan.position.norm() / 1_000.0
        );
    }

    #[test]
    fn output_is_rotated_into_the_ecliptic() {
        let source = PlanetSystemKernelEphemeris::neptune_system(vec![window(1970, 2030)]);
        let instant = Instant::from_utc(2000, 6, 1, 0, 0, 0);
        let triton = source.state("Triton", &instant).unwrap();
        // Rotating back must land in the kernel's equatorial plane
        // (z = 0 for the synthetic orbits).
        let equatorial = equatorial_from_ecliptic(&triton.position);
        assert!(equatorial.z.abs() < 1e-3);
    }

    #[test]
    fn split_windows_dispatch_by_instant() {
        let source = PlanetSystemKernelEphemeris::saturn_system(vec![
            window(1970, 2000),
            window(2000, 2030),
        ]);
        assert_eq!(source.first_valid(), Instant::from_utc(1970, 1, 1, 0, 0, 0));
        assert_eq!(source.last_valid(), Instant::from_utc(2030, 1, 1, 0, 0, 0));
        for year in [1985, 2015] {
            let instant = Instant::from_utc(year, 6, 1, 0, 0, 0);
            assert!(source.state("Rhea", &instant).is_ok(), "year {year}");
        }
        let outside = Instant::from_utc(2040, 1, 1, 0, 0, 0);
        assert!(matches!(
            source.state("Rhea", &outside),
            Err(EphemerisError::OutOfRange { .. })
        ));
    }

    #[test]
    fn planet_kernel_supports_barycentric_queries() {
        let source = PlanetKernelEphemeris::new(window(1550, 2650));
        let instant = Instant::from_utc(2020, 1, 1, 0, 0, 0);
        let heliocentric = source.state("Jupiter", &instant).unwrap();
        let barycentric = source.state_barycentric("Jupiter", &instant).unwrap();
        let sun = source.state_barycentric("Sun", &instant).unwrap();
        let reconstructed = barycentric - sun;
        assert!(heliocentric.position.distance(&reconstructed.position) < 1e-6);
        assert_eq!(source.state("Sun", &instant).unwrap(), State::ZERO);
    }

    #[test]
    fn earth_route_chains_through_the_earth_moon_barycenter() {
        let source = PlanetKernelEphemeris::new(window(1550, 2650));
        let instant = Instant::from_utc(2020, 1, 1, 0, 0, 0);
        let earth = source.state_barycentric("Earth", &instant).unwrap();
        let moon = source.state_barycentric("Moon", &instant).unwrap();
        // Both chain through code 3; they differ by their legs from the
        // Earth-Moon barycenter.
        let separation = earth.position.distance(&moon.position);
        let expected_km =
            (CircularKernel::radius_km(399) - CircularKernel::radius_km(301)).abs();
        assert!((separation / 1_000.0 - expected_km).abs() < 1.0);
    }

    #[test]
    fn velocity_units_are_meters_per_second() {
        let source = PlanetKernelEphemeris::new(window(1550, 2650));
        let instant = Instant::from_utc(2020, 1, 1, 0, 0, 0);
        let mercury = source.state_barycentric("Mercury", &instant).unwrap();
        let expected_speed = CircularKernel::radius_km(1) * 1_000.0 * RATE_RAD_S;
        assert!(
            (mercury.velocity.norm() - expected_speed).abs() < 1e-6 * expected_speed,
            "expected {expected_speed} m/s, got {}",
            mercury.velocity.norm()
        );
    }
}
