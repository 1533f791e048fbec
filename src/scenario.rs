//! Scenario manifests: TOML descriptions of a simulation run.
//!
//! A scenario names the start epoch, the integration mode, the planet
//! systems to instantiate, and any scheduled state overrides. Physical
//! parameters are never configured here; the compiled-in registry is
//! authoritative.

use std::path::Path;

use orrery_core::state::State;
use orrery_core::time::{CalendarDate, Instant};
use orrery_core::vector::Vector3D;
use orrery_ephem::SolarSystemEphemeris;
use serde::Deserialize;
use thiserror::Error;

use crate::events::SpacecraftEvent;
use crate::system::{SimulationError, SolarSystem};

/// Errors that can occur while loading scenario files.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A scheduled override in manifest form.
#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub body: String,
    pub date: CalendarDate,
    /// Heliocentric position in metres.
    pub position_m: [f64; 3],
    /// Heliocentric velocity in metres per second.
    pub velocity_m_s: [f64; 3],
}

impl EventConfig {
    fn to_event(&self) -> SpacecraftEvent {
        SpacecraftEvent {
            instant: Instant::from_calendar(&self.date),
            body: self.body.clone(),
            state: State::new(
                Vector3D::new(self.position_m[0], self.position_m[1], self.position_m[2]),
                Vector3D::new(
                    self.velocity_m_s[0],
                    self.velocity_m_s[1],
                    self.velocity_m_s[2],
                ),
            ),
        }
    }
}

/// A full run description.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioConfig {
    /// Start of the simulation (UTC).
    pub start: CalendarDate,
    /// Apply the post-Newtonian correction.
    #[serde(default)]
    pub post_newtonian: bool,
    /// Planets whose moon subsystems should be instantiated.
    #[serde(default)]
    pub planet_systems: Vec<String>,
    /// Scheduled overrides.
    #[serde(default)]
    pub events: Vec<EventConfig>,
}

impl ScenarioConfig {
    /// Build a simulation from this scenario, on the approximate
    /// Keplerian ephemeris.
    pub fn build(&self) -> Result<SolarSystem, SimulationError> {
        self.build_with(SolarSystemEphemeris::new())
    }

    /// Build a simulation from this scenario on a caller-supplied
    /// ephemeris (kernel-backed sources attached).
    pub fn build_with(
        &self,
        ephemeris: SolarSystemEphemeris,
    ) -> Result<SolarSystem, SimulationError> {
        let start = Instant::from_calendar(&self.start);
        let mut simulation = SolarSystem::new(ephemeris, &start)?;
        simulation.set_post_newtonian(self.post_newtonian);
        for planet in &self.planet_systems {
            simulation.create_planet_system(planet)?;
        }
        for event in &self.events {
            simulation.add_event(event.to_event());
        }
        Ok(simulation)
    }
}

/// Load a scenario manifest from a TOML file.
pub fn load_scenario<P: AsRef<Path>>(path: P) -> Result<ScenarioConfig, ScenarioError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        post_newtonian = true
        planet_systems = ["Jupiter"]

        [start]
        year = 2004
        month = 7
        day = 1

        [[events]]
        body = "Halley"
        position_m = [1.0e12, 2.0e12, 0.0]
        velocity_m_s = [100.0, -200.0, 0.0]

        [events.date]
        year = 2004
        month = 7
        day = 2
        hour = 12
    "#;

    #[test]
    fn scenarios_parse_and_build() {
        let config: ScenarioConfig = toml::from_str(SCENARIO).unwrap();
        assert!(config.post_newtonian);
        assert_eq!(config.planet_systems, ["Jupiter"]);
        assert_eq!(config.events.len(), 1);

        let simulation = config.build().unwrap();
        assert_eq!(
            simulation.time(),
            Instant::from_utc(2004, 7, 1, 0, 0, 0)
        );
        assert!(simulation.post_newtonian());
        assert_eq!(simulation.planet_systems(), ["Jupiter"]);
        assert_eq!(simulation.pending_events(), 1);
    }

    #[test]
    fn missing_optional_sections_default() {
        let minimal = "[start]\nyear = 1999\nmonth = 12\nday = 31";
        let config: ScenarioConfig = toml::from_str(minimal).unwrap();
        assert!(!config.post_newtonian);
        assert!(config.planet_systems.is_empty());
        assert!(config.events.is_empty());
    }
}
