//! Solar-system simulation: a numerical N-body propagator kept
//! consistent with a multi-source ephemeris service.
//!
//! The heavy lifting lives in the workspace crates (`orrery_core`,
//! `orrery_kepler`, `orrery_params`, `orrery_ephem`, `orrery_nbody`);
//! this crate owns the orchestrator that ties them together, plus the
//! event schedule, spacecraft trajectories, and scenario loading shared
//! by the front-ends.

pub mod body;
pub mod events;
pub mod scenario;
pub mod spacecraft;
pub mod system;

pub use body::{Body, BodyArena, BodyIndex};
pub use events::{EventSchedule, SpacecraftEvent};
pub use scenario::{load_scenario, ScenarioConfig, ScenarioError};
pub use spacecraft::{TableTrajectory, Trajectory, TrajectoryRegistry};
pub use system::{SimulationError, SimulationPhase, SolarSystem, MACRO_STEP_S};

// Re-exported for callers that only need the public boundary types.
pub use orrery_core::{CalendarDate, Instant, State, Vector3D};
pub use orrery_ephem::{EphemerisError, EphemerisSource, SolarSystemEphemeris};
