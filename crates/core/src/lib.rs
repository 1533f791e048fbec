//! Core units, constants, and shared primitives for the orrery workspace.

pub mod constants;
pub mod frame;
pub mod state;
pub mod time;
pub mod vector;

pub use state::State;
pub use time::{CalendarDate, Instant};
pub use vector::Vector3D;
