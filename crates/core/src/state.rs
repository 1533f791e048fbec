//! Position/velocity pairs.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::vector::Vector3D;

/// A kinematic state: position in metres and velocity in metres per
/// second, in whatever frame the producing component documents
/// (heliocentric J2000 ecliptic at the public boundary).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub position: Vector3D,
    pub velocity: Vector3D,
}

impl State {
    pub const ZERO: State = State {
        position: Vector3D::ZERO,
        velocity: Vector3D::ZERO,
    };

    pub fn new(position: Vector3D, velocity: Vector3D) -> Self {
        Self { position, velocity }
    }

    /// True when all six components are finite.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

impl Add for State {
    type Output = State;

    fn add(self, rhs: State) -> State {
        State::new(self.position + rhs.position, self.velocity + rhs.velocity)
    }
}

impl Sub for State {
    type Output = State;

    fn sub(self, rhs: State) -> State {
        State::new(self.position - rhs.position, self.velocity - rhs.velocity)
    }
}
