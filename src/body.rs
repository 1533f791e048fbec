//! Display-facing body records, stored in an arena with index-based
//! center-body links.

use orrery_core::state::State;
use orrery_core::vector::Vector3D;

/// Index of a body inside the arena. Indices are stable for the life of
/// the simulation; bodies are never removed, only spacecraft entries are
/// retired by clearing their slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyIndex(pub(crate) usize);

/// A body of the solar system as seen by callers: identity, physical
/// size, the current state, and a sampled orbit curve for display.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub diameter_m: f64,
    /// Heliocentric state, kept current by the orchestrator after every
    /// seed and tick.
    pub state: State,
    /// Sampled orbit ring, relative to the center body.
    pub orbit: Vec<Vector3D>,
    /// Arena index of the center body; `None` for the Sun.
    pub center: Option<BodyIndex>,
}

/// Arena of bodies; relationships are indices, the arena owns the nodes.
#[derive(Debug, Clone, Default)]
pub struct BodyArena {
    bodies: Vec<Body>,
}

impl BodyArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, body: Body) -> BodyIndex {
        self.bodies.push(body);
        BodyIndex(self.bodies.len() - 1)
    }

    pub fn get(&self, index: BodyIndex) -> &Body {
        &self.bodies[index.0]
    }

    pub fn get_mut(&mut self, index: BodyIndex) -> &mut Body {
        &mut self.bodies[index.0]
    }

    pub fn index_of(&self, name: &str) -> Option<BodyIndex> {
        self.bodies
            .iter()
            .position(|body| body.name == name)
            .map(BodyIndex)
    }

    pub fn by_name(&self, name: &str) -> Option<&Body> {
        self.index_of(name).map(|index| self.get(index))
    }

    pub fn by_name_mut(&mut self, name: &str) -> Option<&mut Body> {
        let index = self.index_of(name)?;
        Some(self.get_mut(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    /// Orbit ring translated to absolute coordinates through the center
    /// chain (a moon's ring follows its planet).
    pub fn orbit_absolute(&self, index: BodyIndex) -> Vec<Vector3D> {
        let body = self.get(index);
        let offset = match body.center {
            Some(center) => self.get(center).state.position,
            None => Vector3D::ZERO,
        };
        body.orbit.iter().map(|point| *point + offset).collect()
    }

    pub fn remove_by_name(&mut self, name: &str) -> bool {
        // Only tail entries (spacecraft, added last) can be removed
        // without disturbing indices.
        match self.index_of(name) {
            Some(BodyIndex(position)) if position == self.bodies.len() - 1 => {
                self.bodies.pop();
                true
            }
            Some(BodyIndex(position)) => {
                // Keep the slot but blank the entry; indices stay valid.
                let slot = &mut self.bodies[position];
                slot.name = String::new();
                slot.orbit.clear();
                true
            }
            None => false,
        }
    }
}
