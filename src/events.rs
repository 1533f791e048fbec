//! Scheduled state injections ("spacecraft events").
//!
//! Events re-seat a named particle at a known instant: course corrections
//! for spacecraft, and accuracy touch-ups for small bodies around flybys.
//! The schedule is kept non-decreasing in time with a cursor marking the
//! next event to fire.

use orrery_core::state::State;
use orrery_core::time::Instant;
use serde::{Deserialize, Serialize};

/// One scheduled override: at `instant`, the particle named `body` is
/// re-seated to exactly `state`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacecraftEvent {
    pub instant: Instant,
    pub body: String,
    pub state: State,
}

/// Time-ordered event list with a firing cursor.
#[derive(Debug, Clone, Default)]
pub struct EventSchedule {
    events: Vec<SpacecraftEvent>,
    cursor: usize,
}

impl EventSchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Insert an event, keeping instants non-decreasing. Events equal in
    /// time keep insertion order.
    pub fn add(&mut self, event: SpacecraftEvent) {
        let position = self
            .events
            .partition_point(|existing| existing.instant <= event.instant);
        if position < self.cursor {
            self.cursor += 1;
        }
        self.events.insert(position, event);
    }

    /// Remove every event addressed to `body`.
    pub fn remove_for(&mut self, body: &str) {
        let mut removed_before_cursor = 0;
        let cursor = self.cursor;
        let mut index = 0;
        self.events.retain(|event| {
            let keep = event.body != body;
            if !keep && index < cursor {
                removed_before_cursor += 1;
            }
            index += 1;
            keep
        });
        self.cursor -= removed_before_cursor;
    }

    /// The next event that has not fired yet.
    pub fn peek(&self) -> Option<&SpacecraftEvent> {
        self.events.get(self.cursor)
    }

    /// How many events are still ahead of the cursor.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }

    /// Fire the next event if it is due (instant ≤ `now`). At most one
    /// event fires per call.
    pub fn pop_due(&mut self, now: &Instant) -> Option<SpacecraftEvent> {
        let next = self.events.get(self.cursor)?;
        if next.instant <= *now {
            let fired = next.clone();
            self.cursor += 1;
            Some(fired)
        } else {
            None
        }
    }

    /// Re-position the cursor after a clock jump: the next event to fire
    /// is the first one strictly after `now`.
    pub fn rewind(&mut self, now: &Instant) {
        self.cursor = self
            .events
            .partition_point(|event| event.instant <= *now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_core::vector::Vector3D;

    fn event(body: &str, seconds: f64) -> SpacecraftEvent {
        SpacecraftEvent {
            instant: Instant::from_seconds_past_j2000(seconds),
            body: body.to_string(),
            state: State::new(Vector3D::new(seconds, 0.0, 0.0), Vector3D::ZERO),
        }
    }

    #[test]
    fn insertion_keeps_time_order() {
        let mut schedule = EventSchedule::new();
        schedule.add(event("A", 200.0));
        schedule.add(event("B", 100.0));
        schedule.add(event("C", 300.0));
        schedule.add(event("D", 200.0));
        let order: Vec<f64> = std::iter::from_fn(|| {
            schedule.pop_due(&Instant::from_seconds_past_j2000(1_000.0))
        })
        .map(|fired| fired.instant.seconds_past_j2000())
        .collect();
        assert_eq!(order, [100.0, 200.0, 200.0, 300.0]);
    }

    #[test]
    fn events_fire_once_and_in_order() {
        let mut schedule = EventSchedule::new();
        schedule.add(event("A", 100.0));
        schedule.add(event("B", 200.0));
        let now = Instant::from_seconds_past_j2000(150.0);
        let fired = schedule.pop_due(&now).expect("A is due");
        assert_eq!(fired.body, "A");
        assert!(schedule.pop_due(&now).is_none(), "B is not due yet");
    }

    #[test]
    fn pruning_a_body_keeps_the_cursor_consistent() {
        let mut schedule = EventSchedule::new();
        schedule.add(event("craft", 100.0));
        schedule.add(event("other", 200.0));
        schedule.add(event("craft", 300.0));
        schedule.pop_due(&Instant::from_seconds_past_j2000(150.0));
        schedule.remove_for("craft");
        assert_eq!(schedule.len(), 1);
        let next = schedule.peek().expect("one event left");
        assert_eq!(next.body, "other");
    }

    #[test]
    fn rewind_skips_past_events() {
        let mut schedule = EventSchedule::new();
        schedule.add(event("A", 100.0));
        schedule.add(event("B", 200.0));
        schedule.rewind(&Instant::from_seconds_past_j2000(100.0));
        // An event exactly at the rewind time has already happened.
        assert_eq!(schedule.peek().unwrap().body, "B");
        schedule.rewind(&Instant::from_seconds_past_j2000(0.0));
        assert_eq!(schedule.peek().unwrap().body, "A");
    }
}
