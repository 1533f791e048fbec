//! End-to-end properties of the orchestrator: reversibility, drift
//! bounds, event exactness, and massless non-interference.

use orrery::{
    Instant, SolarSystem, SolarSystemEphemeris, SpacecraftEvent, State, TableTrajectory, Vector3D,
    MACRO_STEP_S,
};

const PLANETS: &[&str] = &[
    "Mercury", "Venus", "Earth", "Moon", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto",
];

fn simulation_at(instant: &Instant) -> SolarSystem {
    SolarSystem::new(SolarSystemEphemeris::new(), instant).unwrap()
}

fn planet_positions(simulation: &SolarSystem) -> Vec<(String, Vector3D)> {
    PLANETS
        .iter()
        .map(|name| (name.to_string(), simulation.position_of(name).unwrap()))
        .collect()
}

#[test]
fn forward_then_backward_rk4_returns_the_planets_home() {
    let mut simulation = simulation_at(&Instant::J2000);
    simulation.set_post_newtonian(true);
    let initial = planet_positions(&simulation);

    simulation.advance_forward(240).unwrap();
    simulation.advance_backward(240).unwrap();

    assert_eq!(simulation.time(), Instant::J2000);
    for (name, position) in initial {
        let final_position = simulation.position_of(&name).unwrap();
        let error = final_position.distance(&position);
        assert!(
            error < 1.0,
            "{name} did not return home: displaced by {error} m after 240 h out and back"
        );
    }
}

#[test]
fn forward_then_backward_abm4_drift_stays_bounded() {
    let mut simulation = simulation_at(&Instant::J2000);
    let initial = planet_positions(&simulation);

    // 1000 Newtonian macro steps total, round trip.
    simulation.advance_forward(500).unwrap();
    simulation.advance_backward(500).unwrap();

    for (name, position) in initial {
        let final_position = simulation.position_of(&name).unwrap();
        let error = final_position.distance(&position);
        assert!(
            error < 1.0,
            "{name} drifted by {error} m over a 1000-step round trip"
        );
    }
}

#[test]
fn scheduled_events_reseat_spacecraft_bit_for_bit() {
    let mut simulation = simulation_at(&Instant::J2000);
    let cruise = TableTrajectory::new(vec![(
        Instant::J2000,
        State::new(
            Vector3D::new(2.0e11, 1.0e11, 0.0),
            Vector3D::new(-1.0e4, 2.2e4, 100.0),
        ),
    )]);
    simulation
        .add_spacecraft_with("surveyor", Box::new(cruise))
        .unwrap();

    let burn_state = State::new(
        Vector3D::new(2.0000123e11, 1.0000456e11, 7.89e6),
        Vector3D::new(-1.01e4, 2.25e4, 103.5),
    );
    simulation.add_event(SpacecraftEvent {
        instant: Instant::from_seconds_past_j2000(5.0 * MACRO_STEP_S),
        body: "surveyor".to_string(),
        state: burn_state,
    });

    simulation.advance_forward(5).unwrap();
    let after = simulation.state_of("surveyor").unwrap();
    assert_eq!(after, burn_state, "event state must be applied exactly");
    assert!(
        !simulation.abm4_valid(),
        "an event override must invalidate the multi-step history"
    );

    // The next tick integrates away from the injected state.
    simulation.advance_forward(1).unwrap();
    assert_ne!(simulation.state_of("surveyor").unwrap(), burn_state);
}

#[test]
fn massless_spacecraft_leave_the_planets_untouched() {
    let start = Instant::from_utc(2010, 3, 14, 0, 0, 0);
    let mut reference = simulation_at(&start);
    let mut with_probe = simulation_at(&start);
    with_probe
        .add_spacecraft_with(
            "probe",
            Box::new(TableTrajectory::new(vec![(
                start,
                State::new(
                    Vector3D::new(1.1e11, -0.4e11, 2.0e9),
                    Vector3D::new(1.5e4, 2.6e4, -500.0),
                ),
            )])),
        )
        .unwrap();

    reference.advance_forward(48).unwrap();
    with_probe.advance_forward(48).unwrap();

    for name in PLANETS {
        let expected = reference.position_of(name).unwrap();
        let observed = with_probe.position_of(name).unwrap();
        assert_eq!(
            expected, observed,
            "adding a massless probe changed {name}'s trajectory"
        );
    }
}

#[test]
fn removing_a_spacecraft_leaves_the_planets_untouched() {
    let mut reference = simulation_at(&Instant::J2000);
    let mut modified = simulation_at(&Instant::J2000);
    modified
        .add_spacecraft_with(
            "transient",
            Box::new(TableTrajectory::new(vec![(
                Instant::J2000,
                State::new(Vector3D::new(3.0e11, 0.0, 0.0), Vector3D::new(0.0, 1.0e4, 0.0)),
            )])),
        )
        .unwrap();
    modified.remove_spacecraft("transient");

    reference.advance_forward(24).unwrap();
    modified.advance_forward(24).unwrap();
    for name in PLANETS {
        assert_eq!(
            reference.position_of(name).unwrap(),
            modified.position_of(name).unwrap()
        );
    }
}

#[test]
fn planet_subsystem_round_trip_keeps_the_moons_in_place() {
    let mut simulation = simulation_at(&Instant::J2000);
    simulation.create_planet_system("Jupiter").unwrap();

    let io_before = simulation.state_of("Io").unwrap();
    let jupiter_before = simulation.state_of("Jupiter").unwrap();
    let radius_before = io_before.position.distance(&jupiter_before.position);

    simulation.advance_forward(12).unwrap();
    simulation.advance_backward(12).unwrap();

    let io_after = simulation.state_of("Io").unwrap();
    let jupiter_after = simulation.state_of("Jupiter").unwrap();
    let radius_after = io_after.position.distance(&jupiter_after.position);
    assert!(
        (radius_after - radius_before).abs() < 1_000.0,
        "Io's orbital radius changed by {} m over a 12 h round trip",
        (radius_after - radius_before).abs()
    );
    let displacement = io_after.position.distance(&io_before.position);
    assert!(
        displacement < 5_000.0,
        "Io displaced by {displacement} m after the round trip"
    );
}

#[test]
fn earth_moon_barycenter_tracks_the_pair() {
    let mut simulation = simulation_at(&Instant::J2000);
    for _ in 0..24 {
        simulation.advance_forward(1).unwrap();
        let earth = simulation.position_of("Earth").unwrap();
        let moon = simulation.position_of("Moon").unwrap();
        let barycenter = simulation.earth_moon_barycenter().position;
        // The barycenter divides the segment by the mu ratio, well
        // inside the Earth.
        let from_earth = barycenter.distance(&earth);
        let separation = earth.distance(&moon);
        let ratio = from_earth / separation;
        assert!(
            (0.01..0.02).contains(&ratio),
            "barycenter sits at fraction {ratio} of the Earth-Moon segment"
        );
    }
}

#[test]
fn display_bodies_track_the_particles_across_ticks() {
    let mut simulation = simulation_at(&Instant::J2000);
    simulation.create_planet_system("Jupiter").unwrap();

    simulation.advance_forward(6).unwrap();
    for name in ["Earth", "Moon", "Jupiter", "Io", "Ceres"] {
        let cached = simulation.body(name).expect("body record exists").state;
        let live = simulation.state_of(name).unwrap();
        assert_eq!(cached, live, "cached state of {name} went stale after a tick");
    }

    simulation.advance_backward(2).unwrap();
    assert_eq!(
        simulation.body("Earth").unwrap().state,
        simulation.state_of("Earth").unwrap(),
        "cached Earth state went stale after a backward tick"
    );

    simulation.advance_single_step(1_800.0).unwrap();
    assert_eq!(
        simulation.body("Earth").unwrap().state,
        simulation.state_of("Earth").unwrap(),
        "cached Earth state went stale after a single step"
    );

    // The iterator view agrees with the per-name accessor.
    for body in simulation.bodies() {
        if body.name == "Sun" {
            continue;
        }
        assert_eq!(body.state, simulation.state_of(&body.name).unwrap());
    }
}

#[test]
fn numerical_failures_leave_the_system_unchanged() {
    let mut simulation = simulation_at(&Instant::J2000);
    // Drive two massive bodies onto the same point: the next advance
    // must fail and roll back.
    let mars_state = simulation.state_of("Mars").unwrap();
    simulation.set_state_of("Venus", mars_state).unwrap();
    let before: Vec<(String, State)> = PLANETS
        .iter()
        .map(|name| (name.to_string(), simulation.state_of(name).unwrap()))
        .collect();
    let clock_before = simulation.time();

    let result = simulation.advance_forward(1);
    assert!(result.is_err(), "coincident massive bodies must fail");
    assert_eq!(simulation.time(), clock_before, "clock must not advance");
    for (name, state) in before {
        assert_eq!(
            simulation.state_of(&name).unwrap(),
            state,
            "{name} changed despite the failed step"
        );
    }
}
