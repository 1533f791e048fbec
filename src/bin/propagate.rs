use std::io;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;

use orrery::{load_scenario, Instant, SolarSystem, SolarSystemEphemeris};

#[derive(Parser)]
#[command(author, version, about = "Propagate the solar system and emit sampled states as CSV")]
struct Cli {
    /// Scenario manifest (TOML). Defaults to J2000 with no events.
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of one-hour macro steps to take.
    #[arg(long, default_value_t = 24)]
    steps: usize,

    /// Run backward instead of forward.
    #[arg(long)]
    backward: bool,

    /// Emit a sample row every N macro steps.
    #[arg(long, default_value_t = 1)]
    sample_every: usize,

    /// Bodies to sample (defaults to the Sun, planets, and Moon).
    #[arg(long, value_delimiter = ',')]
    bodies: Option<Vec<String>>,
}

#[derive(Serialize)]
struct SampleRow<'a> {
    time_utc: String,
    body: &'a str,
    x_m: f64,
    y_m: f64,
    z_m: f64,
    vx_m_s: f64,
    vy_m_s: f64,
    vz_m_s: f64,
}

const DEFAULT_BODIES: &[&str] = &[
    "Sun", "Mercury", "Venus", "Earth", "Moon", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
    "Pluto",
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut simulation = match &cli.scenario {
        Some(path) => load_scenario(path)?.build()?,
        None => SolarSystem::new(SolarSystemEphemeris::new(), &Instant::J2000)?,
    };

    let bodies: Vec<String> = match &cli.bodies {
        Some(requested) => requested.clone(),
        None => DEFAULT_BODIES.iter().map(|name| name.to_string()).collect(),
    };
    for body in &bodies {
        simulation
            .state_of(body)
            .map_err(|err| anyhow::anyhow!("cannot sample `{body}`: {err}"))?;
    }

    let sample_every = cli.sample_every.max(1);
    let mut writer = csv::Writer::from_writer(io::stdout());
    write_samples(&mut writer, &simulation, &bodies)?;
    for step in 1..=cli.steps {
        if cli.backward {
            simulation.advance_backward(1)?;
        } else {
            simulation.advance_forward(1)?;
        }
        if step % sample_every == 0 {
            write_samples(&mut writer, &simulation, &bodies)?;
        }
    }
    writer.flush()?;

    eprintln!(
        "propagated {} steps {} to {}",
        cli.steps,
        if cli.backward { "backward" } else { "forward" },
        simulation.time()
    );
    Ok(())
}

fn write_samples<W: io::Write>(
    writer: &mut csv::Writer<W>,
    simulation: &SolarSystem,
    bodies: &[String],
) -> anyhow::Result<()> {
    let time_utc = simulation.time().to_calendar().to_string();
    for body in bodies {
        let state = simulation.state_of(body)?;
        writer.serialize(SampleRow {
            time_utc: time_utc.clone(),
            body,
            x_m: state.position.x,
            y_m: state.position.y,
            z_m: state.position.z,
            vx_m_s: state.velocity.x,
            vy_m_s: state.velocity.y,
            vz_m_s: state.velocity.z,
        })?;
    }
    Ok(())
}
