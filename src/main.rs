//! Lincirc - Linear Circuit Transient Simulator
//!
//! Runs one of the built-in series circuits and prints the final node
//! voltages and branch currents.
//!
//! # Usage
//!
//! ```bash
//! lincirc rc --time-step 0.5 --stop-time 20
//! lincirc rl --dump-matrices 2> matrices.log
//! ```

use clap::{Parser, ValueEnum};
use lincirc_core::{
    circuit::{ComponentId, SimulationConfig},
    error::Result,
    presets::{self, Load},
    DEFAULT_STOP_TIME, DEFAULT_TIME_STEP,
};
use tracing::Level;

/// Built-in circuit to simulate
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Scenario {
    /// Source, 10 ohm resistor and a 10 ohm load
    Rr,
    /// Source, 10 ohm resistor and a 0.2 F capacitor
    Rc,
    /// Source, 10 ohm resistor and a 50 H inductor
    Rl,
}

impl From<Scenario> for Load {
    fn from(scenario: Scenario) -> Self {
        match scenario {
            Scenario::Rr => Load::Resistor,
            Scenario::Rc => Load::Capacitor,
            Scenario::Rl => Load::Inductor,
        }
    }
}

/// Linear circuit transient simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Circuit to simulate
    #[arg(value_enum)]
    scenario: Scenario,

    /// Integration step in seconds
    #[arg(short, long, default_value_t = DEFAULT_TIME_STEP)]
    time_step: f64,

    /// Simulated time at which the run stops, in seconds
    #[arg(short, long, default_value_t = DEFAULT_STOP_TIME)]
    stop_time: f64,

    /// Log initialization and run progress
    #[arg(short, long)]
    verbose: bool,

    /// Dump the system matrix, its factors and every solution to stderr
    #[arg(long)]
    dump_matrices: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.dump_matrices {
        Level::TRACE
    } else if args.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = SimulationConfig::new()
        .with_time_step(args.time_step)
        .with_stop_time(args.stop_time);
    config.validate()?;

    let mut circuit = presets::series(args.scenario.into(), config)?;
    circuit.initialize()?;
    let steps = circuit.run()?;

    println!("steps: {steps}");
    println!("time:  {}", circuit.time());
    for (node, voltage) in circuit.voltages()?.iter().enumerate() {
        println!("V(N{node}) = {voltage:.6}");
    }
    for index in 0..circuit.len() {
        let id = ComponentId(index);
        let kind = circuit.component(id)?.kind();
        println!("I({id} {kind}) = {:.6}", circuit.current(id)?);
    }

    Ok(())
}
