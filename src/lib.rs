//! # Lincirc Core
//!
//! A time-domain simulator for linear electrical circuits.
//!
//! This library provides:
//! - A dense, generic (real or complex) matrix type and a full-pivoting
//!   PLU factorization
//! - Modified Nodal Analysis (MNA) assembly from per-component stamps
//! - Resistors, capacitors, inductors and a grounded voltage source
//! - A stepped transient orchestrator with reference-node normalization
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`solver`] - Dense matrix storage and PLU factorization
//! - [`components`] - The component contract and the concrete models
//! - [`circuit`] - Node bookkeeping, validation and the [`Circuit`] orchestrator
//! - [`presets`] - Reference circuits used by the CLI and tests
//!
//! ## Usage
//!
//! ```no_run
//! use lincirc_core::circuit::{Circuit, NodeId, SimulationConfig};
//! use lincirc_core::components::{Capacitor, GroundedVoltageSource, Resistor};
//!
//! # fn main() -> lincirc_core::Result<()> {
//! let mut circuit = Circuit::with_config(3, SimulationConfig::new().with_time_step(0.01))?;
//! circuit.add_component(GroundedVoltageSource::new(NodeId(2), NodeId(1), 5.0, 1.0)?)?;
//! circuit.add_component(Resistor::new(NodeId(1), NodeId(0), 1_000.0)?)?;
//! circuit.add_component(Capacitor::new(NodeId(0), NodeId(2), 1e-3)?)?;
//! circuit.initialize()?;
//! while !circuit.step()? {}
//! println!("V(0) = {}", circuit.voltage(NodeId(0))?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Circuit Simulation Method
//!
//! Every node, including the reference, gets a row in the conductance
//! matrix. At initialization:
//!
//! 1. Every component stamps its conductance into A
//! 2. A is factored once as P * A * Q = L * U
//!
//! For each time step dt:
//!
//! 1. Clear the source vector b and let every component stamp into it
//! 2. Solve A * x = b with the cached factorization
//! 3. Shift x so the reference node reads 0
//! 4. Hand x back to every component to update its current and history
//!
//! Reactive elements (C, L) are discretized using the trapezoidal rule, so
//! A only depends on component values and dt and never needs refactoring.

pub mod circuit;
pub mod components;
pub mod error;
pub mod presets;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use error::{Result, SimError};
pub use solver::{Matrix, Plu};

/// Default integration step in seconds
pub const DEFAULT_TIME_STEP: f64 = 1.0;

/// Default stop time in seconds
pub const DEFAULT_STOP_TIME: f64 = 10.0;
