//! Circuit assembly and transient simulation.
//!
//! This module provides the [`Circuit`] orchestrator together with the
//! identifiers, node bookkeeping and validation it relies on.

mod config;
mod nodes;
mod simulation;
mod types;
mod validate;

pub use config::SimulationConfig;
pub use nodes::NodeSet;
pub use simulation::Circuit;
pub use types::*;
pub use validate::validate_circuit;
