//! Component models for circuit simulation.
//!
//! This module provides the [`Component`] contract and the supported models:
//! - Linear: Resistor, Capacitor, Inductor
//! - Sources: Grounded Voltage Source
//!
//! Each component stamps a conductance into the system matrix once, stamps
//! its internal sources into the right-hand side every step, and reads the
//! solved node voltages back to update its own current.

mod linear;
mod sources;

pub use linear::{Capacitor, Inductor, Resistor};
pub use sources::GroundedVoltageSource;

use std::fmt;

use crate::circuit::NodeId;
use crate::error::{Result, SimError};
use crate::solver::Matrix;

/// The capability set the circuit orchestrator drives.
///
/// Calls arrive in this order for every run: [`stamp_conductance`] once when
/// the circuit is initialized, then [`stamp_source`] and [`update_state`]
/// once per step. The history a reactive component keeps between
/// `stamp_source` and `update_state` must agree with its RHS stamp.
///
/// [`stamp_conductance`]: Component::stamp_conductance
/// [`stamp_source`]: Component::stamp_source
/// [`update_state`]: Component::update_state
pub trait Component: fmt::Debug + Send {
    /// Short model name, used in diagnostics.
    fn kind(&self) -> &'static str;

    fn node_source(&self) -> NodeId;

    fn node_destination(&self) -> NodeId;

    /// Whether this component fixes the reference (ground) node.
    /// The reference node is its source node.
    fn is_reference(&self) -> bool {
        false
    }

    /// Current through the component after the last step, positive from
    /// source to destination.
    fn current(&self) -> f64;

    /// Add this component's conductance to the system matrix and reset
    /// any retained state.
    fn stamp_conductance(&mut self, matrix: &mut Matrix<f64>, time_step: f64) -> Result<()>;

    /// Add this component's internal source to the right-hand side.
    fn stamp_source(&mut self, _rhs: &mut Matrix<f64>) -> Result<()> {
        Ok(())
    }

    /// Recompute current and history from the normalized solution.
    fn update_state(&mut self, solution: &Matrix<f64>) -> Result<()>;
}

/// Stamp a conductance `g` between nodes `n1` and `n2`:
///   A[n1,n1] += g
///   A[n2,n2] += g
///   A[n1,n2] -= g
///   A[n2,n1] -= g
pub fn stamp_conductance(matrix: &mut Matrix<f64>, n1: NodeId, n2: NodeId, g: f64) -> Result<()> {
    let (i, j) = (n1.index(), n2.index());
    matrix.add(i, i, g)?;
    matrix.add(j, j, g)?;
    matrix.add(i, j, -g)?;
    matrix.add(j, i, -g)
}

/// Stamp a current source driving `current` from node `from` into node `to`.
pub fn stamp_current(rhs: &mut Matrix<f64>, from: NodeId, to: NodeId, current: f64) -> Result<()> {
    rhs.add(from.index(), 0, -current)?;
    rhs.add(to.index(), 0, current)
}

/// Voltage of node `a` relative to node `b` in a solved vector.
pub(crate) fn voltage_across(solution: &Matrix<f64>, a: NodeId, b: NodeId) -> Result<f64> {
    Ok(solution.get(a.index(), 0)? - solution.get(b.index(), 0)?)
}

pub(crate) fn ensure_distinct(source: NodeId, destination: NodeId) -> Result<()> {
    if source == destination {
        return Err(SimError::invalid_node(format!(
            "source and destination must differ (both {source})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductance_stamp_pattern() {
        let mut m = Matrix::new(3, 3).unwrap();
        stamp_conductance(&mut m, NodeId(0), NodeId(2), 0.5).unwrap();
        assert_eq!(m.get(0, 0).unwrap(), 0.5);
        assert_eq!(m.get(2, 2).unwrap(), 0.5);
        assert_eq!(m.get(0, 2).unwrap(), -0.5);
        assert_eq!(m.get(2, 0).unwrap(), -0.5);
        assert_eq!(m.get(1, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_stamps_accumulate() {
        let mut rhs = Matrix::new(2, 1).unwrap();
        stamp_current(&mut rhs, NodeId(0), NodeId(1), 2.0).unwrap();
        stamp_current(&mut rhs, NodeId(1), NodeId(0), 0.5).unwrap();
        assert_eq!(rhs.column_values(), vec![-1.5, 1.5]);
    }

    #[test]
    fn test_stamp_out_of_range_node() {
        let mut m = Matrix::new(2, 2).unwrap();
        assert!(matches!(
            stamp_conductance(&mut m, NodeId(0), NodeId(2), 1.0),
            Err(SimError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_ensure_distinct() {
        assert!(ensure_distinct(NodeId(0), NodeId(1)).is_ok());
        assert!(matches!(
            ensure_distinct(NodeId(1), NodeId(1)),
            Err(SimError::InvalidNode { .. })
        ));
    }
}
