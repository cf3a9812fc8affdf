//! Independent sources.

use crate::circuit::NodeId;
use crate::error::{ensure_positive, Result};
use crate::solver::Matrix;

use super::{ensure_distinct, stamp_conductance, stamp_current, voltage_across, Component};

/// A voltage source with internal resistance whose negative terminal is the
/// circuit's reference node.
///
/// Modeled as its Norton equivalent:
///   i(t) = (V - v(t)) / R
///
/// with v(t) = V[destination] - V[source], i.e. a conductance 1/R in
/// parallel with a constant current V/R driven from the ground (source)
/// node into the positive (destination) node.
#[derive(Debug, Clone)]
pub struct GroundedVoltageSource {
    nodes: [NodeId; 2], // [ground, positive]
    voltage: f64,
    resistance: f64,
    current: f64,
}

impl GroundedVoltageSource {
    /// Create a new source. `ground` becomes the circuit reference node.
    pub fn new(ground: NodeId, positive: NodeId, voltage: f64, resistance: f64) -> Result<Self> {
        ensure_distinct(ground, positive)?;
        Ok(Self {
            nodes: [ground, positive],
            voltage: ensure_positive("voltage", voltage)?,
            resistance: ensure_positive("resistance", resistance)?,
            current: 0.0,
        })
    }

    pub fn voltage(&self) -> f64 {
        self.voltage
    }

    /// Internal (series) resistance.
    pub fn resistance(&self) -> f64 {
        self.resistance
    }
}

impl Component for GroundedVoltageSource {
    fn kind(&self) -> &'static str {
        "grounded voltage source"
    }

    fn node_source(&self) -> NodeId {
        self.nodes[0]
    }

    fn node_destination(&self) -> NodeId {
        self.nodes[1]
    }

    fn is_reference(&self) -> bool {
        true
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn stamp_conductance(&mut self, matrix: &mut Matrix<f64>, _time_step: f64) -> Result<()> {
        self.current = 0.0;
        stamp_conductance(matrix, self.nodes[0], self.nodes[1], 1.0 / self.resistance)
    }

    fn stamp_source(&mut self, rhs: &mut Matrix<f64>) -> Result<()> {
        stamp_current(rhs, self.nodes[0], self.nodes[1], self.voltage / self.resistance)
    }

    fn update_state(&mut self, solution: &Matrix<f64>) -> Result<()> {
        let terminal = voltage_across(solution, self.nodes[1], self.nodes[0])?;
        self.current = (self.voltage - terminal) / self.resistance;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_validation() {
        assert!(matches!(
            GroundedVoltageSource::new(NodeId(0), NodeId(0), 5.0, 1.0),
            Err(SimError::InvalidNode { .. })
        ));
        assert!(matches!(
            GroundedVoltageSource::new(NodeId(0), NodeId(1), 0.0, 1.0),
            Err(SimError::InvalidParameter { .. })
        ));
        assert!(GroundedVoltageSource::new(NodeId(0), NodeId(1), 5.0, -2.0).is_err());
    }

    #[test]
    fn test_norton_stamps() {
        let mut v = GroundedVoltageSource::new(NodeId(1), NodeId(0), 30.0, 10.0).unwrap();
        assert!(v.is_reference());
        assert_eq!(v.node_source(), NodeId(1));

        let mut m = Matrix::new(2, 2).unwrap();
        v.stamp_conductance(&mut m, 1.0).unwrap();
        assert_abs_diff_eq!(m.get(1, 1).unwrap(), 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(m.get(1, 0).unwrap(), -0.1, epsilon = 1e-12);

        let mut rhs = Matrix::new(2, 1).unwrap();
        v.stamp_source(&mut rhs).unwrap();
        assert_abs_diff_eq!(rhs.get(1, 0).unwrap(), -3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rhs.get(0, 0).unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_open_circuit_current() {
        let mut v = GroundedVoltageSource::new(NodeId(0), NodeId(1), 12.0, 2.0).unwrap();
        v.stamp_conductance(&mut Matrix::new(2, 2).unwrap(), 1.0).unwrap();
        v.update_state(&Matrix::column(&[0.0, 12.0]).unwrap()).unwrap();
        assert_abs_diff_eq!(v.current(), 0.0, epsilon = 1e-12);
        v.update_state(&Matrix::column(&[0.0, 8.0]).unwrap()).unwrap();
        assert_abs_diff_eq!(v.current(), 2.0, epsilon = 1e-12);
    }
}
