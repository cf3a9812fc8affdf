//! Linear passive components: Resistor, Capacitor, Inductor.

use crate::circuit::NodeId;
use crate::error::{ensure_positive, Result};
use crate::solver::Matrix;

use super::{ensure_distinct, stamp_conductance, stamp_current, voltage_across, Component};

/// A resistor component.
///
///   i(t) = v(t) / R
///
/// with v(t) = V[source] - V[destination]. No internal source.
///
/// Terminals are fixed at construction:
///
/// ```compile_fail
/// use lincirc_core::circuit::NodeId;
/// use lincirc_core::components::Resistor;
///
/// let mut r = Resistor::new(NodeId(0), NodeId(1), 10.0).unwrap();
/// r.nodes = [NodeId(1), NodeId(1)];
/// ```
#[derive(Debug, Clone)]
pub struct Resistor {
    nodes: [NodeId; 2], // [source, destination]
    resistance: f64,
    current: f64,
}

impl Resistor {
    /// Create a new resistor. Fails on equal nodes or non-positive resistance.
    pub fn new(source: NodeId, destination: NodeId, resistance: f64) -> Result<Self> {
        let nodes = [source, destination];
        ensure_distinct(nodes[0], nodes[1])?;
        Ok(Self {
            nodes,
            resistance: ensure_positive("resistance", resistance)?,
            current: 0.0,
        })
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

impl Component for Resistor {
    fn kind(&self) -> &'static str {
        "resistor"
    }

    fn node_source(&self) -> NodeId {
        self.nodes[0]
    }

    fn node_destination(&self) -> NodeId {
        self.nodes[1]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn stamp_conductance(&mut self, matrix: &mut Matrix<f64>, _time_step: f64) -> Result<()> {
        self.current = 0.0;
        stamp_conductance(matrix, self.nodes[0], self.nodes[1], self.conductance())
    }

    fn update_state(&mut self, solution: &Matrix<f64>) -> Result<()> {
        self.current = voltage_across(solution, self.nodes[0], self.nodes[1])? / self.resistance;
        Ok(())
    }
}

/// A capacitor component.
///
/// In discrete-time simulation, a capacitor is modeled using a companion model.
/// Using the trapezoidal rule:
///   i(t) = (2C/dt) * v(t) - i_eq
///
/// where i_eq = (2C/dt) * v(t-dt) + i(t-dt)
///
/// This gives an equivalent conductance G_eq = 2C/dt in parallel with a
/// history source i_eq driven from destination into source.
#[derive(Debug, Clone)]
pub struct Capacitor {
    nodes: [NodeId; 2],
    capacitance: f64,

    // State for discrete-time model
    conductance: f64,
    /// Voltage across the capacitor after the last step
    voltage_delta: f64,
    /// i_eq computed for the step in progress
    history: f64,
    current: f64,
}

impl Capacitor {
    /// Create a new, uncharged capacitor.
    pub fn new(source: NodeId, destination: NodeId, capacitance: f64) -> Result<Self> {
        let nodes = [source, destination];
        ensure_distinct(nodes[0], nodes[1])?;
        Ok(Self {
            nodes,
            capacitance: ensure_positive("capacitance", capacitance)?,
            conductance: 0.0,
            voltage_delta: 0.0,
            history: 0.0,
            current: 0.0,
        })
    }

    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    /// Voltage across the capacitor (source minus destination) after the last step.
    pub fn voltage_delta(&self) -> f64 {
        self.voltage_delta
    }
}

impl Component for Capacitor {
    fn kind(&self) -> &'static str {
        "capacitor"
    }

    fn node_source(&self) -> NodeId {
        self.nodes[0]
    }

    fn node_destination(&self) -> NodeId {
        self.nodes[1]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn stamp_conductance(&mut self, matrix: &mut Matrix<f64>, time_step: f64) -> Result<()> {
        self.current = 0.0;
        self.voltage_delta = 0.0;
        self.history = 0.0;
        self.conductance = 2.0 * self.capacitance / time_step;
        stamp_conductance(matrix, self.nodes[0], self.nodes[1], self.conductance)
    }

    fn stamp_source(&mut self, rhs: &mut Matrix<f64>) -> Result<()> {
        self.history = self.conductance * self.voltage_delta + self.current;
        stamp_current(rhs, self.nodes[1], self.nodes[0], self.history)
    }

    fn update_state(&mut self, solution: &Matrix<f64>) -> Result<()> {
        self.voltage_delta = voltage_across(solution, self.nodes[0], self.nodes[1])?;
        self.current = self.conductance * self.voltage_delta - self.history;
        Ok(())
    }
}

/// An inductor component.
///
/// In discrete-time simulation, an inductor is modeled using a companion model.
/// Using the trapezoidal rule:
///   i(t) = (dt/2L) * v(t) + i_eq
///
/// where i_eq = (dt/2L) * v(t-dt) + i(t-dt)
///
/// The history source i_eq is driven from source into destination, so no
/// extra branch variable is needed in the matrix.
#[derive(Debug, Clone)]
pub struct Inductor {
    nodes: [NodeId; 2],
    inductance: f64,

    // State for discrete-time model
    conductance: f64,
    /// Voltage across the inductor after the last step
    voltage_delta: f64,
    /// i_eq computed for the step in progress
    history: f64,
    current: f64,
}

impl Inductor {
    /// Create a new inductor with no initial current.
    pub fn new(source: NodeId, destination: NodeId, inductance: f64) -> Result<Self> {
        let nodes = [source, destination];
        ensure_distinct(nodes[0], nodes[1])?;
        Ok(Self {
            nodes,
            inductance: ensure_positive("inductance", inductance)?,
            conductance: 0.0,
            voltage_delta: 0.0,
            history: 0.0,
            current: 0.0,
        })
    }

    pub fn inductance(&self) -> f64 {
        self.inductance
    }

    /// Voltage across the inductor (source minus destination) after the last step.
    pub fn voltage_delta(&self) -> f64 {
        self.voltage_delta
    }
}

impl Component for Inductor {
    fn kind(&self) -> &'static str {
        "inductor"
    }

    fn node_source(&self) -> NodeId {
        self.nodes[0]
    }

    fn node_destination(&self) -> NodeId {
        self.nodes[1]
    }

    fn current(&self) -> f64 {
        self.current
    }

    fn stamp_conductance(&mut self, matrix: &mut Matrix<f64>, time_step: f64) -> Result<()> {
        self.current = 0.0;
        self.voltage_delta = 0.0;
        self.history = 0.0;
        self.conductance = time_step / (2.0 * self.inductance);
        stamp_conductance(matrix, self.nodes[0], self.nodes[1], self.conductance)
    }

    fn stamp_source(&mut self, rhs: &mut Matrix<f64>) -> Result<()> {
        self.history = self.conductance * self.voltage_delta + self.current;
        stamp_current(rhs, self.nodes[0], self.nodes[1], self.history)
    }

    fn update_state(&mut self, solution: &Matrix<f64>) -> Result<()> {
        self.voltage_delta = voltage_across(solution, self.nodes[0], self.nodes[1])?;
        self.current = self.conductance * self.voltage_delta + self.history;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_resistor_validation() {
        assert!(matches!(
            Resistor::new(NodeId(1), NodeId(1), 10.0),
            Err(SimError::InvalidNode { .. })
        ));
        assert!(matches!(
            Resistor::new(NodeId(0), NodeId(1), 0.0),
            Err(SimError::InvalidParameter { .. })
        ));
        assert!(Capacitor::new(NodeId(0), NodeId(1), -1.0).is_err());
        assert!(Inductor::new(NodeId(2), NodeId(2), 1.0).is_err());
    }

    #[test]
    fn test_terminals_follow_construction() {
        let parts: [Box<dyn Component>; 3] = [
            Box::new(Resistor::new(NodeId(2), NodeId(0), 1.0).unwrap()),
            Box::new(Capacitor::new(NodeId(2), NodeId(0), 1.0).unwrap()),
            Box::new(Inductor::new(NodeId(2), NodeId(0), 1.0).unwrap()),
        ];
        for part in &parts {
            assert_eq!(part.node_source(), NodeId(2));
            assert_eq!(part.node_destination(), NodeId(0));
        }
    }

    #[test]
    fn test_resistor_conductance() {
        let r = Resistor::new(NodeId(1), NodeId(0), 1000.0).unwrap();
        assert_abs_diff_eq!(r.conductance(), 0.001, epsilon = 1e-12);
    }

    #[test]
    fn test_resistor_current() {
        let mut r = Resistor::new(NodeId(1), NodeId(0), 10.0).unwrap();
        let mut m = Matrix::new(2, 2).unwrap();
        r.stamp_conductance(&mut m, 1.0).unwrap();
        assert_eq!(m.get(0, 1).unwrap(), -0.1);

        let mut rhs = Matrix::new(2, 1).unwrap();
        r.stamp_source(&mut rhs).unwrap();
        assert_eq!(rhs.column_values(), vec![0.0, 0.0]);

        let solution = Matrix::column(&[0.0, 5.0]).unwrap();
        r.update_state(&solution).unwrap();
        assert_abs_diff_eq!(r.current(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_capacitor_companion_model() {
        let mut c = Capacitor::new(NodeId(1), NodeId(0), 1e-3).unwrap();
        let dt = 0.01;
        let mut m = Matrix::new(2, 2).unwrap();
        c.stamp_conductance(&mut m, dt).unwrap();

        // G_eq = 2C/dt = 2 * 1e-3 / 0.01 = 0.2 S
        assert_abs_diff_eq!(m.get(0, 0).unwrap(), 0.2, epsilon = 1e-12);

        // Initial history source should be 0
        let mut rhs = Matrix::new(2, 1).unwrap();
        c.stamp_source(&mut rhs).unwrap();
        assert_eq!(rhs.column_values(), vec![0.0, 0.0]);

        // 1V across the cap
        c.update_state(&Matrix::column(&[0.0, 1.0]).unwrap()).unwrap();
        assert_abs_diff_eq!(c.voltage_delta(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(c.current(), 0.2, epsilon = 1e-12);

        // History = G*v + i, pushed into the source node
        rhs.clear();
        c.stamp_source(&mut rhs).unwrap();
        assert_abs_diff_eq!(rhs.get(1, 0).unwrap(), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(rhs.get(0, 0).unwrap(), -0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_inductor_companion_model() {
        let mut l = Inductor::new(NodeId(0), NodeId(1), 0.5).unwrap();
        let mut m = Matrix::new(2, 2).unwrap();
        l.stamp_conductance(&mut m, 0.1).unwrap();

        // G_eq = dt/2L = 0.1
        assert_abs_diff_eq!(m.get(1, 1).unwrap(), 0.1, epsilon = 1e-12);

        let mut rhs = Matrix::new(2, 1).unwrap();
        l.stamp_source(&mut rhs).unwrap();
        l.update_state(&Matrix::column(&[2.0, 0.0]).unwrap()).unwrap();
        assert_abs_diff_eq!(l.current(), 0.2, epsilon = 1e-12);

        // History = 0.1 * 2 + 0.2, drawn out of the source node
        rhs.clear();
        l.stamp_source(&mut rhs).unwrap();
        assert_abs_diff_eq!(rhs.get(0, 0).unwrap(), -0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(rhs.get(1, 0).unwrap(), 0.4, epsilon = 1e-12);

        // Same voltage again: current keeps ramping
        l.update_state(&Matrix::column(&[2.0, 0.0]).unwrap()).unwrap();
        assert_abs_diff_eq!(l.current(), 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_restamp_resets_history() {
        let mut l = Inductor::new(NodeId(0), NodeId(1), 0.5).unwrap();
        let mut m = Matrix::new(2, 2).unwrap();
        l.stamp_conductance(&mut m, 0.1).unwrap();
        l.stamp_source(&mut Matrix::new(2, 1).unwrap()).unwrap();
        l.update_state(&Matrix::column(&[2.0, 0.0]).unwrap()).unwrap();
        assert!(l.current() != 0.0);

        l.stamp_conductance(&mut Matrix::new(2, 2).unwrap(), 0.1).unwrap();
        assert_eq!(l.current(), 0.0);
        assert_eq!(l.voltage_delta(), 0.0);
    }
}
