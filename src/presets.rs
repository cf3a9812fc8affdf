//! Reference circuits.
//!
//! Each preset is a 30 V source with 10 ohm internal resistance between node 2
//! (ground) and node 1, a 10 ohm resistor from node 1 to node 0, and a third
//! element from node 0 back to ground:
//!
//! ```text
//!   N2 (GND) --[30V / 10R]--> N1 --[10R]--> N0 --[load]--> N2
//! ```

use crate::circuit::{Circuit, NodeId, SimulationConfig};
use crate::components::{Capacitor, Component, GroundedVoltageSource, Inductor, Resistor};
use crate::error::Result;

/// Load element between node 0 and ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Load {
    /// 10 ohm resistor
    Resistor,
    /// 0.2 F capacitor
    Capacitor,
    /// 50 H inductor
    Inductor,
}

/// Build the series circuit with the given load and clock.
pub fn series(load: Load, config: SimulationConfig) -> Result<Circuit> {
    let ground = NodeId(2);
    let mut circuit = Circuit::with_config(3, config)?;
    circuit.add_component(GroundedVoltageSource::new(ground, NodeId(1), 30.0, 10.0)?)?;
    circuit.add_component(Resistor::new(NodeId(1), NodeId(0), 10.0)?)?;
    let load: Box<dyn Component> = match load {
        Load::Resistor => Box::new(Resistor::new(NodeId(0), ground, 10.0)?),
        Load::Capacitor => Box::new(Capacitor::new(NodeId(0), ground, 0.2)?),
        Load::Inductor => Box::new(Inductor::new(NodeId(0), ground, 50.0)?),
    };
    circuit.add_boxed(load)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ComponentId;
    use approx::assert_abs_diff_eq;

    fn run(load: Load) -> Circuit {
        let mut circuit = series(load, SimulationConfig::default()).unwrap();
        circuit.initialize().unwrap();
        assert_eq!(circuit.run().unwrap(), 10);
        assert_eq!(circuit.time(), 10.0);
        assert_eq!(circuit.voltage(NodeId(2)).unwrap(), 0.0);
        circuit
    }

    fn assert_currents(circuit: &Circuit, expected: f64, epsilon: f64) {
        for i in 0..3 {
            assert_abs_diff_eq!(circuit.current(ComponentId(i)).unwrap(), expected, epsilon = epsilon);
        }
    }

    #[test]
    fn test_series_rr_divider() {
        let circuit = run(Load::Resistor);
        assert_abs_diff_eq!(circuit.voltage(NodeId(0)).unwrap(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circuit.voltage(NodeId(1)).unwrap(), 20.0, epsilon = 1e-9);
        assert_currents(&circuit, 1.0, 1e-9);
    }

    #[test]
    fn test_series_rr_is_time_invariant() {
        let mut circuit = series(Load::Resistor, SimulationConfig::default()).unwrap();
        circuit.initialize().unwrap();
        circuit.step().unwrap();
        assert_abs_diff_eq!(circuit.voltage(NodeId(1)).unwrap(), 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_series_rc_charging() {
        let circuit = run(Load::Capacitor);
        assert_abs_diff_eq!(circuit.voltage(NodeId(0)).unwrap(), 27.2224, epsilon = 1e-4);
        assert_abs_diff_eq!(circuit.voltage(NodeId(1)).unwrap(), 28.6112, epsilon = 1e-4);
        assert_currents(&circuit, 0.13888, 1e-5);
    }

    #[test]
    fn test_series_rl() {
        let circuit = run(Load::Inductor);
        assert_abs_diff_eq!(circuit.voltage(NodeId(0)).unwrap(), 0.650307, epsilon = 1e-6);
        assert_abs_diff_eq!(circuit.voltage(NodeId(1)).unwrap(), 15.3252, epsilon = 1e-4);
        assert_currents(&circuit, 1.46748, 1e-5);
    }

    #[test]
    fn test_rc_approaches_source_voltage() {
        let config = SimulationConfig::new().with_time_step(0.1).with_stop_time(200.0);
        let mut circuit = series(Load::Capacitor, config).unwrap();
        circuit.initialize().unwrap();
        circuit.run().unwrap();
        assert_abs_diff_eq!(circuit.voltage(NodeId(0)).unwrap(), 30.0, epsilon = 1e-3);
        assert_abs_diff_eq!(circuit.current(ComponentId(2)).unwrap(), 0.0, epsilon = 1e-4);
    }
}
