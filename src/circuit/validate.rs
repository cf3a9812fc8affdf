//! Circuit validation.

use crate::error::{Result, SimError};

use super::NodeSet;

/// Validate a circuit for simulation and return the system matrix dimension.
///
/// Checks, in order:
/// - Both time settings are present and stop time >= time step
/// - At least one node is in use
/// - A reference (ground) node exists
/// - Node ids run from 0 to the largest id without gaps
pub fn validate_circuit(
    nodes: &NodeSet,
    time_step: Option<f64>,
    stop_time: Option<f64>,
) -> Result<usize> {
    match (time_step, stop_time) {
        (Some(step), Some(stop)) if stop >= step => {}
        (step, stop) => {
            return Err(SimError::InvalidTiming {
                time_step: step.unwrap_or(0.0),
                stop_time: stop.unwrap_or(0.0),
            });
        }
    }

    let max_node = nodes.max_node().ok_or(SimError::NoComponents)?;

    if nodes.reference().is_none() {
        return Err(SimError::MissingReference);
    }

    if let Some(missing) = nodes.first_gap() {
        return Err(SimError::NonContiguousNodes {
            missing: missing.index(),
            max_node: max_node.index(),
        });
    }

    Ok(max_node.index() + 1)
}
