//! Simulation clock configuration.

use crate::error::{ensure_positive, Result, SimError};

/// Time step and stop time for a transient run, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Fixed integration step.
    pub time_step: f64,
    /// The run is complete once the clock reaches this value.
    pub stop_time: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_step: crate::DEFAULT_TIME_STEP,
            stop_time: crate::DEFAULT_STOP_TIME,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the integration step.
    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    /// Set the stop time.
    pub fn with_stop_time(mut self, stop_time: f64) -> Self {
        self.stop_time = stop_time;
        self
    }

    /// Both values positive and stop time not below the time step.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("time_step", self.time_step)?;
        ensure_positive("stop_time", self.stop_time)?;
        if self.stop_time < self.time_step {
            return Err(SimError::InvalidTiming {
                time_step: self.time_step,
                stop_time: self.stop_time,
            });
        }
        Ok(())
    }
}
