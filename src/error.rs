//! Error types for the lincirc circuit simulator.
//!
//! This module provides a unified error type [`SimError`] that covers
//! all error conditions that can occur during matrix access, factorization,
//! component construction, circuit assembly and stepping.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Unified error type for all lincirc operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    // ============ Construction / Validation Errors ============
    /// Matrix dimensions are zero or do not fit the operation
    #[error("Invalid dimensions {rows}x{cols}: {message}")]
    InvalidDimensions {
        rows: usize,
        cols: usize,
        message: String,
    },

    /// Component node ids are negative or identical
    #[error("Invalid node: {message}")]
    InvalidNode { message: String },

    /// Non-positive physical parameter or time setting
    #[error("Invalid parameter '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // ============ Capacity / Uniqueness Errors ============
    /// Circuit created with room for zero components
    #[error("Circuit capacity must be greater than 0")]
    InvalidCapacity,

    /// Component collection is full
    #[error("Circuit is already full ({capacity} components)")]
    CapacityExceeded { capacity: usize },

    /// A second reference (ground) component was added
    #[error("Circuit already has a reference node at {existing}, cannot add another one")]
    DuplicateReference { existing: usize },

    // ============ Topology Errors ============
    /// Stop time is smaller than the time step, or either is unset
    #[error("Invalid timing: stop time {stop_time} must be at least time step {time_step}")]
    InvalidTiming { time_step: f64, stop_time: f64 },

    /// No nodes were observed
    #[error("There are no components in the circuit")]
    NoComponents,

    /// No component declares itself the reference node
    #[error("Circuit has no reference (ground) node")]
    MissingReference,

    /// Node ids skip a value between 0 and the largest id
    #[error("Circuit nodes are not contiguous: node {missing} is unused (max node {max_node})")]
    NonContiguousNodes { missing: usize, max_node: usize },

    // ============ Readiness Errors ============
    /// `step()` called before `initialize()`
    #[error("Circuit has not been initialized")]
    NotInitialized,

    /// Results read before the first step
    #[error("Cannot read results from a circuit that has not been simulated")]
    NotRun,

    /// The time step no longer advances the clock
    #[error("Time step {time_step} does not advance the clock at {time}")]
    ClockStalled { time: f64, time_step: f64 },

    // ============ Bounds Errors ============
    /// Matrix element access outside the declared dimensions
    #[error("Index ({row}, {col}) out of bounds for {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Requested node or component does not exist
    #[error("Requested {what} {index} does not exist (limit {limit})")]
    InvalidIndex {
        what: &'static str,
        index: usize,
        limit: usize,
    },
}

/// Coarse grouping of [`SimError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad dimensions, node ids, parameters or time settings
    Validation,
    /// Collection full or reference already present
    Capacity,
    /// Operation called out of sequence
    Readiness,
    /// Circuit structure cannot be simulated
    Topology,
    /// Access outside declared dimensions
    Bounds,
}

impl SimError {
    /// Create an invalid dimensions error
    pub fn invalid_dimensions(rows: usize, cols: usize, message: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            rows,
            cols,
            message: message.into(),
        }
    }

    /// Create an invalid node error
    pub fn invalid_node(message: impl Into<String>) -> Self {
        Self::InvalidNode {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            message: message.into(),
        }
    }

    /// The taxonomy group this error belongs to.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidDimensions { .. }
            | Self::InvalidNode { .. }
            | Self::InvalidParameter { .. }
            | Self::InvalidCapacity => ErrorCategory::Validation,
            Self::CapacityExceeded { .. } | Self::DuplicateReference { .. } => {
                ErrorCategory::Capacity
            }
            Self::NotInitialized | Self::NotRun | Self::ClockStalled { .. } => {
                ErrorCategory::Readiness
            }
            Self::InvalidTiming { .. }
            | Self::NoComponents
            | Self::MissingReference
            | Self::NonContiguousNodes { .. } => ErrorCategory::Topology,
            Self::OutOfBounds { .. } | Self::InvalidIndex { .. } => ErrorCategory::Bounds,
        }
    }
}

/// Reject zero, negative and non-finite values for a physical parameter.
pub(crate) fn ensure_positive(param: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimError::invalid_parameter(
            param,
            format!("must be greater than 0 (got {value})"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("resistance", 10.0), Ok(10.0));
        assert!(matches!(
            ensure_positive("resistance", 0.0),
            Err(SimError::InvalidParameter { .. })
        ));
        assert!(ensure_positive("resistance", -1.0).is_err());
        assert!(ensure_positive("resistance", f64::NAN).is_err());
        assert!(ensure_positive("resistance", f64::INFINITY).is_err());
    }

    #[test]
    fn test_categories() {
        assert_eq!(SimError::NotRun.category(), ErrorCategory::Readiness);
        assert_eq!(SimError::MissingReference.category(), ErrorCategory::Topology);
        assert_eq!(
            SimError::CapacityExceeded { capacity: 3 }.category(),
            ErrorCategory::Capacity
        );
        assert_eq!(
            SimError::OutOfBounds {
                row: 1,
                col: 0,
                rows: 1,
                cols: 1
            }
            .category(),
            ErrorCategory::Bounds
        );
        assert_eq!(SimError::InvalidCapacity.category(), ErrorCategory::Validation);
        assert_eq!(
            SimError::ClockStalled {
                time: 1e17,
                time_step: 1.0
            }
            .category(),
            ErrorCategory::Readiness
        );
    }

    #[test]
    fn test_display_carries_values() {
        let err = SimError::NonContiguousNodes {
            missing: 1,
            max_node: 2,
        };
        assert!(err.to_string().contains("node 1"));
    }
}
