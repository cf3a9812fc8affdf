//! Core types for circuit representation.

use std::fmt;

use crate::error::{Result, SimError};

/// A node in the circuit, which is also its row/column in the system matrix.
///
/// Node ids must be contiguous from 0. Which node is the reference is decided
/// by the component that declares itself ground, not by the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Index into the system matrix and solution vector.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for NodeId {
    fn from(value: usize) -> Self {
        NodeId(value)
    }
}

impl TryFrom<i64> for NodeId {
    type Error = SimError;

    fn try_from(value: i64) -> Result<Self> {
        usize::try_from(value)
            .map(NodeId)
            .map_err(|_| SimError::invalid_node(format!("node id {value} must not be negative")))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// Position of a component in its circuit, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub usize);

impl ComponentId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ComponentId {
    fn from(value: usize) -> Self {
        ComponentId(value)
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", self.0)
    }
}

/// Lifecycle of a [`Circuit`](super::Circuit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Accepting components; any add returns the circuit here.
    #[default]
    Building,
    /// Matrices assembled and factored, clock at 0.
    Initialized,
    /// At least one step has run; results are readable.
    Running,
}
