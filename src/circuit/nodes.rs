//! Node bookkeeping: which node ids are in use and which one is the reference.

use std::collections::BTreeSet;

use crate::components::Component;
use crate::error::{Result, SimError};

use super::NodeId;

/// The deduplicated set of node ids seen so far, plus the reference node.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    nodes: BTreeSet<NodeId>,
    reference: Option<NodeId>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a component's nodes. Fails, leaving the set untouched, if the
    /// component is a second reference.
    pub fn register(&mut self, component: &dyn Component) -> Result<()> {
        if component.is_reference() {
            if let Some(existing) = self.reference {
                return Err(SimError::DuplicateReference {
                    existing: existing.index(),
                });
            }
            self.reference = Some(component.node_source());
        }
        self.nodes.insert(component.node_source());
        self.nodes.insert(component.node_destination());
        Ok(())
    }

    /// The reference (ground) node, if a reference component was registered.
    pub fn reference(&self) -> Option<NodeId> {
        self.reference
    }

    pub fn max_node(&self) -> Option<NodeId> {
        self.nodes.last().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Smallest id in `0..=max_node` that no component uses.
    pub fn first_gap(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(expected, node)| node.index() != *expected)
            .map(|(expected, _)| NodeId(expected))
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{GroundedVoltageSource, Resistor};

    #[test]
    fn test_register_dedups_and_tracks_max() {
        let mut nodes = NodeSet::new();
        nodes.register(&Resistor::new(NodeId(1), NodeId(0), 1.0).unwrap()).unwrap();
        nodes.register(&Resistor::new(NodeId(0), NodeId(3), 1.0).unwrap()).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.max_node(), Some(NodeId(3)));
        assert_eq!(nodes.first_gap(), Some(NodeId(2)));
        assert_eq!(nodes.reference(), None);
    }

    #[test]
    fn test_contiguous_has_no_gap() {
        let mut nodes = NodeSet::new();
        assert_eq!(nodes.first_gap(), None);
        nodes.register(&Resistor::new(NodeId(2), NodeId(1), 1.0).unwrap()).unwrap();
        assert_eq!(nodes.first_gap(), Some(NodeId(0)));
        nodes.register(&Resistor::new(NodeId(0), NodeId(1), 1.0).unwrap()).unwrap();
        assert_eq!(nodes.first_gap(), None);
        assert_eq!(nodes.iter().collect::<Vec<_>>(), vec![NodeId(0), NodeId(1), NodeId(2)]);
    }

    #[test]
    fn test_second_reference_is_rejected() {
        let mut nodes = NodeSet::new();
        let source = GroundedVoltageSource::new(NodeId(2), NodeId(1), 5.0, 1.0).unwrap();
        nodes.register(&source).unwrap();
        assert_eq!(nodes.reference(), Some(NodeId(2)));

        let other = GroundedVoltageSource::new(NodeId(0), NodeId(4), 5.0, 1.0).unwrap();
        assert_eq!(
            nodes.register(&other),
            Err(SimError::DuplicateReference { existing: 2 })
        );
        // The rejected component left no trace
        assert_eq!(nodes.max_node(), Some(NodeId(2)));
    }
}
