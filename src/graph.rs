//! Symmetric adjacency view over the registry.
//!
//! Each part stores a single directed `connected_to` edge; the graph
//! materializes the undirected view from those edges alone, ignoring the
//! redundant back-references. It is rebuilt for every traversal rather than
//! cached, so it always reflects current `connected_to` state.

use hashbrown::HashMap;

use crate::part::PartId;
use crate::registry::Registry;

/// Undirected adjacency over all registered parts.
///
/// Neighbor lists are deduplicated and ordered by edge discovery over the
/// registry's registration order, so traversals are deterministic.
///
/// # Example
///
/// ```
/// use rocket_assembly::{ConnectionGraph, Part, PartRole, Registry};
///
/// let mut registry = Registry::new();
/// let a = registry.insert(Part::new(PartRole::CoreTank));
/// let b = registry.insert(Part::new(PartRole::CoreThruster));
/// registry.attach(b, a).unwrap();
///
/// let graph = ConnectionGraph::build(&registry);
/// assert_eq!(graph.degree(a), 1);
/// assert_eq!(graph.neighbors(b), &[a]);
/// ```
#[derive(Debug, Clone)]
pub struct ConnectionGraph {
    /// Neighbor lists keyed by part ID.
    adjacency: HashMap<PartId, Vec<PartId>>,

    /// Part IDs in registration order.
    order: Vec<PartId>,
}

impl ConnectionGraph {
    /// Build the adjacency view from the registry's `connected_to` edges.
    #[must_use]
    pub fn build(registry: &Registry) -> Self {
        let order: Vec<PartId> = registry.ids().collect();
        let mut adjacency: HashMap<PartId, Vec<PartId>> = order
            .iter()
            .map(|&id| (id, Vec::new()))
            .collect();

        for (id, part) in registry.parts() {
            let Some(other) = part.connected_to() else {
                continue;
            };
            // Edges to unregistered parts cannot occur while the registry
            // invariants hold, but a stale ID must not invent a node.
            if !adjacency.contains_key(&other) {
                continue;
            }
            if let Some(neighbors) = adjacency.get_mut(&id)
                && !neighbors.contains(&other)
            {
                neighbors.push(other);
            }
            if let Some(neighbors) = adjacency.get_mut(&other)
                && !neighbors.contains(&id)
            {
                neighbors.push(id);
            }
        }

        Self { adjacency, order }
    }

    /// Get the neighbors of a part, in deterministic order.
    ///
    /// Unknown IDs have no neighbors.
    #[must_use]
    pub fn neighbors(&self, id: PartId) -> &[PartId] {
        self.adjacency.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Get the degree of a part.
    #[must_use]
    pub fn degree(&self, id: PartId) -> usize {
        self.neighbors(id).len()
    }

    /// Check whether a part is in the graph.
    #[must_use]
    pub fn contains(&self, id: PartId) -> bool {
        self.adjacency.contains_key(&id)
    }

    /// Iterate over part IDs in registration order.
    pub fn ids(&self) -> impl Iterator<Item = PartId> + '_ {
        self.order.iter().copied()
    }

    /// Get the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Get the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }
}
