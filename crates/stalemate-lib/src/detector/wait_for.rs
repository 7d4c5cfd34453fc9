//! Wait-for graph derived from an allocation snapshot

use crate::allocation::{AllocationModel, ProcessId, ResourceId};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;
use tracing::trace;

/// Directed graph where `P -> Q` means P waits on a resource Q holds
///
/// Nodes carry the process id, edges carry the resource that links them.
/// Every process of the model is a node, added in creation order, so
/// traversals visit roots deterministically. Each node has at most one
/// outgoing edge.
pub struct WaitForGraph {
    graph: DiGraph<ProcessId, ResourceId>,
    node_map: HashMap<ProcessId, NodeIndex>,
}

impl WaitForGraph {
    /// Derive the graph from the model's current state
    pub fn build(model: &AllocationModel) -> Self {
        let mut graph = DiGraph::with_capacity(model.process_count(), model.process_count());
        let mut node_map = HashMap::with_capacity(model.process_count());

        for (pid, _) in model.processes() {
            node_map.insert(pid, graph.add_node(pid));
        }

        for (pid, process) in model.processes() {
            let Some(target) = process.waiting_for() else {
                continue;
            };
            // A wait on a free resource contributes no edge
            let Some(holder) = model.resource(target).and_then(|r| r.allocated_to()) else {
                continue;
            };
            trace!(
                waiter = model.process_name(pid),
                holder = model.process_name(holder),
                resource = model.resource_name(target),
                "wait-for edge"
            );
            graph.add_edge(node_map[&pid], node_map[&holder], target);
        }

        Self { graph, node_map }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// True when no process is waiting on a held resource
    pub fn is_empty(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Quick cycle check that does not extract membership
    pub fn has_cycle(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    /// The resource linking `waiter` to `holder`, if that edge exists
    pub fn link(&self, waiter: ProcessId, holder: ProcessId) -> Option<ResourceId> {
        let from = *self.node_map.get(&waiter)?;
        let to = *self.node_map.get(&holder)?;
        self.graph
            .find_edge(from, to)
            .map(|edge| self.graph[edge])
    }

    /// All `(waiter, resource, holder)` triples
    pub fn edges(&self) -> impl Iterator<Item = (ProcessId, ResourceId, ProcessId)> + '_ {
        self.graph.edge_references().map(|edge| {
            (
                self.graph[edge.source()],
                *edge.weight(),
                self.graph[edge.target()],
            )
        })
    }

    pub(crate) fn inner(&self) -> &DiGraph<ProcessId, ResourceId> {
        &self.graph
    }
}
