//! Depth-first cycle search over the wait-for graph

use crate::allocation::{ProcessId, ResourceId};
use petgraph::graph::{DiGraph, Neighbors, NodeIndex};
use tracing::trace;

/// Traversal colour of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    /// On the current DFS path
    OnStack,
    /// Fully explored
    Visited,
}

/// How many cycles the search should collect before stopping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchLimit {
    First,
    All,
}

/// Iterative DFS with explicit path and neighbour stacks
///
/// State lives in the struct instead of being captured by a recursive
/// closure; each call to [`explore`](Self::explore) walks one root to
/// exhaustion. A back-edge to an `OnStack` node closes a cycle whose members
/// are the path slice from that node to the current one, in wait order.
pub(crate) struct CycleSearch<'g> {
    graph: &'g DiGraph<ProcessId, ResourceId>,
    marks: Vec<Mark>,
    path: Vec<NodeIndex>,
    frontier: Vec<Neighbors<'g, ResourceId>>,
    cycles: Vec<Vec<ProcessId>>,
}

impl<'g> CycleSearch<'g> {
    pub(crate) fn new(graph: &'g DiGraph<ProcessId, ResourceId>) -> Self {
        Self {
            graph,
            marks: vec![Mark::Unvisited; graph.node_count()],
            path: Vec::new(),
            frontier: Vec::new(),
            cycles: Vec::new(),
        }
    }

    /// Run the search from every unvisited node in index order
    pub(crate) fn run(mut self, limit: SearchLimit) -> Vec<Vec<ProcessId>> {
        for root in self.graph.node_indices() {
            if self.marks[root.index()] != Mark::Unvisited {
                continue;
            }
            self.explore(root);
            if limit == SearchLimit::First && !self.cycles.is_empty() {
                self.cycles.truncate(1);
                break;
            }
        }
        self.cycles
    }

    fn explore(&mut self, root: NodeIndex) {
        self.enter(root);

        while let Some(neighbors) = self.frontier.last_mut() {
            match neighbors.next() {
                Some(next) => match self.marks[next.index()] {
                    Mark::Unvisited => self.enter(next),
                    Mark::OnStack => self.close_cycle(next),
                    Mark::Visited => {}
                },
                None => self.leave(),
            }
        }
    }

    fn enter(&mut self, node: NodeIndex) {
        self.marks[node.index()] = Mark::OnStack;
        self.path.push(node);
        self.frontier.push(self.graph.neighbors(node));
    }

    fn leave(&mut self) {
        self.frontier.pop();
        if let Some(done) = self.path.pop() {
            self.marks[done.index()] = Mark::Visited;
        }
    }

    fn close_cycle(&mut self, repeated: NodeIndex) {
        let Some(start) = self.path.iter().position(|&n| n == repeated) else {
            return;
        };
        let members: Vec<ProcessId> = self.path[start..]
            .iter()
            .map(|&n| self.graph[n])
            .collect();
        trace!(len = members.len(), "back-edge closes a cycle");
        self.cycles.push(members);
    }
}
