use std::collections::BTreeSet;

use tracing::debug;

use crate::node::{Node, NodeId};

/// Accumulates the set of distinct nodes ever reached through a node's
/// outgoing connections.
///
/// The set only grows: a neighbor that disconnects stays recorded. Only an
/// explicit full reset clears it.
#[derive(Clone, Debug, Default)]
pub struct NeighborTracker {
    seen: BTreeSet<NodeId>,
}

impl NeighborTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the endpoints of the node's current outgoing connections.
    /// Already-seen endpoints are no-ops.
    pub fn observe<I>(&mut self, endpoints: I)
    where
        I: IntoIterator<Item = NodeId>,
    {
        for endpoint in endpoints {
            self.seen.insert(endpoint);
        }
    }

    pub fn count(&self) -> usize {
        self.seen.len()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.seen.contains(&id)
    }

    /// Iterate seen neighbors in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.seen.iter().copied()
    }

    pub fn reset(&mut self) {
        self.seen.clear();
    }
}

/// Tracks the highest neighbor count ever observed across all nodes and
/// flags, once per round per node, whether a node currently holds it.
///
/// The counter is updated incrementally as nodes are evaluated, so a node
/// evaluated earlier in a round raises the bar for later nodes in the same
/// round. With ties this makes the flag assignment order-dependent; the
/// evaluation order is caller-supplied and must stay deterministic.
#[derive(Clone, Debug, Default)]
pub struct DegreeHighlighter {
    max_neighbors: usize,
}

impl DegreeHighlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Highest neighbor count observed so far. Monotonically non-decreasing
    /// between resets.
    pub fn max_neighbors(&self) -> usize {
        self.max_neighbors
    }

    /// Per-round evaluation for one node. Total, never fails, never skipped.
    ///
    /// `>=` (not `>`) is intentional: a node matching the current maximum is
    /// flagged too, so several tied nodes can be flagged in one round.
    pub fn evaluate(&mut self, node: &mut Node) {
        let count = node.neighbors.count();
        if count >= self.max_neighbors {
            if count > self.max_neighbors {
                debug!(node = %node.id, count, "new maximum neighbor count");
            }
            self.max_neighbors = count;
            node.is_max = true;
        } else {
            node.is_max = false;
        }
    }

    pub fn reset(&mut self) {
        self.max_neighbors = 0;
    }
}
