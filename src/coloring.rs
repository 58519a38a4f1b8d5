use tracing::debug;

use crate::inspector::RefreshSink;
use crate::node::NodeId;
use crate::registry::Registry;

/// Coarse "show me everything this node has ever seen" coloring.
///
/// This channel writes `draw_as_neighbor` and may mark many nodes at once.
/// It is independent of the inspector's single-selection highlight and must
/// stay that way.
#[derive(Clone, Debug, Default)]
pub struct NeighborColoring {
    colored: bool,
}

impl NeighborColoring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an undo is worth offering in a menu. False until the first
    /// coloring and after every undo.
    pub fn can_undo(&self) -> bool {
        self.colored
    }

    /// Mark every node the given node has ever seen as a neighbor.
    pub fn color_neighbors(
        &mut self,
        registry: &mut Registry,
        id: NodeId,
        sink: &mut dyn RefreshSink,
    ) {
        let Some(node) = registry.get(id) else {
            return;
        };
        let seen = node.neighbors.iter().collect::<Vec<_>>();

        for neighbor in &seen {
            if let Some(node) = registry.get_mut(*neighbor) {
                node.draw_as_neighbor = true;
            }
        }

        self.colored = true;
        debug!(node = %id, neighbors = seen.len(), "neighbors colored");
        sink.refresh_requested();
    }

    /// Clear the neighbor coloring on every node in the registry, not just
    /// the ones colored last.
    pub fn undo_coloring(&mut self, registry: &mut Registry, sink: &mut dyn RefreshSink) {
        for node in registry.nodes_mut() {
            node.draw_as_neighbor = false;
        }

        self.colored = false;
        sink.refresh_requested();
    }
}
