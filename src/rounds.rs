use tracing::debug;

use crate::degree::DegreeHighlighter;
use crate::node::NodeId;
use crate::registry::Registry;

/// Run one round over the registry in insertion order.
pub fn run_round(registry: &mut Registry, highlighter: &mut DegreeHighlighter) {
    let order = registry.ids();
    run_round_ordered(registry, highlighter, &order);
}

/// Run one round in a caller-supplied node order.
///
/// Per node: observe the current outgoing endpoints first, then evaluate
/// the degree flag; observation must precede evaluation within a round.
/// The order decides which tied nodes end up flagged, so callers must keep
/// it deterministic. Ids not present in the registry are skipped.
pub fn run_round_ordered(
    registry: &mut Registry,
    highlighter: &mut DegreeHighlighter,
    order: &[NodeId],
) {
    for &id in order {
        let endpoints = registry.outgoing(id);
        let Some(node) = registry.get_mut(id) else {
            continue;
        };

        node.neighbors.observe(endpoints);
        highlighter.evaluate(node);
    }

    debug!(
        nodes = order.len(),
        max_neighbors = highlighter.max_neighbors(),
        "round complete"
    );
}

/// Explicit full-simulation reset: clears every neighbor tracker, all flag
/// channels, and the global maximum. Never triggered by rounds themselves.
pub fn reset_all(registry: &mut Registry, highlighter: &mut DegreeHighlighter) {
    for node in registry.nodes_mut() {
        node.neighbors.reset();
        node.is_max = false;
        node.highlighted = false;
        node.draw_as_neighbor = false;
    }
    highlighter.reset();
}
