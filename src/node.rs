use std::fmt;

use crate::degree::NeighborTracker;

/// Unique node identifier, assigned at creation and immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn new(raw: u64) -> Self {
        NodeId(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }

    /// The id one above this one.
    pub fn successor(self) -> Option<NodeId> {
        self.0.checked_add(1).map(NodeId)
    }

    /// The id one below this one, if any.
    pub fn predecessor(self) -> Option<NodeId> {
        self.0.checked_sub(1).map(NodeId)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Position { x, y, z }
    }

    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
}

/// Names of the behavior models attached to a node, shown by the inspector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeModels {
    pub implementation: String,
    pub connectivity: String,
    pub interference: String,
    pub mobility: String,
    pub reliability: String,
}

impl Default for NodeModels {
    fn default() -> Self {
        NodeModels {
            implementation: "DefaultNode".to_owned(),
            connectivity: "StaticConnectivity".to_owned(),
            interference: "NoInterference".to_owned(),
            mobility: "NoMobility".to_owned(),
            reliability: "ReliableDelivery".to_owned(),
        }
    }
}

/// One node record as held by the registry.
///
/// The two flag channels are deliberately separate: `is_max` belongs to the
/// per-round degree evaluation, `highlighted` to the single-selection
/// inspector, and `draw_as_neighbor` to the coarse neighbor coloring. An
/// external renderer reads all three; nothing else may couple them.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub position: Position,
    pub models: NodeModels,
    pub neighbors: NeighborTracker,
    pub is_max: bool,
    pub highlighted: bool,
    pub draw_as_neighbor: bool,
}

impl Node {
    pub fn new(id: NodeId, position: Position) -> Self {
        Node {
            id,
            position,
            models: NodeModels::default(),
            neighbors: NeighborTracker::new(),
            is_max: false,
            highlighted: false,
            draw_as_neighbor: false,
        }
    }

    pub fn with_models(mut self, models: NodeModels) -> Self {
        self.models = models;
        self
    }

    pub fn info_text(&self) -> String {
        format!(
            "This node has seen {} neighbors during its life.",
            self.neighbors.count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_adjacency_is_numeric() {
        assert_eq!(NodeId::new(7).successor(), Some(NodeId::new(8)));
        assert_eq!(NodeId::new(7).predecessor(), Some(NodeId::new(6)));
        assert_eq!(NodeId::new(0).predecessor(), None);
        assert_eq!(NodeId::new(u64::MAX).successor(), None);
    }

    #[test]
    fn info_text_reports_lifetime_neighbor_count() {
        let mut node = Node::new(NodeId::new(1), Position::ORIGIN);
        node.neighbors.observe([NodeId::new(2), NodeId::new(3)]);
        assert_eq!(
            node.info_text(),
            "This node has seen 2 neighbors during its life."
        );
    }
}
