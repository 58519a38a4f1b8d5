use crate::node::Node;

/// Color an external renderer should draw a node with.
///
/// Maximum-degree wins over neighbor coloring; the inspector highlight is a
/// separate marker (`Node::highlighted`) and does not affect the color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeColor {
    /// Node currently holds the highest neighbor count ever observed.
    Red,
    /// Node was marked by the neighbor coloring channel.
    Blue,
    Black,
}

pub fn node_color(node: &Node) -> NodeColor {
    if node.is_max {
        NodeColor::Red
    } else if node.draw_as_neighbor {
        NodeColor::Blue
    } else {
        NodeColor::Black
    }
}

/// Relative drawing size: the node's share of all nodes it has ever seen,
/// floored at 0.1 so isolated nodes stay visible.
pub fn size_fraction(node: &Node, total_nodes: usize) -> f64 {
    if total_nodes == 0 {
        return 0.1;
    }
    (node.neighbors.count() as f64 / total_nodes as f64).max(0.1)
}
