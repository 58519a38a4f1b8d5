//! Degree tracking and interactive node inspection for simulated network
//! topologies.
//!
//! The crate keeps two independent pieces of state over an ordered node
//! registry: a per-node "neighbors ever seen" tracker feeding a global
//! maximum-degree flag, and a one-node-at-a-time inspector session that
//! navigates by identifier adjacency and edits node positions. Rendering is
//! left to the consumer; the crate only exposes flags, colors and refresh
//! notifications.

pub mod coloring;
pub mod degree;
pub mod inspector;
pub mod node;
pub mod registry;
pub mod rounds;
pub mod scenario;
pub mod view;

pub use coloring::NeighborColoring;
pub use degree::{DegreeHighlighter, NeighborTracker};
pub use inspector::{InspectorSession, NoRefresh, RefreshSink, ValidationError};
pub use node::{Node, NodeId, NodeModels, Position};
pub use registry::{Registry, RegistryError};
pub use rounds::{reset_all, run_round, run_round_ordered};
pub use scenario::{ConnectivityUpdate, Scenario, apply_update, load_scenario, parse_scenario};
pub use view::{NodeColor, node_color, size_fraction};
