use std::collections::HashMap;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::node::{Node, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("node {0} already exists in the registry")]
    DuplicateNode(NodeId),

    #[error("node {0} does not exist in the registry")]
    UnknownNode(NodeId),

    #[error("edge {0} -> {1} already exists")]
    DuplicateEdge(NodeId, NodeId),

    #[error("edge {0} -> {1} does not exist")]
    UnknownEdge(NodeId, NodeId),

    #[error("node {0} cannot connect to itself")]
    SelfEdge(NodeId),
}

/// Ordered collection of all nodes in the current simulation.
///
/// Enumeration follows insertion order. Edges are directed; `outgoing`
/// mirrors the node vector by index so connectivity reads stay allocation
/// free on the hot path.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    nodes: Vec<Node>,
    index_by_id: HashMap<NodeId, usize>,
    outgoing: Vec<Vec<usize>>,
    edge_count: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: Node) -> Result<(), RegistryError> {
        if self.index_by_id.contains_key(&node.id) {
            return Err(RegistryError::DuplicateNode(node.id));
        }

        self.index_by_id.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index_by_id.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.index_by_id.get(&id).map(|&index| &self.nodes[index])
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.index_by_id
            .get(&id)
            .map(|&index| &mut self.nodes[index])
    }

    /// Enumerate nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    /// Node ids in insertion order.
    pub fn ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|node| node.id).collect()
    }

    fn index_of(&self, id: NodeId) -> Result<usize, RegistryError> {
        self.index_by_id
            .get(&id)
            .copied()
            .ok_or(RegistryError::UnknownNode(id))
    }

    /// Add a directed edge `from -> to`.
    pub fn connect(&mut self, from: NodeId, to: NodeId) -> Result<(), RegistryError> {
        if from == to {
            return Err(RegistryError::SelfEdge(from));
        }

        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;

        if self.outgoing[from_index].contains(&to_index) {
            return Err(RegistryError::DuplicateEdge(from, to));
        }

        self.outgoing[from_index].push(to_index);
        self.edge_count += 1;
        Ok(())
    }

    /// Remove the directed edge `from -> to`. Connectivity churn between
    /// rounds goes through here; neighbor trackers are unaffected.
    pub fn disconnect(&mut self, from: NodeId, to: NodeId) -> Result<(), RegistryError> {
        let from_index = self.index_of(from)?;
        let to_index = self.index_of(to)?;

        let edges = &mut self.outgoing[from_index];
        let Some(slot) = edges.iter().position(|&index| index == to_index) else {
            return Err(RegistryError::UnknownEdge(from, to));
        };

        edges.remove(slot);
        self.edge_count -= 1;
        Ok(())
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        let (Some(&from_index), Some(&to_index)) =
            (self.index_by_id.get(&from), self.index_by_id.get(&to))
        else {
            return false;
        };
        self.outgoing[from_index].contains(&to_index)
    }

    /// Current outgoing endpoint ids of a node, in connection order.
    pub fn outgoing(&self, id: NodeId) -> Vec<NodeId> {
        let Some(&index) = self.index_by_id.get(&id) else {
            return Vec::new();
        };
        self.outgoing[index]
            .iter()
            .map(|&endpoint| self.nodes[endpoint].id)
            .collect()
    }

    /// Fuzzy-match nodes by implementation name or id text, best score
    /// first. Ties break toward the lower id so results stay stable.
    pub fn search(&self, query: &str) -> Vec<NodeId> {
        if query.trim().is_empty() {
            return Vec::new();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored = self
            .nodes
            .iter()
            .filter_map(|node| {
                let text = format!("{} {}", node.id, node.models.implementation);
                fuzzy_match_score(&matcher, &text, query).map(|score| (score, node.id))
            })
            .collect::<Vec<_>>();

        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, id)| id).collect()
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}
