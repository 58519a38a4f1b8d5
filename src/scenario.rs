use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

use crate::node::{Node, NodeId, NodeModels, Position};
use crate::registry::Registry;

#[derive(Clone, Debug, Deserialize)]
struct RawScenario {
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<(u64, u64)>,
    #[serde(default)]
    rounds: Vec<RawRound>,
}

#[derive(Clone, Debug, Deserialize)]
struct RawNode {
    id: u64,
    #[serde(default)]
    position: [f64; 3],
    #[serde(default)]
    implementation: Option<String>,
    #[serde(default)]
    connectivity: Option<String>,
    #[serde(default)]
    interference: Option<String>,
    #[serde(default)]
    mobility: Option<String>,
    #[serde(default)]
    reliability: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawRound {
    #[serde(default)]
    connect: Vec<(u64, u64)>,
    #[serde(default)]
    disconnect: Vec<(u64, u64)>,
}

/// Edge changes to apply before one round runs.
#[derive(Clone, Debug, Default)]
pub struct ConnectivityUpdate {
    pub connect: Vec<(NodeId, NodeId)>,
    pub disconnect: Vec<(NodeId, NodeId)>,
}

/// A loaded simulation scenario: the initial registry plus per-round
/// connectivity churn.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub registry: Registry,
    pub updates: Vec<ConnectivityUpdate>,
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file {}", path.display()))?;
    parse_scenario(&raw).with_context(|| format!("invalid scenario file {}", path.display()))
}

pub fn parse_scenario(raw: &str) -> Result<Scenario> {
    let parsed: RawScenario = serde_json::from_str(raw).context("invalid scenario JSON")?;

    if parsed.nodes.is_empty() {
        return Err(anyhow!("scenario contains no nodes"));
    }

    let mut registry = Registry::new();
    for raw_node in parsed.nodes {
        let [x, y, z] = raw_node.position;
        let defaults = NodeModels::default();
        let models = NodeModels {
            implementation: raw_node.implementation.unwrap_or(defaults.implementation),
            connectivity: raw_node.connectivity.unwrap_or(defaults.connectivity),
            interference: raw_node.interference.unwrap_or(defaults.interference),
            mobility: raw_node.mobility.unwrap_or(defaults.mobility),
            reliability: raw_node.reliability.unwrap_or(defaults.reliability),
        };

        registry
            .add(Node::new(NodeId::new(raw_node.id), Position::new(x, y, z)).with_models(models))
            .with_context(|| format!("invalid node entry {}", raw_node.id))?;
    }

    for (from, to) in parsed.links {
        registry
            .connect(NodeId::new(from), NodeId::new(to))
            .with_context(|| format!("invalid link {from} -> {to}"))?;
    }

    let updates = parsed
        .rounds
        .into_iter()
        .map(|round| ConnectivityUpdate {
            connect: to_id_pairs(round.connect),
            disconnect: to_id_pairs(round.disconnect),
        })
        .collect();

    Ok(Scenario { registry, updates })
}

fn to_id_pairs(raw: Vec<(u64, u64)>) -> Vec<(NodeId, NodeId)> {
    raw.into_iter()
        .map(|(from, to)| (NodeId::new(from), NodeId::new(to)))
        .collect()
}

/// Apply one round's edge changes: disconnects first, then connects, so a
/// round may move an edge without tripping the duplicate check.
pub fn apply_update(registry: &mut Registry, update: &ConnectivityUpdate) -> Result<()> {
    for &(from, to) in &update.disconnect {
        registry
            .disconnect(from, to)
            .with_context(|| format!("cannot disconnect {from} -> {to}"))?;
    }
    for &(from, to) in &update.connect {
        registry
            .connect(from, to)
            .with_context(|| format!("cannot connect {from} -> {to}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": 1, "position": [0.0, 0.0, 0.0], "implementation": "RelayNode"},
            {"id": 2, "position": [4.0, 1.0, 0.0]},
            {"id": 3}
        ],
        "links": [[1, 2], [2, 3]],
        "rounds": [
            {"disconnect": [[1, 2]], "connect": [[1, 3]]},
            {}
        ]
    }"#;

    #[test]
    fn parses_nodes_links_and_rounds() {
        let scenario = parse_scenario(SAMPLE).unwrap();

        assert_eq!(scenario.registry.len(), 3);
        assert_eq!(scenario.registry.edge_count(), 2);
        assert_eq!(scenario.updates.len(), 2);

        let relay = scenario.registry.get(NodeId::new(1)).unwrap();
        assert_eq!(relay.models.implementation, "RelayNode");
        assert_eq!(relay.position, Position::new(0.0, 0.0, 0.0));

        // Omitted fields fall back to defaults.
        let plain = scenario.registry.get(NodeId::new(3)).unwrap();
        assert_eq!(plain.models.implementation, "DefaultNode");
        assert_eq!(plain.position, Position::ORIGIN);
    }

    #[test]
    fn updates_apply_disconnects_before_connects() {
        let mut scenario = parse_scenario(SAMPLE).unwrap();
        let update = scenario.updates[0].clone();

        apply_update(&mut scenario.registry, &update).unwrap();

        assert!(!scenario.registry.has_edge(NodeId::new(1), NodeId::new(2)));
        assert!(scenario.registry.has_edge(NodeId::new(1), NodeId::new(3)));
    }

    #[test]
    fn duplicate_ids_are_rejected_with_context() {
        let raw = r#"{"nodes": [{"id": 1}, {"id": 1}]}"#;
        let err = parse_scenario(raw).unwrap_err();
        assert!(err.to_string().contains("invalid node entry 1"));
    }

    #[test]
    fn unknown_link_endpoint_is_rejected() {
        let raw = r#"{"nodes": [{"id": 1}], "links": [[1, 9]]}"#;
        assert!(parse_scenario(raw).is_err());
    }
}
