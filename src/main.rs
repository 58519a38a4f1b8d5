use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing::info;

use topolens::{
    DegreeHighlighter, InspectorSession, NeighborColoring, NodeId, Registry, apply_update,
    load_scenario, node_color, run_round, size_fraction,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Scenario file describing nodes, links and per-round churn.
    scenario: PathBuf,

    /// Rounds to run beyond the ones scripted in the scenario.
    #[arg(long, default_value_t = 0)]
    extra_rounds: usize,

    /// Open the inspector on this node id after the run and walk to the
    /// highest contiguous id.
    #[arg(long)]
    inspect: Option<u64>,

    /// Fuzzy-search nodes by implementation name and open the inspector on
    /// the best match.
    #[arg(long, conflicts_with = "inspect")]
    find: Option<String>,

    /// Color the ever-seen neighbors of this node id in the final table.
    #[arg(long)]
    color_neighbors: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let scenario = load_scenario(&args.scenario)?;
    let mut registry = scenario.registry;
    let mut highlighter = DegreeHighlighter::new();

    info!(
        nodes = registry.len(),
        edges = registry.edge_count(),
        scripted_rounds = scenario.updates.len(),
        "scenario loaded"
    );

    for (round, update) in scenario.updates.iter().enumerate() {
        apply_update(&mut registry, update)
            .map_err(|error| anyhow!("round {}: {error:#}", round + 1))?;
        run_round(&mut registry, &mut highlighter);
    }
    for _ in 0..args.extra_rounds {
        run_round(&mut registry, &mut highlighter);
    }

    let mut refreshes = 0usize;
    let mut sink = || refreshes += 1;

    if let Some(raw_id) = args.color_neighbors {
        let mut coloring = NeighborColoring::new();
        coloring.color_neighbors(&mut registry, NodeId::new(raw_id), &mut sink);
    }

    print_table(&registry, &highlighter);

    if let Some(raw_id) = args.inspect {
        inspect_walk(&mut registry, NodeId::new(raw_id), &mut sink)?;
    } else if let Some(query) = &args.find {
        let hits = registry.search(query);
        let Some(&best) = hits.first() else {
            return Err(anyhow!("no node matches {query:?}"));
        };
        info!(matches = hits.len(), best = %best, "search hits");
        inspect_walk(&mut registry, best, &mut sink)?;
    }

    info!(refreshes, "done");
    Ok(())
}

fn print_table(registry: &Registry, highlighter: &DegreeHighlighter) {
    println!("max neighbor count observed: {}", highlighter.max_neighbors());
    println!("{:>6}  {:>9}  {:>6}  {:>5}  node", "id", "neighbors", "color", "size");

    for node in registry.nodes() {
        println!(
            "{:>6}  {:>9}  {:>6}  {:>5.2}  {}",
            node.id,
            node.neighbors.count(),
            format!("{:?}", node_color(node)).to_lowercase(),
            size_fraction(node, registry.len()),
            node.models.implementation,
        );
    }
}

fn inspect_walk(
    registry: &mut Registry,
    start: NodeId,
    sink: &mut dyn topolens::RefreshSink,
) -> Result<()> {
    let mut session = InspectorSession::open(registry, start, sink)
        .ok_or_else(|| anyhow!("node {start} does not exist"))?;

    loop {
        let id = session.selected();
        let node = registry
            .get(id)
            .ok_or_else(|| anyhow!("selected node {id} vanished"))?;
        println!(
            "node {id} at ({:.2}, {:.2}, {:.2}) [{}]: {}",
            node.position.x,
            node.position.y,
            node.position.z,
            node.models.implementation,
            node.info_text(),
        );

        if !session.has_successor() {
            break;
        }
        session.next(registry, sink);
    }

    session.close(registry, true, sink);
    Ok(())
}
