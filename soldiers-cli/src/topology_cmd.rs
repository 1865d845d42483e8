//! Topology command - print the board graph

use anyhow::Result;
use clap::Args;

use soldiers_core::board::{coordinate, jump_lines, neighbors, Node, Point, NODE_COUNT};

#[derive(Args)]
pub struct TopologyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, serde::Serialize)]
struct NodeInfo {
    node: Node,
    coordinate: Point,
    neighbors: Vec<Node>,
}

#[derive(Debug, serde::Serialize)]
struct Topology {
    nodes: Vec<NodeInfo>,
    /// (origin, jumped, landing)
    jumps: Vec<(Node, Node, Node)>,
}

pub fn run(args: TopologyArgs) -> Result<()> {
    let topology = collect_topology();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&topology)?);
        return Ok(());
    }

    println!("=== Nodes ===");
    for info in &topology.nodes {
        let links: Vec<String> = info.neighbors.iter().map(|n| n.to_string()).collect();
        println!(
            "{:>2} ({:>5.2}, {:>4.1}) -> {}",
            info.node,
            info.coordinate.x,
            info.coordinate.y,
            links.join(", ")
        );
    }

    println!("\n=== Jump lines ({}) ===", topology.jumps.len());
    for (origin, mid, landing) in &topology.jumps {
        println!("{:>2} over {:>2} to {:>2}", origin, mid, landing);
    }
    Ok(())
}

fn collect_topology() -> Topology {
    let nodes = (0..NODE_COUNT)
        .map(|node| NodeInfo {
            node,
            coordinate: coordinate(node),
            neighbors: neighbors(node).to_vec(),
        })
        .collect();

    Topology {
        nodes,
        jumps: jump_lines().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_topology() {
        let topology = collect_topology();
        assert_eq!(topology.nodes.len(), NODE_COUNT);
        assert_eq!(topology.jumps.len(), 100);
        assert_eq!(topology.nodes[18].neighbors, vec![12, 14, 22, 24]);
    }

    #[test]
    fn test_json_output() {
        let json = serde_json::to_value(collect_topology()).unwrap();
        assert_eq!(json["nodes"][0]["coordinate"]["x"], -0.25);
        assert_eq!(json["jumps"].as_array().map(Vec::len), Some(100));
    }
}
