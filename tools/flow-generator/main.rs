use clap::Parser;
use flowdraft::flow::{NodeData, default_node_data, uid};
use flowdraft::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::Value;
use std::fs;

/// A CLI tool to generate random flow documents for the flow editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_flow.json")]
    output: String,

    /// The minimum number of nodes to generate
    #[arg(long, default_value_t = 2)]
    min: usize,

    /// The maximum number of nodes to generate
    #[arg(long, default_value_t = 12)]
    max: usize,

    /// Probability that any given node is connected to the next one
    #[arg(long, default_value_t = 0.8, value_parser = parse_probability)]
    link_chance: f64,
}

fn parse_probability(raw: &str) -> std::result::Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{}", e))?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(format!("{} is not a probability between 0 and 1", raw));
    }
    Ok(value)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.min > cli.max {
        eprintln!(
            "Error: --min ({}) cannot be greater than --max ({})",
            cli.min, cli.max
        );
        std::process::exit(1);
    }

    println!(
        "Generating a new flow (nodes: {} to {})...",
        cli.min, cli.max
    );

    let nodes = generate_nodes(&mut rng, cli.min, cli.max);
    let edges = generate_edges(&mut rng, &nodes, cli.link_chance);
    let viewport = Viewport {
        x: rng.random_range(-200.0..200.0),
        y: rng.random_range(-200.0..200.0),
        zoom: rng.random_range(0.5..1.5),
    };

    let flow = to_external(&nodes, &edges, viewport);
    println!("-> {}", FlowSummary::of(&flow));

    let json_output = serde_json::to_string_pretty(&flow)?;
    fs::write(&cli.output, json_output)?;

    println!("Successfully generated and saved flow to '{}'", cli.output);

    Ok(())
}

/// Lays the nodes out left to right with a random vertical jitter.
fn generate_nodes(rng: &mut ThreadRng, min: usize, max: usize) -> Vec<CanvasNode> {
    let count = rng.random_range(min..=max);
    (0..count)
        .map(|i| {
            // Flows start with their trigger.
            let kind = if i == 0 {
                NodeType::Webhook
            } else {
                NodeType::KNOWN[rng.random_range(1..NodeType::KNOWN.len())].clone()
            };
            let mut data = randomize(rng, &kind);
            let name = data
                .get("name")
                .cloned()
                .unwrap_or_else(|| Value::String(kind.to_string()));
            data.insert("label".to_string(), name);
            CanvasNode {
                id: uid("n"),
                kind,
                position: Position::new(i as f64 * 240.0, rng.random_range(-120.0..120.0)),
                data,
            }
        })
        .collect()
}

fn randomize(rng: &mut ThreadRng, kind: &NodeType) -> serde_json::Map<String, Value> {
    let data = match NodeData::from_map(kind, &default_node_data(kind)) {
        Ok(data) => data,
        Err(_) => return default_node_data(kind),
    };
    let suffix = rng.random_range(1..1000);
    let data = match data {
        NodeData::Webhook(mut d) => {
            d.path = format!("/hooks/{}", suffix);
            NodeData::Webhook(d)
        }
        NodeData::Code(mut d) => {
            d.name = format!("Transform {}", suffix);
            NodeData::Code(d)
        }
        NodeData::Http(mut d) => {
            d.url = format!("https://api.example.com/v1/items/{}", suffix);
            NodeData::Http(d)
        }
        NodeData::Smtp(mut d) => {
            d.subject = format!("Report #{}", suffix);
            d.port = [25, 465, 587][rng.random_range(0..3)];
            NodeData::Smtp(d)
        }
        other => other,
    };
    data.into_map()
}

/// Chains consecutive nodes and occasionally adds a skip connection.
fn generate_edges(rng: &mut ThreadRng, nodes: &[CanvasNode], link_chance: f64) -> Vec<CanvasEdge> {
    let mut edges = Vec::new();
    for (i, pair) in nodes.windows(2).enumerate() {
        if rng.random_bool(link_chance) {
            edges.push(edge_between(&pair[0], &pair[1]));
        }
        if let Some(far) = nodes.get(i + 2) {
            if rng.random_bool(link_chance / 4.0) {
                edges.push(edge_between(&pair[0], far));
            }
        }
    }
    println!("-> Generated {} edge(s).", edges.len());
    edges
}

fn edge_between(source: &CanvasNode, target: &CanvasNode) -> CanvasEdge {
    CanvasEdge {
        id: uid("e"),
        source: source.id.clone(),
        source_handle: Some("out".to_string()),
        target: target.id.clone(),
        target_handle: Some("in".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_chance_must_be_a_probability() {
        let parse = |chance: &str| Cli::try_parse_from(["flow-gen", "--link-chance", chance]);
        assert_eq!(parse("0.25").unwrap().link_chance, 0.25);
        assert_eq!(parse("1").unwrap().link_chance, 1.0);
        for bad in ["NaN", "inf", "-0.1", "1.5", "often"] {
            assert!(parse(bad).is_err(), "{} should be rejected", bad);
        }
    }
}
