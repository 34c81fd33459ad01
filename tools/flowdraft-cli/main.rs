use clap::{Parser, Subcommand};
use flowdraft::prelude::*;
use std::fs;
use std::time::Instant;

/// Validate, inspect and normalize flow editor documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that a flow file has the expected structure
    Validate {
        /// Path to the flow JSON file
        path: String,
    },
    /// Print a summary of a flow and any integrity issues
    Inspect {
        /// Path to the flow JSON file
        path: String,
        /// Exit with an error if integrity issues are found
        #[arg(long)]
        strict: bool,
    },
    /// Import a flow into an editor session and export it again
    Normalize {
        /// Path to the flow JSON file
        path: String,
        /// Where to write the normalized flow (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Directory of a file store to save the normalized flow into
        #[arg(long)]
        store: Option<String>,
        /// Optional editor config JSON file
        #[arg(long)]
        config: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { path } => run_validate(&path),
        Command::Inspect { path, strict } => run_inspect(&path, strict),
        Command::Normalize {
            path,
            output,
            store,
            config,
        } => run_normalize(&path, output, store, config),
    }
}

fn read_flow(path: &str) -> FlowState {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", path, e))
    });
    parse_flow(&text).unwrap_or_else(|e| exit_with_error(&format!("Invalid flow: {}", e)))
}

fn run_validate(path: &str) {
    let start = Instant::now();
    let flow = read_flow(path);
    println!(
        "'{}' is a valid flow ({} nodes, {} edges) [{:?}]",
        path,
        flow.nodes.len(),
        flow.edges.len(),
        start.elapsed()
    );
}

fn run_inspect(path: &str, strict: bool) {
    let flow = read_flow(path);
    println!("{}", FlowSummary::of(&flow));

    for node in &flow.nodes {
        let caption = NodeData::from_map(&node.kind, &node.data)
            .map(|data| data.caption())
            .unwrap_or_else(|e| format!("<{}>", e));
        println!(
            "  - {} [{}] '{}' {}",
            node.id,
            node.kind,
            node.label.as_deref().unwrap_or(""),
            caption
        );
    }

    let issues = check_integrity(&flow);
    if issues.is_empty() {
        println!("No integrity issues found.");
        return;
    }
    println!("\n--- Integrity Issues ({}) ---", issues.len());
    for issue in &issues {
        println!("  * {}", issue);
    }
    if strict {
        std::process::exit(2);
    }
}

fn run_normalize(
    path: &str,
    output: Option<String>,
    store_dir: Option<String>,
    config_path: Option<String>,
) {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read flow file '{}': {}", path, e))
    });
    let config = match config_path {
        Some(config_path) => EditorConfig::from_file(&config_path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", config_path, e))
        }),
        None => EditorConfig::default(),
    };

    let store: Box<dyn FlowStore> = match store_dir {
        Some(dir) => Box::new(FileStore::new(dir)),
        None => Box::new(MemoryStore::new()),
    };
    let mut editor = EditorSession::builder(store).with_config(config).build();

    if let Err(e) = editor.import_json(&text) {
        exit_with_error(&format!("Import failed: {}", e));
    }
    let json = editor
        .export_json()
        .unwrap_or_else(|e| exit_with_error(&format!("Export failed: {}", e)));
    editor.flush();

    match output {
        Some(out) => {
            fs::write(&out, &json).unwrap_or_else(|e| {
                exit_with_error(&format!("Could not write to file '{}': {}", out, e))
            });
            println!("Normalized flow written to '{}'", out);
        }
        None => println!("{}", json),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
