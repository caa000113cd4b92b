use clap::Parser;
use flowtext::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Prints the composed-task DSL text for a workflow graph stored as JSON
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the graph JSON file (`{"nodes": [...], "links": [...]}`)
    graph_path: String,

    /// Also print the compact node/link listing and timing
    #[arg(short, long)]
    verbose: bool,

    /// Maximum number of leftover heads drained after the main walk
    #[arg(long, default_value_t = flowtext::dsl::DEFAULT_DRAIN_LIMIT)]
    drain_limit: usize,

    /// Maximum nesting depth while following links and searching splits
    #[arg(long, default_value_t = flowtext::dsl::DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let json = fs::read_to_string(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            &cli.graph_path, e
        ))
    });
    let graph = Graph::from_json(&json).unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if cli.verbose {
        println!("{}", graph);
        println!("{}", graph.to_verbose_string());
    }

    let rendering = DslWriter::builder(&graph)
        .with_drain_limit(cli.drain_limit)
        .with_max_depth(cli.max_depth)
        .build()
        .render()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    println!("{}", rendering.text);
    if rendering.truncated {
        eprintln!(
            "Warning: drain limit of {} reached, output is incomplete",
            cli.drain_limit
        );
    }
    if cli.verbose {
        println!("Rendered in {:?}", start.elapsed());
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
