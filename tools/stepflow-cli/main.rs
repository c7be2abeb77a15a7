use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use stepflow::construction::{TEMPLATE_NAMES, template};
use stepflow::extract::ExtractionResponse;
use stepflow::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

// --- Input Format ---
// A steps file is either a bare array or the extraction service's response body.

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSteps {
    List(Vec<Step>),
    Response(ExtractionResponse),
}

impl IntoSteps for RawSteps {
    fn into_steps(self) -> Result<Vec<Step>, ExtractionError> {
        match self {
            RawSteps::List(steps) => Ok(steps),
            RawSteps::Response(response) => response.into_steps(),
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyCli {
    Preserve,
    FirstParent,
}

impl From<PolicyCli> for DependencyPolicy {
    fn from(policy: PolicyCli) -> Self {
        match policy {
            PolicyCli::Preserve => DependencyPolicy::Preserve,
            PolicyCli::FirstParent => DependencyPolicy::FirstParent,
        }
    }
}

/// Builds, inspects and exports workflow graphs made from extracted steps
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a graph from a steps JSON file
    Build {
        /// Path to the steps JSON file
        steps_path: String,
        /// Write the graph JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Also write a binary snapshot of the graph
        #[arg(short, long)]
        snapshot: Option<String>,
        /// Override the configured dependency policy
        #[arg(short, long, value_enum)]
        policy: Option<PolicyCli>,
    },
    /// Send a message to the extraction service and build the returned steps
    Extract {
        /// The free-text workflow request
        message: String,
        /// Override the configured extraction endpoint
        #[arg(short, long)]
        endpoint: Option<String>,
        /// Write the graph JSON here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print a starter template graph
    Template {
        /// Template name
        name: String,
    },
    /// Show the parent of each node and any structural violations
    Inspect {
        /// Path to a graph JSON file, or a snapshot with --snapshot
        path: String,
        /// Read the file as a binary snapshot
        #[arg(long)]
        snapshot: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "stepflow=debug,warn"
    } else {
        "stepflow=info,warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => StepflowConfig::load(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => StepflowConfig::default(),
    };

    match cli.command {
        Command::Build {
            steps_path,
            output,
            snapshot,
            policy,
        } => run_build(&config, &steps_path, output, snapshot, policy).await,
        Command::Extract {
            message,
            endpoint,
            output,
        } => run_extract(config, &message, endpoint, output).await,
        Command::Template { name } => run_template(&name),
        Command::Inspect { path, snapshot } => run_inspect(&path, snapshot),
    }
}

async fn load_registry(config: &StepflowConfig) -> NodeTypeRegistry {
    match config.node_type_source() {
        Some(source) => NodeTypeRegistry::load(&source, config.registry.fallback).await,
        None => NodeTypeRegistry::builtin(),
    }
}

async fn run_build(
    config: &StepflowConfig,
    steps_path: &str,
    output: Option<String>,
    snapshot: Option<String>,
    policy: Option<PolicyCli>,
) {
    let total_start = Instant::now();

    // --- 1. Load ---
    let steps_json = fs::read_to_string(steps_path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read steps file '{}': {}", steps_path, e))
    });
    let raw: RawSteps = serde_json::from_str(&steps_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse steps JSON: {}", e)));
    let steps = raw
        .into_steps()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read steps: {}", e)));

    // --- 2. Construct ---
    let registry = load_registry(config).await;
    let mut config = config.clone();
    if let Some(policy) = policy {
        config.construction.dependency_policy = policy.into();
    }
    let graph = config
        .constructor()
        .construct(&steps, &registry)
        .unwrap_or_else(|e| exit_with_error(&format!("Graph construction failed: {}", e)));

    // --- 3. Export ---
    if let Some(path) = snapshot {
        GraphSnapshot::save(&graph, &path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write snapshot: {}", e)));
        eprintln!("Snapshot written to {}", path);
    }
    write_graph(&graph, output);

    eprintln!(
        "Built {} nodes and {} edges from {} steps in {:?}",
        graph.nodes.len(),
        graph.edges.len(),
        steps.len(),
        total_start.elapsed()
    );
}

async fn run_extract(
    mut config: StepflowConfig,
    message: &str,
    endpoint: Option<String>,
    output: Option<String>,
) {
    if let Some(endpoint) = endpoint {
        config.extractor.endpoint = endpoint;
    }
    let extractor = config
        .extractor()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to set up extractor: {}", e)));
    let registry = load_registry(&config).await;

    let mut session = ChatSession::new(config.constructor());
    let outcome = session
        .submit(message, &extractor, &registry)
        .await
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    if let stepflow::chat::ReplyOutcome::Failed(err) = outcome {
        exit_with_error(&format!("Extraction failed: {}", err));
    }
    for message in session.messages() {
        eprintln!("[{:?}] {}", message.sender, message.content);
    }
    write_graph(session.graph(), output);
}

fn run_template(name: &str) {
    let graph = template(name).unwrap_or_else(|| {
        exit_with_error(&format!(
            "Unknown template '{}'. Available: {}",
            name,
            TEMPLATE_NAMES.join(", ")
        ))
    });
    write_graph(&graph, None);
}

fn run_inspect(path: &str, snapshot: bool) {
    let graph = if snapshot {
        GraphSnapshot::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read snapshot: {}", e)))
    } else {
        let json = fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read graph file '{}': {}", path, e))
        });
        serde_json::from_str::<Graph>(&json)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)))
    };

    println!("--- Nodes ({}) ---", graph.nodes.len());
    for node in &graph.nodes {
        let parent = graph
            .parent_edge(&node.id)
            .map(|e| format!("{} [{}]", e.source, e.conditions.join(", ")))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<24} {:<10} parent: {:<16} {}",
            node.id, node.node_type, parent, node.label
        );
    }

    let violations = graph.violations();
    println!("\n--- Violations ({}) ---", violations.len());
    for violation in &violations {
        println!("  {}", violation);
    }
    if !violations.is_empty() {
        std::process::exit(2);
    }
}

fn write_graph(graph: &Graph, output: Option<String>) {
    let json = serde_json::to_string_pretty(graph)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize graph: {}", e)));
    match output {
        Some(path) => {
            fs::write(&path, json).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write graph to '{}': {}", path, e))
            });
            eprintln!("Graph written to {}", path);
        }
        None => println!("{}", json),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
