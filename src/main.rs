//! Asset Curator CLI
//!
//! Entry point for the `asset-curator` command-line tool.

use asset_curator::{load_allowlist, CuratorConfig, ExplainOutput, Pipeline, Pruner};
use clap::{Parser, Subcommand};
use curator_rules::Category;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "asset-curator")]
#[command(about = "Scan local art assets and curate the site gallery", version)]
struct Cli {
    /// Project root containing the site and scripts directories
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Path to config file (default: <root>/curator.toml)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan category directories and write the manifest and gallery fragment
    Scan,

    /// Explain how a single file would be curated
    Explain {
        /// Category directory (environments, weapons, vehicles, factions, renders, ui)
        category: Category,

        /// File name inside the category directory
        filename: String,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,
    },

    /// Remove asset files that nothing references
    Prune {
        /// Delete files instead of only listing them
        #[arg(long)]
        execute: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let mut filter = EnvFilter::from_default_env();
    for target in ["asset_curator", "curator_rules"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli.root, cli.config.as_deref());

    match cli.command.unwrap_or(Commands::Scan) {
        Commands::Scan => run_scan(config, &cli.root),
        Commands::Explain {
            category,
            filename,
            human,
        } => run_explain(config, &cli.root, category, &filename, human),
        Commands::Prune { execute, json } => run_prune(config, &cli.root, execute, json),
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> CuratorConfig {
    match CuratorConfig::load(root, explicit) {
        Ok(c) => c,
        Err(e) => {
            error!("Error loading config: {}", e);
            process::exit(1);
        }
    }
}

fn run_scan(config: CuratorConfig, root: &Path) {
    let pipeline = Pipeline::new(config, root);
    if let Err(e) = pipeline.run() {
        error!("Scan failed: {}", e);
        process::exit(e.exit_code());
    }
}

fn run_explain(config: CuratorConfig, root: &Path, category: Category, filename: &str, human: bool) {
    let paths = config.resolve(root);
    let allowlist = load_allowlist(&paths.allowlist_path);
    let explanation = ExplainOutput::new(category, filename, allowlist.as_ref());

    if human {
        println!("{}", explanation.to_human());
    } else {
        match explanation.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }

    if explanation.eligible {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn run_prune(config: CuratorConfig, root: &Path, execute: bool, json: bool) {
    let paths = config.resolve(root);
    let pruner = match Pruner::from_config(&paths, &config.prune) {
        Ok(p) => p,
        Err(e) => {
            error!("Prune setup failed: {}", e);
            process::exit(1);
        }
    };

    let report = match pruner.run(execute) {
        Ok(r) => r,
        Err(e) => {
            error!("Prune failed: {}", e);
            process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", report.to_human());
    }

    if !report.failures.is_empty() {
        process::exit(1);
    }
}
