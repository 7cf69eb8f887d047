#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use output::OutputMode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mgraph: moralize and triangulate directed acyclic graphs",
    long_about = None
)]
struct Cli {
    /// Enable debug logging for moralgraph crates (ignored when MGRAPH_LOG is set).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Configuration file (default: ./mgraph.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Print the skeleton and moral graph of a DAG",
        after_help = "EXAMPLES:\n    mgraph moralize graph.json\n    mgraph moralize graph.json --history --json"
    )]
    Moralize(cmd::moralize::MoralizeArgs),

    #[command(
        about = "List the chordless cycles (length > 3) of the moral graph",
        after_help = "EXAMPLES:\n    mgraph cycles graph.json"
    )]
    Cycles(cmd::cycles::CyclesArgs),

    #[command(
        about = "Moralize and triangulate a DAG",
        after_help = "EXAMPLES:\n    mgraph triangulate graph.json\n    mgraph triangulate graph.json --export chordal.json"
    )]
    Triangulate(cmd::triangulate::TriangulateArgs),

    #[command(about = "Show graph statistics for every pipeline stage")]
    Stats(cmd::stats::StatsArgs),

    #[command(
        about = "Time moralization or triangulation across problem sizes",
        after_help = "EXAMPLES:\n    mgraph bench\n    mgraph bench --algorithm triangulate --estimator median"
    )]
    Bench(cmd::bench::BenchArgs),
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose || env::var("DEBUG").is_ok() {
        "moralgraph=debug,mgraph=debug,info"
    } else {
        "moralgraph=info,warn"
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MGRAPH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let format = env::var("MGRAPH_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = env::current_dir()?;
    let config = config::load_config(cli.config.as_deref(), &cwd)?;
    debug!(?config, "configuration loaded");

    let output = OutputMode::from_json_flag(cli.json);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match &cli.command {
        Commands::Moralize(args) => cmd::moralize::run_moralize(args, &config, output),
        Commands::Cycles(args) => cmd::cycles::run_cycles(args, &config, output),
        Commands::Triangulate(args) => cmd::triangulate::run_triangulate(args, &config, output),
        Commands::Stats(args) => cmd::stats::run_stats(args, &config, output),
        Commands::Bench(args) => cmd::bench::run_bench(args, &config, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["mgraph", "cycles", "g.json", "--json", "--config", "x.toml"]);

        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(cli.command, Commands::Cycles(_)));
    }

    #[test]
    fn verbose_selects_debug_filter() {
        assert_eq!(default_filter(true), "moralgraph=debug,mgraph=debug,info");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["mgraph"]).is_err());
    }
}
