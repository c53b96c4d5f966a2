use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;

use transit_network::loader::load_network_from_paths;
use transit_network::prelude::*;

mod report;

#[derive(Parser, Debug)]
#[command(
    name = "transit-report",
    author,
    version,
    about = "Shortest routes and network statistics for a transit graph",
    long_about = "Loads a transit network from two CSV files (stations and directed \
                  connections) and prints routes, line rosters, hub classification \
                  and a bidirectional-edge audit.\n\n\
                  Stations CSV columns: station_id,name,system,lines (system and lines \
                  are semicolon-separated). Connections CSV columns: \
                  from_station_id,to_station_id,weight (minutes)."
)]
struct Args {
    /// Stations CSV file
    #[arg(short, long, env = "TRANSIT_NODES")]
    nodes: PathBuf,

    /// Connections CSV file
    #[arg(short, long, env = "TRANSIT_EDGES")]
    edges: PathBuf,

    /// Verbose output (show debug messages)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every station with its outgoing connections
    Graph,

    /// Find the fastest route between two stations, by display name
    Route {
        from: String,
        to: String,

        /// Treat FROM and TO as station ids instead of display names
        #[arg(long)]
        by_id: bool,

        /// Use the O(V²) linear-scan frontier instead of the binary heap
        #[arg(long)]
        linear_scan: bool,
    },

    /// List the stations of each line of a transit system
    Lines {
        #[arg(long, default_value = DEFAULT_PRIMARY_SYSTEM)]
        system: String,
    },

    /// Classify stations as hubs, regular or isolated
    Hubs,

    /// Report station pairs that are not connected symmetrically
    Audit,

    /// Station, connection and travel time totals
    Summary,

    /// Summary, lines, hubs and audit (the default)
    All,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    if !args.nodes.exists() {
        bail!("Stations file does not exist: {}", args.nodes.display());
    }
    if !args.edges.exists() {
        bail!("Connections file does not exist: {}", args.edges.display());
    }

    log::info!("Stations: {}", args.nodes.display());
    log::info!("Connections: {}", args.edges.display());

    let graph = load_network_from_paths(&args.nodes, &args.edges)
        .context("Failed to load transit network")?;
    if graph.is_empty() {
        bail!("No stations found in {}", args.nodes.display());
    }
    report::log_load_summary(&graph.summary());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&mut out, &graph, args.command.unwrap_or(Command::All))?;
    out.flush()?;

    Ok(())
}

fn run(out: &mut impl Write, graph: &TransitGraph, command: Command) -> Result<()> {
    let analyzer = NetworkAnalyzer::new(graph);

    match command {
        Command::Graph => report::write_graph(out, graph)?,
        Command::Route {
            from,
            to,
            by_id,
            linear_scan,
        } => {
            let selection = if linear_scan {
                Selection::LinearScan
            } else {
                Selection::BinaryHeap
            };
            let router = Router::new(graph).with_selection(selection);
            let result = if by_id {
                router.shortest_path_between_ids(&from, &to)
            } else {
                router.shortest_path(&from, &to)
            };

            match result {
                Ok(journey) => report::write_journey(out, &journey)?,
                // Recoverable: report it and exit normally
                Err(err) if err.is_query_error() => writeln!(out, "{}", err)?,
                Err(err) => return Err(err).context("Route query failed"),
            }
        }
        Command::Lines { system } => {
            report::write_line_roster(out, &system, &analyzer.line_roster(&system))?
        }
        Command::Hubs => report::write_hubs(out, &analyzer.hub_classification())?,
        Command::Audit => report::write_audit(out, &analyzer.bidirectional_audit())?,
        Command::Summary => report::write_totals(out, &analyzer.totals())?,
        Command::All => {
            report::write_totals(out, &analyzer.totals())?;
            writeln!(out)?;
            report::write_line_roster(
                out,
                DEFAULT_PRIMARY_SYSTEM,
                &analyzer.line_roster(DEFAULT_PRIMARY_SYSTEM),
            )?;
            writeln!(out)?;
            report::write_hubs(out, &analyzer.hub_classification())?;
            writeln!(out)?;
            report::write_audit(out, &analyzer.bidirectional_audit())?;
        }
    }

    Ok(())
}
