use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use express_core::journal_file::{load_journal_from_file, write_journal_to_file};
use express_core::{
    Cost, Game, Graph, Scenario, TurnJournal, build_graph, format_route, load_map,
    replay_journal,
};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a scenario on a map and print the route taken
    Run {
        /// Path to the map description JSON file
        #[arg(short, long)]
        map: PathBuf,
        /// Path to the scenario TOML file
        #[arg(short, long)]
        scenario: PathBuf,
        /// Override the scenario's travel budget
        #[arg(short, long)]
        budget: Option<Cost>,
        /// Keep waiting on blocked routes without a stall limit
        #[arg(long)]
        no_stall_limit: bool,
        /// Write every played turn to this JSONL journal
        #[arg(short, long)]
        journal: Option<PathBuf>,
    },
    /// Re-play a journal against a map and verify every recorded turn
    Replay {
        /// Path to the map description JSON file
        #[arg(short, long)]
        map: PathBuf,
        /// Path to the JSONL journal to replay
        #[arg(short, long)]
        journal: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Run { map, scenario, budget, no_stall_limit, journal } => {
            let mut scenario = read_scenario(&scenario)?;
            if let Some(budget) = budget {
                scenario.budget = budget;
            }
            if no_stall_limit {
                scenario.limits.max_stalled_turns = None;
            }
            run(&read_graph(&map)?, &scenario, journal.as_deref())
        }
        Commands::Replay { map, journal } => replay(read_graph(&map)?, &journal),
    }
}

fn read_graph(path: &Path) -> Result<Graph> {
    let description = load_map(path)
        .with_context(|| format!("Failed to load map file: {}", path.display()))?;
    let graph = build_graph(&description)
        .with_context(|| format!("Invalid map: {}", path.display()))?;
    info!("Loaded {} locations from {}", graph.len(), path.display());
    Ok(graph)
}

fn read_scenario(path: &Path) -> Result<Scenario> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scenario file: {}", path.display()))?;
    parse_scenario(&data).with_context(|| format!("Invalid scenario: {}", path.display()))
}

fn parse_scenario(data: &str) -> Result<Scenario> {
    Ok(toml::from_str(data)?)
}

fn run(graph: &Graph, scenario: &Scenario, journal_path: Option<&Path>) -> Result<()> {
    let started = Instant::now();
    let mut game = Game::new(graph.clone(), scenario.to_setup())?;
    println!(
        "Travelling from {} to {} with budget {}",
        game.state().current,
        game.state().target,
        game.state().budget
    );

    let outcome = game.run();
    if let Some(path) = journal_path {
        write_journal_to_file(path, &TurnJournal::from_game(&game))
            .with_context(|| format!("Failed to write journal: {}", path.display()))?;
    }
    let route = outcome.map_err(|e| {
        anyhow::anyhow!(
            "Run failed after {} turn(s) on route {}: {e}",
            game.current_turn(),
            format_route(game.path())
        )
    })?;

    println!("Route: {}", format_route(&route));
    println!("Turns: {}", game.current_turn());
    println!("Budget left: {}", game.state().budget);
    println!("Elapsed: {:.3?}", started.elapsed());
    Ok(())
}

fn replay(graph: Graph, journal_path: &Path) -> Result<()> {
    let journal = load_journal_from_file(journal_path)
        .with_context(|| format!("Failed to load journal: {}", journal_path.display()))?;
    info!("Replaying {} recorded turn(s)", journal.turns.len());
    let result = replay_journal(graph, &journal)
        .map_err(|e| anyhow::anyhow!("Replay failed during execution: {e}"))?;

    println!("Replay complete.");
    println!("Route: {}", format_route(&result.route));
    println!("Arrived: {}", result.arrived);
    println!("Final Turn: {}", result.final_turn);
    println!("Budget left: {}", result.final_budget);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);
    Ok(())
}
