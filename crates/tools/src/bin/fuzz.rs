use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use express_core::map::{Connections, Locations};
use express_core::{
    AdvanceStopReason, Cost, Game, GameConfig, GameError, GameSetup, LocationId, MapDescription,
    ObstacleSchedule, TargetSelector, build_graph,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 200)]
    games: u32,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
}

fn below(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn choose(rng: &mut ChaCha8Rng, slice: &[LocationId]) -> LocationId {
    slice[below(rng, slice.len() as u64) as usize]
}

fn random_map(rng: &mut ChaCha8Rng) -> MapDescription {
    let node_count = 2 + below(rng, 10) as LocationId;
    let mut connections = Connections::default();
    for a in 1..=node_count {
        for b in (a + 1)..=node_count {
            if below(rng, 4) == 0 {
                connections.source.push(a);
                connections.target.push(b);
                connections.price.push(1 + below(rng, 6) as Cost);
            }
        }
    }
    if connections.source.is_empty() {
        connections.source.push(1);
        connections.target.push(node_count);
        connections.price.push(1);
    }
    let critical = (1..=node_count).filter(|_| below(rng, 3) == 0).collect();
    MapDescription {
        locations: Locations { number: Some(node_count as usize), critical },
        connections,
    }
}

fn random_obstacles(rng: &mut ChaCha8Rng, locations: &[LocationId]) -> ObstacleSchedule {
    (0..below(rng, 8))
        .map(|_| (0..below(rng, 3)).map(|_| choose(rng, locations)).collect::<BTreeSet<_>>())
        .collect()
}

fn play_one(rng: &mut ChaCha8Rng, max_turns: u32) -> Result<&'static str> {
    let map = random_map(rng);
    let graph = build_graph(&map)?;
    let locations: Vec<LocationId> = graph.locations().collect();
    let start = choose(rng, &locations);
    let setup = GameSetup {
        start,
        target: TargetSelector::HighestId,
        budget: below(rng, 25) as Cost,
        obstacles: random_obstacles(rng, &locations),
        config: GameConfig { max_stalled_turns: Some(32) },
    };
    let budget = setup.budget;
    let mut game = Game::new(graph, setup)?;

    let mut total_turns = 0;
    let outcome = loop {
        let result = match game.advance(10) {
            Ok(result) => result,
            Err(GameError::InsufficientBudget { .. }) => break "out of budget",
            Err(GameError::StalledNoProgress { .. }) => break "stalled",
            Err(e) => bail!("unexpected error: {e}"),
        };
        total_turns += result.simulated_turns;

        // Assert invariants
        let state = game.state();
        if state.budget < 0 || state.budget > budget {
            bail!("Invariant failed: budget {} outside 0..={budget}", state.budget);
        }
        for pair in game.path().windows(2) {
            if pair[0] != pair[1] && game.graph().edge_weight(pair[0], pair[1]).is_none() {
                bail!("Invariant failed: jump {} -> {}", pair[0], pair[1]);
            }
        }

        if result.stop_reason == AdvanceStopReason::Arrived {
            if game.path().last() != Some(&state.target) {
                bail!("Invariant failed: arrived away from target {}", state.target);
            }
            break "arrived";
        }
        if total_turns >= max_turns {
            bail!("Invariant failed: no outcome within {max_turns} turns");
        }
    };

    if game.path().first() != Some(&start) {
        bail!("Invariant failed: recorded path does not begin at {start}");
    }
    Ok(outcome)
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!(
        "Starting Fuzz harness on seed {} for {} games of at most {} turns...",
        args.seed, args.games, args.turns
    );
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut arrived = 0;

    for game_index in 0..args.games {
        let mut game_rng = ChaCha8Rng::seed_from_u64(rng.next_u64());
        let mut replay_rng = game_rng.clone();
        match play_one(&mut game_rng, args.turns) {
            Ok("arrived") => arrived += 1,
            Ok(_) => {}
            Err(e) => {
                // Re-derive the failing map so it can be saved and run with `express`.
                let map = random_map(&mut replay_rng);
                eprintln!("{}", serde_json::to_string(&map)?);
                bail!("game {game_index} failed: {e}");
            }
        }
    }

    println!("Fuzzing completed successfully: {arrived}/{} games arrived.", args.games);
    Ok(())
}
