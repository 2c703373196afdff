use std::error::Error;
use std::fmt;

use crate::{
    game::Game,
    graph::Graph,
    journal::{TurnJournal, TurnRecord},
    types::*,
};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    Game(GameError),
    /// The simulator played something other than the recorded turn `seq`.
    Diverged { seq: u64, expected: TurnRecord, actual: TurnRecord },
    /// The simulator arrived while recorded turns remained, starting at `seq`.
    ExtraTurns { seq: u64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Game(e) => write!(f, "replay failed: {e}"),
            Self::Diverged { seq, expected, actual } => write!(
                f,
                "turn {seq} diverged: recorded {} -> {}, replayed {} -> {}",
                expected.from, expected.to, actual.from, actual.to
            ),
            Self::ExtraTurns { seq } => {
                write!(f, "journal continues at turn {seq} after the target was reached")
            }
        }
    }
}

impl Error for ReplayError {}

impl From<GameError> for ReplayError {
    fn from(e: GameError) -> Self {
        Self::Game(e)
    }
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub route: Vec<LocationId>,
    pub arrived: bool,
    pub final_budget: Cost,
    pub final_snapshot_hash: u64,
    pub final_turn: u64,
}

/// Re-plays the journal's scenario on `graph` one turn at a time and checks
/// every recorded turn against what the simulator does.
pub fn replay_journal(graph: Graph, journal: &TurnJournal) -> Result<ReplayResult, ReplayError> {
    let mut game = Game::new(graph, journal.setup())?;

    for expected in &journal.turns {
        if game.state().is_arrived() {
            return Err(ReplayError::ExtraTurns { seq: expected.seq });
        }
        game.advance(1)?;
        let Some(actual) = TurnRecord::last_of(&game) else {
            return Err(ReplayError::ExtraTurns { seq: expected.seq });
        };
        if actual != *expected {
            let seq = expected.seq;
            return Err(ReplayError::Diverged { seq, expected: expected.clone(), actual });
        }
    }

    Ok(ReplayResult {
        route: game.path().to_vec(),
        arrived: game.state().is_arrived(),
        final_budget: game.state().budget,
        final_snapshot_hash: game.snapshot_hash(),
        final_turn: game.current_turn(),
    })
}
