use std::iter;

use serde::{Deserialize, Serialize};

use crate::game::Game;
use crate::types::*;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalHeader {
    pub format_version: u16,
    pub start: LocationId,
    pub target: LocationId,
    pub budget: Cost,
    pub obstacles: Vec<Vec<LocationId>>,
    pub limits: GameConfig,
}

/// One played turn. A stall is recorded with `from == to` and zero cost.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub seq: u64,
    pub from: LocationId,
    pub to: LocationId,
    pub cost: Cost,
    pub budget_after: Cost,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnJournal {
    pub header: JournalHeader,
    pub turns: Vec<TurnRecord>,
}

impl TurnRecord {
    /// The record of a played turn. `budget` is the balance a stall carries
    /// over; arrival events are not turns of their own.
    pub fn from_event(event: &TurnEvent, budget: Cost) -> Option<Self> {
        match *event {
            TurnEvent::Moved { turn, from, to, cost, budget: budget_after } => {
                Some(Self { seq: turn, from, to, cost, budget_after })
            }
            TurnEvent::Stalled { turn, location } => Some(Self {
                seq: turn,
                from: location,
                to: location,
                cost: 0,
                budget_after: budget,
            }),
            TurnEvent::Arrived { .. } => None,
        }
    }

    /// The most recently played turn of `game`.
    pub fn last_of(game: &Game) -> Option<Self> {
        game.log().iter().rev().find_map(|event| Self::from_event(event, game.state().budget))
    }
}

impl TurnJournal {
    pub fn new(header: JournalHeader) -> Self {
        Self { header, turns: Vec::new() }
    }

    pub fn from_game(game: &Game) -> Self {
        let header = JournalHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            start: game.path()[0],
            target: game.state().target,
            budget: game.initial_budget(),
            obstacles: game
                .obstacles()
                .iter()
                .map(|turn| turn.iter().copied().collect())
                .collect(),
            limits: *game.config(),
        };
        let mut journal = Self::new(header);
        let mut budget = game.initial_budget();
        for event in game.log() {
            if let Some(record) = TurnRecord::from_event(event, budget) {
                budget = record.budget_after;
                journal.turns.push(record);
            }
        }
        journal
    }

    pub fn append_turn(
        &mut self,
        seq: u64,
        from: LocationId,
        to: LocationId,
        cost: Cost,
        budget_after: Cost,
    ) {
        self.turns.push(TurnRecord { seq, from, to, cost, budget_after });
    }

    pub fn setup(&self) -> GameSetup {
        GameSetup {
            start: self.header.start,
            target: TargetSelector::Fixed(self.header.target),
            budget: self.header.budget,
            obstacles: self
                .header
                .obstacles
                .iter()
                .map(|turn| turn.iter().copied().collect())
                .collect(),
            config: self.header.limits,
        }
    }

    /// The recorded locations, starting with the start location.
    pub fn route(&self) -> Vec<LocationId> {
        iter::once(self.header.start).chain(self.turns.iter().map(|turn| turn.to)).collect()
    }
}
