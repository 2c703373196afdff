//! Per-turn simulation loop, occupancy refresh and stop-reason handling.

use log::{debug, info, warn};

use super::*;

/// Turns played per `advance` batch when running a game to completion.
const RUN_BATCH_TURNS: u32 = 64;

impl Game {
    pub fn advance(&mut self, max_turns: u32) -> Result<AdvanceResult, GameError> {
        let mut turns = 0;
        while turns < max_turns {
            if self.state.is_arrived() {
                return Ok(AdvanceResult {
                    simulated_turns: turns,
                    stop_reason: AdvanceStopReason::Arrived,
                });
            }
            self.play_turn()?;
            turns += 1;
        }
        let stop_reason = if self.state.is_arrived() {
            AdvanceStopReason::Arrived
        } else {
            AdvanceStopReason::TurnLimitReached
        };
        Ok(AdvanceResult { simulated_turns: turns, stop_reason })
    }

    /// Plays until the target is reached and returns every location visited.
    pub fn run(&mut self) -> Result<Vec<LocationId>, GameError> {
        loop {
            let batch = self.advance(RUN_BATCH_TURNS)?;
            if batch.stop_reason == AdvanceStopReason::Arrived {
                return Ok(self.state.path.clone());
            }
        }
    }

    fn play_turn(&mut self) -> Result<(), GameError> {
        let turn = self.state.turn;
        let from = self.state.current;

        let next = match self.next_move() {
            Ok(TurnDecision::Move { to, cost }) => {
                self.state.budget -= cost;
                self.state.stalled_turns = 0;
                debug!("turn {turn}: {from} -> {to} for {cost}, budget left {}", self.state.budget);
                self.log.push(TurnEvent::Moved { turn, from, to, cost, budget: self.state.budget });
                to
            }
            Ok(TurnDecision::Stall) => {
                self.state.stalled_turns = self.state.stalled_turns.saturating_add(1);
                debug!("turn {turn}: every affordable route from {from} is blocked, waiting");
                self.log.push(TurnEvent::Stalled { turn, location: from });
                from
            }
            Err(e) => {
                warn!("turn {turn}: {e}");
                return Err(e);
            }
        };

        self.state.path.push(next);
        self.state.current = next;
        self.refresh_occupancy(turn);
        self.state.turn += 1;

        if self.state.is_arrived() {
            info!("arrived at {next} after {} turn(s)", self.state.turn);
            self.log.push(TurnEvent::Arrived { turn, location: next });
            return Ok(());
        }
        // Only a stall turn can trip the watchdog; moving resets the count to 0.
        if let Some(limit) = self.config.max_stalled_turns
            && self.state.stalled_turns > 0
            && self.state.stalled_turns >= limit
        {
            warn!("no progress from {next} for {} turn(s), giving up", self.state.stalled_turns);
            return Err(GameError::StalledNoProgress {
                location: next,
                turns: self.state.stalled_turns,
            });
        }
        Ok(())
    }

    /// Applies the obstacles of `turn`; turns past the schedule keep the last state.
    fn refresh_occupancy(&mut self, turn: u64) {
        let Some(obstacles) = usize::try_from(turn).ok().and_then(|i| self.obstacles.get(i))
        else {
            return;
        };
        self.graph.set_occupancy(obstacles, self.state.current);
    }
}
