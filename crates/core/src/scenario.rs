//! Game scenario settings: where the traveler starts, how much it may spend,
//! which location it is heading for and the obstacles of every turn.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub start: LocationId,
    pub budget: Cost,
    /// Explicit target. Takes precedence over `prefer_target`.
    #[serde(default)]
    pub target: Option<LocationId>,
    /// Target used when the map has it; otherwise the highest location id.
    #[serde(default)]
    pub prefer_target: Option<LocationId>,
    #[serde(default)]
    pub obstacles: Vec<Vec<LocationId>>,
    #[serde(default)]
    pub limits: GameConfig,
}

impl Scenario {
    pub fn target_selector(&self) -> TargetSelector {
        match (self.target, self.prefer_target) {
            (Some(id), _) => TargetSelector::Fixed(id),
            (None, Some(id)) => TargetSelector::PreferredOrHighest(id),
            (None, None) => TargetSelector::HighestId,
        }
    }

    pub fn obstacle_schedule(&self) -> ObstacleSchedule {
        self.obstacles.iter().map(|turn| turn.iter().copied().collect::<BTreeSet<_>>()).collect()
    }

    pub fn to_setup(&self) -> GameSetup {
        GameSetup {
            start: self.start,
            target: self.target_selector(),
            budget: self.budget,
            obstacles: self.obstacle_schedule(),
            config: self.limits,
        }
    }
}
