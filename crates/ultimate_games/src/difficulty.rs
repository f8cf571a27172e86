//! Difficulty tiers and the agents that play them.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use ultimate_tictactoe::{Agent, Player, RandomAgent, SearchAgent};

/// How strong the computer opponent plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random legal moves.
    Easy,
    /// Shallow minimax search.
    #[default]
    Medium,
    /// Deeper minimax search.
    Hard,
}

/// Parameters for building agents from a difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, new)]
pub struct AgentSettings {
    /// Search depth for [`Difficulty::Medium`].
    medium_depth: u32,
    /// Search depth for [`Difficulty::Hard`].
    hard_depth: u32,
    /// Fixed seed for [`Difficulty::Easy`]; seeded from the OS when absent.
    seed: Option<u64>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self::new(2, 4, None)
    }
}

impl AgentSettings {
    /// Builds the agent that plays `player` at `difficulty`.
    #[instrument(skip(self))]
    pub fn agent_for(&self, difficulty: Difficulty, player: Player) -> Box<dyn Agent> {
        let agent: Box<dyn Agent> = match difficulty {
            Difficulty::Easy => match self.seed {
                Some(seed) => Box::new(RandomAgent::with_seed(player, seed)),
                None => Box::new(RandomAgent::new(player)),
            },
            Difficulty::Medium => Box::new(SearchAgent::new(player, self.medium_depth)),
            Difficulty::Hard => Box::new(SearchAgent::new(player, self.hard_depth)),
        };
        debug!(agent = agent.name(), "Agent created");
        agent
    }
}
