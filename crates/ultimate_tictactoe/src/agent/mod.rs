//! Agents that choose moves for one side of the game.

mod evaluation;
mod random;
mod search;

pub use evaluation::{Heuristic, ThreatHeuristic, count_threats};
pub use random::RandomAgent;
pub use search::{SearchAgent, SearchReport};

use crate::{MetaBoard, Move, Player};

/// Universal interface for move-choosing agents.
///
/// Agents only ever read the board they are given; the caller applies
/// the returned move.
pub trait Agent: Send {
    /// Select a move for this agent's player, or `None` if there is none.
    fn select_move(&mut self, board: &MetaBoard) -> Option<Move>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    /// The player this agent moves for.
    fn player(&self) -> Player;
}
