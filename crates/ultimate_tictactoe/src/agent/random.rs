use crate::{MetaBoard, Move, Player};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use super::Agent;

/// An agent that selects uniformly at random from the moves the board accepts.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    player: Player,
    rng: StdRng,
}

impl RandomAgent {
    /// Creates a random agent seeded from the operating system.
    pub fn new(player: Player) -> Self {
        RandomAgent {
            player,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible random agent.
    pub fn with_seed(player: Player, seed: u64) -> Self {
        RandomAgent {
            player,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_move(&mut self, board: &MetaBoard) -> Option<Move> {
        let moves: Vec<Move> = board
            .legal_moves(self.player)
            .into_iter()
            .filter(|&mv| board.clone().apply(mv).is_ok())
            .collect();
        if moves.is_empty() {
            return None;
        }
        let chosen = moves[self.rng.random_range(0..moves.len())];
        debug!(%chosen, options = moves.len(), "Random move");
        Some(chosen)
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn player(&self) -> Player {
        self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    #[test]
    fn test_random_agent_selects_legal_move() {
        let mut agent = RandomAgent::with_seed(Player::X, 7);
        let board = MetaBoard::new();
        let legal = board.legal_moves(Player::X);

        for _ in 0..100 {
            let chosen = agent.select_move(&board).unwrap();
            assert!(legal.contains(&chosen), "{chosen} is not legal");
        }
    }

    #[test]
    fn test_random_agents_play_full_game() {
        let mut x = RandomAgent::with_seed(Player::X, 1);
        let mut o = RandomAgent::with_seed(Player::O, 2);
        let mut board = MetaBoard::new();

        while !board.is_over() {
            let agent: &mut dyn Agent = if board.to_move() == Player::X {
                &mut x
            } else {
                &mut o
            };
            let Some(chosen) = agent.select_move(&board) else {
                break;
            };
            board.apply(chosen).unwrap();
        }

        assert!(board.is_over());
        assert!(board.history().len() <= 81);
    }

    #[test]
    fn test_no_move_when_constraint_names_decided_board() {
        let mut snapshot = MetaBoard::new().snapshot();
        snapshot.boards[2].outcome = Outcome::Draw;
        snapshot.meta_outcomes[2] = Outcome::Draw;
        snapshot.active_board = Some(2);
        let board = MetaBoard::from_snapshot(snapshot).unwrap();
        assert!(!board.legal_moves(Player::X).is_empty());

        let mut agent = RandomAgent::with_seed(Player::X, 3);
        assert_eq!(agent.select_move(&board), None);
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = MetaBoard::new();
        let mut a = RandomAgent::with_seed(Player::X, 42);
        let mut b = RandomAgent::with_seed(Player::X, 42);
        for _ in 0..10 {
            assert_eq!(a.select_move(&board), b.select_move(&board));
        }
    }

    #[test]
    fn test_random_agent_name() {
        assert_eq!(RandomAgent::new(Player::O).name(), "Random");
    }
}
