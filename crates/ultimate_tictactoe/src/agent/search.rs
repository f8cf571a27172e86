use super::Agent;
use super::evaluation::{Heuristic, ThreatHeuristic};
use crate::{MetaBoard, Move, Outcome, Player};
use tracing::{debug, instrument};

/// Base score of a decided game, before the remaining-depth bonus.
const WIN_SCORE: i32 = 10;

/// Result of one root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// The chosen move, or `None` if there was no legal move.
    pub chosen: Option<Move>,
    /// Minimax score of the chosen move.
    pub score: i32,
    /// Positions visited below the root.
    pub nodes: u64,
}

/// Depth-bounded minimax agent with alpha-beta pruning.
///
/// Every candidate is played on a clone of the board, so the board passed
/// in is never modified. Ties go to the first candidate in
/// (sub-board, cell) order, which makes the choice deterministic.
#[derive(Debug, Clone)]
pub struct SearchAgent<H = ThreatHeuristic> {
    player: Player,
    depth: u32,
    heuristic: H,
}

impl SearchAgent<ThreatHeuristic> {
    /// Creates an agent for `player` that looks `depth` plies ahead.
    ///
    /// A depth of 0 is raised to 1 so the root candidates are always scored.
    pub fn new(player: Player, depth: u32) -> Self {
        Self::with_heuristic(player, depth, ThreatHeuristic)
    }
}

impl<H: Heuristic> SearchAgent<H> {
    /// Creates an agent with a custom evaluation at the search horizon.
    pub fn with_heuristic(player: Player, depth: u32, heuristic: H) -> Self {
        Self {
            player,
            depth: depth.max(1),
            heuristic,
        }
    }

    /// The player this agent maximizes for.
    pub fn player(&self) -> Player {
        self.player
    }

    /// The player this agent minimizes for.
    pub fn opponent(&self) -> Player {
        self.player.opponent()
    }

    /// Look-ahead depth in plies.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the best move for this agent's player, or `None` if the
    /// game is over or the board accepts none of the listed moves.
    pub fn best_move(&self, board: &MetaBoard) -> Option<Move> {
        self.search(board).chosen
    }

    /// Runs a full root search and reports the decision.
    #[instrument(skip(self, board), fields(player = %self.player, depth = self.depth))]
    pub fn search(&self, board: &MetaBoard) -> SearchReport {
        let mut nodes = 0;
        let mut best: Option<(Move, i32)> = None;

        for candidate in board.legal_moves(self.player) {
            let mut child = board.clone();
            if child.apply(candidate).is_err() {
                continue;
            }

            let score = self.minimax(&child, self.depth - 1, i32::MIN, i32::MAX, false, &mut nodes);
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((candidate, score));
            }
        }

        let report = SearchReport {
            chosen: best.map(|(mv, _)| mv),
            score: best.map_or(0, |(_, score)| score),
            nodes,
        };
        debug!(chosen = ?report.chosen, score = report.score, nodes, "Search finished");
        report
    }

    fn terminal_score(&self, outcome: Outcome, depth: u32) -> i32 {
        let bonus = i32::try_from(depth).unwrap_or(i32::MAX - WIN_SCORE);
        match outcome.winner() {
            Some(winner) if winner == self.player => WIN_SCORE + bonus,
            Some(_) => -WIN_SCORE - bonus,
            None => 0,
        }
    }

    fn minimax(
        &self,
        board: &MetaBoard,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        nodes: &mut u64,
    ) -> i32 {
        *nodes += 1;

        if board.is_over() {
            return self.terminal_score(board.outcome(), depth);
        }
        if depth == 0 {
            return self.heuristic.evaluate(board, self.player);
        }

        let mover = if maximizing {
            self.player
        } else {
            self.opponent()
        };
        let mut best: Option<i32> = None;

        for mv in board.legal_moves(mover) {
            let mut child = board.clone();
            if child.apply(mv).is_err() {
                continue;
            }

            let score = self.minimax(&child, depth - 1, alpha, beta, !maximizing, nodes);
            if maximizing {
                best = Some(best.map_or(score, |b| b.max(score)));
                alpha = alpha.max(score);
            } else {
                best = Some(best.map_or(score, |b| b.min(score)));
                beta = beta.min(score);
            }

            if beta <= alpha {
                break;
            }
        }

        best.unwrap_or(0)
    }
}

impl<H: Heuristic> Agent for SearchAgent<H> {
    fn select_move(&mut self, board: &MetaBoard) -> Option<Move> {
        self.best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }

    fn player(&self) -> Player {
        self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameSnapshot, Position, Square};

    fn mv(board: usize, cell: usize, player: Player) -> Move {
        Move::from_indices(board, cell, player).unwrap()
    }

    #[test]
    fn test_depth_zero_is_raised() {
        assert_eq!(SearchAgent::new(Player::O, 0).depth(), 1);
    }

    #[test]
    fn test_terminal_scores_prefer_fast_wins() {
        let agent = SearchAgent::new(Player::O, 4);
        assert_eq!(agent.terminal_score(Outcome::Won(Player::O), 3), 13);
        assert_eq!(agent.terminal_score(Outcome::Won(Player::O), 1), 11);
        assert_eq!(agent.terminal_score(Outcome::Won(Player::X), 3), -13);
        assert_eq!(agent.terminal_score(Outcome::Draw, 3), 0);
    }

    #[test]
    fn test_no_move_when_game_over() {
        let mut snapshot = MetaBoard::new().snapshot();
        snapshot.outcome = Outcome::Draw;
        let board = MetaBoard::from_snapshot(snapshot).unwrap();
        let report = SearchAgent::new(Player::O, 2).search(&board);
        assert_eq!(report.chosen, None);
        assert_eq!(report.nodes, 0);
    }

    #[test]
    fn test_winning_move_scores_by_remaining_depth() {
        // O owns sub-boards 0 and 1; the last open cell of sub-board 2
        // completes its top row and the meta top row.
        let mut snapshot: GameSnapshot = MetaBoard::new().snapshot();
        let o = Square::Occupied(Player::O);
        let x = Square::Occupied(Player::X);
        for index in [0, 1] {
            snapshot.boards[index].squares[..3].copy_from_slice(&[o, o, o]);
            snapshot.boards[index].outcome = Outcome::Won(Player::O);
            snapshot.meta_outcomes[index] = Outcome::Won(Player::O);
        }
        snapshot.boards[2].squares = vec![o, o, Square::Empty, x, x, o, x, o, x];
        snapshot.active_board = Some(2);
        let board = MetaBoard::from_snapshot(snapshot).unwrap();

        let report = SearchAgent::new(Player::O, 3).search(&board);
        assert_eq!(
            report.chosen,
            Some(Move::new(Position::TopRight, Position::TopRight, Player::O))
        );
        assert_eq!(report.score, 12);
        assert_eq!(report.nodes, 1);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        // At depth 1 every centre cell opens four lines; sub-board 0 comes first.
        let report = SearchAgent::new(Player::X, 1).search(&MetaBoard::new());
        assert_eq!(
            report.chosen,
            Some(Move::new(Position::TopLeft, Position::Center, Player::X))
        );
        assert_eq!(report.score, 4);
        assert_eq!(report.nodes, 81);
    }

    #[test]
    fn test_search_counts_nodes() {
        let mut board = MetaBoard::new();
        board.apply(mv(4, 4, Player::X)).unwrap();
        let report = SearchAgent::new(Player::O, 1).search(&board);
        // Depth 1: every root candidate is scored by one leaf evaluation.
        assert_eq!(report.nodes, 8);
        assert!(report.chosen.is_some());
    }
}
