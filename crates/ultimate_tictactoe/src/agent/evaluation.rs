use crate::rules::{LINES, LineMark, mark_at};
use crate::{MetaBoard, Player, Position};

/// Trait for evaluating a non-terminal position from one player's side.
pub trait Heuristic: Send + Sync {
    /// Scores `board` for `player`; higher is better for `player`.
    fn evaluate(&self, board: &MetaBoard, player: Player) -> i32;
}

/// Counts open lines for `player` on a 3x3 grid.
///
/// A line with two of the player's marks and one vacant cell scores 10,
/// a line with one mark and two vacant cells scores 1. Any line holding
/// an opponent mark or a draw scores nothing.
pub fn count_threats<M: LineMark>(cells: &[M; 9], player: Player) -> i32 {
    LINES
        .iter()
        .map(|line| {
            let owned = line
                .iter()
                .filter(|&&pos| mark_at(cells, pos).owner() == Some(player))
                .count();
            let vacant = line
                .iter()
                .filter(|&&pos| mark_at(cells, pos).is_vacant())
                .count();
            match (owned, vacant) {
                (2, 1) => 10,
                (1, 2) => 1,
                _ => 0,
            }
        })
        .sum()
}

/// Default heuristic: threats on the meta-board weigh three times as much
/// as threats inside each open sub-board.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreatHeuristic;

impl ThreatHeuristic {
    /// Weight of meta-board threats.
    pub const META_WEIGHT: i32 = 3;
}

impl Heuristic for ThreatHeuristic {
    fn evaluate(&self, board: &MetaBoard, player: Player) -> i32 {
        let opponent = player.opponent();
        let meta = board.meta_outcomes();
        let mut score = Self::META_WEIGHT * (count_threats(meta, player) - count_threats(meta, opponent));

        for pos in Position::ALL {
            if board.meta_outcome(pos).is_decided() {
                continue;
            }
            let squares = board.sub_board(pos).squares();
            score += count_threats(squares, player) - count_threats(squares, opponent);
        }

        score
    }
}
