//! History-replay invariant: the move log explains every mark.

use super::Invariant;
use crate::{MetaBoard, Position, Square};

/// Invariant: replaying the move log onto empty sub-boards reproduces the
/// squares exactly, with no square written twice.
pub struct HistoryReplayInvariant;

impl Invariant<MetaBoard> for HistoryReplayInvariant {
    fn holds(board: &MetaBoard) -> bool {
        let mut replayed = [[Square::Empty; 9]; 9];

        for mv in board.history() {
            let square = &mut replayed[mv.board.to_index()][mv.cell.to_index()];
            if *square != Square::Empty {
                return false;
            }
            *square = Square::Occupied(mv.player);
        }

        Position::ALL
            .iter()
            .all(|&pos| replayed[pos.to_index()] == *board.sub_board(pos).squares())
    }

    fn description() -> &'static str {
        "Move log replays to the current squares"
    }
}
