//! Active-board invariant: the constraint never points at a decided board.

use super::Invariant;
use crate::{ActiveBoard, MetaBoard};

/// Invariant: the active-board constraint is either unconstrained or
/// names a sub-board that is still undecided.
pub struct ActiveBoardOpenInvariant;

impl Invariant<MetaBoard> for ActiveBoardOpenInvariant {
    fn holds(board: &MetaBoard) -> bool {
        match board.active_board() {
            ActiveBoard::Any => true,
            ActiveBoard::Forced(pos) => !board.meta_outcome(pos).is_decided(),
        }
    }

    fn description() -> &'static str {
        "Active board is unconstrained or undecided"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Outcome;

    #[test]
    fn test_new_game_holds() {
        assert!(ActiveBoardOpenInvariant::holds(&MetaBoard::new()));
    }

    #[test]
    fn test_forced_to_decided_board_violates() {
        let mut snapshot = MetaBoard::new().snapshot();
        snapshot.boards[2].outcome = Outcome::Draw;
        snapshot.meta_outcomes[2] = Outcome::Draw;
        snapshot.active_board = Some(2);
        let board = MetaBoard::from_snapshot(snapshot).unwrap();

        assert!(!ActiveBoardOpenInvariant::holds(&board));
    }
}
