//! Meta-mirror invariant: meta-outcomes agree with their sub-boards.

use super::Invariant;
use crate::{MetaBoard, Position};

/// Invariant: every meta-outcome equals the outcome of its sub-board.
pub struct MetaMirrorInvariant;

impl Invariant<MetaBoard> for MetaMirrorInvariant {
    fn holds(board: &MetaBoard) -> bool {
        Position::ALL
            .iter()
            .all(|&pos| board.meta_outcome(pos) == board.sub_board(pos).outcome())
    }

    fn description() -> &'static str {
        "Meta-outcomes mirror sub-board outcomes"
    }
}
