//! Game rules for ultimate tic-tac-toe.
//!
//! The line test is written once over any 3x3 grid of [`LineMark`]
//! values. Sub-boards run it over their squares and the meta-board runs
//! it over the outcomes of its sub-boards.

pub mod draw;
pub mod win;

pub use draw::{is_full, resolve};
pub use win::check_winner;

use crate::{Outcome, Player, Position, Square};

/// The 8 canonical tic-tac-toe lines.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A value that can sit in one cell of a 3x3 grid and take part in lines.
pub trait LineMark: Copy {
    /// The player owning this cell, if any.
    fn owner(self) -> Option<Player>;

    /// Whether the cell is still open.
    fn is_vacant(self) -> bool;
}

impl LineMark for Square {
    fn owner(self) -> Option<Player> {
        match self {
            Square::Occupied(player) => Some(player),
            Square::Empty => None,
        }
    }

    fn is_vacant(self) -> bool {
        self == Square::Empty
    }
}

/// A drawn sub-board is neither owned nor vacant: it blocks every line
/// through it.
impl LineMark for Outcome {
    fn owner(self) -> Option<Player> {
        self.winner()
    }

    fn is_vacant(self) -> bool {
        self == Outcome::Undecided
    }
}

/// Reads the mark at a position of a 3x3 grid.
pub fn mark_at<M: LineMark>(cells: &[M; 9], pos: Position) -> M {
    cells[pos.to_index()]
}
