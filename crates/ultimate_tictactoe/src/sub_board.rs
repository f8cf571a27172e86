//! A single 3x3 sub-board.

use crate::rules;
use crate::{Outcome, Player, Position, Square};

/// Errors that can occur when placing a mark on a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlaceError {
    /// Square is already occupied.
    #[display("Square is already occupied")]
    SquareOccupied,
    /// The sub-board already has an outcome.
    #[display("Board is already decided")]
    BoardDecided,
}

/// One 3x3 grid together with its own outcome.
///
/// The outcome is set the moment a line is completed or the last square
/// is filled, and the board accepts no marks after that.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubBoard {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
    outcome: Outcome,
}

impl SubBoard {
    /// Creates a new empty sub-board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a sub-board from stored parts without re-deriving the outcome.
    pub(crate) fn from_parts(squares: [Square; 9], outcome: Outcome) -> Self {
        Self { squares, outcome }
    }

    /// Gets the square at the given cell.
    pub fn get(&self, cell: Position) -> Square {
        self.squares[cell.to_index()]
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, cell: Position) -> bool {
        self.get(cell) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Returns the outcome of this sub-board.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true once the sub-board is won or drawn.
    pub fn is_decided(&self) -> bool {
        self.outcome.is_decided()
    }

    /// Empty cells in ascending index order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|&cell| self.is_empty(cell))
            .collect()
    }

    /// Places a mark and re-evaluates the outcome.
    ///
    /// Returns the outcome after the placement.
    ///
    /// # Errors
    ///
    /// Returns [`PlaceError`] and leaves the board untouched if the
    /// sub-board is decided or the square is occupied.
    pub fn place(&mut self, cell: Position, player: Player) -> Result<Outcome, PlaceError> {
        if self.is_decided() {
            return Err(PlaceError::BoardDecided);
        }
        if !self.is_empty(cell) {
            return Err(PlaceError::SquareOccupied);
        }

        self.squares[cell.to_index()] = Square::Occupied(player);
        self.outcome = rules::resolve(&self.squares);
        Ok(self.outcome)
    }
}
