//! First-class action types for ultimate tic-tac-toe.
//!
//! Moves are domain events, not side effects. They represent the
//! player's intent and can be validated independently of execution.

use super::{Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A move: a player placing their mark in one cell of one sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// The sub-board played in.
    pub board: Position,
    /// The cell played inside that sub-board.
    pub cell: Position,
    /// The player making the move.
    pub player: Player,
}

impl Move {
    /// Creates a new move.
    pub fn new(board: Position, cell: Position, player: Player) -> Self {
        Self {
            board,
            cell,
            player,
        }
    }

    /// Creates a move from raw indices, as received from outside callers.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if either index is not in 0-8.
    #[instrument]
    pub fn from_indices(board: usize, cell: usize, player: Player) -> Result<Self, MoveError> {
        let board = Position::from_index(board).ok_or(MoveError::OutOfBounds(board))?;
        let cell = Position::from_index(cell).ok_or(MoveError::OutOfBounds(cell))?;
        Ok(Self::new(board, cell, player))
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> board {} cell {}",
            self.player,
            self.board.to_index(),
            self.cell.to_index()
        )
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game already has an outcome.
    #[display("Game is already over")]
    GameOver,

    /// The active-board constraint names another sub-board.
    #[display("Must play in board {}", required.to_index())]
    WrongBoard {
        /// The sub-board the mover is constrained to.
        required: Position,
        /// The sub-board that was attempted.
        attempted: Position,
    },

    /// The target sub-board is already won or drawn.
    #[display("Board {} is already decided", _0.to_index())]
    BoardDecided(#[error(not(source))] Position),

    /// The target cell already holds a mark.
    #[display("Cell {} of board {} is already occupied", cell.to_index(), board.to_index())]
    SquareOccupied {
        /// The sub-board played in.
        board: Position,
        /// The occupied cell.
        cell: Position,
    },

    /// A board or cell index outside 0-8.
    #[display("Index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(#[error(not(source))] usize),
}

/// Answer to a move request: whether it was accepted and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReply {
    /// True if the move was applied.
    pub accepted: bool,
    /// Human-readable reason, suitable for showing to a player.
    pub reason: String,
}

impl MoveReply {
    /// Reason attached to every accepted move.
    pub const ACCEPTED: &'static str = "Move successful";
}

impl From<Result<(), MoveError>> for MoveReply {
    fn from(result: Result<(), MoveError>) -> Self {
        match result {
            Ok(()) => Self {
                accepted: true,
                reason: Self::ACCEPTED.to_string(),
            },
            Err(err) => Self {
                accepted: false,
                reason: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_indices_rejects_out_of_bounds() {
        assert_eq!(
            Move::from_indices(9, 0, Player::X),
            Err(MoveError::OutOfBounds(9))
        );
        assert_eq!(
            Move::from_indices(0, 12, Player::X),
            Err(MoveError::OutOfBounds(12))
        );
    }

    #[test]
    fn test_reasons_are_distinguishable() {
        let reasons = [
            MoveError::GameOver,
            MoveError::WrongBoard {
                required: Position::Center,
                attempted: Position::TopLeft,
            },
            MoveError::BoardDecided(Position::TopLeft),
            MoveError::SquareOccupied {
                board: Position::TopLeft,
                cell: Position::Center,
            },
            MoveError::OutOfBounds(9),
        ]
        .map(|err| err.to_string());

        assert_eq!(reasons[1], "Must play in board 4");
        for (i, a) in reasons.iter().enumerate() {
            for b in &reasons[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_reply_from_result() {
        let ok = MoveReply::from(Ok(()));
        assert!(ok.accepted);
        assert_eq!(ok.reason, "Move successful");

        let rejected = MoveReply::from(Err(MoveError::GameOver));
        assert!(!rejected.accepted);
        assert_eq!(rejected.reason, "Game is already over");
    }
}
