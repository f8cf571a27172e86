//! Contract-based validation for moves.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use super::action::{Move, MoveError};
use super::invariants::{InvariantSet, InvariantViolation, MetaBoardInvariants};
use super::{ActiveBoard, MetaBoard, Position};
use tracing::{instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the game has no outcome yet.
pub struct GameInProgress;

impl GameInProgress {
    /// Rejects every move once the game is decided.
    pub fn check(_mov: &Move, board: &MetaBoard) -> Result<(), MoveError> {
        if board.outcome().is_decided() {
            Err(MoveError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the move respects the active-board constraint.
///
/// The constraint binds even when it names a decided sub-board; that
/// case is then rejected by [`BoardInPlay`].
pub struct BoardIsActive;

impl BoardIsActive {
    /// Rejects moves outside the forced sub-board.
    pub fn check(mov: &Move, board: &MetaBoard) -> Result<(), MoveError> {
        match board.active_board() {
            ActiveBoard::Forced(required) if required != mov.board => Err(MoveError::WrongBoard {
                required,
                attempted: mov.board,
            }),
            _ => Ok(()),
        }
    }
}

/// Precondition: the target sub-board is still undecided.
pub struct BoardInPlay;

impl BoardInPlay {
    /// Rejects moves into won or drawn sub-boards.
    pub fn check(mov: &Move, board: &MetaBoard) -> Result<(), MoveError> {
        if board.meta_outcome(mov.board).is_decided() {
            Err(MoveError::BoardDecided(mov.board))
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects moves onto occupied squares.
    pub fn check(mov: &Move, board: &MetaBoard) -> Result<(), MoveError> {
        if board.sub_board(mov.board).is_empty(mov.cell) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied {
                board: mov.board,
                cell: mov.cell,
            })
        }
    }
}

/// Composite precondition, checked in the order rejections are reported.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    pub fn check(mov: &Move, board: &MetaBoard) -> Result<(), MoveError> {
        GameInProgress::check(mov, board)?;
        BoardIsActive::check(mov, board)?;
        BoardInPlay::check(mov, board)?;
        SquareIsEmpty::check(mov, board)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for move actions.
///
/// Postconditions:
/// - Decided outcomes (sub-boards and game) never change
/// - The move log grows by exactly one entry
/// - All [`MetaBoardInvariants`] hold
pub struct MoveContract;

impl Contract<MetaBoard, Move> for MoveContract {
    fn pre(board: &MetaBoard, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, board)
    }

    #[instrument(skip_all)]
    fn post(before: &MetaBoard, after: &MetaBoard) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = MetaBoardInvariants::check_all(after)
            .err()
            .unwrap_or_default();

        let outcomes_kept = Position::ALL.iter().all(|&pos| {
            let old = before.meta_outcome(pos);
            !old.is_decided() || old == after.meta_outcome(pos)
        }) && (!before.outcome().is_decided() || before.outcome() == after.outcome());
        if !outcomes_kept {
            violations.push(InvariantViolation::new("Decided outcomes never change"));
        }

        if after.history().len() != before.history().len() + 1 {
            violations.push(InvariantViolation::new("Move log grows by one entry"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            for violation in &violations {
                warn!(description = %violation.description, "Postcondition failed");
            }
            Err(violations)
        }
    }
}
