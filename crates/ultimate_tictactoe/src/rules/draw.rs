//! Draw detection logic.

use super::{LineMark, check_winner};
use crate::Outcome;

/// Checks if every cell of the grid is taken.
///
/// A full grid with no winner indicates a draw.
pub fn is_full<M: LineMark>(cells: &[M; 9]) -> bool {
    cells.iter().all(|cell| !cell.is_vacant())
}

/// Decides the outcome of a grid: a completed line wins, otherwise a
/// full grid is drawn.
pub fn resolve<M: LineMark>(cells: &[M; 9]) -> Outcome {
    if let Some(winner) = check_winner(cells) {
        Outcome::Won(winner)
    } else if is_full(cells) {
        Outcome::Draw
    } else {
        Outcome::Undecided
    }
}
