//! Win detection logic.

use super::{LINES, LineMark, mark_at};
use crate::Player;

/// Checks if there is a winner on the grid.
///
/// Returns `Some(player)` if the player owns all three cells of a line,
/// `None` otherwise.
pub fn check_winner<M: LineMark>(cells: &[M; 9]) -> Option<Player> {
    LINES.iter().find_map(|&[a, b, c]| {
        let owner = mark_at(cells, a).owner()?;
        (mark_at(cells, b).owner() == Some(owner) && mark_at(cells, c).owner() == Some(owner))
            .then_some(owner)
    })
}
