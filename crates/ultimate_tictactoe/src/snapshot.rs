//! Serializable game snapshots.
//!
//! A snapshot is the plain-data shape a game is stored in. Loading one
//! back validates every length and index before it becomes live state,
//! but trusts the stored outcomes as they are.

use crate::{Outcome, Player, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One sub-board as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubBoardSnapshot {
    /// Squares in row-major order; must hold exactly 9 entries.
    pub squares: Vec<Square>,
    /// Stored outcome of the sub-board.
    pub outcome: Outcome,
    /// Empty cell indices at save time. Informational, ignored on load.
    #[serde(default)]
    pub available_cells: Vec<usize>,
}

/// One entry of the move log as stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Sub-board index (0-8).
    pub board: usize,
    /// Cell index (0-8).
    pub cell: usize,
    /// The player who moved.
    pub player: Player,
}

/// A complete game as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// The 9 sub-boards in meta-grid order.
    pub boards: Vec<SubBoardSnapshot>,
    /// One outcome per sub-board.
    pub meta_outcomes: Vec<Outcome>,
    /// Outcome of the whole game.
    pub outcome: Outcome,
    /// Sub-board the next mover is constrained to, or `None` if any.
    pub active_board: Option<usize>,
    /// Sub-boards open to the next mover at save time. Informational,
    /// ignored on load.
    #[serde(default)]
    pub available_boards: Vec<usize>,
    /// Moves in play order.
    pub history: Vec<MoveRecord>,
}

/// What is wrong with a rejected snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SnapshotErrorKind {
    /// Not exactly 9 sub-boards.
    #[display("expected 9 boards, found {_0}")]
    BoardCount(usize),
    /// A sub-board without exactly 9 squares.
    #[display("board {board} has {len} squares, expected 9")]
    SquareCount {
        /// Index of the offending sub-board.
        board: usize,
        /// Number of squares found.
        len: usize,
    },
    /// Not exactly 9 meta-outcomes.
    #[display("expected 9 meta-outcomes, found {_0}")]
    MetaOutcomeCount(usize),
    /// Active board index outside 0-8.
    #[display("active board {_0} is out of bounds")]
    ActiveBoardOutOfBounds(usize),
    /// Move log entry with an index outside 0-8.
    #[display("move {entry} ({board}, {cell}) is out of bounds")]
    MoveOutOfBounds {
        /// Position of the entry in the log.
        entry: usize,
        /// Stored sub-board index.
        board: usize,
        /// Stored cell index.
        cell: usize,
    },
}

/// Snapshot rejected on load, with the location that rejected it.
#[derive(Debug, Clone, Display, Error)]
#[display("Snapshot error: {} at {}:{}", kind, file, line)]
pub struct SnapshotError {
    /// What is wrong with the snapshot.
    pub kind: SnapshotErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SnapshotError {
    /// Creates a new snapshot error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: SnapshotErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
