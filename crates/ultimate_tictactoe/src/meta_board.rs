//! The meta-board: nine linked sub-boards and the authoritative rules engine.

use crate::contracts::{Contract, MoveContract};
use crate::rules;
use crate::snapshot::{
    GameSnapshot, MoveRecord, SnapshotError, SnapshotErrorKind, SubBoardSnapshot,
};
use crate::{Move, MoveError, MoveReply, Outcome, PlaceError, Player, Position, Square, SubBoard};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Where the next mover may play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActiveBoard {
    /// Any undecided sub-board.
    #[default]
    Any,
    /// Only the named sub-board.
    Forced(Position),
}

impl ActiveBoard {
    /// The forced sub-board, if any.
    pub fn forced(self) -> Option<Position> {
        match self {
            ActiveBoard::Any => None,
            ActiveBoard::Forced(pos) => Some(pos),
        }
    }
}

/// Complete ultimate tic-tac-toe game state.
///
/// The meta-board owns its nine sub-boards and is the only way to change
/// them. `Clone` copies every field, so a clone is a fully independent
/// game that can be played forward without touching the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GameSnapshot", try_from = "GameSnapshot")]
pub struct MetaBoard {
    boards: [SubBoard; 9],
    meta_outcomes: [Outcome; 9],
    outcome: Outcome,
    active: ActiveBoard,
    history: Vec<Move>,
}

impl MetaBoard {
    /// Creates a new game: all sub-boards open, no constraint, empty log.
    pub fn new() -> Self {
        Self {
            boards: Default::default(),
            meta_outcomes: [Outcome::Undecided; 9],
            outcome: Outcome::Undecided,
            active: ActiveBoard::Any,
            history: Vec::new(),
        }
    }

    /// Returns the sub-board at a meta-grid position.
    pub fn sub_board(&self, pos: Position) -> &SubBoard {
        &self.boards[pos.to_index()]
    }

    /// Returns all sub-boards in meta-grid order.
    pub fn sub_boards(&self) -> &[SubBoard; 9] {
        &self.boards
    }

    /// Returns the recorded outcome of one sub-board.
    pub fn meta_outcome(&self, pos: Position) -> Outcome {
        self.meta_outcomes[pos.to_index()]
    }

    /// Returns all meta-outcomes in meta-grid order.
    pub fn meta_outcomes(&self) -> &[Outcome; 9] {
        &self.meta_outcomes
    }

    /// Returns the outcome of the game.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns true once the game has an outcome.
    pub fn is_over(&self) -> bool {
        self.outcome.is_decided()
    }

    /// Returns the active-board constraint.
    pub fn active_board(&self) -> ActiveBoard {
        self.active
    }

    /// Returns the move log in play order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The player expected to move next: X opens, then turns alternate.
    pub fn to_move(&self) -> Player {
        self.history
            .last()
            .map_or(Player::X, |last| last.player.opponent())
    }

    /// Applies a move after checking it is legal.
    ///
    /// On success the sub-board and, if it resolves, the meta-outcomes and
    /// game outcome are updated; the active-board constraint moves to the
    /// sub-board matching the cell just played (or is lifted if that
    /// sub-board is decided); the move is appended to the log.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] with no state change if the move is illegal.
    #[instrument(level = "trace", skip(self))]
    pub fn apply(&mut self, mv: Move) -> Result<(), MoveError> {
        if let Err(err) = MoveContract::pre(self, &mv) {
            debug!(reason = %err, "Move rejected");
            return Err(err);
        }

        let before = cfg!(debug_assertions).then(|| self.clone());
        let index = mv.board.to_index();
        let previous = self.boards[index].outcome();
        let resolved = self.boards[index]
            .place(mv.cell, mv.player)
            .map_err(|err| match err {
                PlaceError::SquareOccupied => MoveError::SquareOccupied {
                    board: mv.board,
                    cell: mv.cell,
                },
                PlaceError::BoardDecided => MoveError::BoardDecided(mv.board),
            })?;

        if resolved != previous {
            self.meta_outcomes[index] = resolved;
            self.outcome = rules::resolve(&self.meta_outcomes);
            debug!(board = index, outcome = ?resolved, game = ?self.outcome, "Sub-board resolved");
        }

        self.active = if self.meta_outcome(mv.cell).is_decided() {
            ActiveBoard::Any
        } else {
            ActiveBoard::Forced(mv.cell)
        };
        self.history.push(mv);

        if let Some(before) = before
            && let Err(violations) = MoveContract::post(&before, self)
        {
            debug!(count = violations.len(), "Move kept despite failed post-conditions");
        }
        Ok(())
    }

    /// Handles a move request from an outside caller.
    ///
    /// Never fails: the reply says whether the move was accepted and why.
    #[instrument(skip(self))]
    pub fn request_move(&mut self, board: usize, cell: usize, player: Player) -> MoveReply {
        let result = Move::from_indices(board, cell, player).and_then(|mv| self.apply(mv));
        if result.is_ok() {
            info!(board, cell, %player, "Move accepted");
        }
        MoveReply::from(result)
    }

    /// Sub-boards the next mover may play in.
    ///
    /// A constraint naming an undecided sub-board yields just that board;
    /// otherwise every undecided sub-board is returned, including when the
    /// constraint names a decided board. [`MetaBoard::apply`] still rejects
    /// moves made under such a constraint.
    pub fn legal_boards(&self) -> Vec<Position> {
        if let Some(forced) = self.active.forced()
            && !self.meta_outcome(forced).is_decided()
        {
            return vec![forced];
        }

        Position::ALL
            .iter()
            .copied()
            .filter(|&pos| !self.meta_outcome(pos).is_decided())
            .collect()
    }

    /// Every legal move for `player`, ordered by sub-board then cell.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }

        self.legal_boards()
            .into_iter()
            .flat_map(|board| {
                self.sub_board(board)
                    .empty_cells()
                    .into_iter()
                    .map(move |cell| Move::new(board, cell, player))
            })
            .collect()
    }

    /// Clears all state back to a new game.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn reset(&mut self) {
        *self = Self::new();
        info!("Game reset");
    }

    /// Captures the complete state as a snapshot.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            boards: self
                .boards
                .iter()
                .map(|board| SubBoardSnapshot {
                    squares: board.squares().to_vec(),
                    outcome: board.outcome(),
                    available_cells: board.empty_cells().iter().map(|c| c.to_index()).collect(),
                })
                .collect(),
            meta_outcomes: self.meta_outcomes.to_vec(),
            outcome: self.outcome,
            active_board: self.active.forced().map(Position::to_index),
            available_boards: self.legal_boards().iter().map(|b| b.to_index()).collect(),
            history: self
                .history
                .iter()
                .map(|mv| MoveRecord {
                    board: mv.board.to_index(),
                    cell: mv.cell.to_index(),
                    player: mv.player,
                })
                .collect(),
        }
    }

    /// Rebuilds a game from a snapshot.
    ///
    /// Lengths and indices are validated; stored outcomes are trusted
    /// verbatim and never re-derived from the squares.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if any length or index is outside its domain.
    #[instrument(skip(snapshot), fields(moves = snapshot.history.len()))]
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, SnapshotError> {
        let boards: [SubBoard; 9] = snapshot
            .boards
            .iter()
            .enumerate()
            .map(|(index, board)| {
                let squares: [Square; 9] = board.squares.as_slice().try_into().map_err(|_| {
                    SnapshotError::new(SnapshotErrorKind::SquareCount {
                        board: index,
                        len: board.squares.len(),
                    })
                })?;
                Ok(SubBoard::from_parts(squares, board.outcome))
            })
            .collect::<Result<Vec<_>, SnapshotError>>()?
            .try_into()
            .map_err(|boards: Vec<SubBoard>| {
                SnapshotError::new(SnapshotErrorKind::BoardCount(boards.len()))
            })?;

        let meta_outcomes: [Outcome; 9] =
            snapshot.meta_outcomes.as_slice().try_into().map_err(|_| {
                SnapshotError::new(SnapshotErrorKind::MetaOutcomeCount(
                    snapshot.meta_outcomes.len(),
                ))
            })?;

        let active = match snapshot.active_board {
            None => ActiveBoard::Any,
            Some(index) => ActiveBoard::Forced(Position::from_index(index).ok_or_else(|| {
                SnapshotError::new(SnapshotErrorKind::ActiveBoardOutOfBounds(index))
            })?),
        };

        let history = snapshot
            .history
            .iter()
            .enumerate()
            .map(|(entry, record)| {
                Move::from_indices(record.board, record.cell, record.player).map_err(|_| {
                    SnapshotError::new(SnapshotErrorKind::MoveOutOfBounds {
                        entry,
                        board: record.board,
                        cell: record.cell,
                    })
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!(outcome = ?snapshot.outcome, ?active, "Snapshot loaded");
        Ok(Self {
            boards,
            meta_outcomes,
            outcome: snapshot.outcome,
            active,
            history,
        })
    }
}

impl Default for MetaBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl From<MetaBoard> for GameSnapshot {
    fn from(board: MetaBoard) -> Self {
        board.snapshot()
    }
}

impl TryFrom<GameSnapshot> for MetaBoard {
    type Error = SnapshotError;

    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        Self::from_snapshot(snapshot)
    }
}
