//! Ultimate tic-tac-toe rules engine and search agents.
//!
//! Nine tic-tac-toe sub-boards sit in a 3x3 meta-grid. The cell played in
//! one sub-board decides which sub-board the opponent plays in next, and
//! three sub-boards won in a line win the game.
//!
//! # Architecture
//!
//! - **SubBoard**: one 3x3 grid and its own outcome
//! - **MetaBoard**: nine sub-boards, the active-board constraint, the
//!   game outcome and the move log; the only mutator of game state
//! - **Agents**: [`SearchAgent`] (minimax with alpha-beta pruning) and
//!   [`RandomAgent`], both reading boards and never mutating them
//!
//! # Example
//!
//! ```
//! use ultimate_tictactoe::{MetaBoard, Move, Player, Position, SearchAgent};
//!
//! let mut board = MetaBoard::new();
//! board
//!     .apply(Move::new(Position::Center, Position::Center, Player::X))
//!     .unwrap();
//! assert_eq!(board.legal_boards(), vec![Position::Center]);
//!
//! let agent = SearchAgent::new(Player::O, 2);
//! let reply = agent.best_move(&board).unwrap();
//! board.apply(reply).unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod agent;
pub mod contracts;
pub mod invariants;
mod meta_board;
mod position;
pub mod rules;
mod snapshot;
mod sub_board;
mod types;

pub use action::{Move, MoveError, MoveReply};
pub use agent::{
    Agent, Heuristic, RandomAgent, SearchAgent, SearchReport, ThreatHeuristic, count_threats,
};
pub use meta_board::{ActiveBoard, MetaBoard};
pub use position::Position;
pub use snapshot::{GameSnapshot, MoveRecord, SnapshotError, SnapshotErrorKind, SubBoardSnapshot};
pub use sub_board::{PlaceError, SubBoard};
pub use types::{InvalidCode, Outcome, Player, Square};
