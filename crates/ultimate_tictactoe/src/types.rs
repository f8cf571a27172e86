//! Core domain types for ultimate tic-tac-toe.
//!
//! Squares, players and outcomes travel through snapshots as the small
//! integer codes stored games have always used: `0` empty/undecided,
//! `1` player X, `2` player O, `3` draw.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A code that does not name any value of the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("{code} is not a valid {kind} code")]
pub struct InvalidCode {
    /// Name of the type being decoded.
    pub kind: &'static str,
    /// The rejected code.
    pub code: u8,
}

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    /// Player X (player one, goes first).
    X,
    /// Player O (player two).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// The mark drawn for this player.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        match player {
            Player::X => 1,
            Player::O => 2,
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Player::X),
            2 => Ok(Player::O),
            code => Err(InvalidCode {
                kind: "player",
                code,
            }),
        }
    }
}

/// A square on a sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl From<Square> for u8 {
    fn from(square: Square) -> Self {
        match square {
            Square::Empty => 0,
            Square::Occupied(player) => player.into(),
        }
    }
}

impl TryFrom<u8> for Square {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Square::Empty),
            1 | 2 => Player::try_from(code).map(Square::Occupied),
            code => Err(InvalidCode {
                kind: "square",
                code,
            }),
        }
    }
}

/// Result of a sub-board or of the whole game.
///
/// The same type doubles as the value of a meta-board cell, so the
/// line test that decides a sub-board also decides the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Outcome {
    /// Still being played.
    #[default]
    Undecided,
    /// Won by a player.
    Won(Player),
    /// Finished without a winner.
    Draw,
}

impl Outcome {
    /// Returns true once the outcome can no longer change.
    pub fn is_decided(self) -> bool {
        self != Outcome::Undecided
    }

    /// Returns the winner, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Won(player) => Some(player),
            Outcome::Undecided | Outcome::Draw => None,
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Undecided => 0,
            Outcome::Won(player) => player.into(),
            Outcome::Draw => 3,
        }
    }
}

impl TryFrom<u8> for Outcome {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Outcome::Undecided),
            1 | 2 => Player::try_from(code).map(Outcome::Won),
            3 => Ok(Outcome::Draw),
            code => Err(InvalidCode {
                kind: "outcome",
                code,
            }),
        }
    }
}
