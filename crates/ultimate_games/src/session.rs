//! Game sessions: one board, its mode and the agent playing it.

use crate::difficulty::{AgentSettings, Difficulty};
use crate::store::StoredGame;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use ultimate_tictactoe::{Agent, MetaBoard, Move, MoveError, Outcome, Player};

/// The human's mark in a game against the computer.
pub const HUMAN: Player = Player::X;

/// The computer's mark in a game against the computer.
pub const COMPUTER: Player = Player::O;

/// Who sits across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum GameMode {
    /// Human as X against an agent as O.
    #[display("ai ({difficulty})")]
    Ai {
        /// Strength of the agent.
        difficulty: Difficulty,
    },
    /// Two humans sharing the board.
    #[display("local")]
    Local,
}

/// A session request that could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SessionError {
    /// The board refused the move.
    #[display("{_0}")]
    Rejected(MoveError),
    /// A player moved out of turn.
    #[display("Not your turn. Waiting for player {_0}")]
    OutOfTurn(#[error(not(source))] Player),
    /// Agent move requested in a game without an agent.
    #[display("No agent plays in a local game")]
    NoAgent,
    /// The agent found nothing to play.
    #[display("No valid moves available")]
    NoLegalMove,
}

impl From<MoveError> for SessionError {
    fn from(err: MoveError) -> Self {
        SessionError::Rejected(err)
    }
}

/// What the agent did on its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTurn {
    /// The move played, or `None` if the game was already over.
    pub chosen: Option<Move>,
    /// Status text for the player.
    pub message: String,
}

/// A game in progress.
pub struct GameSession {
    id: String,
    mode: GameMode,
    board: MetaBoard,
    agent: Option<Box<dyn Agent>>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("outcome", &self.board.outcome())
            .field("moves", &self.board.history().len())
            .field("agent", &self.agent.as_ref().map(|agent| agent.name()))
            .finish()
    }
}

impl GameSession {
    /// Starts a session on a fresh board.
    #[instrument(skip(settings))]
    pub fn new(id: String, mode: GameMode, settings: &AgentSettings) -> Self {
        info!(game_id = %id, %mode, "Creating game session");
        Self::with_board(id, mode, MetaBoard::new(), settings)
    }

    /// Resumes a stored game.
    #[instrument(skip(stored, settings), fields(game_id = %stored.id()))]
    pub fn from_stored(stored: StoredGame, settings: &AgentSettings) -> Self {
        let (id, mode, board) = stored.into_parts();
        Self::with_board(id, mode, board, settings)
    }

    fn with_board(id: String, mode: GameMode, board: MetaBoard, settings: &AgentSettings) -> Self {
        let agent = match mode {
            GameMode::Ai { difficulty } => Some(settings.agent_for(difficulty, COMPUTER)),
            GameMode::Local => None,
        };
        Self {
            id,
            mode,
            board,
            agent,
        }
    }

    /// Session identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Who plays this game.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The current board.
    pub fn board(&self) -> &MetaBoard {
        &self.board
    }

    /// Captures the session for storage.
    pub fn to_stored(&self) -> StoredGame {
        StoredGame::new(self.id.clone(), self.mode, self.board.clone())
    }

    /// Plays a human move and returns the status text.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if it is not `player`'s turn or the board
    /// rejects the move.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn play(&mut self, board: usize, cell: usize, player: Player) -> Result<String, SessionError> {
        if self.board.is_over() {
            warn!("Move attempted after game over");
            return Err(MoveError::GameOver.into());
        }
        let expected = self.board.to_move();
        if player != expected {
            warn!(%player, %expected, "Player tried to move out of turn");
            return Err(SessionError::OutOfTurn(expected));
        }

        let mv = Move::from_indices(board, cell, player)?;
        self.board.apply(mv).map_err(|err| {
            warn!(%mv, reason = %err, "Invalid move");
            SessionError::from(err)
        })?;

        info!(%mv, outcome = ?self.board.outcome(), "Move completed successfully");
        Ok(self.after_human_move())
    }

    /// Lets the agent take its turn.
    ///
    /// A finished game is not an error: the turn reports no move and the
    /// message `"Game is already over"`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] in a local game, when it is not the
    /// agent's turn, or when the agent finds no move.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn agent_move(&mut self) -> Result<AgentTurn, SessionError> {
        if self.board.is_over() {
            return Ok(AgentTurn {
                chosen: None,
                message: MoveError::GameOver.to_string(),
            });
        }

        let agent = self.agent.as_mut().ok_or(SessionError::NoAgent)?;
        let expected = self.board.to_move();
        if agent.player() != expected {
            warn!(agent = %agent.player(), %expected, "Agent asked to move out of turn");
            return Err(SessionError::OutOfTurn(expected));
        }

        let chosen = agent.select_move(&self.board).ok_or_else(|| {
            warn!("Agent found no legal move");
            SessionError::NoLegalMove
        })?;
        info!(agent = agent.name(), %chosen, "Agent moving");
        self.board.apply(chosen)?;

        let message = self
            .game_over_message()
            .unwrap_or_else(|| "Your turn.".to_string());
        Ok(AgentTurn {
            chosen: Some(chosen),
            message,
        })
    }

    /// Starts the game over on the same session.
    #[instrument(skip(self), fields(game_id = %self.id))]
    pub fn reset(&mut self) {
        self.board.reset();
    }

    /// Status text for the current position.
    pub fn status_message(&self) -> String {
        if let Some(message) = self.game_over_message() {
            return message;
        }
        match (self.mode, self.board.to_move()) {
            (GameMode::Ai { .. }, HUMAN) => "Your turn.".to_string(),
            (GameMode::Ai { .. }, _) => "Waiting for AI...".to_string(),
            (GameMode::Local, player) => format!("Player {} to move.", player),
        }
    }

    fn after_human_move(&self) -> String {
        if let Some(message) = self.game_over_message() {
            return message;
        }
        match self.mode {
            GameMode::Ai { .. } => "Move successful. Waiting for AI...".to_string(),
            GameMode::Local => format!("Move successful. Player {} to move.", self.board.to_move()),
        }
    }

    fn game_over_message(&self) -> Option<String> {
        let winner = match (self.board.outcome(), self.mode) {
            (Outcome::Undecided, _) => return None,
            (Outcome::Draw, _) => "Draw".to_string(),
            (Outcome::Won(HUMAN), GameMode::Ai { .. }) => "You (X)".to_string(),
            (Outcome::Won(_), GameMode::Ai { .. }) => "AI (O)".to_string(),
            (Outcome::Won(player), GameMode::Local) => player.to_string(),
        };
        Some(format!("Game Over! Winner: {}", winner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ai_game(difficulty: Difficulty) -> GameSession {
        GameSession::new(
            "test".to_string(),
            GameMode::Ai { difficulty },
            &AgentSettings::new(1, 2, Some(3)),
        )
    }

    #[test]
    fn test_mode_display() {
        let mode = GameMode::Ai {
            difficulty: Difficulty::Hard,
        };
        assert_eq!(mode.to_string(), "ai (hard)");
        assert_eq!(GameMode::Local.to_string(), "local");
    }

    #[test]
    fn test_human_move_waits_for_ai() {
        let mut session = ai_game(Difficulty::Easy);
        assert_eq!(session.status_message(), "Your turn.");
        let message = session.play(4, 4, Player::X).unwrap();
        assert_eq!(message, "Move successful. Waiting for AI...");
        assert_eq!(session.status_message(), "Waiting for AI...");
    }

    #[test]
    fn test_out_of_turn_rejected() {
        let mut session = ai_game(Difficulty::Easy);
        assert_eq!(session.play(0, 0, Player::O), Err(SessionError::OutOfTurn(Player::X)));
        assert_eq!(
            session.agent_move().unwrap_err(),
            SessionError::OutOfTurn(Player::X)
        );
    }

    #[test]
    fn test_local_game_has_no_agent() {
        let mut session = GameSession::new(
            "local".to_string(),
            GameMode::Local,
            &AgentSettings::default(),
        );
        let message = session.play(0, 0, Player::X).unwrap();
        assert_eq!(message, "Move successful. Player O to move.");
        assert_eq!(session.agent_move().unwrap_err(), SessionError::NoAgent);
    }
}
