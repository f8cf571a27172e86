//! Ultimate Games - stored ultimate tic-tac-toe games against search agents
//!
//! # Architecture
//!
//! - **Config**: TOML settings with defaults for every field
//! - **Difficulty**: maps easy/medium/hard onto random and minimax agents
//! - **Session**: one game, its mode, turn order and status messages
//! - **Store**: games kept as JSON files keyed by a generated id
//! - **Render**: plain-text board view for the terminal
//!
//! # Example
//!
//! ```
//! use ultimate_games::{AgentSettings, Difficulty, GameMode, GameSession};
//! use ultimate_tictactoe::Player;
//!
//! let mode = GameMode::Ai { difficulty: Difficulty::Medium };
//! let mut session = GameSession::new("demo".to_string(), mode, &AgentSettings::default());
//! let message = session.play(4, 4, Player::X).unwrap();
//! assert_eq!(message, "Move successful. Waiting for AI...");
//! let turn = session.agent_move().unwrap();
//! assert_eq!(turn.message, "Your turn.");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod difficulty;
mod render;
mod session;
mod store;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError};

// Crate-level exports - Agents by difficulty
pub use difficulty::{AgentSettings, Difficulty};

// Crate-level exports - Rendering
pub use render::{describe_constraint, describe_sub_boards, render_board, render_grid};

// Crate-level exports - Sessions
pub use session::{AgentTurn, COMPUTER, GameMode, GameSession, HUMAN, SessionError};

// Crate-level exports - Storage
pub use store::{FileGameStore, GameStore, MemoryGameStore, StoreError, StoredGame, new_game_id};
