//! Command-line interface for ultimate_games.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use ultimate_games::Difficulty;
use ultimate_tictactoe::Player;

/// Ultimate Games - ultimate tic-tac-toe against minimax agents
#[derive(Parser, Debug)]
#[command(name = "ultimate_games")]
#[command(about = "Ultimate tic-tac-toe with stored games and search agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "ultimate_games.toml")]
    pub config: PathBuf,

    /// Directory for stored games (overrides the config file)
    #[arg(long)]
    pub store_dir: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Game mode as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Play against the computer
    Ai,
    /// Two players at one keyboard
    Local,
}

/// Player mark as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerArg {
    /// Player X (moves first)
    X,
    /// Player O
    O,
}

impl From<PlayerArg> for Player {
    fn from(arg: PlayerArg) -> Self {
        match arg {
            PlayerArg::X => Player::X,
            PlayerArg::O => Player::O,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new stored game
    New {
        /// Who plays the game
        #[arg(long, value_enum, default_value = "ai")]
        mode: ModeArg,

        /// Agent strength (defaults to the configured difficulty)
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
    },

    /// Print a stored game
    Show {
        /// Game id
        id: String,
    },

    /// Play a move in a stored game
    Move {
        /// Game id
        id: String,

        /// Sub-board index (0-8)
        board: usize,

        /// Cell index within the sub-board (0-8)
        cell: usize,

        /// Mark to play
        #[arg(long, value_enum, default_value = "x")]
        player: PlayerArg,
    },

    /// Let the agent play its move in a stored game
    AiMove {
        /// Game id
        id: String,
    },

    /// Restart a stored game from an empty board
    Reset {
        /// Game id
        id: String,
    },

    /// Delete a stored game
    Delete {
        /// Game id
        id: String,
    },

    /// Play an interactive game against the agent
    Play {
        /// Agent strength (defaults to the configured difficulty)
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
    },
}
