//! Persistent game storage keyed by game id.

use crate::session::GameMode;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};
use ultimate_tictactoe::MetaBoard;

/// A game as kept by a store.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct StoredGame {
    /// Game identifier.
    id: String,
    /// Who plays this game.
    mode: GameMode,
    /// Board state, stored as a game snapshot.
    board: MetaBoard,
}

impl StoredGame {
    /// Splits the record into id, mode and board.
    pub fn into_parts(self) -> (String, GameMode, MetaBoard) {
        (self.id, self.mode, self.board)
    }
}

/// Storage for games between invocations.
pub trait GameStore {
    /// Creates and persists a new game under a fresh id.
    fn create(&mut self, mode: GameMode) -> Result<StoredGame, StoreError>;

    /// Loads a game. Returns `None` if no game has this id.
    fn load(&mut self, id: &str) -> Result<Option<StoredGame>, StoreError>;

    /// Persists a game, replacing any earlier version.
    fn save(&mut self, game: &StoredGame) -> Result<(), StoreError>;

    /// Removes a game. Returns whether it existed.
    fn delete(&mut self, id: &str) -> Result<bool, StoreError>;
}

/// Generates a random 16-digit hexadecimal game id.
#[instrument]
pub fn new_game_id() -> String {
    format!("{:016x}", rand::rng().random::<u64>())
}

/// Keeps games in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryGameStore {
    games: HashMap<String, StoredGame>,
}

impl MemoryGameStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Returns true if no game is stored.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

impl GameStore for MemoryGameStore {
    #[instrument(skip(self))]
    fn create(&mut self, mode: GameMode) -> Result<StoredGame, StoreError> {
        let game = StoredGame::new(new_game_id(), mode, MetaBoard::new());
        self.games.insert(game.id.clone(), game.clone());
        info!(game_id = %game.id, "Game created");
        Ok(game)
    }

    fn load(&mut self, id: &str) -> Result<Option<StoredGame>, StoreError> {
        Ok(self.games.get(id).cloned())
    }

    fn save(&mut self, game: &StoredGame) -> Result<(), StoreError> {
        self.games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        Ok(self.games.remove(id).is_some())
    }
}

/// Keeps each game as a pretty-printed JSON file in a directory, with an
/// in-memory cache in front.
#[derive(Debug, Clone)]
pub struct FileGameStore {
    dir: PathBuf,
    cache: HashMap<String, StoredGame>,
}

impl FileGameStore {
    /// Opens a store in `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir).map_err(|e| {
            StoreError::new(format!("Failed to create store directory '{}': {}", dir.display(), e))
        })?;
        info!("Game store opened");
        Ok(Self {
            dir,
            cache: HashMap::new(),
        })
    }

    /// Directory the store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, id: &str) -> Result<PathBuf, StoreError> {
        let valid = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            warn!(id, "Rejected game id");
            return Err(StoreError::new(format!("Invalid game id '{}'", id)));
        }
        Ok(self.dir.join(format!("{}.json", id)))
    }
}

impl GameStore for FileGameStore {
    #[instrument(skip(self))]
    fn create(&mut self, mode: GameMode) -> Result<StoredGame, StoreError> {
        let game = StoredGame::new(new_game_id(), mode, MetaBoard::new());
        self.save(&game)?;
        info!(game_id = %game.id, "Game created");
        Ok(game)
    }

    #[instrument(skip(self))]
    fn load(&mut self, id: &str) -> Result<Option<StoredGame>, StoreError> {
        if let Some(game) = self.cache.get(id) {
            debug!("Cache hit");
            return Ok(Some(game.clone()));
        }

        let path = self.path_for(id)?;
        if !path.exists() {
            debug!("Game not found");
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let game: StoredGame = serde_json::from_str(&content)?;
        debug!(moves = game.board.history().len(), "Game loaded from disk");
        self.cache.insert(id.to_string(), game.clone());
        Ok(Some(game))
    }

    #[instrument(skip(self, game), fields(game_id = %game.id))]
    fn save(&mut self, game: &StoredGame) -> Result<(), StoreError> {
        let path = self.path_for(&game.id)?;
        let content = serde_json::to_string_pretty(game)?;
        std::fs::write(&path, content)?;
        self.cache.insert(game.id.clone(), game.clone());
        debug!(path = %path.display(), "Game saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
        let path = self.path_for(id)?;
        let cached = self.cache.remove(id).is_some();
        let existed = path.exists();
        if existed {
            std::fs::remove_file(&path)?;
        }
        info!(existed = existed || cached, "Game deleted");
        Ok(existed || cached)
    }
}

/// Store error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new store error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("I/O error: {}", err))
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        Self::new(format!("Malformed game file: {}", err))
    }
}
