use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use game_types::PlayerStats;

/// Fixed key the logged-in player is cached under.
pub const SESSION_CACHE_KEY: &str = "hangman_current_player";

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("session cache I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("session cache is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Local persistence for at most one player, used to skip re-login.
pub trait SessionCache: Send + Sync {
    fn load(&self) -> Result<Option<PlayerStats>, CacheError>;

    fn save(&self, player: &PlayerStats) -> Result<(), CacheError>;

    fn clear(&self) -> Result<(), CacheError>;
}

/// Blobs without a player name are treated as absent.
fn decode(blob: &str) -> Result<Option<PlayerStats>, CacheError> {
    let player: PlayerStats = serde_json::from_str(blob)?;
    if player.player_name.is_empty() {
        return Ok(None);
    }
    Ok(Some(player.normalized()))
}

/// JSON file named after [`SESSION_CACHE_KEY`] inside a directory.
#[derive(Debug, Clone)]
pub struct FileSessionCache {
    path: PathBuf,
}

impl FileSessionCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", SESSION_CACHE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionCache for FileSessionCache {
    fn load(&self) -> Result<Option<PlayerStats>, CacheError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => decode(&blob),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, player: &PlayerStats) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string(player)?)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-process cache holding the raw JSON blob.
#[derive(Debug, Default)]
pub struct MemorySessionCache {
    blob: Mutex<Option<String>>,
}

impl MemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl SessionCache for MemorySessionCache {
    fn load(&self) -> Result<Option<PlayerStats>, CacheError> {
        match self.blob() {
            Some(blob) => decode(&blob),
            None => Ok(None),
        }
    }

    fn save(&self, player: &PlayerStats) -> Result<(), CacheError> {
        let blob = serde_json::to_string(player)?;
        *self.blob.lock().unwrap_or_else(|e| e.into_inner()) = Some(blob);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        *self.blob.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
