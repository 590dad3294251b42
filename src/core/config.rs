//! Board configuration.
//!
//! Hosts build a `BoardConfig` at startup and hand it to `Board::new`.
//! Every field has a default, so a config can also be deserialized from a
//! partial JSON/TOML document.

use serde::{Deserialize, Serialize};

/// Storage key used when the host does not pick one.
pub const DEFAULT_SESSION_KEY: &str = "boardState";

/// Configuration for a single board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Key under which snapshots are read and written.
    pub session_key: String,

    /// Only the local player's board restores and persists itself.
    /// Opponent boards are plain in-memory state.
    pub is_player: bool,

    /// Shuffle seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl BoardConfig {
    /// Config for the local player's board with default settings.
    #[must_use]
    pub fn player() -> Self {
        Self::default()
    }

    /// Config for an opponent board (never persisted).
    #[must_use]
    pub fn opponent() -> Self {
        Self {
            is_player: false,
            ..Self::default()
        }
    }

    /// Set the storage key.
    #[must_use]
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    /// Set a fixed shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            session_key: DEFAULT_SESSION_KEY.to_string(),
            is_player: true,
            seed: None,
        }
    }
}
