//! The board: one player's full game state plus its persistence.
//!
//! ## Key Types
//!
//! - `Board`: owning handle; derefs to `BoardState`
//! - `BoardState`: containers, flags, and the snapshot/export transforms
//! - `BoardSnapshot` / `SlotSnapshot`: durable schema
//! - `BoardExport` / `SlotExport`: uid-only schema for peers
//! - `SessionStorage`: durable string store collaborator
//!
//! ## Lifecycle
//!
//! ```
//! use std::rc::Rc;
//! use tcg_board::board::{Board, MemoryStorage};
//! use tcg_board::cards::Card;
//! use tcg_board::core::BoardConfig;
//!
//! let storage = Rc::new(MemoryStorage::new());
//! let board = Board::with_storage(BoardConfig::player(), storage.clone());
//!
//! board.cards.set(vec![Card::new("Pikachu").with_count(4)]);
//! board.reset();
//! assert_eq!(board.deck.len(), 4);
//!
//! // Every change was written through; a new board picks it up.
//! let again = Board::with_storage(BoardConfig::player(), storage.clone());
//! assert_eq!(again.deck.ids(), board.deck.ids());
//! ```

pub mod export;
mod persistence;
pub mod snapshot;
pub mod state;
pub mod storage;

pub use export::{BoardExport, SlotExport};
pub use snapshot::{BoardSnapshot, SlotSnapshot};
pub use state::BoardState;
pub use storage::{MemoryStorage, SessionStorage};

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use tracing::{debug, warn};

use self::persistence::Persistence;
use crate::core::config::BoardConfig;
use crate::core::rng::GameRng;

/// One player's board.
///
/// Derefs to [`BoardState`], so containers are reached directly:
/// `board.hand.push(card)`, `board.active.set(Some(slot))`.
pub struct Board {
    state: Rc<BoardState>,
    rng: RefCell<GameRng>,
    config: BoardConfig,
    persistence: Option<Persistence>,
}

impl Board {
    /// In-memory board with no durable storage.
    #[must_use]
    pub fn new(config: BoardConfig) -> Self {
        Self::build(config, None)
    }

    /// Board backed by `storage`.
    ///
    /// For the local player (`config.is_player`) with an available backend:
    /// restore from the stored snapshot if there is one, then persist every
    /// subsequent change. A stored snapshot that fails to parse is logged
    /// and ignored. Otherwise the board is in-memory only.
    #[must_use]
    pub fn with_storage(config: BoardConfig, storage: Rc<dyn SessionStorage>) -> Self {
        Self::build(config, Some(storage))
    }

    fn build(config: BoardConfig, storage: Option<Rc<dyn SessionStorage>>) -> Self {
        let state = Rc::new(BoardState::new());
        let rng = GameRng::from_seed_or_entropy(config.seed);
        debug!(seed = rng.seed(), player = config.is_player, "building board");
        let rng = RefCell::new(rng);

        let storage = storage.filter(|s| config.is_player && s.is_available());
        let persistence = storage.map(|storage| {
            if let Some(raw) = storage.read(&config.session_key) {
                match state.rehydrate(&raw) {
                    Ok(()) => debug!(key = %config.session_key, "restored board from storage"),
                    Err(err) => warn!(
                        key = %config.session_key,
                        error = %err,
                        "ignoring unreadable stored board"
                    ),
                }
            }
            Persistence::attach(&state, storage, config.session_key.clone())
        });

        Self {
            state,
            rng,
            config,
            persistence,
        }
    }

    /// Configuration this board was built with.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Is every change being written to storage?
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.persistence.is_some()
    }

    /// Number of live slots with persistence wiring attached.
    #[must_use]
    pub fn wired_slots(&self) -> usize {
        self.persistence.as_ref().map_or(0, Persistence::wired_slots)
    }

    /// Shuffle the deck with the board's RNG.
    ///
    /// Must not be called from inside a deck subscriber.
    pub fn shuffle_deck(&self) {
        self.deck.shuffle(&mut self.rng.borrow_mut());
    }
}

impl Deref for Board {
    type Target = BoardState;

    fn deref(&self) -> &BoardState {
        &self.state
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("config", &self.config)
            .field("persistent", &self.is_persistent())
            .field("state", &self.state)
            .finish()
    }
}
