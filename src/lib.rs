//! # tcg-board
//!
//! Reactive board state for a two-player trading card game playtester.
//!
//! ## Design Principles
//!
//! 1. **Everything Observable**: Every pile, slot member and flag is a value
//!    cell with synchronous, ordered change notification. UI and network
//!    layers subscribe; game logic just mutates.
//!
//! 2. **Persistence by Subscription**: The local player's board subscribes
//!    itself to all of its containers and writes a snapshot to session
//!    storage on every change, so a reload picks up where it left off.
//!
//! 3. **Physical Identity**: Each copy of a card gets a session uid at deck
//!    load. Piles find cards by uid, and exports send only uids.
//!
//! ## Architecture
//!
//! - **Single-threaded**: `Rc`/`RefCell` throughout. Mutation, notification
//!   and persistence all complete before the mutating call returns.
//!
//! - **Persistent Data Structures**: Piles are `im::Vector`s, so handing
//!   the new contents to every subscriber is O(1).
//!
//! ## Modules
//!
//! - `core`: Card uids, RNG, configuration, errors
//! - `reactive`: Observable cells and subscriptions
//! - `cards`: Card records and deck-list expansion
//! - `zones`: Piles, slots, slot collections
//! - `board`: Board aggregate, snapshot/export schemas, storage

pub mod board;
pub mod cards;
pub mod core;
pub mod reactive;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    BoardConfig, BoardError, CardUid, GameRng, Result, UidAllocator,
};

pub use crate::reactive::{Observable, Subscription};

pub use crate::cards::{expand_deck_list, Card};

pub use crate::zones::{Pile, Slot, SlotCollection, SlotParts};

pub use crate::board::{
    Board, BoardExport, BoardSnapshot, BoardState, MemoryStorage, SessionStorage, SlotExport,
    SlotSnapshot,
};
