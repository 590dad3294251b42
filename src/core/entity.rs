//! Physical-card identification.
//!
//! Every physical copy of a card in a session gets a `CardUid` when the deck
//! list is expanded. The id is distinct from the card *definition* (two
//! copies of the same card have different uids) and stays with the copy as
//! it moves between piles.
//!
//! ## Allocation
//!
//! Uids are allocated sequentially starting at 1 by [`UidAllocator`].
//! Resetting the board restarts the sequence.
//!
//! ```
//! use tcg_board::core::{CardUid, UidAllocator};
//!
//! let mut alloc = UidAllocator::new();
//! assert_eq!(alloc.next_uid(), CardUid(1));
//! assert_eq!(alloc.next_uid(), CardUid(2));
//! ```

use serde::{Deserialize, Serialize};

/// Per-session identifier of one physical card.
///
/// Serializes as a bare number (`"_id": 3`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardUid(pub u32);

impl CardUid {
    /// First uid handed out after a deck load.
    pub const FIRST: CardUid = CardUid(1);

    /// Create a uid from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for CardUid {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Monotonic uid source used during deck expansion.
#[derive(Clone, Debug)]
pub struct UidAllocator {
    next: u32,
}

impl UidAllocator {
    /// Start a fresh sequence at [`CardUid::FIRST`].
    #[must_use]
    pub const fn new() -> Self {
        Self { next: CardUid::FIRST.0 }
    }

    /// Hand out the next uid.
    pub fn next_uid(&mut self) -> CardUid {
        let uid = CardUid(self.next);
        self.next += 1;
        uid
    }

    /// Number of uids allocated so far.
    #[must_use]
    pub const fn allocated(&self) -> u32 {
        self.next - CardUid::FIRST.0
    }
}

impl Default for UidAllocator {
    fn default() -> Self {
        Self::new()
    }
}
