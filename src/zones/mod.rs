//! Card containers.
//!
//! ## Key Types
//!
//! - `Pile`: observable ordered card sequence (deck, hand, discard, ...)
//! - `Slot`: one creature in play with its attachments and counters
//! - `SlotCollection`: observable list of slots (the bench)

pub mod pile;
pub mod slot;
pub mod slots;

pub use pile::Pile;
pub use slot::{Slot, SlotParts};
pub use slots::SlotCollection;
