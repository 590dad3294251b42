//! Card records and deck lists.
//!
//! ## Key Types
//!
//! - `Card`: a deck-list entry or one physical card
//! - `expand_deck_list`: deck list -> physical cards with fresh uids

pub mod card;
pub mod deck_list;

pub use card::Card;
pub use deck_list::{deck_list_size, expand_deck_list};
