//! Card records.
//!
//! A `Card` is a plain value. The same struct is used for two things:
//!
//! - **Deck-list entries**: `name` plus `count` (how many copies to build).
//! - **Physical cards**: one copy in play, carrying a session-unique `_id`
//!   stamped at deck load. `count` is stripped from physical copies.
//!
//! Any other fields the host attaches (set code, image URL, supertype...)
//! are kept in `attributes` and survive snapshot/restore untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::entity::CardUid;

/// A card record.
///
/// ## Example
///
/// ```
/// use tcg_board::cards::Card;
/// use tcg_board::core::CardUid;
///
/// let entry = Card::new("Pikachu").with_count(2).with_attr("hp", 60);
/// let copy = entry.physical_copy(CardUid(1));
///
/// assert_eq!(copy.count, None);
/// assert_eq!(copy.uid, Some(CardUid(1)));
/// assert_eq!(copy.get_int("hp"), Some(60));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Display name.
    pub name: String,

    /// Physical-card identifier. `None` for deck-list entries.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<CardUid>,

    /// Copies to build. Only meaningful on deck-list entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,

    /// Host-defined fields, passed through verbatim.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Card {
    /// Create a card with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uid: None,
            count: None,
            attributes: Map::new(),
        }
    }

    /// Set the copy count (builder pattern).
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the physical uid (builder pattern).
    #[must_use]
    pub fn with_uid(mut self, uid: CardUid) -> Self {
        self.uid = Some(uid);
        self
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Get an integer attribute.
    #[must_use]
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get_attr(key).and_then(Value::as_i64)
    }

    /// Get a text attribute.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get_attr(key).and_then(Value::as_str)
    }

    /// Does this record stand for one physical card?
    #[must_use]
    pub fn is_physical(&self) -> bool {
        self.uid.is_some()
    }

    /// Identity comparison used by pile `remove`/`swap`.
    ///
    /// Two physical cards are the same card iff their uids match. Records
    /// without a uid fall back to value equality.
    #[must_use]
    pub fn same_card(&self, other: &Card) -> bool {
        match (self.uid, other.uid) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Build one physical copy of a deck-list entry.
    ///
    /// Drops `count`, keeps everything else, stamps `uid`.
    #[must_use]
    pub fn physical_copy(&self, uid: CardUid) -> Card {
        Card {
            name: self.name.clone(),
            uid: Some(uid),
            count: None,
            attributes: self.attributes.clone(),
        }
    }
}
