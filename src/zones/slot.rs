//! Slots: one creature in play.
//!
//! A slot owns a stack of creature cards (`pokemon`, last entry is the
//! current evolution), two attachment piles (`energy`, `trainer`), a damage
//! counter and a free-form marker flag. All five members are observable.
//!
//! A slot whose creature pile is empty is *empty*: it has no name and is
//! never written into a snapshot or export.

use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use uuid::Uuid;

use super::pile::Pile;
use crate::cards::Card;
use crate::reactive::Observable;

/// Members of a slot. Reached through [`Slot`]'s `Deref`.
pub struct SlotParts {
    /// Stable for the slot's lifetime.
    pub id: Uuid,
    /// Creature stack. The last card is the one in play.
    pub pokemon: Pile,
    /// Attached energy cards.
    pub energy: Pile,
    /// Attached tools and other trainer cards.
    pub trainer: Pile,
    /// Damage counters placed on the creature.
    pub damage: Observable<u32>,
    /// Free-form tag (special condition, ability used, ...).
    pub marker: Observable<bool>,
}

/// Shared handle to one slot.
///
/// Clones refer to the same slot. Equality compares slot ids.
///
/// ```
/// use tcg_board::cards::Card;
/// use tcg_board::zones::Slot;
///
/// let slot = Slot::new(Some(Card::new("Charmander")), None);
/// assert_eq!(slot.name().as_deref(), Some("Charmander"));
///
/// slot.pokemon.push(Card::new("Charmeleon"));
/// assert_eq!(slot.name().as_deref(), Some("Charmeleon"));
/// ```
#[derive(Clone)]
pub struct Slot(Rc<SlotParts>);

impl Slot {
    /// Create a slot.
    ///
    /// A fresh v4 UUID is generated when `id` is `None`. When `card` is
    /// given it becomes the only creature; otherwise the slot starts empty
    /// and the caller must push a creature before it counts as in play.
    #[must_use]
    pub fn new(card: Option<Card>, id: Option<Uuid>) -> Self {
        let id = id.unwrap_or_else(Uuid::new_v4);
        let pokemon = Pile::new(format!("{id}.pokemon"));
        if let Some(card) = card {
            pokemon.push(card);
        }

        Self(Rc::new(SlotParts {
            id,
            pokemon,
            energy: Pile::new(format!("{id}.energy")),
            trainer: Pile::new(format!("{id}.trainer")),
            damage: Observable::new(0),
            marker: Observable::new(false),
        }))
    }

    /// Slot holding `card`, with a fresh id.
    #[must_use]
    pub fn with_card(card: Card) -> Self {
        Self::new(Some(card), None)
    }

    /// Name of the current (top) creature.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.pokemon.top().map(|c| c.name)
    }

    /// No creature in the slot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pokemon.is_empty()
    }

    /// True if both handles refer to the same slot allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Slot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Weak handle, used to track slots without keeping them alive.
    #[must_use]
    pub fn downgrade(&self) -> Weak<SlotParts> {
        Rc::downgrade(&self.0)
    }
}

impl Deref for Slot {
    type Target = SlotParts;

    fn deref(&self) -> &SlotParts {
        &self.0
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Slot {}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("energy", &self.energy.len())
            .field("trainer", &self.trainer.len())
            .field("damage", &self.damage.get())
            .field("marker", &self.marker.get())
            .finish()
    }
}
