//! Slot collections (the bench).

use std::fmt;

use tracing::warn;
use uuid::Uuid;

use super::slot::Slot;
use crate::reactive::{Observable, Subscription};

/// Observable ordered list of slots.
///
/// Order is only for display; membership is what matters.
#[derive(Clone, Default)]
pub struct SlotCollection {
    slots: Observable<Vec<Slot>>,
}

impl SlotCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current slots.
    #[must_use]
    pub fn get(&self) -> Vec<Slot> {
        self.slots.get()
    }

    /// Replace the contents.
    pub fn set(&self, slots: Vec<Slot>) {
        self.slots.set(slots);
    }

    /// `set(f(get()))`.
    pub fn update(&self, f: impl FnOnce(Vec<Slot>) -> Vec<Slot>) {
        self.slots.update(f);
    }

    /// Subscribe to membership changes. Fires immediately.
    ///
    /// Changes *inside* a slot (damage, attachments) do not fire this;
    /// subscribe to the slot's members for those.
    pub fn subscribe(&self, f: impl Fn(&Vec<Slot>) + 'static) -> Subscription {
        self.slots.subscribe(f)
    }

    /// Append a slot.
    pub fn add(&self, slot: Slot) {
        self.slots.modify(|slots| slots.push(slot));
    }

    /// Remove the first slot with the same id as `slot`.
    pub fn remove(&self, slot: &Slot) -> bool {
        self.slots.modify(|slots| match slots.iter().position(|s| s == slot) {
            Some(index) => {
                slots.remove(index);
                true
            }
            None => {
                warn!(slot = %slot.id, "remove: slot not in collection");
                false
            }
        })
    }

    /// Remove every slot.
    pub fn clear(&self) {
        self.slots.set(Vec::new());
    }

    /// Look up a slot by id.
    #[must_use]
    pub fn find(&self, id: Uuid) -> Option<Slot> {
        self.slots
            .with(|slots| slots.iter().find(|s| s.id == id).cloned())
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.with(Vec::len)
    }

    /// No slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.with(Vec::is_empty)
    }
}

impl fmt::Debug for SlotCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.slots.with(|slots| f.debug_list().entries(slots).finish())
    }
}
