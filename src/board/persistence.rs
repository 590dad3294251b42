//! Automatic persistence of a board to session storage.
//!
//! Once attached, every change to any container of the board (including
//! changes inside slots that are currently active or benched) writes a
//! fresh snapshot under the session key.
//!
//! ## Slot wiring
//!
//! Slots come and go. Whenever `active` or `bench` changes, each slot now
//! in play is checked against the list of slots already wired; new ones get
//! the persistence callback on their five members. The list holds weak
//! references keyed by allocation, so a slot rebuilt from a snapshot with a
//! reused id is still treated as new. Each entry owns its five
//! subscriptions; when a slot is dropped its entry and subscriptions are
//! released on the next wiring pass.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use super::state::BoardState;
use super::storage::SessionStorage;
use crate::reactive::Subscription;
use crate::zones::{Slot, SlotParts};

/// Live persistence wiring for one board.
///
/// Dropping it unsubscribes everything it registered.
pub(crate) struct Persistence {
    shared: Rc<Shared>,
}

struct Shared {
    storage: Rc<dyn SessionStorage>,
    key: String,
    state: Weak<BoardState>,
    wired: RefCell<Vec<WiredSlot>>,
    subscriptions: RefCell<Vec<Subscription>>,
}

/// A slot carrying persistence callbacks.
struct WiredSlot {
    slot: Weak<SlotParts>,
    subscriptions: Vec<Subscription>,
}

impl WiredSlot {
    fn is_live(&self) -> bool {
        self.slot.strong_count() > 0
    }

    fn release(self) {
        for sub in self.subscriptions {
            sub.unsubscribe();
        }
    }
}

impl Persistence {
    /// Subscribe the persistence callback to every container of `state`.
    ///
    /// Each subscription fires once immediately, so the current state is
    /// written during attach.
    pub(crate) fn attach(
        state: &Rc<BoardState>,
        storage: Rc<dyn SessionStorage>,
        key: impl Into<String>,
    ) -> Self {
        let shared = Rc::new(Shared {
            storage,
            key: key.into(),
            state: Rc::downgrade(state),
            wired: RefCell::new(Vec::new()),
            subscriptions: RefCell::new(Vec::new()),
        });

        let mut subs = Vec::new();

        let persist = Rc::clone(&shared);
        subs.push(state.cards.subscribe(move |_| persist.persist()));

        for pile in state.piles() {
            let persist = Rc::clone(&shared);
            subs.push(pile.subscribe(move |_| persist.persist()));
        }

        for flag in state.flags() {
            let persist = Rc::clone(&shared);
            subs.push(flag.subscribe(move |_| persist.persist()));
        }

        let persist = Rc::clone(&shared);
        subs.push(state.stadium.subscribe(move |_| persist.persist()));

        let persist = Rc::clone(&shared);
        subs.push(state.active.subscribe(move |active| {
            persist.persist();
            if let Some(slot) = active {
                Shared::wire_slot(&persist, slot);
            }
        }));

        let persist = Rc::clone(&shared);
        subs.push(state.bench.subscribe(move |bench| {
            persist.persist();
            for slot in bench {
                Shared::wire_slot(&persist, slot);
            }
        }));

        shared.subscriptions.borrow_mut().extend(subs);
        debug!(key = %shared.key, "persistence attached");

        Self { shared }
    }

    /// Number of distinct live slots currently wired.
    pub(crate) fn wired_slots(&self) -> usize {
        self.shared
            .wired
            .borrow()
            .iter()
            .filter(|w| w.is_live())
            .count()
    }

    /// Slot-level subscriptions currently held, live or not.
    #[cfg(test)]
    fn slot_subscriptions(&self) -> usize {
        self.shared
            .wired
            .borrow()
            .iter()
            .map(|w| w.subscriptions.len())
            .sum()
    }
}

impl Drop for Persistence {
    fn drop(&mut self) {
        let subs = std::mem::take(&mut *self.shared.subscriptions.borrow_mut());
        for sub in subs {
            sub.unsubscribe();
        }
        let wired = std::mem::take(&mut *self.shared.wired.borrow_mut());
        for slot in wired {
            slot.release();
        }
    }
}

impl Shared {
    fn persist(&self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        match state.dehydrate() {
            Ok(raw) => {
                trace!(key = %self.key, bytes = raw.len(), "persisting board");
                self.storage.write(&self.key, &raw);
            }
            Err(err) => warn!(key = %self.key, error = %err, "failed to persist board"),
        }
    }

    fn wire_slot(this: &Rc<Self>, slot: &Slot) {
        let handle = slot.downgrade();
        let dead = {
            let mut wired = this.wired.borrow_mut();
            if wired.iter().any(|w| w.slot.ptr_eq(&handle)) {
                return;
            }
            let (live, dead): (Vec<_>, Vec<_>) =
                std::mem::take(&mut *wired).into_iter().partition(WiredSlot::is_live);
            *wired = live;
            dead
        };
        for entry in dead {
            entry.release();
        }

        debug!(slot = %slot.id, name = ?slot.name(), "wiring slot");

        let mut subscriptions = Vec::with_capacity(5);
        for pile in [&slot.energy, &slot.pokemon, &slot.trainer] {
            let persist = Rc::clone(this);
            subscriptions.push(pile.subscribe(move |_| persist.persist()));
        }
        let persist = Rc::clone(this);
        subscriptions.push(slot.damage.subscribe(move |_| persist.persist()));
        let persist = Rc::clone(this);
        subscriptions.push(slot.marker.subscribe(move |_| persist.persist()));

        this.wired.borrow_mut().push(WiredSlot {
            slot: handle,
            subscriptions,
        });
    }
}
