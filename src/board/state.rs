//! Board state: every container of one player's side of the table.
//!
//! `BoardState` owns the piles, slots and flags and implements the three
//! transforms over them:
//!
//! - [`BoardState::dehydrate`] / [`BoardState::rehydrate`]: full snapshot
//!   to and from a JSON string
//! - [`BoardState::export`]: uid-only projection for peers
//! - [`BoardState::load_deck`]: deck list -> physical deck
//!
//! It has no persistence of its own; [`Board`](super::Board) wires that up.

use tracing::debug;
use uuid::Uuid;

use super::export::{BoardExport, SlotExport};
use super::snapshot::{BoardSnapshot, SlotSnapshot};
use crate::cards::{expand_deck_list, Card};
use crate::core::error::{BoardError, Result};
use crate::reactive::Observable;
use crate::zones::{Pile, Slot, SlotCollection};

/// All containers and counters of one board.
#[derive(Debug)]
pub struct BoardState {
    /// Registered deck list (entries with `count`).
    pub cards: Observable<Vec<Card>>,
    /// Physical deck built from `cards`.
    pub deck: Pile,
    pub hand: Pile,
    pub prizes: Pile,
    pub discard: Pile,
    /// Lost zone.
    pub lz: Pile,
    /// Cards temporarily set aside face up.
    pub table: Pile,
    /// Cards picked up for a search or look-at effect.
    pub pickup: Pile,
    pub active: Observable<Option<Slot>>,
    pub bench: SlotCollection,
    pub stadium: Observable<Option<Card>>,
    pub vstar_used: Observable<bool>,
    pub gx_used: Observable<bool>,
    pub prizes_flipped: Observable<bool>,
    /// Display-only; survives `reset`.
    pub hand_revealed: Observable<bool>,
    /// Display-only; survives `reset`.
    pub pokemon_hidden: Observable<bool>,
}

impl BoardState {
    /// Empty board: no cards anywhere, no active slot, all flags off.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: Observable::new(Vec::new()),
            deck: Pile::new("deck"),
            hand: Pile::new("hand"),
            prizes: Pile::new("prizes"),
            discard: Pile::new("discard"),
            lz: Pile::new("lz"),
            table: Pile::new("table"),
            pickup: Pile::new("pickup"),
            active: Observable::new(None),
            bench: SlotCollection::new(),
            stadium: Observable::new(None),
            vstar_used: Observable::new(false),
            gx_used: Observable::new(false),
            prizes_flipped: Observable::new(false),
            hand_revealed: Observable::new(false),
            pokemon_hidden: Observable::new(false),
        }
    }

    /// Top-level piles, in snapshot order.
    #[must_use]
    pub fn piles(&self) -> [&Pile; 7] {
        [
            &self.deck,
            &self.hand,
            &self.prizes,
            &self.discard,
            &self.lz,
            &self.table,
            &self.pickup,
        ]
    }

    /// Scalar flags, in snapshot order.
    #[must_use]
    pub fn flags(&self) -> [&Observable<bool>; 5] {
        [
            &self.vstar_used,
            &self.gx_used,
            &self.prizes_flipped,
            &self.hand_revealed,
            &self.pokemon_hidden,
        ]
    }

    /// Rebuild `deck` from the registered deck list.
    ///
    /// One copy per unit of `count`, in list order, uids from 1. The deck
    /// is replaced in a single update, unshuffled.
    pub fn load_deck(&self) {
        let deck = self.cards.with(|cards| expand_deck_list(cards));
        debug!(cards = deck.len(), "loaded deck");
        self.deck.set(deck);
    }

    /// Start a new game with the same deck list.
    ///
    /// Keeps `cards`, `hand_revealed` and `pokemon_hidden`; everything else
    /// goes back to empty / `None` / `false`.
    pub fn reset(&self) {
        self.load_deck();

        self.vstar_used.set(false);
        self.gx_used.set(false);
        self.prizes_flipped.set(false);

        self.hand.clear();
        self.prizes.clear();
        self.discard.clear();
        self.lz.clear();
        self.bench.clear();
        self.active.set(None);
        self.stadium.set(None);
        self.table.clear();
        self.pickup.clear();
        debug!("board reset");
    }

    /// Find a slot in play by id, checking active before bench.
    #[must_use]
    pub fn find_slot(&self, id: Uuid) -> Option<Slot> {
        self.active
            .get()
            .filter(|slot| slot.id == id)
            .or_else(|| self.bench.find(id))
    }

    /// Capture the full state. Empty slots are left out.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cards: self.cards.get(),
            deck: self.deck.to_vec(),
            hand: self.hand.to_vec(),
            prizes: self.prizes.to_vec(),
            discard: self.discard.to_vec(),
            lz: self.lz.to_vec(),
            active: self.active_in_play().as_ref().map(SlotSnapshot::capture),
            bench: self
                .bench_in_play()
                .iter()
                .map(SlotSnapshot::capture)
                .collect(),
            stadium: self.stadium.get(),
            table: self.table.to_vec(),
            pickup: self.pickup.to_vec(),
            vstar_used: self.vstar_used.get(),
            gx_used: self.gx_used.get(),
            prizes_flipped: self.prizes_flipped.get(),
            hand_revealed: self.hand_revealed.get(),
            pokemon_hidden: self.pokemon_hidden.get(),
        }
    }

    /// Serialize the full state to a durable string.
    pub fn dehydrate(&self) -> Result<String> {
        serde_json::to_string(&self.snapshot()).map_err(BoardError::Serialize)
    }

    /// Replace the state with the one encoded in `raw`.
    ///
    /// Nothing is touched if `raw` fails to parse.
    pub fn rehydrate(&self, raw: &str) -> Result<()> {
        let snapshot: BoardSnapshot = serde_json::from_str(raw).map_err(BoardError::Snapshot)?;
        self.restore(snapshot);
        Ok(())
    }

    /// Replace the state with an already-parsed snapshot.
    ///
    /// Snapshot slots without a creature or id are dropped.
    pub fn restore(&self, snapshot: BoardSnapshot) {
        self.cards.set(snapshot.cards);
        self.deck.set(snapshot.deck);

        self.vstar_used.set(snapshot.vstar_used);
        self.gx_used.set(snapshot.gx_used);
        self.prizes_flipped.set(snapshot.prizes_flipped);
        self.hand.set(snapshot.hand);
        self.prizes.set(snapshot.prizes);
        self.discard.set(snapshot.discard);
        self.lz.set(snapshot.lz);
        self.stadium.set(snapshot.stadium);
        self.table.set(snapshot.table);
        self.pickup.set(snapshot.pickup);
        self.hand_revealed.set(snapshot.hand_revealed);
        self.pokemon_hidden.set(snapshot.pokemon_hidden);
        self.active
            .set(snapshot.active.as_ref().and_then(SlotSnapshot::restore));
        self.bench.set(
            snapshot
                .bench
                .iter()
                .filter_map(SlotSnapshot::restore)
                .collect(),
        );
        debug!(bench = self.bench.len(), "board restored");
    }

    /// Uid-only projection for peers. Omits `cards` and `deck`.
    #[must_use]
    pub fn export(&self) -> BoardExport {
        BoardExport {
            hand: self.hand.uids(),
            prizes: self.prizes.uids(),
            discard: self.discard.uids(),
            lz: self.lz.uids(),
            active: self.active_in_play().as_ref().map(SlotExport::project),
            bench: self
                .bench_in_play()
                .iter()
                .map(SlotExport::project)
                .collect(),
            stadium: self.stadium.with(|card| card.as_ref().and_then(|c| c.uid)),
            table: self.table.uids(),
            pickup: self.pickup.uids(),
            vstar_used: self.vstar_used.get(),
            gx_used: self.gx_used.get(),
            prizes_flipped: self.prizes_flipped.get(),
            hand_revealed: self.hand_revealed.get(),
            pokemon_hidden: self.pokemon_hidden.get(),
        }
    }

    fn active_in_play(&self) -> Option<Slot> {
        self.active.get().filter(|slot| !slot.is_empty())
    }

    fn bench_in_play(&self) -> Vec<Slot> {
        let mut slots = self.bench.get();
        slots.retain(|slot| !slot.is_empty());
        slots
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardUid;

    fn deck_list() -> Vec<Card> {
        vec![Card::new("A").with_count(2), Card::new("B").with_count(1)]
    }

    #[test]
    fn test_load_deck() {
        let state = BoardState::new();
        state.cards.set(deck_list());
        state.load_deck();

        let deck = state.deck.to_vec();
        let got: Vec<_> = deck.iter().map(|c| (c.name.as_str(), c.uid)).collect();
        assert_eq!(
            got,
            vec![
                ("A", Some(CardUid(1))),
                ("A", Some(CardUid(2))),
                ("B", Some(CardUid(3))),
            ]
        );
    }

    #[test]
    fn test_load_deck_twice_restarts_ids() {
        let state = BoardState::new();
        state.cards.set(deck_list());
        state.load_deck();
        state.deck.pop();
        state.load_deck();

        assert_eq!(state.deck.ids(), vec![CardUid(1), CardUid(2), CardUid(3)]);
    }

    #[test]
    fn test_find_slot_prefers_active() {
        let state = BoardState::new();
        let active = Slot::with_card(Card::new("Active"));
        let benched = Slot::with_card(Card::new("Bench"));
        state.active.set(Some(active.clone()));
        state.bench.add(benched.clone());

        assert!(state.find_slot(active.id).is_some_and(|s| s.ptr_eq(&active)));
        assert!(state.find_slot(benched.id).is_some_and(|s| s.ptr_eq(&benched)));
        assert!(state.find_slot(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_empty_slots_left_out() {
        let state = BoardState::new();
        state.active.set(Some(Slot::new(None, None)));
        state.bench.add(Slot::new(None, None));
        state.bench.add(Slot::with_card(Card::new("Real").with_uid(CardUid(1))));

        let snapshot = state.snapshot();
        assert!(snapshot.active.is_none());
        assert_eq!(snapshot.bench.len(), 1);

        let export = state.export();
        assert!(export.active.is_none());
        assert_eq!(export.bench.len(), 1);
        assert_eq!(export.bench[0].pokemon, vec![Some(CardUid(1))]);
    }

    #[test]
    fn test_rehydrate_bad_input_leaves_state() {
        let state = BoardState::new();
        state.hand.push(Card::new("Keep").with_uid(CardUid(1)));

        assert!(state.rehydrate("not json").is_err());
        assert!(state.rehydrate(r#"{"hand": []}"#).is_err());
        assert_eq!(state.hand.len(), 1);
    }

    #[test]
    fn test_export_stadium() {
        let state = BoardState::new();
        assert_eq!(state.export().stadium, None);

        state
            .stadium
            .set(Some(Card::new("Artazon").with_uid(CardUid(44))));
        assert_eq!(state.export().stadium, Some(CardUid(44)));
    }
}
