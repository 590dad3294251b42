//! Persistence wiring tests.
//!
//! A player board backed by storage must:
//! - Restore from storage at construction
//! - Write a fresh snapshot on every change, including inside slots
//! - Wire each slot once, however often active/bench change

use std::rc::Rc;

use tcg_board::board::{Board, BoardSnapshot, MemoryStorage, SessionStorage};
use tcg_board::cards::Card;
use tcg_board::core::{BoardConfig, CardUid};
use tcg_board::zones::Slot;

const KEY: &str = "boardState";

fn stored(storage: &MemoryStorage) -> BoardSnapshot {
    let raw = storage.read(KEY).expect("board was persisted");
    serde_json::from_str(&raw).expect("stored board parses")
}

/// Route board logs to the test output. Filter with `RUST_LOG`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn player_board(storage: &Rc<MemoryStorage>) -> Board {
    init_tracing();
    Board::with_storage(BoardConfig::player(), storage.clone())
}

/// Test every top-level change reaches storage.
#[test]
fn test_every_change_is_written() {
    let storage = Rc::new(MemoryStorage::new());
    let board = player_board(&storage);
    assert!(board.is_persistent());

    board.cards.set(vec![Card::new("A").with_count(3)]);
    board.reset();
    assert_eq!(stored(&storage).deck.len(), 3);

    let card = board.deck.pop().unwrap();
    board.hand.push(card);
    let snapshot = stored(&storage);
    assert_eq!(snapshot.deck.len(), 2);
    assert_eq!(snapshot.hand[0].uid, Some(CardUid(3)));

    board.gx_used.set(true);
    assert!(stored(&storage).gx_used);

    board.stadium.set(Some(Card::new("Path").with_uid(CardUid(99))));
    assert_eq!(stored(&storage).stadium.and_then(|c| c.uid), Some(CardUid(99)));
}

/// Test changes inside active and benched slots reach storage.
#[test]
fn test_slot_mutations_are_written() {
    let storage = Rc::new(MemoryStorage::new());
    let board = player_board(&storage);

    let active = Slot::with_card(Card::new("Pikachu").with_uid(CardUid(1)));
    board.active.set(Some(active.clone()));

    active.damage.set(50);
    assert_eq!(stored(&storage).active.unwrap().damage, 50);

    active.energy.push(Card::new("Lightning").with_uid(CardUid(2)));
    assert_eq!(stored(&storage).active.unwrap().energy.len(), 1);

    active.marker.set(true);
    assert!(stored(&storage).active.unwrap().marker);

    let benched = Slot::with_card(Card::new("Raichu").with_uid(CardUid(3)));
    board.bench.add(benched.clone());
    benched.trainer.push(Card::new("Tool").with_uid(CardUid(4)));
    assert_eq!(stored(&storage).bench[0].trainer.len(), 1);

    benched.pokemon.push(Card::new("Raichu ex").with_uid(CardUid(5)));
    assert_eq!(stored(&storage).bench[0].pokemon.len(), 2);
}

/// Test a slot moving between zones is wired only once.
#[test]
fn test_slots_wired_once() {
    let storage = Rc::new(MemoryStorage::new());
    let board = player_board(&storage);

    let a = Slot::with_card(Card::new("A").with_uid(CardUid(1)));
    let b = Slot::with_card(Card::new("B").with_uid(CardUid(2)));

    board.bench.add(a.clone());
    board.bench.add(b.clone());
    board.bench.remove(&a);
    board.bench.add(a.clone());
    board.active.set(Some(a.clone()));

    assert_eq!(board.wired_slots(), 2);
    // One persistence subscriber per member, not one per bench change
    assert_eq!(a.damage.subscriber_count(), 1);
    assert_eq!(a.marker.subscriber_count(), 1);

    // One change inside a slot is one write
    let before = storage.write_count();
    a.damage.set(10);
    assert_eq!(storage.write_count(), before + 1);
}

/// Test a new player board picks up the stored session.
#[test]
fn test_restore_at_construction() {
    let storage = Rc::new(MemoryStorage::new());
    let active_id;
    {
        let board = player_board(&storage);
        board.cards.set(vec![Card::new("A").with_count(2), Card::new("B").with_count(2)]);
        board.reset();
        let slot = Slot::with_card(board.deck.pop().unwrap());
        slot.damage.set(20);
        active_id = slot.id;
        board.active.set(Some(slot));
        board.hand_revealed.set(true);
    }

    let board = player_board(&storage);
    assert_eq!(board.cards.get().len(), 2);
    assert_eq!(board.deck.ids(), vec![CardUid(1), CardUid(2), CardUid(3)]);
    assert!(board.hand_revealed.get());

    let active = board.active.get().expect("active restored");
    assert_eq!(active.id, active_id);
    assert_eq!(active.damage.get(), 20);

    // The restored slot is wired too
    active.damage.set(60);
    assert_eq!(stored(&storage).active.unwrap().damage, 60);
}

/// Test restoring rewrites exactly what was stored.
#[test]
fn test_restore_does_not_change_stored_state() {
    let original = Board::new(BoardConfig::player());
    original.cards.set(vec![Card::new("A").with_count(5)]);
    original.reset();
    original.shuffle_deck();
    let raw = original.dehydrate().unwrap();

    let storage = Rc::new(MemoryStorage::new().with_entry(KEY, raw.clone()));
    let _board = player_board(&storage);

    // Wiring writes, but only what was already there
    assert!(storage.write_count() > 0);
    assert_eq!(storage.read(KEY).as_deref(), Some(raw.as_str()));
}

/// Test an unreadable stored board is replaced by a fresh one.
#[test]
fn test_corrupt_storage_starts_fresh() {
    let storage = Rc::new(MemoryStorage::new().with_entry(KEY, "{not json"));
    let board = player_board(&storage);

    assert!(board.hand.is_empty());
    assert!(board.is_persistent());
    // Overwritten with a valid empty board
    assert!(stored(&storage).bench.is_empty());
}

/// Test the configured session key is the one written.
#[test]
fn test_session_key_is_used() {
    let storage = Rc::new(MemoryStorage::new());
    let board = Board::with_storage(
        BoardConfig::player().with_session_key("table-7"),
        storage.clone(),
    );
    board.hand.push(Card::new("X").with_uid(CardUid(1)));

    assert!(storage.read(KEY).is_none());
    assert!(storage.read("table-7").is_some());
}

/// Test slots rebuilt with a reused id still persist.
#[test]
fn test_rehydrated_slots_with_reused_ids_are_wired() {
    let storage = Rc::new(MemoryStorage::new());
    let board = player_board(&storage);

    let slot = Slot::with_card(Card::new("Mew").with_uid(CardUid(1)));
    board.active.set(Some(slot.clone()));
    let raw = board.dehydrate().unwrap();

    // Restoring builds a fresh slot with the same id
    board.rehydrate(&raw).unwrap();
    let fresh = board.active.get().unwrap();
    assert_eq!(fresh.id, slot.id);
    assert!(!fresh.ptr_eq(&slot));

    fresh.damage.set(90);
    assert_eq!(stored(&storage).active.unwrap().damage, 90);
}

/// Test dropping the board detaches it from its slots.
#[test]
fn test_dropping_board_stops_writes() {
    let storage = Rc::new(MemoryStorage::new());
    let slot = Slot::with_card(Card::new("Ditto").with_uid(CardUid(1)));
    {
        let board = player_board(&storage);
        board.bench.add(slot.clone());
    }

    let writes = storage.write_count();
    slot.damage.set(10);
    assert_eq!(storage.write_count(), writes);
    assert_eq!(slot.damage.subscriber_count(), 0);
}
