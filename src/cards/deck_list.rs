//! Deck-list expansion.
//!
//! A registered deck list is a short list of entries with counts. Expanding
//! it produces one physical card per copy, in list order, each stamped with
//! the next uid from a fresh [`UidAllocator`].

use im::Vector;

use super::card::Card;
use crate::core::entity::UidAllocator;

/// Expand `entries` into physical cards.
///
/// Entries without a count contribute no copies. For a fixed list the
/// result is fully deterministic: same names, same uids, same order.
///
/// ```
/// use tcg_board::cards::{expand_deck_list, Card};
/// use tcg_board::core::CardUid;
///
/// let list = vec![Card::new("A").with_count(2), Card::new("B").with_count(1)];
/// let deck = expand_deck_list(&list);
///
/// let ids: Vec<_> = deck.iter().map(|c| (c.name.as_str(), c.uid)).collect();
/// assert_eq!(ids, vec![
///     ("A", Some(CardUid(1))),
///     ("A", Some(CardUid(2))),
///     ("B", Some(CardUid(3))),
/// ]);
/// ```
#[must_use]
pub fn expand_deck_list(entries: &[Card]) -> Vector<Card> {
    let mut uids = UidAllocator::new();
    let mut deck = Vector::new();

    for entry in entries {
        for _ in 0..entry.count.unwrap_or(0) {
            deck.push_back(entry.physical_copy(uids.next_uid()));
        }
    }

    deck
}

/// Total number of physical cards a deck list expands to.
#[must_use]
pub fn deck_list_size(entries: &[Card]) -> u32 {
    entries.iter().filter_map(|c| c.count).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::CardUid;

    #[test]
    fn test_expansion_order_and_ids() {
        let list = vec![
            Card::new("Charmander").with_count(3),
            Card::new("Rare Candy").with_count(1),
        ];

        let deck = expand_deck_list(&list);
        assert_eq!(deck.len(), 4);

        let names: Vec<_> = deck.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names, vec!["Charmander", "Charmander", "Charmander", "Rare Candy"]);

        let uids: Vec<_> = deck.iter().filter_map(|c| c.uid).collect();
        assert_eq!(uids, vec![CardUid(1), CardUid(2), CardUid(3), CardUid(4)]);

        assert!(deck.iter().all(|c| c.count.is_none()));
    }

    #[test]
    fn test_expansion_is_deterministic() {
        let list = vec![Card::new("A").with_count(2), Card::new("B").with_count(2)];
        assert_eq!(expand_deck_list(&list), expand_deck_list(&list));
    }

    #[test]
    fn test_missing_or_zero_count() {
        let list = vec![
            Card::new("Ghost"),
            Card::new("Zero").with_count(0),
            Card::new("One").with_count(1),
        ];

        let deck = expand_deck_list(&list);
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].uid, Some(CardUid(1)));
        assert_eq!(deck_list_size(&list), 1);
    }

    #[test]
    fn test_empty_list() {
        assert!(expand_deck_list(&[]).is_empty());
    }
}
