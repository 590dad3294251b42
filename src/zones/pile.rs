//! Piles: named, ordered, observable card sequences.
//!
//! Every board zone (deck, hand, discard, prizes...) and every attachment
//! list on a slot is a `Pile`. Order matters: index 0 is the *front*
//! (`shift`/`unshift`), the last index is the *top* (`push`/`pop`).
//!
//! ## Notification
//!
//! Each mutating call notifies subscribers exactly once, including calls
//! that turn out to be no-ops (popping an empty pile, removing a card that
//! isn't there).
//!
//! Backed by `im::Vector`, so the clone handed to every subscriber is O(1).

use std::fmt;
use std::rc::Rc;

use im::Vector;
use tracing::warn;

use crate::cards::Card;
use crate::core::entity::CardUid;
use crate::core::rng::GameRng;
use crate::reactive::{Observable, Subscription};

/// Observable ordered sequence of cards.
///
/// ## Usage
///
/// ```
/// use tcg_board::cards::Card;
/// use tcg_board::core::CardUid;
/// use tcg_board::zones::Pile;
///
/// let hand = Pile::new("hand");
/// hand.push(Card::new("Iono").with_uid(CardUid(1)));
/// hand.unshift(Card::new("Arven").with_uid(CardUid(2)));
///
/// assert_eq!(hand.ids(), vec![CardUid(2), CardUid(1)]);
/// assert_eq!(hand.pop().map(|c| c.name), Some("Iono".to_string()));
/// ```
#[derive(Clone)]
pub struct Pile {
    name: Rc<str>,
    cards: Observable<Vector<Card>>,
}

impl Pile {
    /// Create an empty pile.
    #[must_use]
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Self {
            name: name.into(),
            cards: Observable::new(Vector::new()),
        }
    }

    /// Diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current contents.
    #[must_use]
    pub fn get(&self) -> Vector<Card> {
        self.cards.get()
    }

    /// Current contents as a `Vec`.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Card> {
        self.cards.with(|cards| cards.iter().cloned().collect())
    }

    /// Replace the contents.
    pub fn set(&self, cards: impl Into<Vector<Card>>) {
        self.cards.set(cards.into());
    }

    /// `set(f(get()))`.
    pub fn update(&self, f: impl FnOnce(Vector<Card>) -> Vector<Card>) {
        self.cards.update(f);
    }

    /// Subscribe to content changes. Fires immediately.
    pub fn subscribe(&self, f: impl Fn(&Vector<Card>) + 'static) -> Subscription {
        self.cards.subscribe(f)
    }

    /// Append to the top.
    pub fn push(&self, card: Card) {
        self.cards.modify(|cards| cards.push_back(card));
    }

    /// Remove and return the top card.
    pub fn pop(&self) -> Option<Card> {
        self.cards.modify(Vector::pop_back)
    }

    /// Add to the front.
    pub fn unshift(&self, card: Card) {
        self.cards.modify(|cards| cards.push_front(card));
    }

    /// Remove and return the front card.
    pub fn shift(&self) -> Option<Card> {
        self.cards.modify(Vector::pop_front)
    }

    /// Append `cards`, keeping their relative order.
    pub fn merge(&self, cards: impl IntoIterator<Item = Card>) {
        self.cards.modify(|current| current.extend(cards));
    }

    /// Empty the pile.
    pub fn clear(&self) {
        self.cards.set(Vector::new());
    }

    /// Uniformly permute the pile in place.
    pub fn shuffle(&self, rng: &mut GameRng) {
        self.cards.modify(|cards| {
            let mut buf: Vec<Card> = cards.iter().cloned().collect();
            rng.shuffle(&mut buf);
            *cards = buf.into_iter().collect();
        });
    }

    /// Remove the first occurrence of `card`.
    ///
    /// Returns `false` (and leaves the pile unchanged) if it isn't here.
    pub fn remove(&self, card: &Card) -> bool {
        let name = &self.name;
        self.cards.modify(|cards| match position(cards, card) {
            Some(index) => {
                cards.remove(index);
                true
            }
            None => {
                warn!(pile = %name, card = %card.name, "remove: card not in pile");
                false
            }
        })
    }

    /// Replace the first occurrence of `old` with `new`, keeping its position.
    ///
    /// Returns `false` (and leaves the pile unchanged) if `old` isn't here.
    pub fn swap(&self, old: &Card, new: Card) -> bool {
        let name = &self.name;
        self.cards.modify(|cards| match position(cards, old) {
            Some(index) => {
                cards.set(index, new);
                true
            }
            None => {
                warn!(pile = %name, card = %old.name, "swap: card not in pile");
                false
            }
        })
    }

    /// Number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.with(Vector::len)
    }

    /// Is the pile empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.with(Vector::is_empty)
    }

    /// Top (last) card.
    #[must_use]
    pub fn top(&self) -> Option<Card> {
        self.cards.with(|cards| cards.last().cloned())
    }

    /// Does the pile hold `card`?
    #[must_use]
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.with(|cards| position(cards, card).is_some())
    }

    /// Ordered uids of the physical cards in the pile.
    ///
    /// Records without a uid have no identity to report and are skipped.
    #[must_use]
    pub fn ids(&self) -> Vec<CardUid> {
        self.cards
            .with(|cards| cards.iter().filter_map(|c| c.uid).collect())
    }

    /// The uid at every position, `None` where a record has none.
    ///
    /// Unlike [`Pile::ids`] the length always matches the pile.
    #[must_use]
    pub fn uids(&self) -> Vec<Option<CardUid>> {
        self.cards.with(|cards| cards.iter().map(|c| c.uid).collect())
    }

    /// Number of completed mutations.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.cards.version()
    }
}

fn position(cards: &Vector<Card>, card: &Card) -> Option<usize> {
    cards.iter().position(|c| c.same_card(card))
}

impl fmt::Debug for Pile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pile")
            .field("name", &self.name)
            .field("cards", &self.cards.with(Vector::len))
            .finish()
    }
}
