//! Full-fidelity snapshot schema.
//!
//! `BoardSnapshot` is the durable form of a board: every container with
//! full card records plus every flag. It serializes to a JSON object with
//! exactly these keys, in this order:
//!
//! ```text
//! cards, deck, hand, prizes, discard, lz, active, bench, stadium,
//! table, pickup, vstarUsed, gxUsed, prizesFlipped, handRevealed, pokemonHidden
//! ```
//!
//! ## Normalization on restore
//!
//! `bench` is required; a snapshot without it is rejected. Every other
//! field falls back to empty / `null` / `false` when absent. A slot `id`
//! that is missing or not a UUID reads as `None`, and that slot alone is
//! dropped.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::cards::Card;
use crate::zones::Slot;

/// Durable form of one slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotSnapshot {
    /// Slot id. A snapshot slot without one cannot be restored.
    #[serde(default, deserialize_with = "lenient_uuid")]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub damage: u32,
    #[serde(default)]
    pub pokemon: Vec<Card>,
    #[serde(default)]
    pub energy: Vec<Card>,
    #[serde(default)]
    pub trainer: Vec<Card>,
    #[serde(default)]
    pub marker: bool,
}

/// Any value that isn't a UUID string becomes `None`.
fn lenient_uuid<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|raw| Uuid::parse_str(raw).ok()))
}

impl SlotSnapshot {
    /// Capture a live slot.
    #[must_use]
    pub fn capture(slot: &Slot) -> Self {
        Self {
            id: Some(slot.id),
            damage: slot.damage.get(),
            pokemon: slot.pokemon.to_vec(),
            energy: slot.energy.to_vec(),
            trainer: slot.trainer.to_vec(),
            marker: slot.marker.get(),
        }
    }

    /// Build a live slot from this snapshot.
    ///
    /// The first creature seeds the slot (with the snapshot's id), the rest
    /// of the stack is pushed on top, then attachments and counters are
    /// overlaid. Returns `None` when there is no creature or no id.
    #[must_use]
    pub fn restore(&self) -> Option<Slot> {
        let id = self.id?;
        let (head, evolutions) = self.pokemon.split_first()?;

        let slot = Slot::new(Some(head.clone()), Some(id));
        slot.pokemon.merge(evolutions.iter().cloned());
        slot.damage.set(self.damage);
        slot.energy.set(self.energy.clone());
        slot.trainer.set(self.trainer.clone());
        slot.marker.set(self.marker);

        Some(slot)
    }
}

/// Durable form of a whole board.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub deck: Vec<Card>,
    #[serde(default)]
    pub hand: Vec<Card>,
    #[serde(default)]
    pub prizes: Vec<Card>,
    #[serde(default)]
    pub discard: Vec<Card>,
    #[serde(default)]
    pub lz: Vec<Card>,
    #[serde(default)]
    pub active: Option<SlotSnapshot>,
    pub bench: Vec<SlotSnapshot>,
    #[serde(default)]
    pub stadium: Option<Card>,
    #[serde(default)]
    pub table: Vec<Card>,
    #[serde(default)]
    pub pickup: Vec<Card>,
    #[serde(default)]
    pub vstar_used: bool,
    #[serde(default)]
    pub gx_used: bool,
    #[serde(default)]
    pub prizes_flipped: bool,
    #[serde(default)]
    pub hand_revealed: bool,
    #[serde(default)]
    pub pokemon_hidden: bool,
}
