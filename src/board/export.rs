//! Id-only export projection.
//!
//! `BoardExport` is what gets sent to a peer or a log: piles become lists of
//! physical-card uids (`null` for a record without one, so pile sizes stay
//! exact), slots keep their counters, and the stadium becomes a
//! bare uid. The registered deck list (`cards`) and the deck itself are
//! left out so the opponent learns neither composition nor order.
//!
//! There is no import. Turning an export back into cards needs a uid ->
//! card lookup that lives outside this crate.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::CardUid;
use crate::core::error::{BoardError, Result};
use crate::zones::Slot;

/// Exported form of one slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotExport {
    pub id: Uuid,
    pub pokemon: Vec<Option<CardUid>>,
    pub energy: Vec<Option<CardUid>>,
    pub trainer: Vec<Option<CardUid>>,
    pub damage: u32,
    pub marker: bool,
}

impl SlotExport {
    /// Project a live slot.
    #[must_use]
    pub fn project(slot: &Slot) -> Self {
        Self {
            id: slot.id,
            pokemon: slot.pokemon.uids(),
            energy: slot.energy.uids(),
            trainer: slot.trainer.uids(),
            damage: slot.damage.get(),
            marker: slot.marker.get(),
        }
    }
}

/// Exported form of a whole board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardExport {
    pub hand: Vec<Option<CardUid>>,
    pub prizes: Vec<Option<CardUid>>,
    pub discard: Vec<Option<CardUid>>,
    pub lz: Vec<Option<CardUid>>,
    pub active: Option<SlotExport>,
    pub bench: Vec<SlotExport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stadium: Option<CardUid>,
    pub table: Vec<Option<CardUid>>,
    pub pickup: Vec<Option<CardUid>>,
    pub vstar_used: bool,
    pub gx_used: bool,
    pub prizes_flipped: bool,
    pub hand_revealed: bool,
    pub pokemon_hidden: bool,
}

impl BoardExport {
    /// Encode as a JSON string.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(BoardError::Serialize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;

    #[test]
    fn test_slot_projection() {
        let slot = Slot::with_card(Card::new("Pikachu").with_uid(CardUid(5)));
        slot.energy.push(Card::new("Lightning").with_uid(CardUid(8)));
        slot.damage.set(20);

        let export = SlotExport::project(&slot);
        assert_eq!(export.id, slot.id);
        assert_eq!(export.pokemon, vec![Some(CardUid(5))]);
        assert_eq!(export.energy, vec![Some(CardUid(8))]);
        assert!(export.trainer.is_empty());
        assert_eq!(export.damage, 20);
        assert!(!export.marker);
    }

    #[test]
    fn test_wire_shape() {
        let export = BoardExport {
            hand: vec![Some(CardUid(1)), None, Some(CardUid(2))],
            ..BoardExport::default()
        };

        let value: serde_json::Value = serde_json::from_str(&export.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(value["hand"], serde_json::json!([1, null, 2]));
        assert_eq!(value["active"], serde_json::Value::Null);
        assert!(!object.contains_key("stadium"));
        assert!(!object.contains_key("deck"));
        assert!(!object.contains_key("cards"));
        assert!(object.contains_key("vstarUsed"));
        assert!(object.contains_key("pokemonHidden"));
    }

    #[test]
    fn test_stadium_as_bare_id() {
        let export = BoardExport {
            stadium: Some(CardUid(12)),
            ..BoardExport::default()
        };
        let value = serde_json::to_value(&export).unwrap();
        assert_eq!(value["stadium"], serde_json::json!(12));
    }
}
