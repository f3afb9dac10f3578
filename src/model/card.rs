//! model::card

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{lenient, Entity, Label, ParseError};

/// A card on a list.
///
/// `labels` are the label objects embedded in the card payload, so showing
/// a card's labels takes no extra call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    pub description: String,
    pub comment_count: u64,
    pub label_ids: Vec<String>,
    pub labels: Vec<Label>,
    pub list_id: String,
}

impl Card {
    /// True if the card carries the label, by id.
    pub fn has_label(&self, label_id: &str) -> bool {
        self.label_ids.iter().any(|id| id == label_id) || self.labels.iter().any(|l| l.id == label_id)
    }
}

#[derive(Default, Deserialize)]
struct Badges {
    #[serde(default, deserialize_with = "lenient")]
    comments: u64,
}

#[derive(Deserialize)]
pub struct CardWire {
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    name: String,
    #[serde(default, deserialize_with = "lenient")]
    desc: String,
    #[serde(default, deserialize_with = "lenient")]
    badges: Badges,
    #[serde(default, rename = "idLabels", deserialize_with = "lenient")]
    label_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    labels: Vec<Value>,
    #[serde(default, rename = "idList", deserialize_with = "lenient")]
    list_id: String,
}

impl Entity for Card {
    const KIND: &'static str = "card";
    type Wire = CardWire;

    fn from_wire(wire: CardWire) -> Result<Self, ParseError> {
        let labels = wire
            .labels
            .iter()
            .map(Label::from_json)
            .collect::<Result<Vec<_>, _>>()?;

        // Older payloads only embed label objects.
        let label_ids = if wire.label_ids.is_empty() {
            labels.iter().map(|l| l.id.clone()).collect()
        } else {
            wire.label_ids
        };

        Ok(Self {
            id: wire.id,
            name: wire.name,
            description: wire.desc,
            comment_count: wire.badges.comments,
            label_ids,
            labels,
            list_id: wire.list_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_card_echo() {
        let card = Card::from_json(&json!({
            "id": "c9",
            "name": "Buy milk",
            "idList": "list-1",
            "labels": [],
            "desc": "",
            "badges": {"comments": 0}
        }))
        .unwrap();

        assert_eq!(card.id, "c9");
        assert_eq!(card.name, "Buy milk");
        assert_eq!(card.list_id, "list-1");
        assert!(card.labels.is_empty());
        assert_eq!(card.comment_count, 0);
    }

    #[test]
    fn embedded_labels_and_badges() {
        let card = Card::from_json(&json!({
            "id": "c1",
            "name": "Ship it",
            "desc": "before friday",
            "badges": {"comments": 3, "votes": 1},
            "labels": [
                {"id": "lab1", "name": "urgent", "color": "red", "idBoard": "b1"},
                {"id": "lab2", "name": "", "color": "blue", "idBoard": "b1"}
            ]
        }))
        .unwrap();

        assert_eq!(card.description, "before friday");
        assert_eq!(card.comment_count, 3);
        assert_eq!(card.labels.len(), 2);
        assert_eq!(card.label_ids, vec!["lab1", "lab2"]);
        assert!(card.has_label("lab2"));
        assert!(!card.has_label("lab3"));
    }

    #[test]
    fn embedded_label_without_id_fails() {
        let err = Card::from_json(&json!({
            "id": "c1",
            "labels": [{"name": "no id"}]
        }))
        .unwrap_err();
        assert_eq!(err, ParseError::MissingId { entity: "label" });
    }

    #[test]
    fn missing_badges_defaults_to_zero_comments() {
        let card = Card::from_json(&json!({"id": "c1", "badges": null})).unwrap();
        assert_eq!(card.comment_count, 0);
        assert_eq!(card.description, "");
    }
}
