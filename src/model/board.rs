//! model::board

use serde::{Deserialize, Serialize};

use super::{lenient, Entity, ParseError};

/// A Trello board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct BoardWire {
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    name: String,
}

impl Entity for Board {
    const KIND: &'static str = "board";
    type Wire = BoardWire;

    fn from_wire(wire: BoardWire) -> Result<Self, ParseError> {
        Ok(Self {
            id: wire.id,
            name: wire.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json() {
        let board = Board::from_json(&json!({"id": "b1", "name": "Demo"})).unwrap();
        assert_eq!(
            board,
            Board {
                id: "b1".into(),
                name: "Demo".into()
            }
        );
    }

    #[test]
    fn missing_name_defaults_to_empty() {
        let board = Board::from_json(&json!({"id": "b1", "name": null})).unwrap();
        assert_eq!(board.name, "");
    }

    #[test]
    fn extra_fields_ignored() {
        let board = Board::from_json(&json!({
            "id": "b1",
            "name": "Demo",
            "labels": [{"id": "lab1"}],
            "closed": false
        }))
        .unwrap();
        assert_eq!(board.id, "b1");
    }
}
