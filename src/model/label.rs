//! model::label

use serde::{Deserialize, Serialize};

use super::{lenient, Entity, ParseError};

/// A label defined on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    /// Trello colour name ("green", "red", ...). Empty for colourless labels.
    pub color: String,
    pub board_id: String,
    /// Number of cards carrying the label
    pub uses: u64,
}

#[derive(Deserialize)]
pub struct LabelWire {
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    name: String,
    #[serde(default, deserialize_with = "lenient")]
    color: String,
    #[serde(default, rename = "idBoard", deserialize_with = "lenient")]
    board_id: String,
    #[serde(default, deserialize_with = "lenient")]
    uses: u64,
}

impl Entity for Label {
    const KIND: &'static str = "label";
    type Wire = LabelWire;

    fn from_wire(wire: LabelWire) -> Result<Self, ParseError> {
        Ok(Self {
            id: wire.id,
            name: wire.name,
            color: wire.color,
            board_id: wire.board_id,
            uses: wire.uses,
        })
    }
}
