//! model::list

use serde::{Deserialize, Serialize};

use super::{lenient, Entity, ParseError};

/// A list (column) on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct List {
    pub id: String,
    pub name: String,
    pub board_id: String,
    /// Archived
    pub closed: bool,
}

#[derive(Deserialize)]
pub struct ListWire {
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    name: String,
    #[serde(default, rename = "idBoard", deserialize_with = "lenient")]
    board_id: String,
    #[serde(default, deserialize_with = "lenient")]
    closed: bool,
}

impl Entity for List {
    const KIND: &'static str = "list";
    type Wire = ListWire;

    fn from_wire(wire: ListWire) -> Result<Self, ParseError> {
        Ok(Self {
            id: wire.id,
            name: wire.name,
            board_id: wire.board_id,
            closed: wire.closed,
        })
    }
}
