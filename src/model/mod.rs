//! model
//!
//! Trello entities as plain data.
//!
//! # Deserialization
//!
//! Every entity is built from a JSON object through [`Entity::from_json`]:
//!
//! - `id` must be present and a non-empty string, or the result is
//!   [`ParseError::MissingId`].
//! - Every other field that is absent, `null`, or of the wrong type takes
//!   its default (empty string, zero, empty list).
//! - A JSON array deserializes element-wise; an empty array is valid.
//!
//! Entities hold no client. Fetching a board's lists or a card's comments
//! goes through the [`Trello`](crate::trello::Trello) repository by id.

mod board;
mod card;
mod comment;
mod label;
mod list;

pub use board::Board;
pub use card::Card;
pub use comment::{sort_newest_first, Comment};
pub use label::Label;
pub use list::List;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// Errors from turning a response body into entities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("malformed JSON: {0}")]
    Json(String),

    #[error("{entity} payload is missing required field 'id'")]
    MissingId { entity: &'static str },

    #[error("expected a JSON {expected} for {entity}")]
    UnexpectedShape {
        entity: &'static str,
        expected: &'static str,
    },

    #[error("invalid {entity} payload: {message}")]
    Invalid {
        entity: &'static str,
        message: String,
    },
}

/// A type built from one JSON object of the REST API.
pub trait Entity: Sized {
    /// Name used in error messages.
    const KIND: &'static str;

    /// Field layout as the API sends it.
    type Wire: DeserializeOwned;

    fn from_wire(wire: Self::Wire) -> Result<Self, ParseError>;

    /// Build from a JSON object.
    fn from_json(value: &Value) -> Result<Self, ParseError> {
        let object = value.as_object().ok_or(ParseError::UnexpectedShape {
            entity: Self::KIND,
            expected: "object",
        })?;

        match object.get("id") {
            Some(Value::String(id)) if !id.is_empty() => {}
            _ => return Err(ParseError::MissingId { entity: Self::KIND }),
        }

        let wire = Self::Wire::deserialize(value).map_err(|e| ParseError::Invalid {
            entity: Self::KIND,
            message: e.to_string(),
        })?;
        Self::from_wire(wire)
    }

    /// Build each element of a JSON array.
    fn from_json_list(value: &Value) -> Result<Vec<Self>, ParseError> {
        value
            .as_array()
            .ok_or(ParseError::UnexpectedShape {
                entity: Self::KIND,
                expected: "array",
            })?
            .iter()
            .map(Self::from_json)
            .collect()
    }

    /// Parse a response body holding one object.
    fn parse(body: &str) -> Result<Self, ParseError> {
        Self::from_json(&parse_value(body)?)
    }

    /// Parse a response body holding an array.
    fn parse_list(body: &str) -> Result<Vec<Self>, ParseError> {
        Self::from_json_list(&parse_value(body)?)
    }
}

/// Parse a body into a JSON value.
pub fn parse_value(body: &str) -> Result<Value, ParseError> {
    serde_json::from_str(body).map_err(|e| ParseError::Json(e.to_string()))
}

/// Field deserializer that falls back to the default for `null` or a
/// value of the wrong type.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}
