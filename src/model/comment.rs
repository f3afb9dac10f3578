//! model::comment
//!
//! Comments are `commentCard` actions on a card.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, Entity, ParseError};

/// A comment on a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comment {
    pub id: String,
    pub text: String,
    pub author_name: String,
    /// Parsed from the action's RFC 3339 `date`. Any other format is
    /// dropped and reads as `None`, same as a missing date, so such a
    /// comment does not round-trip its date.
    pub created_at: Option<DateTime<Utc>>,
}

/// Order comments most recent first. Undated comments go last.
pub fn sort_newest_first(comments: &mut [Comment]) {
    comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[derive(Default, Deserialize)]
struct ActionData {
    #[serde(default, deserialize_with = "lenient")]
    text: String,
}

#[derive(Default, Deserialize)]
struct Member {
    #[serde(default, rename = "fullName", deserialize_with = "lenient")]
    full_name: String,
}

#[derive(Deserialize)]
pub struct CommentWire {
    id: String,
    #[serde(default, deserialize_with = "lenient")]
    data: ActionData,
    #[serde(default, rename = "memberCreator", deserialize_with = "lenient")]
    member_creator: Member,
    #[serde(default, deserialize_with = "lenient")]
    date: Option<String>,
}

impl Entity for Comment {
    const KIND: &'static str = "comment";
    type Wire = CommentWire;

    fn from_wire(wire: CommentWire) -> Result<Self, ParseError> {
        let created_at = wire
            .date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|d| d.with_timezone(&Utc));

        Ok(Self {
            id: wire.id,
            text: wire.data.text,
            author_name: wire.member_creator.full_name,
            created_at,
        })
    }
}
