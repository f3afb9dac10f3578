//! trello::api
//!
//! [`Trello`] over signed HTTP calls.
//!
//! # Resources
//!
//! | Operation | Call |
//! |---|---|
//! | boards | `GET /members/me/boards/?filter=all` |
//! | board | `GET /boards/{id}` |
//! | lists_of | `GET /boards/{id}/lists` |
//! | list | `GET /lists/{id}` |
//! | cards_of | `GET /lists/{id}/cards` |
//! | card | `GET /cards/{id}` |
//! | comments_of | `GET /cards/{id}/actions?filter=commentCard` |
//! | labels_of | `GET /boards/{id}/labels` |
//! | create_card | `POST /cards/` |
//! | create_comment | `POST /cards/{id}/actions/comments` |
//! | create_label | `POST /labels` |
//! | add_label_to_card | `POST /cards/{id}/idLabels` |
//!
//! Every method makes exactly one call.

use async_trait::async_trait;
use tracing::debug;

use super::client::{HttpMethod, TrelloClient};
use super::traits::{Trello, TrelloError};
use crate::auth::oauth1::percent_encode;
use crate::model::{
    parse_value, sort_newest_first, Board, Card, Comment, Entity, Label, List, ParseError,
};

const BOARD_FIELDS: &[&str] = &["id", "name"];
const BOARD_DETAIL_FIELDS: &[&str] = &["id", "name", "labels"];
const LIST_FIELDS: &[&str] = &["id", "name", "idBoard", "closed"];
const CARD_FIELDS: &[&str] = &["id", "name", "labels", "desc", "badges", "idLabels", "idList"];
const LABEL_FIELDS: &[&str] = &["id", "name", "color", "idBoard", "uses"];

/// Repository backed by the REST API.
#[derive(Debug, Clone)]
pub struct TrelloApi {
    client: TrelloClient,
}

impl TrelloApi {
    pub fn new(client: TrelloClient) -> Self {
        Self { client }
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, TrelloError> {
        self.client.call(HttpMethod::Get, path, params).await.into_body()
    }

    /// POST with the `key`/`token` pair appended.
    async fn post(&self, path: &str, params: &[(&str, &str)]) -> Result<String, TrelloError> {
        let auth = self.client.key_token_params();
        let mut all: Vec<(&str, &str)> = params.to_vec();
        all.extend(auth.iter().map(|(k, v)| (*k, v.as_str())));

        debug!(path, "write");
        self.client.call(HttpMethod::Post, path, &all).await.into_body()
    }
}

/// Escape an id for use as one path segment.
fn segment(id: &str) -> String {
    percent_encode(id)
}

#[async_trait]
impl Trello for TrelloApi {
    async fn boards(&self) -> Result<Vec<Board>, TrelloError> {
        let fields = BOARD_FIELDS.join(",");
        let body = self
            .get("/members/me/boards/", &[("filter", "all"), ("fields", fields.as_str())])
            .await?;
        Ok(Board::parse_list(&body)?)
    }

    async fn board(&self, board_id: &str) -> Result<Board, TrelloError> {
        let fields = BOARD_DETAIL_FIELDS.join(",");
        let body = self
            .get(&format!("/boards/{}", segment(board_id)), &[("fields", fields.as_str())])
            .await?;
        Ok(Board::parse(&body)?)
    }

    async fn lists_of(&self, board_id: &str) -> Result<Vec<List>, TrelloError> {
        let fields = LIST_FIELDS.join(",");
        let body = self
            .get(
                &format!("/boards/{}/lists", segment(board_id)),
                &[("fields", fields.as_str())],
            )
            .await?;
        Ok(List::parse_list(&body)?)
    }

    async fn list(&self, list_id: &str) -> Result<List, TrelloError> {
        let body = self.get(&format!("/lists/{}", segment(list_id)), &[]).await?;
        Ok(List::parse(&body)?)
    }

    async fn cards_of(&self, list_id: &str) -> Result<Vec<Card>, TrelloError> {
        let fields = CARD_FIELDS.join(",");
        let body = self
            .get(
                &format!("/lists/{}/cards", segment(list_id)),
                &[("fields", fields.as_str())],
            )
            .await?;
        Ok(Card::parse_list(&body)?)
    }

    async fn card(&self, card_id: &str) -> Result<Card, TrelloError> {
        let fields = CARD_FIELDS.join(",");
        let body = self
            .get(&format!("/cards/{}", segment(card_id)), &[("fields", fields.as_str())])
            .await?;
        Ok(Card::parse(&body)?)
    }

    async fn comments_of(&self, card_id: &str) -> Result<Vec<Comment>, TrelloError> {
        let body = self
            .get(
                &format!("/cards/{}/actions", segment(card_id)),
                &[("filter", "commentCard")],
            )
            .await?;
        let mut comments = Comment::parse_list(&body)?;
        sort_newest_first(&mut comments);
        Ok(comments)
    }

    async fn labels_of(&self, board_id: &str) -> Result<Vec<Label>, TrelloError> {
        let fields = LABEL_FIELDS.join(",");
        let body = self
            .get(
                &format!("/boards/{}/labels", segment(board_id)),
                &[("fields", fields.as_str())],
            )
            .await?;
        Ok(Label::parse_list(&body)?)
    }

    async fn create_card(&self, list_id: &str, name: &str) -> Result<Card, TrelloError> {
        let body = self
            .post("/cards/", &[("name", name), ("idList", list_id)])
            .await?;
        Ok(Card::parse(&body)?)
    }

    async fn create_comment(&self, card_id: &str, text: &str) -> Result<Comment, TrelloError> {
        let body = self
            .post(
                &format!("/cards/{}/actions/comments", segment(card_id)),
                &[("text", text)],
            )
            .await?;
        Ok(Comment::parse(&body)?)
    }

    async fn create_label(
        &self,
        board_id: &str,
        name: &str,
        color: &str,
    ) -> Result<Label, TrelloError> {
        let body = self
            .post(
                "/labels",
                &[("name", name), ("color", color), ("idBoard", board_id)],
            )
            .await?;
        Ok(Label::parse(&body)?)
    }

    async fn add_label_to_card(
        &self,
        card_id: &str,
        label_id: &str,
    ) -> Result<Vec<String>, TrelloError> {
        let body = self
            .post(
                &format!("/cards/{}/idLabels", segment(card_id)),
                &[("value", label_id)],
            )
            .await?;
        parse_label_ids(&body)
    }
}

/// The service answers with the card's label ids as a JSON array of strings.
fn parse_label_ids(body: &str) -> Result<Vec<String>, TrelloError> {
    let value = parse_value(body)?;
    serde_json::from_value(value).map_err(|e| {
        TrelloError::Parse(ParseError::Invalid {
            entity: "label id list",
            message: e.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_ids_response() {
        assert_eq!(
            parse_label_ids(r#"["lab1","lab2"]"#).unwrap(),
            vec!["lab1", "lab2"]
        );
        assert!(parse_label_ids("[]").unwrap().is_empty());
    }

    #[test]
    fn label_ids_response_wrong_shape() {
        assert!(matches!(
            parse_label_ids(r#"{"id":"lab1"}"#),
            Err(TrelloError::Parse(ParseError::Invalid { .. }))
        ));
        assert!(matches!(
            parse_label_ids("nope"),
            Err(TrelloError::Parse(ParseError::Json(_)))
        ));
    }

    #[test]
    fn ids_are_escaped_as_one_segment() {
        assert_eq!(segment("5f1a2b"), "5f1a2b");
        assert_eq!(segment("../members"), "..%2Fmembers");
    }
}
