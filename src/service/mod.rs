//! service
//!
//! Uniform result envelopes over the [`Trello`] repository.
//!
//! Every operation returns an [`Envelope`] of `{payload, status}` and never
//! an error. Failures become a [`StatusCode`] and an empty payload:
//!
//! | Failure | Read operation | Write operation |
//! |---|---|---|
//! | missing or rejected credentials | `AuthError` | `AuthError` |
//! | 400/403/404, transport, parse | `ReadError` | `WriteError` |
//! | empty id or name (no call made) | `ReadError` | `WriteError` |
//!
//! Write operations return the entity as the service stored it, with its
//! server-assigned id.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use trellocli::model::Board;
//! use trellocli::service::{StatusCode, TrelloService};
//! use trellocli::trello::mock::MockTrello;
//!
//! # tokio_test::block_on(async {
//! let trello = MockTrello::new().with_board(Board {
//!     id: "b1".to_string(),
//!     name: "Demo".to_string(),
//! });
//! let service = TrelloService::new(Arc::new(trello));
//!
//! let result = service.list_boards().await;
//! assert_eq!(result.status, StatusCode::Success);
//! assert_eq!(result.payload[0].id, "b1");
//! # });
//! ```

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::model::{Board, Card, Comment, Label, List};
use crate::trello::{Trello, TrelloError};

/// Outcome category of a service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    Success,
    ReadError,
    WriteError,
    AuthError,
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        matches!(self, StatusCode::Success)
    }

    /// Human-readable text for the status.
    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::Success => "success",
            StatusCode::ReadError => "Error reading from Trello",
            StatusCode::WriteError => "Error writing to Trello",
            StatusCode::AuthError => "Authorization error, please check API and OAuth keys/tokens",
        }
    }

    /// Process exit code for the status.
    pub fn exit_code(&self) -> i32 {
        match self {
            StatusCode::Success => 0,
            _ => 1,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Result of a service operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    pub payload: T,
    pub status: StatusCode,
    /// Cause of a failure, for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(payload: T) -> Self {
        Self {
            payload,
            status: StatusCode::Success,
            detail: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

impl<T: Default> Envelope<T> {
    pub fn failure(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            payload: T::default(),
            status,
            detail: Some(detail.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Read,
    Write,
}

impl Direction {
    fn error_status(self) -> StatusCode {
        match self {
            Direction::Read => StatusCode::ReadError,
            Direction::Write => StatusCode::WriteError,
        }
    }
}

/// Entry point the CLI uses for every Trello operation.
#[derive(Clone)]
pub struct TrelloService {
    trello: Arc<dyn Trello>,
}

impl TrelloService {
    pub fn new(trello: Arc<dyn Trello>) -> Self {
        Self { trello }
    }

    async fn run<T, F>(&self, operation: &'static str, direction: Direction, call: F) -> Envelope<T>
    where
        T: Default,
        F: Future<Output = Result<T, TrelloError>>,
    {
        match call.await {
            Ok(payload) => {
                debug!(operation, "ok");
                Envelope::success(payload)
            }
            Err(e) => {
                let status = if e.is_auth() {
                    StatusCode::AuthError
                } else {
                    direction.error_status()
                };
                info!(operation, ?status, error = %e, "trello operation failed");
                Envelope::failure(status, e.to_string())
            }
        }
    }

    /// Reject blank inputs before any call is made.
    fn check_inputs<T: Default>(
        operation: &'static str,
        direction: Direction,
        inputs: &[(&str, &str)],
    ) -> Option<Envelope<T>> {
        let (name, _) = inputs.iter().find(|(_, v)| v.trim().is_empty())?;
        debug!(operation, field = *name, "rejected blank input");
        Some(Envelope::failure(
            direction.error_status(),
            format!("{} must not be empty", name),
        ))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn list_boards(&self) -> Envelope<Vec<Board>> {
        self.run("list_boards", Direction::Read, self.trello.boards())
            .await
    }

    pub async fn get_board(&self, board_id: &str) -> Envelope<Option<Board>> {
        if let Some(e) = Self::check_inputs("get_board", Direction::Read, &[("board id", board_id)]) {
            return e;
        }
        self.run("get_board", Direction::Read, async {
            self.trello.board(board_id).await.map(Some)
        })
        .await
    }

    pub async fn list_lists(&self, board_id: &str) -> Envelope<Vec<List>> {
        if let Some(e) = Self::check_inputs("list_lists", Direction::Read, &[("board id", board_id)]) {
            return e;
        }
        self.run("list_lists", Direction::Read, self.trello.lists_of(board_id))
            .await
    }

    pub async fn get_list(&self, list_id: &str) -> Envelope<Option<List>> {
        if let Some(e) = Self::check_inputs("get_list", Direction::Read, &[("list id", list_id)]) {
            return e;
        }
        self.run("get_list", Direction::Read, async {
            self.trello.list(list_id).await.map(Some)
        })
        .await
    }

    pub async fn list_cards(&self, list_id: &str) -> Envelope<Vec<Card>> {
        if let Some(e) = Self::check_inputs("list_cards", Direction::Read, &[("list id", list_id)]) {
            return e;
        }
        self.run("list_cards", Direction::Read, self.trello.cards_of(list_id))
            .await
    }

    pub async fn get_card(&self, card_id: &str) -> Envelope<Option<Card>> {
        if let Some(e) = Self::check_inputs("get_card", Direction::Read, &[("card id", card_id)]) {
            return e;
        }
        self.run("get_card", Direction::Read, async {
            self.trello.card(card_id).await.map(Some)
        })
        .await
    }

    /// Comments on a card, newest first.
    pub async fn list_comments(&self, card_id: &str) -> Envelope<Vec<Comment>> {
        if let Some(e) =
            Self::check_inputs("list_comments", Direction::Read, &[("card id", card_id)])
        {
            return e;
        }
        self.run(
            "list_comments",
            Direction::Read,
            self.trello.comments_of(card_id),
        )
        .await
    }

    pub async fn list_labels(&self, board_id: &str) -> Envelope<Vec<Label>> {
        if let Some(e) = Self::check_inputs("list_labels", Direction::Read, &[("board id", board_id)])
        {
            return e;
        }
        self.run("list_labels", Direction::Read, self.trello.labels_of(board_id))
            .await
    }

    // =========================================================================
    // Writes
    // =========================================================================

    pub async fn create_card(&self, name: &str, list_id: &str) -> Envelope<Option<Card>> {
        if let Some(e) = Self::check_inputs(
            "create_card",
            Direction::Write,
            &[("card name", name), ("list id", list_id)],
        ) {
            return e;
        }
        self.run("create_card", Direction::Write, async {
            self.trello.create_card(list_id, name).await.map(Some)
        })
        .await
    }

    pub async fn create_comment(&self, card_id: &str, text: &str) -> Envelope<Option<Comment>> {
        if let Some(e) = Self::check_inputs(
            "create_comment",
            Direction::Write,
            &[("card id", card_id), ("comment text", text)],
        ) {
            return e;
        }
        self.run("create_comment", Direction::Write, async {
            self.trello.create_comment(card_id, text).await.map(Some)
        })
        .await
    }

    pub async fn create_label(
        &self,
        board_id: &str,
        name: &str,
        color: &str,
    ) -> Envelope<Option<Label>> {
        if let Some(e) = Self::check_inputs(
            "create_label",
            Direction::Write,
            &[("board id", board_id), ("label name", name), ("label color", color)],
        ) {
            return e;
        }
        self.run("create_label", Direction::Write, async {
            self.trello.create_label(board_id, name, color).await.map(Some)
        })
        .await
    }

    /// Attach a label to a card. The payload is the card's label ids.
    pub async fn add_label(&self, card_id: &str, label_id: &str) -> Envelope<Vec<String>> {
        if let Some(e) = Self::check_inputs(
            "add_label",
            Direction::Write,
            &[("card id", card_id), ("label id", label_id)],
        ) {
            return e;
        }
        if card_id == label_id {
            return Envelope::failure(
                StatusCode::WriteError,
                "card id and label id must differ",
            );
        }
        self.run(
            "add_label",
            Direction::Write,
            self.trello.add_label_to_card(card_id, label_id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ParseError;
    use crate::trello::mock::{FailOn, MockTrello};

    fn seeded() -> MockTrello {
        MockTrello::new()
            .with_board(Board {
                id: "b1".into(),
                name: "Demo".into(),
            })
            .with_list(List {
                id: "list-1".into(),
                name: "To Do".into(),
                board_id: "b1".into(),
                closed: false,
            })
            .with_label(Label {
                id: "lab1".into(),
                name: "urgent".into(),
                color: "red".into(),
                board_id: "b1".into(),
                uses: 0,
            })
    }

    fn service(trello: &MockTrello) -> TrelloService {
        TrelloService::new(Arc::new(trello.clone()))
    }

    #[tokio::test]
    async fn list_boards_success() {
        let trello = seeded();
        let result = service(&trello).list_boards().await;

        assert_eq!(
            result,
            Envelope::success(vec![Board {
                id: "b1".into(),
                name: "Demo".into()
            }])
        );
    }

    #[tokio::test]
    async fn missing_entity_is_read_error_with_empty_payload() {
        let trello = seeded();
        let result = service(&trello).get_list("bad-id").await;

        assert_eq!(result.status, StatusCode::ReadError);
        assert!(result.payload.is_none());
        assert!(result.detail.unwrap().contains("404"));
    }

    #[tokio::test]
    async fn auth_failure_maps_to_auth_error_for_reads_and_writes() {
        let trello = seeded().fail_on(FailOn::All(TrelloError::Auth("401".into())));
        let svc = service(&trello);

        assert_eq!(svc.list_boards().await.status, StatusCode::AuthError);
        assert_eq!(
            svc.create_card("Buy milk", "list-1").await.status,
            StatusCode::AuthError
        );
    }

    #[tokio::test]
    async fn parse_and_transport_fold_by_direction() {
        let trello = seeded()
            .fail_on(FailOn::All(ParseError::MissingId { entity: "card" }.into()));
        let svc = service(&trello);
        assert_eq!(svc.list_cards("list-1").await.status, StatusCode::ReadError);
        assert_eq!(
            svc.create_comment("c1", "hi").await.status,
            StatusCode::WriteError
        );

        trello.clear_fail_on();
        let trello = trello.fail_on(FailOn::All(TrelloError::Transport("timeout".into())));
        let svc = service(&trello);
        assert_eq!(svc.list_labels("b1").await.status, StatusCode::ReadError);
        assert_eq!(
            svc.create_label("b1", "x", "red").await.status,
            StatusCode::WriteError
        );
    }

    #[tokio::test]
    async fn create_card_returns_server_entity() {
        let trello = seeded();
        let result = service(&trello).create_card("Buy milk", "list-1").await;

        assert!(result.is_success());
        let card = result.payload.unwrap();
        assert_eq!(card.name, "Buy milk");
        assert_eq!(card.id, "card-1");
        assert_eq!(card.list_id, "list-1");
    }

    #[tokio::test]
    async fn blank_inputs_rejected_without_calls() {
        let trello = seeded();
        let svc = service(&trello);

        assert_eq!(svc.get_board("").await.status, StatusCode::ReadError);
        assert_eq!(svc.list_comments("  ").await.status, StatusCode::ReadError);
        assert_eq!(
            svc.create_card("", "list-1").await.status,
            StatusCode::WriteError
        );
        assert_eq!(
            svc.create_comment("c1", "").await.status,
            StatusCode::WriteError
        );
        assert_eq!(
            svc.create_label("b1", "name", "").await.status,
            StatusCode::WriteError
        );
        assert!(trello.operations().is_empty());
    }

    #[tokio::test]
    async fn add_label_with_same_ids_rejected() {
        let trello = seeded();
        let result = service(&trello).add_label("x1", "x1").await;

        assert_eq!(result.status, StatusCode::WriteError);
        assert!(result.payload.is_empty());
        assert!(trello.operations().is_empty());
    }

    #[tokio::test]
    async fn add_label_returns_card_label_ids() {
        let trello = seeded();
        let svc = service(&trello);
        let card = svc.create_card("Buy milk", "list-1").await.payload.unwrap();

        let result = svc.add_label(&card.id, "lab1").await;
        assert_eq!(result, Envelope::success(vec!["lab1".to_string()]));
    }

    #[test]
    fn status_messages_and_exit_codes() {
        assert_eq!(StatusCode::Success.exit_code(), 0);
        for status in [
            StatusCode::ReadError,
            StatusCode::WriteError,
            StatusCode::AuthError,
        ] {
            assert_eq!(status.exit_code(), 1);
            assert!(!status.message().is_empty());
        }
        assert_eq!(StatusCode::ReadError.message(), "Error reading from Trello");
        assert_eq!(StatusCode::WriteError.message(), "Error writing to Trello");
    }

    #[test]
    fn envelope_serializes_status_snake_case() {
        let envelope: Envelope<Vec<Board>> = Envelope::failure(StatusCode::ReadError, "404");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["status"], "read_error");
        assert_eq!(json["payload"], serde_json::json!([]));
        assert_eq!(json["detail"], "404");
    }
}
