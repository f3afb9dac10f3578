//! trello::mock
//!
//! In-memory [`Trello`] for deterministic tests.
//!
//! Holds boards, lists, cards, labels and comments, records every call,
//! and can be told to fail.
//!
//! # Example
//!
//! ```
//! use trellocli::model::Board;
//! use trellocli::trello::mock::MockTrello;
//! use trellocli::trello::Trello;
//!
//! # tokio_test::block_on(async {
//! let trello = MockTrello::new().with_board(Board {
//!     id: "b1".to_string(),
//!     name: "Demo".to_string(),
//! });
//!
//! let boards = trello.boards().await.unwrap();
//! assert_eq!(boards[0].name, "Demo");
//! assert_eq!(trello.operations().len(), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use super::traits::{Trello, TrelloError};
use crate::model::{sort_newest_first, Board, Card, Comment, Label, List};

/// Mock repository. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockTrello {
    inner: Arc<Mutex<MockTrelloInner>>,
}

#[derive(Debug, Default)]
struct MockTrelloInner {
    boards: Vec<Board>,
    lists: Vec<List>,
    cards: Vec<Card>,
    labels: Vec<Label>,
    comments: HashMap<String, Vec<Comment>>,
    next_id: u64,
    fail_on: Option<FailOn>,
    operations: Vec<MockOperation>,
}

/// Which calls should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Every call.
    All(TrelloError),
    /// Calls to the named repository method (e.g. `"create_card"`).
    Method(&'static str, TrelloError),
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Boards,
    Board { board_id: String },
    ListsOf { board_id: String },
    List { list_id: String },
    CardsOf { list_id: String },
    Card { card_id: String },
    CommentsOf { card_id: String },
    LabelsOf { board_id: String },
    CreateCard { list_id: String, name: String },
    CreateComment { card_id: String, text: String },
    CreateLabel { board_id: String, name: String, color: String },
    AddLabelToCard { card_id: String, label_id: String },
}

fn not_found(what: &str, id: &str) -> TrelloError {
    TrelloError::Rejected {
        status: 404,
        message: format!("{} {} not found", what, id),
    }
}

impl MockTrello {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockTrelloInner> {
        // A panicking test poisons the lock; the data is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn with_board(self, board: Board) -> Self {
        self.lock().boards.push(board);
        self
    }

    pub fn with_list(self, list: List) -> Self {
        self.lock().lists.push(list);
        self
    }

    pub fn with_card(self, card: Card) -> Self {
        self.lock().cards.push(card);
        self
    }

    pub fn with_label(self, label: Label) -> Self {
        self.lock().labels.push(label);
        self
    }

    pub fn with_comment(self, card_id: &str, comment: Comment) -> Self {
        self.lock()
            .comments
            .entry(card_id.to_string())
            .or_default()
            .push(comment);
        self
    }

    /// Configure failures.
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.lock().fail_on = Some(fail_on);
        self
    }

    pub fn clear_fail_on(&self) {
        self.lock().fail_on = None;
    }

    /// Every call so far, in order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.lock().operations.clone()
    }

    pub fn clear_operations(&self) {
        self.lock().operations.clear();
    }

    /// A card as currently stored.
    pub fn card_snapshot(&self, card_id: &str) -> Option<Card> {
        self.lock().cards.iter().find(|c| c.id == card_id).cloned()
    }

    /// Record the call, then return the configured failure if it matches.
    fn enter(&self, method: &'static str, op: MockOperation) -> Result<(), TrelloError> {
        let mut inner = self.lock();
        inner.operations.push(op);
        match &inner.fail_on {
            Some(FailOn::All(e)) => Err(e.clone()),
            Some(FailOn::Method(m, e)) if *m == method => Err(e.clone()),
            _ => Ok(()),
        }
    }

    fn next_id(inner: &mut MockTrelloInner, prefix: &str) -> String {
        inner.next_id += 1;
        format!("{}-{}", prefix, inner.next_id)
    }
}

#[async_trait]
impl Trello for MockTrello {
    async fn boards(&self) -> Result<Vec<Board>, TrelloError> {
        self.enter("boards", MockOperation::Boards)?;
        Ok(self.lock().boards.clone())
    }

    async fn board(&self, board_id: &str) -> Result<Board, TrelloError> {
        self.enter(
            "board",
            MockOperation::Board {
                board_id: board_id.to_string(),
            },
        )?;
        self.lock()
            .boards
            .iter()
            .find(|b| b.id == board_id)
            .cloned()
            .ok_or_else(|| not_found("board", board_id))
    }

    async fn lists_of(&self, board_id: &str) -> Result<Vec<List>, TrelloError> {
        self.enter(
            "lists_of",
            MockOperation::ListsOf {
                board_id: board_id.to_string(),
            },
        )?;
        let inner = self.lock();
        if !inner.boards.iter().any(|b| b.id == board_id) {
            return Err(not_found("board", board_id));
        }
        Ok(inner
            .lists
            .iter()
            .filter(|l| l.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn list(&self, list_id: &str) -> Result<List, TrelloError> {
        self.enter(
            "list",
            MockOperation::List {
                list_id: list_id.to_string(),
            },
        )?;
        self.lock()
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .cloned()
            .ok_or_else(|| not_found("list", list_id))
    }

    async fn cards_of(&self, list_id: &str) -> Result<Vec<Card>, TrelloError> {
        self.enter(
            "cards_of",
            MockOperation::CardsOf {
                list_id: list_id.to_string(),
            },
        )?;
        let inner = self.lock();
        if !inner.lists.iter().any(|l| l.id == list_id) {
            return Err(not_found("list", list_id));
        }
        Ok(inner
            .cards
            .iter()
            .filter(|c| c.list_id == list_id)
            .cloned()
            .collect())
    }

    async fn card(&self, card_id: &str) -> Result<Card, TrelloError> {
        self.enter(
            "card",
            MockOperation::Card {
                card_id: card_id.to_string(),
            },
        )?;
        self.card_snapshot(card_id)
            .ok_or_else(|| not_found("card", card_id))
    }

    async fn comments_of(&self, card_id: &str) -> Result<Vec<Comment>, TrelloError> {
        self.enter(
            "comments_of",
            MockOperation::CommentsOf {
                card_id: card_id.to_string(),
            },
        )?;
        let inner = self.lock();
        if !inner.cards.iter().any(|c| c.id == card_id) {
            return Err(not_found("card", card_id));
        }
        let mut comments = inner.comments.get(card_id).cloned().unwrap_or_default();
        sort_newest_first(&mut comments);
        Ok(comments)
    }

    async fn labels_of(&self, board_id: &str) -> Result<Vec<Label>, TrelloError> {
        self.enter(
            "labels_of",
            MockOperation::LabelsOf {
                board_id: board_id.to_string(),
            },
        )?;
        let inner = self.lock();
        if !inner.boards.iter().any(|b| b.id == board_id) {
            return Err(not_found("board", board_id));
        }
        Ok(inner
            .labels
            .iter()
            .filter(|l| l.board_id == board_id)
            .cloned()
            .collect())
    }

    async fn create_card(&self, list_id: &str, name: &str) -> Result<Card, TrelloError> {
        self.enter(
            "create_card",
            MockOperation::CreateCard {
                list_id: list_id.to_string(),
                name: name.to_string(),
            },
        )?;
        let mut inner = self.lock();
        if !inner.lists.iter().any(|l| l.id == list_id) {
            return Err(TrelloError::Rejected {
                status: 400,
                message: "invalid value for idList".into(),
            });
        }
        let card = Card {
            id: Self::next_id(&mut inner, "card"),
            name: name.to_string(),
            description: String::new(),
            comment_count: 0,
            label_ids: Vec::new(),
            labels: Vec::new(),
            list_id: list_id.to_string(),
        };
        inner.cards.push(card.clone());
        Ok(card)
    }

    async fn create_comment(&self, card_id: &str, text: &str) -> Result<Comment, TrelloError> {
        self.enter(
            "create_comment",
            MockOperation::CreateComment {
                card_id: card_id.to_string(),
                text: text.to_string(),
            },
        )?;
        let mut inner = self.lock();
        let Some(card) = inner.cards.iter_mut().find(|c| c.id == card_id) else {
            return Err(not_found("card", card_id));
        };
        card.comment_count += 1;

        let comment = Comment {
            id: Self::next_id(&mut inner, "action"),
            text: text.to_string(),
            author_name: "Mock Member".to_string(),
            created_at: Some(Utc::now()),
        };
        inner
            .comments
            .entry(card_id.to_string())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }

    async fn create_label(
        &self,
        board_id: &str,
        name: &str,
        color: &str,
    ) -> Result<Label, TrelloError> {
        self.enter(
            "create_label",
            MockOperation::CreateLabel {
                board_id: board_id.to_string(),
                name: name.to_string(),
                color: color.to_string(),
            },
        )?;
        let mut inner = self.lock();
        if !inner.boards.iter().any(|b| b.id == board_id) {
            return Err(TrelloError::Rejected {
                status: 400,
                message: "invalid value for idBoard".into(),
            });
        }
        let label = Label {
            id: Self::next_id(&mut inner, "label"),
            name: name.to_string(),
            color: color.to_string(),
            board_id: board_id.to_string(),
            uses: 0,
        };
        inner.labels.push(label.clone());
        Ok(label)
    }

    async fn add_label_to_card(
        &self,
        card_id: &str,
        label_id: &str,
    ) -> Result<Vec<String>, TrelloError> {
        self.enter(
            "add_label_to_card",
            MockOperation::AddLabelToCard {
                card_id: card_id.to_string(),
                label_id: label_id.to_string(),
            },
        )?;
        let mut inner = self.lock();
        let Some(label) = inner.labels.iter().find(|l| l.id == label_id).cloned() else {
            return Err(not_found("label", label_id));
        };
        let Some(card) = inner.cards.iter_mut().find(|c| c.id == card_id) else {
            return Err(not_found("card", card_id));
        };
        if card.has_label(label_id) {
            return Err(TrelloError::Rejected {
                status: 400,
                message: "that label is already on the card".into(),
            });
        }
        card.label_ids.push(label.id.clone());
        card.labels.push(label);
        Ok(card.label_ids.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MockTrello {
        MockTrello::new()
            .with_board(Board {
                id: "b1".into(),
                name: "Demo".into(),
            })
            .with_list(List {
                id: "l1".into(),
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

    #[tokio::test]
    async fn create_card_assigns_id() {
        let trello = seeded();
        let card = trello.create_card("l1", "Buy milk").await.unwrap();
        assert_eq!(card.id, "card-1");
        assert_eq!(trello.cards_of("l1").await.unwrap(), vec![card]);
    }

    #[tokio::test]
    async fn create_card_in_unknown_list_rejected() {
        let trello = seeded();
        let err = trello.create_card("nope", "x").await.unwrap_err();
        assert!(matches!(err, TrelloError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn add_label_twice_rejected() {
        let trello = seeded();
        let card = trello.create_card("l1", "Buy milk").await.unwrap();

        let ids = trello.add_label_to_card(&card.id, "lab1").await.unwrap();
        assert_eq!(ids, vec!["lab1"]);
        assert!(trello.add_label_to_card(&card.id, "lab1").await.is_err());
        assert!(trello.card_snapshot(&card.id).unwrap().has_label("lab1"));
    }

    #[tokio::test]
    async fn comments_come_back_newest_first() {
        let trello = seeded();
        let card = trello.create_card("l1", "Buy milk").await.unwrap();
        let first = trello.create_comment(&card.id, "first").await.unwrap();
        let second = trello.create_comment(&card.id, "second").await.unwrap();

        let comments = trello.comments_of(&card.id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert!(comments[0].created_at >= comments[1].created_at);
        assert!(comments.contains(&first) && comments.contains(&second));
        assert_eq!(trello.card_snapshot(&card.id).unwrap().comment_count, 2);
    }

    #[tokio::test]
    async fn fail_on_method_only() {
        let trello = seeded().fail_on(FailOn::Method(
            "labels_of",
            TrelloError::Transport("timeout".into()),
        ));

        assert!(trello.labels_of("b1").await.is_err());
        assert!(trello.lists_of("b1").await.is_ok());

        trello.clear_fail_on();
        assert!(trello.labels_of("b1").await.is_ok());
    }

    #[tokio::test]
    async fn operations_recorded_even_on_failure() {
        let trello = seeded().fail_on(FailOn::All(TrelloError::Auth("401".into())));
        let _ = trello.board("b1").await;
        let _ = trello.list("l1").await;

        assert_eq!(
            trello.operations(),
            vec![
                MockOperation::Board {
                    board_id: "b1".into()
                },
                MockOperation::List {
                    list_id: "l1".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn traversal_is_not_cached() {
        let trello = seeded();
        let first = trello.labels_of("b1").await.unwrap();
        let second = trello.labels_of("b1").await.unwrap();

        assert_eq!(first, second);
        let calls = trello
            .operations()
            .into_iter()
            .filter(|op| matches!(op, MockOperation::LabelsOf { .. }))
            .count();
        assert_eq!(calls, 2);
    }
}
