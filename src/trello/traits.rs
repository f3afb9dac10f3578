//! trello::traits
//!
//! The repository trait over Trello resources.
//!
//! Relationship traversal takes the parent's id and returns fresh children.
//! Nothing is cached: calling [`Trello::labels_of`] twice makes two
//! requests.
//!
//! # Example
//!
//! ```ignore
//! use trellocli::trello::{Trello, TrelloError};
//!
//! async fn first_list_cards(trello: &dyn Trello, board_id: &str) -> Result<usize, TrelloError> {
//!     let lists = trello.lists_of(board_id).await?;
//!     match lists.first() {
//!         Some(list) => Ok(trello.cards_of(&list.id).await?.len()),
//!         None => Ok(0),
//!     }
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Board, Card, Comment, Label, List, ParseError};

/// Errors from repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrelloError {
    /// Credentials missing or refused (401).
    #[error("authorization failed: {0}")]
    Auth(String),

    /// 400, 403 or 404. The meaning depends on the resource.
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Timeout, connection failure, or an unexpected status.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body did not describe the expected entity.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl TrelloError {
    pub fn is_auth(&self) -> bool {
        matches!(self, TrelloError::Auth(_))
    }

    /// 404 from the service.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrelloError::Rejected { status: 404, .. })
    }
}

/// Trello boards, lists, cards, labels and comments.
///
/// Implementations must be `Send + Sync`.
#[async_trait]
pub trait Trello: Send + Sync {
    /// Every board of the authorized member.
    async fn boards(&self) -> Result<Vec<Board>, TrelloError>;

    async fn board(&self, board_id: &str) -> Result<Board, TrelloError>;

    async fn lists_of(&self, board_id: &str) -> Result<Vec<List>, TrelloError>;

    async fn list(&self, list_id: &str) -> Result<List, TrelloError>;

    /// Cards with their label objects embedded.
    async fn cards_of(&self, list_id: &str) -> Result<Vec<Card>, TrelloError>;

    async fn card(&self, card_id: &str) -> Result<Card, TrelloError>;

    /// Comments on a card, newest first.
    async fn comments_of(&self, card_id: &str) -> Result<Vec<Comment>, TrelloError>;

    async fn labels_of(&self, board_id: &str) -> Result<Vec<Label>, TrelloError>;

    /// Create a card and return it as the service stored it.
    async fn create_card(&self, list_id: &str, name: &str) -> Result<Card, TrelloError>;

    async fn create_comment(&self, card_id: &str, text: &str) -> Result<Comment, TrelloError>;

    async fn create_label(
        &self,
        board_id: &str,
        name: &str,
        color: &str,
    ) -> Result<Label, TrelloError>;

    /// Attach a label to a card. Returns the card's label ids afterwards.
    async fn add_label_to_card(
        &self,
        card_id: &str,
        label_id: &str,
    ) -> Result<Vec<String>, TrelloError>;
}
