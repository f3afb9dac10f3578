//! trello
//!
//! Access to Trello resources.
//!
//! # Architecture
//!
//! - [`TrelloClient`] - signs each call and classifies the outcome as a [`RawResult`]
//! - [`Trello`] - repository trait: fetch and create entities by id
//! - [`TrelloApi`] - the repository over [`TrelloClient`]
//! - [`mock::MockTrello`] - the repository in memory, for tests
//!
//! Building a [`TrelloApi`] from configuration and stored credentials:
//!
//! ```no_run
//! use trellocli::auth::Credentials;
//! use trellocli::config::Config;
//! use trellocli::trello::{Trello, TrelloApi, TrelloClient};
//!
//! # tokio_test::block_on(async {
//! let config = Config::default();
//! let creds = Credentials::new("key", "secret", "token", "token-secret");
//! let api = TrelloApi::new(TrelloClient::new(&config, creds).unwrap());
//! let boards = api.boards().await;
//! # });
//! ```

mod api;
mod client;
pub mod mock;
mod traits;

pub use api::TrelloApi;
pub use client::{AuthFailureReason, HttpMethod, RawResult, TrelloClient};
pub use traits::{Trello, TrelloError};
