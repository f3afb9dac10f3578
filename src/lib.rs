//! trellocli - Trello boards, lists, cards, labels and comments from the terminal
//!
//! A single-binary tool that authorizes against Trello with three-legged
//! OAuth1 and reads or creates boards, lists, cards, labels and comments.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to the service)
//! - [`service`] - Uniform `{payload, status}` envelopes over every operation
//! - [`trello`] - Repository trait, signed HTTP client, and in-memory mock
//! - [`model`] - Plain entity types with strict JSON deserialization
//! - [`auth`] - OAuth1 signing, the authorization flow, and stored credentials
//! - [`secrets`] - Secret storage abstraction
//! - [`config`] - The single configuration struct, loaded once
//! - [`logging`] - Tracing subscriber setup
//! - [`ui`] - Output formatting and prompts
//!
//! # Invariants
//!
//! 1. Entities carry no client; relationships are fetched by id
//! 2. Service operations never return errors, only status codes
//! 3. Credentials are persisted only after a successful token exchange
//! 4. Secrets never appear in logs, errors, or `Debug` output

pub mod auth;
pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod secrets;
pub mod service;
pub mod trello;
pub mod ui;
