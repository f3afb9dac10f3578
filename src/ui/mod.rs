//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts and the terminal verifier prompt
//! - [`output`] - Output formatting and display
//!
//! All output and prompts go through this module so interactive and
//! non-interactive runs are handled the same way.

pub mod output;
pub mod prompts;
