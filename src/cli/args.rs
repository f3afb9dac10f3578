//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Use this config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output
//! - `--json`: Print payloads as JSON
//! - `--no-interactive`: Never prompt

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ui::prompts;

/// trello - boards, lists, cards, labels and comments from the terminal
#[derive(Parser, Debug)]
#[command(name = "trello")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Prompts are shown only on a terminal and without `--quiet`,
    /// `--json` or `--no-interactive`.
    pub fn interactive(&self) -> bool {
        if self.no_interactive || self.quiet || self.json {
            false
        } else {
            prompts::is_interactive()
        }
    }
}

/// Application credentials, from flags or the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct ApiCredentialArgs {
    /// API key from https://trello.com/app-key
    #[arg(long, env = "TRELLO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API secret (OAuth consumer secret)
    #[arg(long, env = "TRELLO_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// API token sent with write calls
    #[arg(long, env = "TRELLO_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up credentials, authorize, and list your boards
    #[command(
        name = "init",
        long_about = "Set up credentials and authorize this CLI.\n\n\
            Stores the API key and secret (prompting for any that are missing), \
            then runs the OAuth authorization if no access token is stored yet. \
            Finishes by listing your boards.",
        after_help = "\
EXAMPLES:
    # Interactive setup
    trello init

    # Credentials from the environment
    TRELLO_API_KEY=... TRELLO_API_SECRET=... trello init

HOW IT WORKS:
    1. Get a key and secret at https://trello.com/app-key
    2. 'trello init' prints an authorization link (and opens it)
    3. Approve access and paste the verification code back"
    )]
    Init {
        #[command(flatten)]
        credentials: ApiCredentialArgs,

        /// Do not attempt to open the browser automatically
        #[arg(long)]
        no_browser: bool,
    },

    /// Show or clear stored credentials
    #[command(
        name = "auth",
        after_help = "\
EXAMPLES:
    # Store credentials without authorizing
    trello auth --api-key KEY --api-secret SECRET

    # Check which credentials are stored
    trello auth --status

    # Forget the OAuth access token (API key and secret are kept)
    trello auth --logout"
    )]
    Auth {
        #[command(flatten)]
        credentials: ApiCredentialArgs,

        /// Show current authentication status
        #[arg(long, conflicts_with = "logout")]
        status: bool,

        /// Remove the stored access token
        #[arg(long)]
        logout: bool,
    },

    /// List all boards
    Boards,

    /// Show a board's lists and labels
    Board {
        /// Board id
        board_id: String,
    },

    /// Show the cards in a list
    List {
        /// List id
        list_id: String,
    },

    /// Show a card with its labels and comments
    Card {
        /// Card id
        card_id: String,
    },

    /// Create a card in a list
    #[command(name = "create-card")]
    CreateCard {
        /// List id
        list_id: String,

        /// Card name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,
    },

    /// Comment on a card
    Comment {
        /// Card id
        card_id: String,

        /// Comment text (prompted when omitted)
        #[arg(long)]
        text: Option<String>,
    },

    /// Create a label on a board
    #[command(name = "create-label")]
    CreateLabel {
        /// Board id
        board_id: String,

        /// Label name
        #[arg(long)]
        name: String,

        /// Label color (green, yellow, orange, red, purple, blue, ...)
        #[arg(long)]
        color: String,
    },

    /// Add an existing label to a card
    #[command(name = "add-label")]
    AddLabel {
        /// Card id
        card_id: String,

        /// Label id
        label_id: String,
    },

    /// Get, set, or list configuration values
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
    /// Print the config file location
    Path,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create_label() {
        let cli = Cli::try_parse_from([
            "trello",
            "create-label",
            "b1",
            "--name",
            "Urgent",
            "--color",
            "red",
        ])
        .unwrap();
        match cli.command {
            Command::CreateLabel {
                board_id,
                name,
                color,
            } => {
                assert_eq!(board_id, "b1");
                assert_eq!(name, "Urgent");
                assert_eq!(color, "red");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["trello", "boards", "--json", "--debug"]).unwrap();
        assert!(cli.json);
        assert!(cli.debug);
        assert!(!cli.interactive());
    }

    #[test]
    fn auth_status_conflicts_with_logout() {
        assert!(Cli::try_parse_from(["trello", "auth", "--status", "--logout"]).is_err());
    }

    #[test]
    fn add_label_needs_both_ids() {
        assert!(Cli::try_parse_from(["trello", "add-label", "c1"]).is_err());
    }
}
