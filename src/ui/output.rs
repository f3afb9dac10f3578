//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output is formatted consistently and respects the quiet flag.
//! When `--json` is enabled, payloads are printed as JSON on stdout and
//! nothing else is written there.

use std::fmt::Display;

use serde::Serialize;

use crate::model::{Board, Card, Comment, Label, List};

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a value as pretty JSON.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_board(board: &Board) -> String {
    format!("{} ({})", board.name, board.id)
}

pub fn format_trello_list(list: &List) -> String {
    if list.closed {
        format!("{} ({}) [closed]", list.name, list.id)
    } else {
        format!("{} ({})", list.name, list.id)
    }
}

pub fn format_card(card: &Card) -> String {
    let mut line = format!("{} ({})", card.name, card.id);
    if card.comment_count > 0 {
        line.push_str(&format!(" [{} comments]", card.comment_count));
    }
    line
}

/// Labels may be unnamed; the color is shown either way.
pub fn format_label(label: &Label) -> String {
    let name = if label.name.is_empty() {
        "(unnamed)"
    } else {
        label.name.as_str()
    };
    let color = if label.color.is_empty() {
        "no color"
    } else {
        label.color.as_str()
    };
    format!("{} [{}] ({})", name, color, label.id)
}

pub fn format_comment(comment: &Comment) -> String {
    let when = comment
        .created_at
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown date".to_string());
    let author = if comment.author_name.is_empty() {
        "unknown"
    } else {
        comment.author_name.as_str()
    };
    format!("{} {}: {}", when, author, comment.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Debug);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn list_with_prefix() {
        assert_eq!(format_list(&["a", "b"], "  "), "  a\n  b");
        assert_eq!(format_list::<&str>(&[], "  "), "");
    }

    #[test]
    fn closed_lists_are_marked() {
        let mut list = List {
            id: "l1".into(),
            name: "Done".into(),
            board_id: "b1".into(),
            closed: false,
        };
        assert_eq!(format_trello_list(&list), "Done (l1)");
        list.closed = true;
        assert_eq!(format_trello_list(&list), "Done (l1) [closed]");
    }

    #[test]
    fn card_shows_comment_count_only_when_nonzero() {
        let mut card = Card {
            id: "c1".into(),
            name: "Buy milk".into(),
            description: String::new(),
            comment_count: 0,
            label_ids: vec![],
            labels: vec![],
            list_id: "l1".into(),
        };
        assert_eq!(format_card(&card), "Buy milk (c1)");
        card.comment_count = 2;
        assert_eq!(format_card(&card), "Buy milk (c1) [2 comments]");
    }

    #[test]
    fn unnamed_label() {
        let label = Label {
            id: "lab1".into(),
            name: String::new(),
            color: "green".into(),
            board_id: "b1".into(),
            uses: 0,
        };
        assert_eq!(format_label(&label), "(unnamed) [green] (lab1)");
    }

    #[test]
    fn comment_line() {
        let comment = Comment {
            id: "a1".into(),
            text: "looks good".into(),
            author_name: "Ada".into(),
            created_at: Some(Utc.with_ymd_and_hms(2024, 2, 1, 10, 0, 0).unwrap()),
        };
        assert_eq!(format_comment(&comment), "2024-02-01 10:00 Ada: looks good");

        let undated = Comment {
            created_at: None,
            author_name: String::new(),
            ..comment
        };
        assert_eq!(format_comment(&undated), "unknown date unknown: looks good");
    }
}
