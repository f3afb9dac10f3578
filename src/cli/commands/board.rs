//! boards and board commands

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::{emit, require, runtime, service, Context};
use crate::model::{Board, Label, List};
use crate::ui::output::{format_board, format_label, format_list, format_trello_list};

/// A board with its lists and labels, as `board --json` prints it.
#[derive(Debug, Serialize)]
struct BoardView {
    board: Board,
    lists: Vec<List>,
    labels: Vec<Label>,
}

/// List all boards.
pub fn boards(ctx: &Context) -> Result<()> {
    let rt = runtime()?;
    let boards = rt.block_on(async { require(service(ctx)?.list_boards().await) })?;
    print_boards(ctx, &boards)
}

pub(crate) fn print_boards(ctx: &Context, boards: &[Board]) -> Result<()> {
    emit(ctx, boards, || {
        if boards.is_empty() {
            println!("No boards.");
        } else {
            let lines: Vec<String> = boards.iter().map(format_board).collect();
            println!("{}", format_list(&lines, ""));
        }
    })
}

/// Show a board with its lists and labels.
pub fn board(ctx: &Context, board_id: &str) -> Result<()> {
    let rt = runtime()?;
    let view = rt.block_on(async {
        let service = service(ctx)?;
        let board = require(service.get_board(board_id).await)?
            .ok_or_else(|| anyhow!("Board {} not found", board_id))?;
        let lists = require(service.list_lists(board_id).await)?;
        let labels = require(service.list_labels(board_id).await)?;
        Ok::<_, anyhow::Error>(BoardView {
            board,
            lists,
            labels,
        })
    })?;

    emit(ctx, &view, || {
        println!("{}", format_board(&view.board));
        println!("\nLists:");
        let lists: Vec<String> = view.lists.iter().map(format_trello_list).collect();
        println!("{}", format_list(&lists, "  "));
        println!("\nLabels:");
        let labels: Vec<String> = view.labels.iter().map(format_label).collect();
        println!("{}", format_list(&labels, "  "));
    })
}
