//! create-card and create-label commands

use anyhow::{Context as _, Result};

use super::{emit, require, runtime, service, Context};
use crate::ui::output::{format_card, format_label};
use crate::ui::prompts;

/// Create a card. The name is prompted for when not given.
pub fn create_card(ctx: &Context, list_id: &str, name: Option<&str>) -> Result<()> {
    let name = match name {
        Some(name) => name.to_string(),
        None => prompts::input("Card name", None, ctx.interactive)
            .context("Card name required. Use --name <NAME> or run interactively.")?,
    };

    let rt = runtime()?;
    let card = rt.block_on(async { require(service(ctx)?.create_card(&name, list_id).await) })?;

    match card {
        Some(card) => emit(ctx, &card, || println!("Created card {}", format_card(&card))),
        None => Ok(()),
    }
}

/// Create a label on a board.
pub fn create_label(ctx: &Context, board_id: &str, name: &str, color: &str) -> Result<()> {
    let rt = runtime()?;
    let label = rt.block_on(async {
        require(service(ctx)?.create_label(board_id, name, color).await)
    })?;

    match label {
        Some(label) => emit(ctx, &label, || println!("Created label {}", format_label(&label))),
        None => Ok(()),
    }
}
