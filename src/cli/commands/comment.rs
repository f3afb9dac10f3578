//! comment command - Comment on a card

use anyhow::{Context as _, Result};

use super::{emit, require, runtime, service, Context};
use crate::ui::prompts;

/// Add a comment. The text is prompted for when not given.
pub fn comment(ctx: &Context, card_id: &str, text: Option<&str>) -> Result<()> {
    let text = match text {
        Some(text) => text.to_string(),
        None => prompts::input("Comment", None, ctx.interactive)
            .context("Comment text required. Use --text <TEXT> or run interactively.")?,
    };

    let rt = runtime()?;
    let comment =
        rt.block_on(async { require(service(ctx)?.create_comment(card_id, &text).await) })?;

    match comment {
        Some(comment) => emit(ctx, &comment, || println!("Commented on card {}", card_id)),
        None => Ok(()),
    }
}
