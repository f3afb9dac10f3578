//! card command - Show a card with its labels and comments

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::{emit, require, runtime, service, Context};
use crate::model::{Card, Comment};
use crate::ui::output::{format_card, format_comment, format_label, format_list};

#[derive(Debug, Serialize)]
struct CardView {
    card: Card,
    comments: Vec<Comment>,
}

/// Show a card. Comments are newest first.
pub fn card(ctx: &Context, card_id: &str) -> Result<()> {
    let rt = runtime()?;
    let view = rt.block_on(async {
        let service = service(ctx)?;
        let card = require(service.get_card(card_id).await)?
            .ok_or_else(|| anyhow!("Card {} not found", card_id))?;
        let comments = require(service.list_comments(card_id).await)?;
        Ok::<_, anyhow::Error>(CardView { card, comments })
    })?;

    emit(ctx, &view, || {
        let card = &view.card;
        println!("{}", format_card(card));
        if !card.description.is_empty() {
            println!("\n{}", card.description);
        }
        if !card.labels.is_empty() {
            println!("\nLabels:");
            let labels: Vec<String> = card.labels.iter().map(format_label).collect();
            println!("{}", format_list(&labels, "  "));
        }
        if !view.comments.is_empty() {
            println!("\nComments:");
            let comments: Vec<String> = view.comments.iter().map(format_comment).collect();
            println!("{}", format_list(&comments, "  "));
        }
    })
}
