//! list command - Show the cards in a list

use anyhow::{anyhow, Result};
use serde::Serialize;

use super::{emit, require, runtime, service, Context};
use crate::model::{Card, List};
use crate::ui::output::{format_card, format_list, format_trello_list};

#[derive(Debug, Serialize)]
struct ListView {
    list: List,
    cards: Vec<Card>,
}

/// Show a list and its cards.
pub fn list(ctx: &Context, list_id: &str) -> Result<()> {
    let rt = runtime()?;
    let view = rt.block_on(async {
        let service = service(ctx)?;
        let list = require(service.get_list(list_id).await)?
            .ok_or_else(|| anyhow!("List {} not found", list_id))?;
        let cards = require(service.list_cards(list_id).await)?;
        Ok::<_, anyhow::Error>(ListView { list, cards })
    })?;

    emit(ctx, &view, || {
        println!("{}", format_trello_list(&view.list));
        if view.cards.is_empty() {
            println!("  (no cards)");
        } else {
            let cards: Vec<String> = view.cards.iter().map(format_card).collect();
            println!("{}", format_list(&cards, "  "));
        }
    })
}
