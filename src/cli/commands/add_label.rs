//! add-label command - Add an existing label to a card

use anyhow::{bail, Result};

use super::{emit, require, runtime, service, Context};

/// Attach `label_id` to `card_id` and print the card's label ids.
pub fn add_label(ctx: &Context, card_id: &str, label_id: &str) -> Result<()> {
    // Fails before the secret store is opened.
    if card_id == label_id {
        bail!("card id and label id must differ");
    }

    let rt = runtime()?;
    let label_ids =
        rt.block_on(async { require(service(ctx)?.add_label(card_id, label_id).await) })?;

    emit(ctx, &label_ids, || {
        println!("Card {} labels: {}", card_id, label_ids.join(", "))
    })
}
