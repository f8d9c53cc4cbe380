//! Wishlist command handlers.

use chrono::Local;
use serde::Serialize;
use tabled::Tabled;

use foodie_core::{AdminClient, WishlistItem, relative_time};

use crate::cli::{GlobalOpts, OutputFormat, WishlistArgs, WishlistCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct WishlistRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Added")]
    added: String,
}

impl From<&WishlistItem> for WishlistRow {
    fn from(item: &WishlistItem) -> Self {
        let now = Local::now();
        Self {
            product: item.product.id().to_owned(),
            name: item.product.name().unwrap_or("-").to_owned(),
            added: item
                .added_at
                .map_or_else(|| "-".into(), |at| relative_time(&now, &at)),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Membership<'a> {
    product_id: &'a str,
    in_wishlist: bool,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &AdminClient,
    args: WishlistArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let wishlist = client.wishlist();

    match args.command {
        WishlistCommand::Show => {
            let snapshot = wishlist.fetch().await?;
            let out = if snapshot.items.is_empty() && global.output == OutputFormat::Table {
                "Wishlist is empty".to_owned()
            } else {
                output::render_list(
                    global.output,
                    &snapshot.items,
                    |i| WishlistRow::from(i),
                    |i| i.product.id().to_owned(),
                )?
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WishlistCommand::Add { product_id } => {
            let snapshot = wishlist.add(&product_id).await?;
            let message = format!("Added {product_id} ({} items)", snapshot.items.len());
            let out = output::render_outcome(global.output, &*snapshot, &message)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WishlistCommand::Remove { product_id } => {
            let snapshot = wishlist.remove(&product_id).await?;
            let message = format!("Removed {product_id} ({} items)", snapshot.items.len());
            let out = output::render_outcome(global.output, &*snapshot, &message)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WishlistCommand::Clear => {
            if !util::confirm("wishlist clear", "Remove every product from the wishlist?", global)? {
                return Ok(());
            }
            let snapshot = wishlist.clear().await?;
            let out = output::render_outcome(global.output, &*snapshot, "Wishlist cleared")?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WishlistCommand::Contains { product_id } => {
            wishlist.fetch().await?;
            let membership = Membership {
                product_id: &product_id,
                in_wishlist: wishlist.contains(&product_id),
            };
            let out = output::render_single(
                global.output,
                &membership,
                |m| {
                    if m.in_wishlist {
                        format!("{} is on the wishlist", m.product_id)
                    } else {
                        format!("{} is not on the wishlist", m.product_id)
                    }
                },
                |m| m.in_wishlist.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
