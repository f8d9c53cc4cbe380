//! Cart handlers.

use foodie_core::AdminClient;

use crate::cli::{CartArgs, CartCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    client: &AdminClient,
    args: CartArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CartCommand::Clear => {
            if !util::confirm("cart clear", "Empty the cart?", global)? {
                return Ok(());
            }
            let status = client.distributor().clear_cart().await?;
            let message = status.message.as_deref().unwrap_or("Cart cleared");
            let out = output::render_outcome(global.output, &*status, message)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
