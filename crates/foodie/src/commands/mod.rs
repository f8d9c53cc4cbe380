//! Command dispatch: bridges CLI args -> core clients -> output formatting.

pub mod cart;
pub mod config_cmd;
pub mod notifications;
pub mod orders;
pub mod util;
pub mod wishlist;

use foodie_core::AdminClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &AdminClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Wishlist(args) => wishlist::handle(client, args, global).await,
        Command::Notifications(args) => notifications::handle(client, args, global).await,
        Command::Orders(args) => orders::handle(client, args, global).await,
        Command::Cart(args) => cart::handle(client, args, global).await,
        // Config is handled before a client is built
        Command::Config(args) => config_cmd::handle(args, global),
    }
}
