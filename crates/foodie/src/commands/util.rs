//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};

use foodie_core::CoreError;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Prompt for confirmation, auto-approving if `--yes` was passed. Without
/// a terminal to ask on, `--yes` is required.
pub fn confirm(action: &str, message: &str, global: &GlobalOpts) -> Result<bool, CliError> {
    if global.yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))?;
    Ok(confirmed)
}

/// Warn about mirrors that could not be refetched after a change.
pub fn warn_stale(errors: &[CoreError], global: &GlobalOpts) {
    for err in errors {
        output::print_warning(
            &format!("change applied, but refreshing failed: {err}"),
            global.quiet,
        );
    }
}
