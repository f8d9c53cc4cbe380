//! Clap derive structures for the `foodie` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// foodie -- admin CLI for the organic-foodie store backend
#[derive(Debug, Parser)]
#[command(
    name = "foodie",
    version,
    about = "Manage the organic-foodie store backend from the command line",
    long_about = "Administer wishlists, notifications, payments and carts on the\n\
        organic-foodie backend. What is shown is always the server's answer.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend profile to use
    #[arg(long, short = 'p', env = "FOODIE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 'u', env = "FOODIE_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Session token (overrides profile and keyring)
    #[arg(long, env = "FOODIE_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Signed-in user id (overrides profile)
    #[arg(long, env = "FOODIE_USER_ID", global = true)]
    pub user_id: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FOODIE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "FOODIE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "FOODIE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// View and edit the signed-in user's wishlist
    #[command(alias = "wl")]
    Wishlist(WishlistArgs),

    /// Browse and manage admin notifications
    #[command(alias = "notif", alias = "n")]
    Notifications(NotificationsArgs),

    /// Order payment operations
    Orders(OrdersArgs),

    /// Cart operations
    Cart(CartArgs),

    /// Manage CLI configuration, profiles and the stored session
    Config(ConfigArgs),
}

// ── Wishlist ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: WishlistCommand,
}

#[derive(Debug, Subcommand)]
pub enum WishlistCommand {
    /// Show the wishlist
    #[command(alias = "ls")]
    Show,

    /// Add a product
    Add {
        /// Product ID
        product_id: String,
    },

    /// Remove a product
    #[command(alias = "rm")]
    Remove {
        /// Product ID
        product_id: String,
    },

    /// Remove every product
    Clear,

    /// Check whether a product is on the wishlist
    Contains {
        /// Product ID
        product_id: String,
    },
}

// ── Notifications ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct NotificationsArgs {
    #[command(subcommand)]
    pub command: NotificationsCommand,
}

#[derive(Debug, Subcommand)]
pub enum NotificationsCommand {
    /// List notifications, ten per page
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
    },

    /// Show the unread count
    Unread,

    /// Open a notification, marking it read
    View {
        /// Notification ID
        id: String,
    },

    /// Mark every notification read
    ReadAll,

    /// Delete a notification
    #[command(alias = "rm")]
    Delete {
        /// Notification ID
        id: String,
    },
}

// ── Orders ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OrdersArgs {
    #[command(subcommand)]
    pub command: OrdersCommand,
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    /// Confirm a gateway payment with the backend
    Verify {
        /// Gateway order ID
        #[arg(long)]
        order_id: String,

        /// Gateway payment ID
        #[arg(long)]
        payment_id: String,

        /// Gateway signature
        #[arg(long)]
        signature: String,
    },
}

// ── Cart ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Empty the signed-in user's cart
    Clear,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the configuration (tokens redacted)
    Show,

    /// Store a session for the active profile
    ///
    /// Takes the user id from the global --user-id and the token from the
    /// global --token, prompting for the token when it is omitted.
    Login {
        /// Display name
        #[arg(long)]
        user_name: Option<String>,

        /// Save the token in the config file instead of the system keyring
        #[arg(long)]
        plaintext: bool,
    },

    /// Forget the stored session for the active profile
    Logout,
}
