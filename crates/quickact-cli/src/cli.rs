use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "quickact")]
#[command(version, about = "QuickAct - reaction-driven action dispatch")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (defaults to ~/.local/share/quickact/quickact.db)
    #[arg(long, global = true, env = "QUICKACT_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tracked messages
    List,

    /// Show one tracked message in full
    Show {
        /// Platform message id
        message_id: u64,
    },

    /// Remove a tracked message from the store
    Disarm {
        /// Platform message id
        message_id: u64,
    },

    /// Emoji-to-action mappings
    Actions {
        #[command(subcommand)]
        command: Option<ActionCommands>,
    },

    /// Export tracked messages to a legacy JSON handler file
    Export {
        /// Destination file path
        path: String,
    },

    /// Import tracked messages from a legacy JSON handler file
    Import {
        /// Source file path
        path: String,
    },
}

#[derive(Subcommand)]
pub enum ActionCommands {
    /// Show the effective emoji-to-action table
    List,

    /// Map an emoji to an action, overriding the default table
    Set {
        emoji: String,
        /// Action name, e.g. create_ticket or pin_message
        action: String,
    },

    /// Remove an emoji override
    Unset { emoji: String },
}
