mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{ActionCommands, Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::CliConfig::load();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let db_path = config.resolve_db_path(cli.db_path);
    let db = commands::open(&db_path)?;

    match cli.command {
        Commands::List => commands::tracked::list(&db),
        Commands::Show { message_id } => commands::tracked::show(&db, message_id),
        Commands::Disarm { message_id } => commands::tracked::disarm(&db, message_id),
        Commands::Actions { command } => match command.unwrap_or(ActionCommands::List) {
            ActionCommands::List => commands::actions::list(&db),
            ActionCommands::Set { emoji, action } => commands::actions::set(&db, &emoji, &action),
            ActionCommands::Unset { emoji } => commands::actions::unset(&db, &emoji),
        },
        Commands::Export { path } => commands::transfer::export(&db, path.as_ref()),
        Commands::Import { path } => commands::transfer::import(&db, path.as_ref()),
    }
}
