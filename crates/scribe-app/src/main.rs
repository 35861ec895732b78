//! Scribe application binary - composition root.
//!
//! Ties the Scribe crates together into one executable:
//! 1. Parse CLI arguments and resolve configuration
//! 2. Initialize tracing
//! 3. Open storage (SQLite notes database)
//! 4. Dispatch the requested command, including the interactive editor

use std::sync::Arc;

use clap::Parser;

use scribe_core::{Result, ScribeConfig};
use scribe_editor::Notebook;
use scribe_storage::{Database, NoteRepository};
use scribe_transform::TransformRequest;

mod cli;
mod commands;
mod repl;

use cli::{Cli, Command, ToolsCommand};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Config.
    let config_file = cli.resolve_config_path();
    let config = ScribeConfig::load_or_default(&config_file);

    // Tracing.
    let log_level = cli.resolve_log_level(&config.general.log_level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Scribe v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!(path = %config_file.display(), "Configuration resolved");

    // Storage.
    let data_dir = cli.resolve_data_dir(&config.general.data_dir);
    let db_path = data_dir.join("scribe.db");
    let db = Database::new(&db_path)?;
    tracing::info!(path = %db_path.display(), "Notes database opened");
    let repo = NoteRepository::new(Arc::new(db));

    match cli.command {
        Command::List => commands::list(&repo),
        Command::New { text } => commands::new(&repo, text),
        Command::Show { id } => commands::show(&repo, &id),
        Command::Delete { id } => commands::delete(&repo, &id),
        Command::Tools { command } => match command {
            ToolsCommand::Strip { id, ch } => {
                commands::transform(&repo, &id, TransformRequest::RemoveChar { ch })
            }
            ToolsCommand::Replace { id, find, replace } => {
                commands::transform(&repo, &id, TransformRequest::Replace { find, replace })
            }
        },
        Command::Edit { id } => {
            let mut notebook = Notebook::load(&repo);
            match id {
                Some(id) => notebook.select(commands::parse_note_id(&id)?)?,
                None => {
                    if notebook.is_empty() {
                        notebook.create();
                    }
                }
            }
            repl::run(&mut notebook, &repo, &config).await
        }
    }
}
