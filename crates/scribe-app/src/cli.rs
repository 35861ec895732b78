//! CLI argument definitions for the Scribe application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scribe, a dictation-aware plain-text note editor.
#[derive(Parser, Debug)]
#[command(name = "scribe", version, about)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Data directory for the notes database.
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all notes, newest first.
    List,
    /// Create a new note.
    New {
        /// Initial note content.
        #[arg(short = 't', long = "text")]
        text: Option<String>,
    },
    /// Print a note's content.
    Show {
        /// Note id.
        id: String,
    },
    /// Open an interactive editing session on a note.
    Edit {
        /// Note id. Defaults to the newest note, creating one if none exist.
        id: Option<String>,
    },
    /// One-shot text tools applied to a stored note.
    Tools {
        #[command(subcommand)]
        command: ToolsCommand,
    },
    /// Delete a note.
    Delete {
        /// Note id.
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ToolsCommand {
    /// Remove every occurrence of one character.
    Strip {
        /// Note id.
        id: String,
        /// The character to remove, taken literally.
        #[arg(allow_hyphen_values = true)]
        ch: char,
    },
    /// Replace every occurrence of a literal string.
    Replace {
        /// Note id.
        id: String,
        /// Text to find, taken literally. Must not be empty.
        #[arg(allow_hyphen_values = true)]
        find: String,
        /// Replacement text, inserted verbatim.
        #[arg(allow_hyphen_values = true)]
        replace: String,
    },
}

impl Cli {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SCRIBE_CONFIG env var > ~/.scribe/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SCRIBE_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the data directory.
    ///
    /// Priority: --data-dir flag > SCRIBE_DATA_DIR env var > config file value.
    pub fn resolve_data_dir(&self, config_dir: &str) -> PathBuf {
        if let Some(ref p) = self.data_dir {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SCRIBE_DATA_DIR") {
            return PathBuf::from(p);
        }
        expand_home(config_dir)
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > SCRIBE_LOG_LEVEL env var > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        if let Some(ref level) = self.log_level {
            return level.clone();
        }
        if let Ok(level) = std::env::var("SCRIBE_LOG_LEVEL") {
            return level;
        }
        config_level.to_string()
    }
}

/// Expand a leading ~ to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".scribe").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list() {
        let cli = Cli::try_parse_from(["scribe", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_parse_new_with_text() {
        let cli = Cli::try_parse_from(["scribe", "new", "--text", "hello"]).unwrap();
        match cli.command {
            Command::New { text } => assert_eq!(text.as_deref(), Some("hello")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit_without_id() {
        let cli = Cli::try_parse_from(["scribe", "edit"]).unwrap();
        assert!(matches!(cli.command, Command::Edit { id: None }));
    }

    #[test]
    fn test_parse_tools_replace() {
        let cli =
            Cli::try_parse_from(["scribe", "tools", "replace", "some-id", "-", "_"]).unwrap();
        match cli.command {
            Command::Tools {
                command: ToolsCommand::Replace { id, find, replace },
            } => {
                assert_eq!(id, "some-id");
                assert_eq!(find, "-");
                assert_eq!(replace, "_");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["scribe", "list", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_flag_beats_config_value() {
        let cli = Cli::try_parse_from(["scribe", "--log-level", "trace", "list"]).unwrap();
        assert_eq!(cli.resolve_log_level("info"), "trace");
    }
}
