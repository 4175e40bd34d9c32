//! CLI module

pub mod serve;
pub mod tasks;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::storage::config::Config;

#[derive(Parser)]
#[command(name = "todo")]
#[command(version)]
#[command(about = "Tagged to-do list with a JSON-over-HTTP API")]
pub struct Cli {
    /// Task file (overrides storage.path from the config file)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (defaults to ~/.todo/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server (default)
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Keep tasks in memory only; nothing is written to disk
        #[arg(long)]
        ephemeral: bool,
        /// Don't fetch motivational quotes on completion
        #[arg(long)]
        no_quotes: bool,
    },
    /// List tasks
    List {
        /// Group tasks by tag
        #[arg(long)]
        by_tag: bool,
    },
    /// Add a task
    Add {
        #[arg(long)]
        tag: String,
        #[arg(long)]
        description: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },
    /// Change some fields of a task
    Update {
        id: u64,
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Mark a task completed
    Complete { id: u64 },
    /// Flip a task between completed and pending
    Toggle { id: u64 },
    /// Delete a task
    Delete { id: u64 },
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(file) = &self.file {
            config.storage.path = file.clone();
        }
        if let Some(Commands::Serve {
            port,
            host,
            no_quotes,
            ..
        }) = &self.command
        {
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if *no_quotes {
                config.quote.enabled = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from([
            "todo", "serve", "--port", "8081", "--host", "127.0.0.1", "--no-quotes", "--file",
            "/tmp/t.json",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(!config.quote.enabled);
        assert_eq!(config.storage.path, PathBuf::from("/tmp/t.json"));
    }

    #[test]
    fn test_update_parses_optional_fields() {
        let cli = Cli::try_parse_from(["todo", "update", "3", "--completed", "false"]).unwrap();
        match cli.command {
            Some(Commands::Update {
                id,
                tag,
                completed,
                ..
            }) => {
                assert_eq!(id, 3);
                assert!(tag.is_none());
                assert_eq!(completed, Some(false));
            }
            _ => panic!("expected update command"),
        }
    }
}
