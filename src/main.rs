mod api;
mod cli;
mod error;
mod operations;
mod quote;
mod storage;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("todo=info,tower_http=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let mut config = storage::config::load_config(cli.config.as_deref());
    cli.apply_overrides(&mut config);
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        host: None,
        ephemeral: false,
        no_quotes: false,
    });

    match command {
        Commands::Serve { ephemeral, .. } => {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    eprintln!("Failed to create tokio runtime: {}", e);
                    std::process::exit(1);
                }
            };
            runtime.block_on(cli::serve::execute(&config, ephemeral));
        }
        command => {
            if let Err(e) = cli::tasks::execute(&config, command) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
