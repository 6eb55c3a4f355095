pub mod commands;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "boxmeup-api")]
#[command(about = "Boxmeup API - inventory of locations, containers and items")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API (default)")]
    Serve {
        #[arg(long, help = "Listen port, overriding PORT/BOXMEUP_API_PORT")]
        port: Option<u16>,

        #[arg(long, help = "Skip applying migrations on startup")]
        no_migrate: bool,
    },

    #[command(about = "Apply database migrations and exit")]
    Migrate,

    #[command(about = "Print the effective configuration (secrets omitted)")]
    Config {
        #[arg(long, help = "Output in JSON format")]
        json: bool,
    },
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let command = cli.command.unwrap_or(Commands::Serve {
        port: None,
        no_migrate: false,
    });

    match command {
        Commands::Serve { port, no_migrate } => {
            commands::serve::handle(config, port, !no_migrate).await
        }
        Commands::Migrate => commands::migrate::handle(config).await,
        Commands::Config { json } => commands::show_config::handle(&config, json),
    }
}
