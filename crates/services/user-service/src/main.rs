//! `user-service` binary: registration, login and user lookup over HTTP.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storage::MigrateAction;
use user_service_lib::config::UserServiceConfig;

#[derive(Parser)]
#[command(name = "user-service", version, about = "Accounts, tokens and the User Authority lookup")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Bind address, overrides USER_SERVICE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Listening port, overrides USER_SERVICE_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Manage the database schema
    Migrate {
        #[arg(value_enum)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match Cli::parse().command {
        Command::Serve { host, port } => {
            let mut config = UserServiceConfig::from_env()?;
            config.service = config.service.with_overrides(host, port);
            user_service_lib::serve(config).await
        }
        Command::Migrate { action } => user_service_lib::run_migrations(action).await,
    }
}
