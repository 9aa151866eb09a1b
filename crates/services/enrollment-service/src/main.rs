//! `enrollment-service` binary: enrollments over HTTP.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storage::MigrateAction;
use enrollment_service_lib::config::EnrollmentServiceConfig;

#[derive(Parser)]
#[command(name = "enrollment-service", version, about = "Enrollment orchestration across the user and course services")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve {
        /// Bind address, overrides ENROLLMENT_SERVICE_HOST
        #[arg(long)]
        host: Option<String>,
        /// Listening port, overrides ENROLLMENT_SERVICE_PORT
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
            let mut config = EnrollmentServiceConfig::from_env()?;
            config.service = config.service.with_overrides(host, port);
            enrollment_service_lib::serve(config).await
        }
        Command::Migrate { action } => enrollment_service_lib::run_migrations(action).await,
    }
}
