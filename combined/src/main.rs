//! Combined binary for development - runs all services in one process.

use std::env;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::DatabaseConfig;
use enrollment_service_lib::config::EnrollmentServiceConfig;
use storage::MigrateAction;

#[derive(Parser)]
#[command(name = "learning-platform")]
#[command(about = "Combined online learning services binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "5001")]
        user_port: u16,
        #[arg(long, default_value = "5002")]
        course_port: u16,
        #[arg(long, default_value = "5003")]
        enrollment_port: u16,
        #[arg(long, default_value = "5005")]
        analytics_port: u16,
        #[arg(long, default_value = "5006")]
        feedback_port: u16,
    },
    /// Run database migrations for the shared database
    Migrate {
        #[arg(value_enum)]
        action: MigrateAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let database = DatabaseConfig::from_env("LEARNING_PLATFORM");

    match cli.command {
        Commands::Serve {
            host,
            user_port,
            course_port,
            enrollment_port,
            analytics_port,
            feedback_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  User service:       http://{}:{}", host, user_port);
            info!("  Course service:     http://{}:{}", host, course_port);
            info!("  Enrollment service: http://{}:{}", host, enrollment_port);
            info!("  Analytics service:  http://{}:{}", host, analytics_port);
            info!("  Feedback service:   http://{}:{}", host, feedback_port);

            // Migrate once so the services don't race on the shared schema
            storage::run_migrations(&database.url, MigrateAction::Up).await?;

            // Peers are local unless explicitly configured otherwise
            let mut enrollment_config = EnrollmentServiceConfig::from_env()?;
            enrollment_config.service = enrollment_config
                .service
                .with_address(&host, enrollment_port);
            if env::var("USER_SERVICE_URL").is_err() {
                enrollment_config.user_service_url = format!("http://127.0.0.1:{}", user_port);
            }
            if env::var("COURSE_SERVICE_URL").is_err() {
                enrollment_config.course_service_url =
                    format!("http://127.0.0.1:{}", course_port);
            }

            let user_host = host.clone();
            let user_handle = tokio::spawn(async move {
                if let Err(e) = user_service_lib::run_embedded(&user_host, user_port).await {
                    error!("User service failed: {}", e);
                }
            });

            let course_host = host.clone();
            let course_handle = tokio::spawn(async move {
                if let Err(e) = course_service_lib::run_embedded(&course_host, course_port).await
                {
                    error!("Course service failed: {}", e);
                }
            });

            let enrollment_handle = tokio::spawn(async move {
                if let Err(e) =
                    enrollment_service_lib::serve(enrollment_config).await
                {
                    error!("Enrollment service failed: {}", e);
                }
            });

            let analytics_host = host.clone();
            let analytics_handle = tokio::spawn(async move {
                if let Err(e) =
                    analytics_service_lib::run_embedded(&analytics_host, analytics_port).await
                {
                    error!("Analytics service failed: {}", e);
                }
            });

            let feedback_host = host;
            let feedback_handle = tokio::spawn(async move {
                if let Err(e) =
                    feedback_service_lib::run_embedded(&feedback_host, feedback_port).await
                {
                    error!("Feedback service failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = user_handle => error!("User service exited unexpectedly"),
                _ = course_handle => error!("Course service exited unexpectedly"),
                _ = enrollment_handle => error!("Enrollment service exited unexpectedly"),
                _ = analytics_handle => error!("Analytics service exited unexpectedly"),
                _ = feedback_handle => error!("Feedback service exited unexpectedly"),
            }
        }
        Commands::Migrate { action } => {
            storage::run_migrations(&database.url, action).await?;
        }
    }

    Ok(())
}
