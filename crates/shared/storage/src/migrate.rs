//! Schema management commands shared by every binary.

use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::{MigrationStatus, MigratorTrait};
use tracing::{info, warn};

use crate::{Database, Migrator};

/// What `migrate` should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MigrateAction {
    /// Apply pending migrations
    Up,
    /// Roll back the last migration
    Down,
    /// Print every migration and whether it is applied
    Status,
    /// Drop all tables and apply every migration
    Fresh,
}

/// Run a migration action against `database_url`.
pub async fn run_migrations(
    database_url: &str,
    action: MigrateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let conn = Database::open(database_url).await?.get_connection();

    match action {
        MigrateAction::Up => {
            Migrator::up(&conn, None).await?;
            info!("Migrations applied");
        }
        MigrateAction::Down => {
            Migrator::down(&conn, Some(1)).await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            for (name, applied) in migration_status(&conn).await? {
                println!("[{}] {}", if applied { "x" } else { " " }, name);
            }
        }
        MigrateAction::Fresh => {
            warn!("Dropping all tables");
            Migrator::fresh(&conn).await?;
            info!("Database recreated");
        }
    }

    Ok(())
}

/// Every known migration paired with whether it has been applied.
pub async fn migration_status(conn: &DatabaseConnection) -> Result<Vec<(String, bool)>, DbErr> {
    Ok(Migrator::get_migration_with_status(conn)
        .await?
        .iter()
        .map(|m| (m.name().to_string(), m.status() == MigrationStatus::Applied))
        .collect())
}
