//! Connection setup.

use std::time::Duration;

use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;

use crate::migrations::Migrator;

/// Handle to the shared database.
#[derive(Clone)]
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open a connection and bring the schema up to date.
    pub async fn connect(database_url: &str) -> Result<Self, DbErr> {
        let db = Self::open(database_url).await?;
        Migrator::up(&db.connection, None).await?;
        tracing::info!("Database ready, schema up to date");
        Ok(db)
    }

    /// Open a connection without touching the schema.
    pub async fn open(database_url: &str) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(connect_options(database_url)).await?;
        Ok(Self { connection })
    }

    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }
}

fn connect_options(database_url: &str) -> ConnectOptions {
    let mut options = ConnectOptions::new(database_url);
    options
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    // Every pooled connection to an in-memory SQLite database is a separate database
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }

    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::ConnectionTrait;

    #[tokio::test]
    async fn test_in_memory_schema_shared_across_calls() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        for _ in 0..3 {
            let conn = db.get_connection();
            conn.execute_unprepared("SELECT COUNT(*) FROM enrollments")
                .await
                .unwrap();
        }
    }
}
