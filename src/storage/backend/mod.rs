//! SeaORM storage backend
//!
//! Database storage using SeaORM, supporting SQLite, MySQL/MariaDB and
//! PostgreSQL. The backend is inferred from the database URL.

mod admins;
mod connection;
mod converters;
mod lures;
pub mod retry;
mod views;

use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::errors::{PageSpyError, Result};

pub use connection::{connect_generic, connect_sqlite, run_migrations};

/// Infer the database backend from a URL
pub fn infer_backend_from_url(database_url: &str) -> Result<String> {
    if database_url.starts_with("sqlite://")
        || database_url.ends_with(".db")
        || database_url.ends_with(".sqlite")
        || database_url == ":memory:"
    {
        Ok("sqlite".to_string())
    } else if database_url.starts_with("mysql://") || database_url.starts_with("mariadb://") {
        Ok("mysql".to_string())
    } else if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok("postgres".to_string())
    } else {
        Err(PageSpyError::database_config(format!(
            "Cannot infer database backend from URL: {}. Supported: sqlite://, mysql://, mariadb://, postgres://",
            database_url
        )))
    }
}

/// SeaORM-based storage backend
#[derive(Clone)]
pub struct SeaOrmStorage {
    db: DatabaseConnection,
    backend_name: String,
    retry_config: retry::RetryConfig,
}

impl SeaOrmStorage {
    pub async fn new(database_url: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(PageSpyError::database_config(
                "DATABASE_URL is not set".to_string(),
            ));
        }

        let backend_name = infer_backend_from_url(database_url)?;

        let db = if backend_name == "sqlite" {
            connect_sqlite(database_url).await?
        } else {
            connect_generic(database_url, &backend_name).await?
        };

        let storage = SeaOrmStorage {
            db,
            backend_name,
            retry_config: retry::RetryConfig::default(),
        };

        run_migrations(&storage.db).await?;

        warn!(
            "{} storage initialized.",
            storage.backend_name.to_uppercase()
        );
        Ok(storage)
    }

    pub fn backend_name(&self) -> &str {
        &self.backend_name
    }

    pub fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub(crate) fn retry_config(&self) -> retry::RetryConfig {
        self.retry_config
    }
}
