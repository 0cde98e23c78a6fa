use async_trait::async_trait;

use itax_core::db::{StoreConfig, StoreFactory};
use itax_core::{ProfileStore, StoreError};

use crate::repository::SqliteProfileStore;

/// Maps a [`StoreConfig`] connection string to a sqlx SQLite URL.
///
/// * `":memory:"` becomes an ephemeral in-memory database.
/// * A string already starting with `sqlite:` is passed through.
/// * Anything else is treated as a file path, created if missing.
fn database_url(connection_string: &str) -> String {
    match connection_string {
        ":memory:" => "sqlite::memory:".to_string(),
        s if s.starts_with("sqlite:") => s.to_string(),
        path => format!("sqlite://{}?mode=rwc", path),
    }
}

/// [`StoreFactory`] for SQLite.
///
/// Register this with a [`itax_core::db::StoreRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use itax_core::db::StoreRegistry;
/// use itax_db_sqlite::SqliteStoreFactory;
///
/// let mut registry = StoreRegistry::new();
/// registry.register(Box::new(SqliteStoreFactory));
/// ```
pub struct SqliteStoreFactory;

#[async_trait]
impl StoreFactory for SqliteStoreFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Opens the database described by `config.connection_string` and
    /// brings its schema up to date.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn ProfileStore>, StoreError> {
        let store = SqliteProfileStore::new(&database_url(&config.connection_string))
            .await
            .map_err(|e| StoreError::Connection(format!("{:#}", e)))?;
        store
            .run_migrations()
            .await
            .map_err(|e| StoreError::Database(format!("{:#}", e)))?;
        Ok(Box::new(store))
    }
}

#[cfg(test)]
mod tests {
    use itax_core::db::StoreRegistry;
    use itax_core::TaxProfile;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn memory_config() -> StoreConfig {
        StoreConfig {
            backend: "sqlite".to_string(),
            connection_string: ":memory:".to_string(),
        }
    }

    #[test]
    fn backend_name_is_sqlite() {
        assert_eq!(SqliteStoreFactory.backend_name(), "sqlite");
    }

    #[test]
    fn connection_strings_map_to_urls() {
        assert_eq!(database_url(":memory:"), "sqlite::memory:");
        assert_eq!(database_url("profiles.db"), "sqlite://profiles.db?mode=rwc");
        assert_eq!(database_url("sqlite://x.db"), "sqlite://x.db");
    }

    #[tokio::test]
    async fn creates_in_memory_store() {
        let result = SqliteStoreFactory.create(&memory_config()).await;
        assert!(
            result.is_ok(),
            "failed to create in-memory store: {:#?}",
            result.err()
        );
    }

    #[tokio::test]
    async fn registry_opens_working_sqlite_store() {
        let mut registry = StoreRegistry::new();
        registry.register(Box::new(SqliteStoreFactory));

        let store = registry.create(&memory_config()).await.unwrap();
        let profile = TaxProfile {
            basic_salary: dec!(750000),
            ..Default::default()
        };
        store.save_last_used(&profile).await.unwrap();

        assert_eq!(store.load_last_used().await.unwrap(), Some(profile));
    }
}
