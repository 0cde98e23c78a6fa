use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itax_core::{ProfileSnapshot, ProfileStore, StoreError, TaxProfile};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::debug;

pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    /// Connects to `database_url` (a sqlx SQLite URL).
    ///
    /// In-memory databases are private to a connection, so they get a
    /// single pooled connection that is never recycled.
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };
        let pool = options
            .connect(database_url)
            .await
            .with_context(|| format!("Failed to connect to database: {}", database_url))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn to_json(profile: &TaxProfile) -> Result<String, StoreError> {
    serde_json::to_string(profile).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn from_json(json: &str) -> Result<TaxProfile, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn format_datetime(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StoreError> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|e| StoreError::Database(format!("Failed to parse datetime '{}': {}", s, e)))
}

#[derive(FromRow)]
struct ProfileSnapshotRow {
    id: i64,
    name: String,
    profile_json: String,
    saved_at: String,
}

impl TryFrom<ProfileSnapshotRow> for ProfileSnapshot {
    type Error = StoreError;

    fn try_from(row: ProfileSnapshotRow) -> Result<Self, Self::Error> {
        Ok(ProfileSnapshot {
            id: row.id,
            name: row.name,
            profile: from_json(&row.profile_json)?,
            saved_at: parse_datetime(&row.saved_at)?,
        })
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn save(
        &self,
        name: &str,
        profile: &TaxProfile,
    ) -> Result<ProfileSnapshot, StoreError> {
        let now = format_datetime(Utc::now());
        let profile_json = to_json(profile)?;

        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO profile_snapshot (name, profile_json, saved_at)
             VALUES (?, ?, ?)
             ON CONFLICT(name) DO UPDATE SET
                profile_json = excluded.profile_json,
                saved_at = excluded.saved_at
             RETURNING id",
        )
        .bind(name)
        .bind(&profile_json)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        debug!(id, name, "saved profile snapshot");
        self.get(id).await
    }

    async fn get(
        &self,
        id: i64,
    ) -> Result<ProfileSnapshot, StoreError> {
        let row: ProfileSnapshotRow = sqlx::query_as(
            "SELECT id, name, profile_json, saved_at FROM profile_snapshot WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
        .ok_or(StoreError::NotFound)?;

        row.try_into()
    }

    async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<ProfileSnapshot, StoreError> {
        let row: ProfileSnapshotRow = sqlx::query_as(
            "SELECT id, name, profile_json, saved_at FROM profile_snapshot WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?
        .ok_or(StoreError::NotFound)?;

        row.try_into()
    }

    async fn list(&self) -> Result<Vec<ProfileSnapshot>, StoreError> {
        let rows: Vec<ProfileSnapshotRow> = sqlx::query_as(
            "SELECT id, name, profile_json, saved_at FROM profile_snapshot ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        rows.into_iter().map(|r| r.try_into()).collect()
    }

    async fn delete(
        &self,
        id: i64,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM profile_snapshot WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        debug!(id, "deleted profile snapshot");
        Ok(())
    }

    async fn save_last_used(
        &self,
        profile: &TaxProfile,
    ) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO last_used_profile (slot, profile_json, saved_at)
             VALUES (1, ?, ?)
             ON CONFLICT(slot) DO UPDATE SET
                profile_json = excluded.profile_json,
                saved_at = excluded.saved_at",
        )
        .bind(to_json(profile)?)
        .bind(format_datetime(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(())
    }

    async fn load_last_used(&self) -> Result<Option<TaxProfile>, StoreError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT profile_json FROM last_used_profile WHERE slot = 1")
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| StoreError::Database(e.to_string()))?;

        row.map(|(json,)| from_json(&json)).transpose()
    }
}

#[cfg(test)]
mod tests {
    use itax_core::{AgeBand, CityType, FiscalYear};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    async fn setup_test_db() -> SqliteProfileStore {
        let store = SqliteProfileStore::new("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        store
            .run_migrations()
            .await
            .expect("Failed to run migrations");
        store
    }

    fn sample_profile() -> TaxProfile {
        TaxProfile {
            fiscal_year: FiscalYear::Fy2025_26,
            age: AgeBand::SixtyToEighty,
            city: CityType::NonMetro,
            basic_salary: dec!(1200000),
            hra_received: dec!(300000),
            rent_paid: dec!(240000),
            sec80c: dec!(150000),
            sec80d: dec!(50000),
            ..Default::default()
        }
    }

    // =========================================================================
    // Named snapshots
    // =========================================================================

    #[tokio::test]
    async fn save_then_get_round_trips_profile() {
        let store = setup_test_db().await;
        let profile = sample_profile();

        let saved = store.save("retiree", &profile).await.unwrap();
        let loaded = store.get(saved.id).await.unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.profile, profile);
        assert_eq!(loaded.name, "retiree");
    }

    #[tokio::test]
    async fn get_by_name_finds_snapshot() {
        let store = setup_test_db().await;
        store.save("retiree", &sample_profile()).await.unwrap();

        let loaded = store.get_by_name("retiree").await.unwrap();

        assert_eq!(loaded.profile.age, AgeBand::SixtyToEighty);
    }

    #[tokio::test]
    async fn missing_snapshot_is_not_found() {
        let store = setup_test_db().await;

        assert_eq!(store.get(42).await, Err(StoreError::NotFound));
        assert_eq!(store.get_by_name("nobody").await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn saving_existing_name_replaces_profile() {
        let store = setup_test_db().await;
        let first = store.save("me", &sample_profile()).await.unwrap();

        let updated = TaxProfile {
            basic_salary: dec!(1500000),
            ..sample_profile()
        };
        let second = store.save("me", &updated).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(store.list().await.unwrap().len(), 1);
        assert_eq!(
            store.get(first.id).await.unwrap().profile.basic_salary,
            dec!(1500000)
        );
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let store = setup_test_db().await;
        store.save("zeta", &TaxProfile::default()).await.unwrap();
        store.save("alpha", &sample_profile()).await.unwrap();

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();

        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn delete_removes_snapshot() {
        let store = setup_test_db().await;
        let saved = store.save("temp", &sample_profile()).await.unwrap();

        store.delete(saved.id).await.unwrap();

        assert_eq!(store.get(saved.id).await, Err(StoreError::NotFound));
        assert_eq!(store.delete(saved.id).await, Err(StoreError::NotFound));
    }

    // =========================================================================
    // Auto-save slot
    // =========================================================================

    #[tokio::test]
    async fn last_used_is_empty_initially() {
        let store = setup_test_db().await;

        assert_eq!(store.load_last_used().await.unwrap(), None);
    }

    #[tokio::test]
    async fn last_used_keeps_latest_profile() {
        let store = setup_test_db().await;
        store.save_last_used(&TaxProfile::default()).await.unwrap();
        store.save_last_used(&sample_profile()).await.unwrap();

        assert_eq!(store.load_last_used().await.unwrap(), Some(sample_profile()));
    }

    #[tokio::test]
    async fn corrupt_json_is_serialization_error() {
        let store = setup_test_db().await;
        sqlx::query(
            "INSERT INTO profile_snapshot (name, profile_json, saved_at)
             VALUES ('broken', '{not json', '2025-04-01 00:00:00')",
        )
        .execute(store.pool())
        .await
        .expect("Failed to insert corrupt row");

        let err = store.get_by_name("broken").await.unwrap_err();

        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
