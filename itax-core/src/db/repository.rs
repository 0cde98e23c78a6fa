use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ProfileSnapshot, TaxProfile};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Profile not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Local persistence for named profile snapshots and the auto-save slot.
///
/// The calculators never touch a store; callers load a profile, compute, and
/// optionally save.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    // Named snapshots
    async fn save(
        &self,
        name: &str,
        profile: &TaxProfile,
    ) -> Result<ProfileSnapshot, StoreError>;
    async fn get(
        &self,
        id: i64,
    ) -> Result<ProfileSnapshot, StoreError>;
    async fn get_by_name(
        &self,
        name: &str,
    ) -> Result<ProfileSnapshot, StoreError>;
    async fn list(&self) -> Result<Vec<ProfileSnapshot>, StoreError>;
    async fn delete(
        &self,
        id: i64,
    ) -> Result<(), StoreError>;

    // Auto-save slot
    async fn save_last_used(
        &self,
        profile: &TaxProfile,
    ) -> Result<(), StoreError>;
    async fn load_last_used(&self) -> Result<Option<TaxProfile>, StoreError>;
}
