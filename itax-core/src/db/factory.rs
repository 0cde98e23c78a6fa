use std::collections::HashMap;

use async_trait::async_trait;

use super::repository::{ProfileStore, StoreError};

/// Where saved profiles live.
///
/// `backend` must match the [`StoreFactory::backend_name`] of a registered
/// factory. `connection_string` is handed to that factory unchanged.
///
/// | backend  | connection_string examples       |
/// |----------|----------------------------------|
/// | `sqlite` | `profiles.db`, `:memory:`        |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: String,
    pub connection_string: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "itax-profiles.db".to_string(),
        }
    }
}

/// Opens a [`ProfileStore`] for one backend. Backend crates export a unit
/// struct implementing this and register it with a [`StoreRegistry`].
#[async_trait]
pub trait StoreFactory: Send + Sync {
    /// Lowercase identifier, e.g. `"sqlite"`.
    fn backend_name(&self) -> &'static str;

    /// Opens (creating if needed) the store described by `config`.
    async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn ProfileStore>, StoreError>;
}

/// Store factories keyed by backend name.
#[derive(Default)]
pub struct StoreRegistry {
    factories: HashMap<&'static str, Box<dyn StoreFactory>>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a factory, replacing any previous one with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn StoreFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Registered backend names, sorted.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Opens a store with the factory named by `config.backend`.
    ///
    /// # Errors
    /// * [`StoreError::Configuration`] when no factory has that name.
    /// * Any error the factory itself returns.
    pub async fn create(
        &self,
        config: &StoreConfig,
    ) -> Result<Box<dyn ProfileStore>, StoreError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                StoreError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        factory.create(config).await
    }
}
