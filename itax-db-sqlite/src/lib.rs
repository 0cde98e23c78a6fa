//! SQLite persistence for saved tax profiles.
//!
//! Provides [`SqliteProfileStore`], an implementation of
//! [`itax_core::ProfileStore`], and [`SqliteStoreFactory`] for registering
//! the `"sqlite"` backend with a [`itax_core::db::StoreRegistry`].

mod factory;
mod repository;

pub use factory::SqliteStoreFactory;
pub use repository::SqliteProfileStore;
