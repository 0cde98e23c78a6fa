pub mod factory;
pub mod repository;

pub use factory::{StoreConfig, StoreFactory, StoreRegistry};
pub use repository::{ProfileStore, StoreError};
