pub mod calculations;
pub mod db;
pub mod models;

pub use db::repository::{ProfileStore, StoreError};
pub use models::*;
