pub mod analysis;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use db::SqliteStore;
pub use error::GatehouseError;
pub use service::AccountLifecycle;
pub use store::{KeyValueStore, MemoryStore};
pub use types::{Account, AccountStatus, AdminSettings, Feature};
