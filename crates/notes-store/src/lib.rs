//! notes-store: persistence for the notes API
//!
//! This crate provides:
//! - The [`Repository`] port consumed by the HTTP layer
//! - [`Store`], a PostgreSQL adapter built on sqlx with embedded migrations
//! - [`MemoryStore`], an in-process adapter for tests and local runs
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{Repository, Store, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let store = Store::connect(config).await?;
//!
//! let notes = store.find_all_notes().await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use repository::Repository;
pub use store::{Store, StoreConfig};

// Re-export notes-core for downstream crates
pub use notes_core;
