//! notes-server: HTTP API for user accounts and the notes they own
//!
//! This crate provides:
//! - Registration and profile endpoints under `/user`
//! - Public note reads and owner-only note mutations under `/notes`
//! - HTTP Basic authentication against Argon2 password hashes
//!
//! # Architecture
//!
//! The server is built on Axum. Handlers talk to storage only through the
//! [`notes_store::Repository`] port held in [`AppState`], so PostgreSQL and
//! the in-memory store are interchangeable. Access control runs as
//! extractors ([`auth::CurrentUser`], [`extract::OwnedNote`]) before the
//! handler body. The middleware stack adds:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - Redaction of internal error text
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use notes_server::{AppState, ServerConfig, routes};
//! use notes_store::MemoryStore;
//!
//! let state = AppState::new(Arc::new(MemoryStore::new()), ServerConfig::default());
//! let app = routes::build_router(state);
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
