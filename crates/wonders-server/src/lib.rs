//! Wonders API Server - HTTP surface for the Wonders catalog
//!
//! This crate maps the `/wonders` resource onto the store in `wonders-core`:
//!
//! ```text
//! GET    /wonders           list all wonders
//! GET    /wonders/{id}      fetch one wonder
//! POST   /wonders           create a wonder (201 + Location)
//! PUT    /wonders/{id}      replace a wonder's fields (204)
//! DELETE /wonders/{id}      delete a wonder (204)
//! GET    /wonders/random    fetch a uniformly random wonder
//! GET    /health            health check
//! ```
//!
//! Each request is validated here, dispatched to the store, and the store's
//! structured result mapped to an HTTP outcome; no raw internal fault ever
//! reaches a client unmapped. The store is seeded from a JSON file once at
//! startup, before the listener accepts connections.

pub mod config;
pub mod error;
pub mod server;

pub use config::ServerConfig;
pub use error::{ApiError, Result};
pub use server::{AppState, WondersServer};

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8080;

/// Default host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default seed file path, relative to the working directory
pub const DEFAULT_SEED_PATH: &str = "seed-data.json";
