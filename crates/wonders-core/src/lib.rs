//! Wonders Core - domain model and storage for the Wonders catalog
//!
//! This crate holds everything below the HTTP surface:
//!
//! - [`Wonder`] / [`WonderDraft`]: the landmark record and its wire-side
//!   payload with case-insensitive field matching
//! - [`WonderStore`]: the in-memory keyed collection with id assignment
//! - [`seed_if_empty`]: the best-effort startup seeding protocol
//!
//! The store and seed loader report structured failures ([`StoreError`],
//! [`SeedError`]); classifying them into HTTP outcomes is the server's job.

pub mod error;
pub mod seed;
pub mod store;
pub mod wonder;

pub use error::{DraftError, SeedError, StoreError};
pub use seed::{load_wonders, seed_if_empty};
pub use store::WonderStore;
pub use wonder::{Wonder, WonderDraft};
