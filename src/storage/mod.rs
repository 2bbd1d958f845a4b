//! # Storage Layer
//!
//! Persistence for the tag database and user configuration.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Database | Pretty-printed JSON | `~/.pricetagdb.json` or `./.pricetagdb.json` |
//! | Config | TOML | `~/.config/pricetag/config.toml` |
//!
//! ## Write Safety
//!
//! - Saves go to `<file>.tmp` under an exclusive `fs2` lock and are renamed
//!   over the database, so a half-written file is never visible
//! - There is no cross-invocation locking; concurrent invocations race on
//!   load and save and the last save wins
//!
//! ## Key Types
//!
//! - [`DatabaseStore`] - Load, initialize and save the database file
//! - [`Config`] - User configuration and database path resolution

mod config;
mod store;

pub use config::{Config, ConfigError, UserConfig};
pub use store::{DatabaseStore, StoreError, DB_FILENAME};
