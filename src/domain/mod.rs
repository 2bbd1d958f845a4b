//! Domain models for pricetag
//!
//! Contains the tag database and its operations without any I/O concerns.

mod color;
mod database;
mod path;

pub use color::{Color, RESET};
pub use database::{
    extension, Database, IconSet, TagError, DIRECTORY_ICON, FILE_ICON, SCHEMA_VERSION,
};
pub use path::{canonical_key, canonicalize};
