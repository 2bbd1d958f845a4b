//! pricetag - Colored tags for files
//!
//! Tags are named labels with one of six colors. They are attached to
//! canonical file paths and kept in a single JSON database, and `ls` shows
//! them next to each entry of a directory listing.

pub mod cli;
pub mod domain;
pub mod storage;

pub use domain::{Color, Database, TagError};
pub use storage::{Config, DatabaseStore};
