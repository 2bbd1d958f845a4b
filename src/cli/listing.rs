//! Tag-aware directory listing
//!
//! Directories come first, then files, each group sorted by name. Every line
//! is `<icon> <name>` followed by the entry's colored tags. Directory icon
//! and name are always blue.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use super::session::Session;
use crate::domain::{canonical_key, Color, Database, IconSet};

/// One entry of a listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub directory: bool,
    /// Canonical path used to look up tags
    pub key: String,
}

/// Reads a directory and returns its entries, directories first
pub fn read_entries(dir: &Path, home: &Path, show_hidden: bool) -> Result<Vec<ListingEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read entry in {}", dir.display()))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if !show_hidden && name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        let item = ListingEntry {
            key: canonical_key(&path.to_string_lossy(), dir, home),
            directory: path.is_dir(),
            name,
        };

        if item.directory {
            dirs.push(item);
        } else {
            files.push(item);
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));

    dirs.extend(files);
    Ok(dirs)
}

/// Renders one listing line
pub fn render_line(db: &Database, entry: &ListingEntry, icons: &IconSet) -> String {
    let icon = db.icon_for(&entry.name, entry.directory, icons);
    let base = format!("{} {}", icon, entry.name);
    let base = if entry.directory {
        Color::Blue.paint(&base)
    } else {
        base
    };

    let tags = db
        .paths
        .get(&entry.key)
        .map(|tags| db.format_tags(tags))
        .unwrap_or_default();

    if tags.is_empty() {
        base
    } else {
        format!("{} {}", base, tags)
    }
}

pub fn list(session: &Session, output: &Output, dir: Option<&Path>, show_hidden: bool) -> Result<()> {
    let config = &session.config;
    let dir = match dir {
        Some(dir) => config.expand(dir),
        None => config.cwd.clone(),
    };
    output.verbose_ctx("ls", &format!("Listing {} (hidden: {})", dir.display(), show_hidden));

    let db = session.load(output)?;
    let entries = read_entries(&dir, &config.home, show_hidden)?;

    if output.is_json() {
        let items: Vec<_> = entries
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "name": entry.name,
                    "directory": entry.directory,
                    "icon": db.icon_for(&entry.name, entry.directory, &config.user.icons),
                    "tags": db.paths.get(&entry.key).cloned().unwrap_or_default(),
                })
            })
            .collect();
        output.data(&items);
    } else {
        for entry in &entries {
            println!("{}", render_line(&db, entry, &config.user.icons));
        }
    }

    Ok(())
}
