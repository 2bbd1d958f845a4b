//! The tag database
//!
//! A single aggregate holding the tag registry, per-extension icons and the
//! tags attached to each canonical path. All operations here are pure map
//! manipulation; loading and saving live in the storage layer.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use super::color::Color;

/// Current on-disk schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Glyph shown for directories when nothing else is configured
pub const DIRECTORY_ICON: &str = "\u{f07b}";

/// Glyph shown for files whose extension has no icon
pub const FILE_ICON: &str = "\u{f15b}";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TagError {
    #[error("Invalid color '{0}'. Valid colors: {valid}", valid = Color::valid_names())]
    InvalidColor(String),

    #[error("Tag name cannot be empty")]
    EmptyTagName,

    #[error("Tag '{0}' already exists")]
    TagExists(String),

    #[error("Tag '{0}' does not exist")]
    UnknownTag(String),

    #[error("No tags for file {0}")]
    NoTagsForPath(String),
}

/// Fallback glyphs used by the listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconSet {
    /// Glyph for directories
    pub directory: String,
    /// Glyph for files with no extension mapping
    pub file: String,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            directory: DIRECTORY_ICON.to_string(),
            file: FILE_ICON.to_string(),
        }
    }
}

fn default_version() -> u32 {
    SCHEMA_VERSION
}

/// The persisted tag database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    /// Schema version; files written before versioning read as version 1
    #[serde(default = "default_version")]
    pub version: u32,

    /// Registered tags and their colors
    #[serde(default)]
    pub tags: BTreeMap<String, Color>,

    /// Lowercased extension (no dot) to display glyph
    #[serde(default)]
    pub icons: BTreeMap<String, String>,

    /// Canonical path to its tags, in insertion order
    #[serde(default)]
    pub paths: BTreeMap<String, Vec<String>>,
}

impl Default for Database {
    fn default() -> Self {
        Self {
            version: SCHEMA_VERSION,
            tags: BTreeMap::new(),
            icons: BTreeMap::new(),
            paths: BTreeMap::new(),
        }
    }
}

impl Database {
    /// Creates an empty database
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Tag registry
    // -------------------------------------------------------------------------

    /// Registers a new tag. Existing tags are never overwritten.
    pub fn create_tag(&mut self, name: &str, color: Color) -> Result<(), TagError> {
        if name.trim().is_empty() {
            return Err(TagError::EmptyTagName);
        }

        if self.tags.contains_key(name) {
            return Err(TagError::TagExists(name.to_string()));
        }

        self.tags.insert(name.to_string(), color);
        Ok(())
    }

    /// Returns the color of a registered tag
    pub fn tag_color(&self, name: &str) -> Option<Color> {
        self.tags.get(name).copied()
    }

    /// Returns true if the tag is registered
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    fn require_tags(&self, names: &[String]) -> Result<(), TagError> {
        match names.iter().find(|name| !self.has_tag(name)) {
            Some(missing) => Err(TagError::UnknownTag(missing.clone())),
            None => Ok(()),
        }
    }

    // -------------------------------------------------------------------------
    // Path tagging
    // -------------------------------------------------------------------------

    /// Attaches tags to a path.
    ///
    /// Every tag must be registered; nothing changes if one is not. Tags
    /// already on the path are skipped. Returns the tags actually added.
    pub fn tag_path(&mut self, key: &str, names: &[String]) -> Result<Vec<String>, TagError> {
        self.require_tags(names)?;
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let entry = self.paths.entry(key.to_string()).or_default();
        let mut added = Vec::new();

        for name in names {
            if !entry.contains(name) {
                entry.push(name.clone());
                added.push(name.clone());
            }
        }

        Ok(added)
    }

    /// Attaches the same tags to several paths.
    ///
    /// Tags are checked once up front, so an unknown tag leaves every path
    /// untouched. Returns the tags added to each path, in key order.
    pub fn tag_paths(
        &mut self,
        keys: &[String],
        names: &[String],
    ) -> Result<Vec<Vec<String>>, TagError> {
        self.require_tags(names)?;
        keys.iter().map(|key| self.tag_path(key, names)).collect()
    }

    /// Detaches tags from a path.
    ///
    /// Removes every occurrence of each name. When no tags remain the path
    /// entry is deleted. Returns the tags that were actually on the path,
    /// in the order they were attached.
    pub fn untag_path(&mut self, key: &str, names: &[String]) -> Result<Vec<String>, TagError> {
        let entry = self
            .paths
            .get_mut(key)
            .ok_or_else(|| TagError::NoTagsForPath(key.to_string()))?;

        let mut removed: Vec<String> = Vec::new();
        entry.retain(|tag| {
            if !names.contains(tag) {
                return true;
            }
            if !removed.contains(tag) {
                removed.push(tag.clone());
            }
            false
        });

        if entry.is_empty() {
            self.paths.remove(key);
        }

        Ok(removed)
    }

    /// Empties a path's tag list, creating the entry if needed.
    ///
    /// Unlike [`Database::untag_path`], the emptied entry is kept.
    /// Returns how many tags were cleared.
    pub fn clear_path(&mut self, key: &str) -> usize {
        let entry = self.paths.entry(key.to_string()).or_default();
        let cleared = entry.len();
        entry.clear();
        cleared
    }

    /// Returns the tags on a path, failing if there are none
    pub fn path_tags(&self, key: &str) -> Result<&[String], TagError> {
        match self.paths.get(key) {
            Some(tags) if !tags.is_empty() => Ok(tags),
            _ => Err(TagError::NoTagsForPath(key.to_string())),
        }
    }

    /// Returns every path carrying all of the given tags, sorted by path
    pub fn files_with_tags(&self, names: &[String]) -> Result<Vec<&str>, TagError> {
        self.require_tags(names)?;

        // BTreeMap iteration is already in key order
        Ok(self
            .paths
            .iter()
            .filter(|(_, tags)| names.iter().all(|name| tags.contains(name)))
            .map(|(path, _)| path.as_str())
            .collect())
    }

    // -------------------------------------------------------------------------
    // Icons and rendering
    // -------------------------------------------------------------------------

    /// Maps an extension to a glyph. Returns the normalized extension.
    pub fn set_icon(&mut self, extension: &str, glyph: &str) -> String {
        let ext = extension.trim_start_matches('.').to_lowercase();
        self.icons.insert(ext.clone(), glyph.to_string());
        ext
    }

    /// Picks the glyph for a listing entry
    pub fn icon_for<'a>(&'a self, name: &str, is_dir: bool, fallback: &'a IconSet) -> &'a str {
        if is_dir {
            return &fallback.directory;
        }

        self.icons
            .get(&extension(name))
            .map(String::as_str)
            .unwrap_or(fallback.file.as_str())
    }

    /// Renders a tag name in its registered color, or plain if unregistered
    pub fn paint_tag(&self, name: &str) -> String {
        match self.tag_color(name) {
            Some(color) => color.paint(name),
            None => name.to_string(),
        }
    }

    /// Renders tags as space-separated colored `[name]` labels.
    ///
    /// Unregistered names are skipped.
    pub fn format_tags(&self, names: &[String]) -> String {
        names
            .iter()
            .filter_map(|name| {
                self.tag_color(name)
                    .map(|color| color.paint(&format!("[{}]", name)))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Lowercased text after the last `.`, or empty if there is none
pub fn extension(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn db_with_tags() -> Database {
        let mut db = Database::new();
        db.create_tag("work", Color::Blue).unwrap();
        db.create_tag("urgent", Color::Red).unwrap();
        db
    }

    #[test]
    fn create_tag_registers_color() {
        let db = db_with_tags();
        assert_eq!(db.tag_color("work"), Some(Color::Blue));
        assert_eq!(db.tag_color("urgent"), Some(Color::Red));
    }

    #[test]
    fn create_tag_rejects_duplicate_and_keeps_color() {
        let mut db = Database::new();
        db.create_tag("x", Color::Red).unwrap();

        let err = db.create_tag("x", Color::Green).unwrap_err();
        assert_eq!(err, TagError::TagExists("x".to_string()));
        assert_eq!(db.tag_color("x"), Some(Color::Red));
    }

    #[test]
    fn create_tag_rejects_empty_name() {
        let mut db = Database::new();
        assert_eq!(db.create_tag("  ", Color::Red), Err(TagError::EmptyTagName));
        assert!(db.tags.is_empty());
    }

    #[test]
    fn tag_path_requires_registered_tag() {
        let mut db = db_with_tags();

        let err = db.tag_path("/tmp/a.txt", &tags(&["ghost"])).unwrap_err();
        assert_eq!(err, TagError::UnknownTag("ghost".to_string()));
        assert!(!db.paths.contains_key("/tmp/a.txt"));
    }

    #[test]
    fn tag_path_validates_all_before_mutating() {
        let mut db = db_with_tags();

        assert!(db.tag_path("/tmp/a.txt", &tags(&["work", "ghost"])).is_err());
        assert!(db.paths.is_empty());
    }

    #[test]
    fn tag_path_suppresses_duplicates() {
        let mut db = db_with_tags();

        let added = db.tag_path("/tmp/a.txt", &tags(&["work"])).unwrap();
        assert_eq!(added, tags(&["work"]));

        let added = db.tag_path("/tmp/a.txt", &tags(&["work"])).unwrap();
        assert!(added.is_empty());

        db.tag_path("/tmp/a.txt", &tags(&["urgent", "work"])).unwrap();
        assert_eq!(db.paths["/tmp/a.txt"], tags(&["work", "urgent"]));
    }

    #[test]
    fn untag_path_removes_entry_when_empty() {
        let mut db = db_with_tags();
        db.tag_path("/tmp/a.txt", &tags(&["work", "urgent"])).unwrap();

        let removed = db.untag_path("/tmp/a.txt", &tags(&["work"])).unwrap();
        assert_eq!(removed, tags(&["work"]));
        assert_eq!(db.paths["/tmp/a.txt"], tags(&["urgent"]));

        let removed = db.untag_path("/tmp/a.txt", &tags(&["urgent"])).unwrap();
        assert_eq!(removed, tags(&["urgent"]));
        assert!(!db.paths.contains_key("/tmp/a.txt"));
    }

    #[test]
    fn untag_missing_path_never_creates_entry() {
        let mut db = db_with_tags();

        for _ in 0..2 {
            let err = db.untag_path("/tmp/none", &tags(&["work"])).unwrap_err();
            assert_eq!(err, TagError::NoTagsForPath("/tmp/none".to_string()));
        }
        assert!(db.paths.is_empty());
    }

    #[test]
    fn untag_unattached_tag_keeps_others() {
        let mut db = db_with_tags();
        db.tag_path("/tmp/a.txt", &tags(&["work"])).unwrap();

        let removed = db.untag_path("/tmp/a.txt", &tags(&["urgent"])).unwrap();
        assert!(removed.is_empty());
        assert_eq!(db.paths["/tmp/a.txt"], tags(&["work"]));
    }

    #[test]
    fn untag_reports_only_present_tags() {
        let mut db = db_with_tags();
        db.tag_path("/tmp/a.txt", &tags(&["urgent", "work"])).unwrap();
        db.paths.get_mut("/tmp/a.txt").unwrap().push("work".to_string());

        let removed = db.untag_path("/tmp/a.txt", &tags(&["work", "ghost"])).unwrap();
        assert_eq!(removed, tags(&["work"]));
        assert_eq!(db.paths["/tmp/a.txt"], tags(&["urgent"]));
    }

    #[test]
    fn untag_cleared_entry_removes_nothing_and_drops_it() {
        let mut db = db_with_tags();
        db.clear_path("/tmp/a.txt");

        let removed = db.untag_path("/tmp/a.txt", &tags(&["work"])).unwrap();
        assert!(removed.is_empty());
        assert!(!db.paths.contains_key("/tmp/a.txt"));
    }

    #[test]
    fn tag_paths_tags_every_path() {
        let mut db = db_with_tags();
        db.tag_path("/tmp/b.txt", &tags(&["work"])).unwrap();

        let added = db
            .tag_paths(&tags(&["/tmp/a.txt", "/tmp/b.txt"]), &tags(&["work", "urgent"]))
            .unwrap();

        assert_eq!(added, vec![tags(&["work", "urgent"]), tags(&["urgent"])]);
        assert_eq!(db.paths["/tmp/a.txt"], tags(&["work", "urgent"]));
        assert_eq!(db.paths["/tmp/b.txt"], tags(&["work", "urgent"]));
    }

    #[test]
    fn tag_paths_unknown_tag_touches_no_path() {
        let mut db = db_with_tags();
        db.tag_path("/tmp/b.txt", &tags(&["work"])).unwrap();
        let before = db.clone();

        let err = db
            .tag_paths(&tags(&["/tmp/a.txt", "/tmp/b.txt"]), &tags(&["urgent", "ghost"]))
            .unwrap_err();

        assert_eq!(err, TagError::UnknownTag("ghost".to_string()));
        assert_eq!(db, before);
    }

    #[test]
    fn clear_path_keeps_empty_entry() {
        let mut db = db_with_tags();

        assert_eq!(db.clear_path("/tmp/new"), 0);
        assert_eq!(db.paths.get("/tmp/new"), Some(&Vec::new()));

        db.tag_path("/tmp/a.txt", &tags(&["work", "urgent"])).unwrap();
        assert_eq!(db.clear_path("/tmp/a.txt"), 2);
        assert_eq!(db.paths.get("/tmp/a.txt"), Some(&Vec::new()));
    }

    #[test]
    fn path_tags_treats_empty_as_missing() {
        let mut db = db_with_tags();
        db.clear_path("/tmp/a.txt");

        assert!(matches!(db.path_tags("/tmp/a.txt"), Err(TagError::NoTagsForPath(_))));
        assert!(matches!(db.path_tags("/tmp/b.txt"), Err(TagError::NoTagsForPath(_))));

        db.tag_path("/tmp/a.txt", &tags(&["work"])).unwrap();
        assert_eq!(db.path_tags("/tmp/a.txt").unwrap(), &tags(&["work"])[..]);
    }

    #[test]
    fn files_with_tags_sorted() {
        let mut db = db_with_tags();
        db.tag_path("/z/last.txt", &tags(&["work"])).unwrap();
        db.tag_path("/a/first.txt", &tags(&["work", "urgent"])).unwrap();
        db.tag_path("/m/other.txt", &tags(&["urgent"])).unwrap();

        let files = db.files_with_tags(&tags(&["work"])).unwrap();
        assert_eq!(files, vec!["/a/first.txt", "/z/last.txt"]);

        let files = db.files_with_tags(&tags(&["work", "urgent"])).unwrap();
        assert_eq!(files, vec!["/a/first.txt"]);
    }

    #[test]
    fn files_with_tags_unknown_and_empty() {
        let db = db_with_tags();

        let err = db.files_with_tags(&tags(&["ghost"])).unwrap_err();
        assert_eq!(err, TagError::UnknownTag("ghost".to_string()));

        assert!(db.files_with_tags(&tags(&["work"])).unwrap().is_empty());
    }

    #[test]
    fn set_icon_normalizes_extension() {
        let mut db = Database::new();
        assert_eq!(db.set_icon(".RS", "R"), "rs");
        assert_eq!(db.icons.get("rs"), Some(&"R".to_string()));
    }

    #[test]
    fn icon_lookup() {
        let mut db = Database::new();
        db.set_icon("md", "M");
        let fallback = IconSet::default();

        assert_eq!(db.icon_for("README.MD", false, &fallback), "M");
        assert_eq!(db.icon_for("Makefile", false, &fallback), FILE_ICON);
        assert_eq!(db.icon_for("docs.md", true, &fallback), DIRECTORY_ICON);
    }

    #[test]
    fn extension_after_last_dot() {
        assert_eq!(extension("archive.tar.GZ"), "gz");
        assert_eq!(extension("Makefile"), "");
        assert_eq!(extension(".bashrc"), "bashrc");
    }

    #[test]
    fn format_tags_skips_unregistered() {
        let db = db_with_tags();

        let rendered = db.format_tags(&tags(&["work", "ghost", "urgent"]));
        assert_eq!(rendered, "\x1b[34m[work]\x1b[0m \x1b[31m[urgent]\x1b[0m");
        assert_eq!(db.format_tags(&[]), "");
    }

    #[test]
    fn paint_tag_falls_back_to_plain() {
        let db = db_with_tags();
        assert_eq!(db.paint_tag("work"), "\x1b[34mwork\x1b[0m");
        assert_eq!(db.paint_tag("ghost"), "ghost");
    }

    #[test]
    fn reads_older_shapes() {
        let db: Database = serde_json::from_str(r#"{"paths":{"/a":["x"]}}"#).unwrap();
        assert_eq!(db.version, SCHEMA_VERSION);
        assert!(db.tags.is_empty());
        assert!(db.icons.is_empty());
        assert_eq!(db.paths["/a"], tags(&["x"]));

        let db: Database = serde_json::from_str("{}").unwrap();
        assert_eq!(db, Database::new());
    }
}
