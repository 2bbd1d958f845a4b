//! Tag registry and path tagging commands
//!
//! Domain failures (unknown tag, duplicate tag, bad color, untagged path)
//! are reported and the command returns successfully without saving.

use anyhow::Result;

use super::output::Output;
use super::session::Session;
use crate::domain::Color;

pub fn create_tag(session: &Session, output: &Output, name: &str, color: &str) -> Result<()> {
    let color: Color = match color.parse() {
        Ok(color) => color,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(());
        }
    };

    let mut db = session.load(output)?;
    if let Err(e) = db.create_tag(name, color) {
        output.error(&e.to_string());
        return Ok(());
    }
    session.save(&db, output)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "name": name,
            "color": color,
        }));
    } else {
        output.success(&format!("Created tag {} ({})", color.paint(name), color));
    }

    Ok(())
}

pub fn list_tags(session: &Session, output: &Output) -> Result<()> {
    let db = session.load(output)?;

    if output.is_json() {
        let items: Vec<_> = db
            .tags
            .iter()
            .map(|(name, color)| serde_json::json!({ "name": name, "color": color }))
            .collect();
        output.data(&items);
    } else if db.tags.is_empty() {
        println!("No tags available");
    } else {
        println!("Available tags:");
        for (name, color) in &db.tags {
            println!("  • {} ({})", color.paint(name), color);
        }
    }

    Ok(())
}

pub fn tag(session: &Session, output: &Output, paths: &[String], tags: &[String]) -> Result<()> {
    let keys: Vec<String> = paths.iter().map(|path| session.key_for(path, output)).collect();
    let mut db = session.load(output)?;

    let added = match db.tag_paths(&keys, tags) {
        Ok(added) => added,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(());
        }
    };
    session.save(&db, output)?;

    if output.is_json() {
        let items: Vec<_> = keys
            .iter()
            .zip(&added)
            .map(|(key, added)| {
                serde_json::json!({
                    "path": key,
                    "added": added,
                    "tags": db.paths.get(key),
                })
            })
            .collect();
        output.data(&items);
    } else {
        for (key, added) in keys.iter().zip(&added) {
            if added.is_empty() {
                output.success(&format!("{} already has {}", key, tags.join(", ")));
            } else {
                let painted: Vec<_> = added.iter().map(|t| db.paint_tag(t)).collect();
                output.success(&format!("Tagged {} with {}", key, painted.join(", ")));
            }
        }
    }

    Ok(())
}

pub fn untag(session: &Session, output: &Output, paths: &[String], tags: &[String]) -> Result<()> {
    let mut db = session.load(output)?;

    // Paths without an entry are reported and skipped
    let mut untagged = Vec::new();
    for path in paths {
        let key = session.key_for(path, output);
        match db.untag_path(&key, tags) {
            Ok(removed) => untagged.push((key, removed)),
            Err(e) => output.error(&e.to_string()),
        }
    }

    if untagged.is_empty() {
        return Ok(());
    }
    session.save(&db, output)?;

    if output.is_json() {
        let items: Vec<_> = untagged
            .iter()
            .map(|(key, removed)| {
                serde_json::json!({
                    "path": key,
                    "removed": removed,
                    "remaining": db.paths.get(key).cloned().unwrap_or_default(),
                })
            })
            .collect();
        output.data(&items);
    } else {
        for (key, removed) in &untagged {
            let painted: Vec<_> = removed.iter().map(|t| db.paint_tag(t)).collect();
            if removed.is_empty() {
                output.success(&format!("{} has none of {}", key, tags.join(", ")));
            } else if db.paths.contains_key(key) {
                output.success(&format!("Removed {} from {}", painted.join(", "), key));
            } else {
                output.success(&format!(
                    "Removed {} from {} (no tags left)",
                    painted.join(", "),
                    key
                ));
            }
        }
    }

    Ok(())
}

pub fn clear(session: &Session, output: &Output, paths: &[String]) -> Result<()> {
    let mut db = session.load(output)?;

    let mut cleared = Vec::new();
    for path in paths {
        let key = session.key_for(path, output);
        let count = db.clear_path(&key);
        cleared.push((key, count));
    }
    session.save(&db, output)?;

    if output.is_json() {
        let items: Vec<_> = cleared
            .iter()
            .map(|(path, count)| serde_json::json!({ "path": path, "cleared": count }))
            .collect();
        output.data(&items);
    } else {
        for (path, count) in &cleared {
            output.success(&format!("Cleared {} tag(s) from {}", count, path));
        }
    }

    Ok(())
}
