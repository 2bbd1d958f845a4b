//! Per-file queries and icon settings

use anyhow::Result;

use super::output::Output;
use super::session::Session;

pub fn info(session: &Session, output: &Output, path: &str) -> Result<()> {
    let key = session.key_for(path, output);
    let db = session.load(output)?;

    let tags = match db.path_tags(&key) {
        Ok(tags) => tags,
        Err(e) => {
            if output.is_json() {
                output.data(&serde_json::json!({ "path": key, "tags": [] }));
            } else {
                println!("{}", e);
            }
            return Ok(());
        }
    };

    if output.is_json() {
        let items: Vec<_> = tags
            .iter()
            .map(|name| serde_json::json!({ "name": name, "color": db.tag_color(name) }))
            .collect();
        output.data(&serde_json::json!({ "path": key, "tags": items }));
    } else {
        println!("Tags for {}:", key);
        for name in tags {
            println!("  • {}", db.paint_tag(name));
        }
    }

    Ok(())
}

pub fn with_tag(session: &Session, output: &Output, tags: &[String]) -> Result<()> {
    let db = session.load(output)?;

    let files = match db.files_with_tags(tags) {
        Ok(files) => files,
        Err(e) => {
            output.error(&e.to_string());
            return Ok(());
        }
    };
    output.verbose_ctx("withtag", &format!("{} match(es) for {}", files.len(), tags.join(", ")));

    if output.is_json() {
        output.data(&files);
    } else if files.is_empty() {
        println!("No files with tag {}", tags.join(", "));
    } else {
        for file in files {
            println!("  • {}", file);
        }
    }

    Ok(())
}

pub fn set_icon(session: &Session, output: &Output, extension: &str, glyph: &str) -> Result<()> {
    let mut db = session.load(output)?;
    let ext = db.set_icon(extension, glyph);
    session.save(&db, output)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "extension": ext, "icon": glyph }));
    } else {
        output.success(&format!("Set icon for .{} -> {}", ext, glyph));
    }

    Ok(())
}
