//! Canonical path keys
//!
//! Every path stored in the database is keyed by its canonical form:
//! absolute, with a leading `~` expanded to the home directory, and with
//! `.` and `..` segments collapsed. Normalization is purely lexical. The
//! filesystem is never consulted, so symlinks are not followed and the
//! path does not need to exist.

use std::path::{Component, Path, PathBuf};

/// Turns a user-supplied path into its canonical absolute form.
///
/// Relative inputs are resolved against `cwd`. A leading `~` is replaced by
/// `home`, so `~/notes.txt` and `~notes.txt` both land under `home`.
pub fn canonicalize(input: &str, cwd: &Path, home: &Path) -> PathBuf {
    let expanded = match input.strip_prefix('~') {
        Some(rest) => home.join(rest.trim_start_matches(std::path::is_separator)),
        None => PathBuf::from(input),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        cwd.join(expanded)
    };

    normalize(&absolute)
}

/// Canonical form rendered as the string used for database keys
pub fn canonical_key(input: &str, cwd: &Path, home: &Path) -> String {
    canonicalize(input, cwd, home).to_string_lossy().into_owned()
}

/// Collapses `.` and `..` without touching the filesystem.
///
/// `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if out.parent().is_some() {
                    out.pop();
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(Component::RootDir.as_os_str());
    }

    out
}
