//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Action | Arguments | Effect |
//! |--------|-----------|--------|
//! | `createtag` | name, color | Register a new tag |
//! | `tag` | path..., `--tags` tag... | Attach existing tags to paths |
//! | `untag` | path..., `--tags` tag... | Detach tags from paths |
//! | `clear` | path... | Empty a path's tags |
//! | `info` | path | Show a path's tags in color |
//! | `listtags` | | List registered tags |
//! | `withtag` | tag... | List paths carrying the tags |
//! | `ls` | [dir] | Directory listing with icons and tags (`-a` anywhere shows hidden) |
//! | `seticon` | extension, icon | Map an extension to a glyph |
//!
//! Running with no action, or an unknown one, prints usage and exits cleanly.
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable, ANSI-colored output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! pricetag --verbose info notes.txt
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod file;
mod listing;
mod output;
mod session;
mod tag;

pub use app::{run, Cli, Commands};
pub use listing::{read_entries, render_line, ListingEntry};
pub use output::{Output, OutputFormat};
