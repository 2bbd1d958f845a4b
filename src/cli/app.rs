//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::session::Session;
use super::{file, listing, tag};
use crate::storage::{Config, DatabaseStore};

#[derive(Parser)]
#[command(name = "pricetag")]
#[command(author, version, about = "Attach colored tags to files and list them")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Database file (default: ./.pricetagdb.json if present, else ~/.pricetagdb.json)
    #[arg(long, global = true, env = "PRICETAG_DB")]
    pub db: Option<PathBuf>,

    /// Show hidden entries in `ls` (accepted before or after the action)
    #[arg(long, short = 'a', global = true)]
    pub all: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new tag with a color (red, orange, yellow, green, blue, purple)
    #[command(name = "createtag")]
    CreateTag {
        /// Tag name
        name: String,

        /// Tag color
        color: String,
    },

    /// Attach existing tag(s) to path(s)
    Tag {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<String>,

        /// Tag name(s), comma-separated or repeated
        #[arg(long, short = 't', required = true, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Detach tag(s) from path(s)
    Untag {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<String>,

        /// Tag name(s), comma-separated or repeated
        #[arg(long, short = 't', required = true, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// Remove every tag from path(s)
    Clear {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Show the tags on a path
    Info {
        /// File or directory
        path: String,
    },

    /// List registered tags
    #[command(name = "listtags")]
    ListTags,

    /// List paths carrying every given tag
    #[command(name = "withtag")]
    WithTag {
        /// Tag name(s)
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// List a directory with icons and tags
    Ls {
        /// Directory to list (defaults to current directory)
        dir: Option<PathBuf>,
    },

    /// Map a file extension to an icon shown by `ls`
    #[command(name = "seticon")]
    SetIcon {
        /// Extension, with or without the leading dot
        extension: String,

        /// Icon glyph
        icon: String,
    },

    /// Generate shell completions
    #[command(hide = true)]
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("pricetag starting");

    let explicit_db = cli.db;
    let show_hidden = cli.all;
    let session = || open_session(explicit_db.clone(), &output);

    let Some(command) = cli.command else {
        return print_usage();
    };

    match command {
        Commands::CreateTag { name, color } => tag::create_tag(&session()?, &output, &name, &color)?,
        Commands::Tag { paths, tags } => tag::tag(&session()?, &output, &paths, &tags)?,
        Commands::Untag { paths, tags } => tag::untag(&session()?, &output, &paths, &tags)?,
        Commands::Clear { paths } => tag::clear(&session()?, &output, &paths)?,
        Commands::ListTags => tag::list_tags(&session()?, &output)?,

        Commands::Info { path } => file::info(&session()?, &output, &path)?,
        Commands::WithTag { tags } => file::with_tag(&session()?, &output, &tags)?,
        Commands::SetIcon { extension, icon } => {
            file::set_icon(&session()?, &output, &extension, &icon)?
        }

        Commands::Ls { dir } => listing::list(&session()?, &output, dir.as_deref(), show_hidden)?,

        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pricetag", &mut std::io::stdout());
        }

        Commands::Unknown(args) => {
            let action = args.first().map(String::as_str).unwrap_or_default();
            output.verbose_ctx("dispatch", &format!("Unknown action: {}", action));
            return print_usage();
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Resolves configuration and the database file, creating it if missing
fn open_session(explicit_db: Option<PathBuf>, output: &Output) -> Result<Session> {
    let config = Config::load()?;
    let store = DatabaseStore::new(config.database_path(explicit_db.as_deref()));
    output.verbose_ctx("store", &format!("Using database {}", store.path().display()));

    // A failed create is not fatal; loading treats a missing file as empty
    match store.ensure_exists() {
        Ok(true) => output.verbose_ctx("store", "Created empty database"),
        Ok(false) => {}
        Err(e) => output.error(&e.to_string()),
    }

    Ok(Session::new(config, store))
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    println!();
    Ok(())
}
