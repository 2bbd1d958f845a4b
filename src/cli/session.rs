//! Per-invocation state shared by the command handlers

use anyhow::Result;

use super::output::Output;
use crate::domain::Database;
use crate::storage::{Config, DatabaseStore};

/// Configuration and store resolved once per invocation
pub struct Session {
    pub config: Config,
    pub store: DatabaseStore,
}

impl Session {
    pub fn new(config: Config, store: DatabaseStore) -> Self {
        Self { config, store }
    }

    /// Canonical key for a path given on the command line
    pub fn key_for(&self, input: &str, output: &Output) -> String {
        let key = self.config.key_for(input);
        output.verbose_ctx("path", &format!("{} -> {}", input, key));
        key
    }

    /// Loads the database
    pub fn load(&self, output: &Output) -> Result<Database> {
        let db = self.store.load()?;
        output.verbose_ctx(
            "store",
            &format!(
                "Loaded {} tag(s), {} path(s) from {}",
                db.tags.len(),
                db.paths.len(),
                self.store.path().display()
            ),
        );
        Ok(db)
    }

    /// Saves the database
    pub fn save(&self, db: &Database, output: &Output) -> Result<()> {
        self.store.save(db)?;
        output.verbose_ctx("store", &format!("Saved {}", self.store.path().display()));
        Ok(())
    }
}
