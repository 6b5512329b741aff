//! Database schema migration management.
//!
//! Keeps the schema current across releases: each migration is recorded in a
//! tracking table, pending ones are applied in version order inside a single
//! transaction during startup. Running the full set against an empty file is
//! the idempotent create-if-missing path for a fresh database.

use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// SQL schema for the migrations tracking table.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change: version, label, and the transformation applied
/// within the migration transaction.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: the first revision of the board tracked only a title
        // and a done flag.
        self.add_migration(1, "create_tasks_table", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER NOT NULL PRIMARY KEY,
        title TEXT NOT NULL,
        completed BOOLEAN NOT NULL ON CONFLICT REPLACE DEFAULT FALSE
    )",
                [],
            )?;
            Ok(())
        });

        // Version 2: creation timestamps and optional deadlines. Rows that
        // predate the columns get the migration time as their creation time.
        self.add_migration(2, "add_created_at_and_due_date", |tx| {
            tx.execute("ALTER TABLE tasks ADD COLUMN created_at TIMESTAMP", [])?;
            tx.execute("ALTER TABLE tasks ADD COLUMN due_date DATE", [])?;
            tx.execute("UPDATE tasks SET created_at = datetime('now', 'localtime') WHERE created_at IS NULL", [])?;

            // Index creation time for the chronological board orderings
            tx.execute("CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies all pending migrations in version order.
    ///
    /// The whole batch runs in one transaction: a failing migration rolls
    /// back everything and surfaces the error to the caller, which aborts
    /// startup.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            tracing::debug!("database schema is up to date");
            return Ok(());
        }

        tracing::info!(count = pending.len(), "applying pending schema migrations");

        let tx = conn.transaction()?;
        for migration in pending {
            tracing::info!(version = migration.version, name = migration.name, "running migration");
            (migration.up)(&tx)?;
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    /// Highest applied migration version, 0 for a fresh database.
    fn current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }
}

/// Brings a connection's schema up to the latest version.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}
