//! Database layer for the taskboard application.
//!
//! Persistence lives in a single SQLite file. The layer owns all SQL: the
//! connection handle, the versioned schema migrations applied at startup,
//! and the task store that every request handler goes through.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::db::{db::Db, tasks::Tasks};
//! use taskboard::libs::config::Config;
//! use taskboard::libs::task::{SortOrder, TaskFilter};
//!
//! # fn run(config: &Config) -> anyhow::Result<()> {
//! Db::init(config)?; // open + migrate, once at startup
//!
//! let tasks = Tasks::new(config)?;
//! tasks.insert("Water the plants", None)?;
//! let open = tasks.fetch(TaskFilter::Completed(false), SortOrder::DueNear)?;
//! # Ok(())
//! # }
//! ```

/// Core database connection handling.
pub mod db;

/// Versioned schema migration system.
pub mod migrations;

/// CRUD operations on the task table.
pub mod tasks;
