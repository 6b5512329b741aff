//! # Taskboard
//!
//! A single-user task board served over HTTP, backed by SQLite.
//!
//! ## Features
//!
//! - **Task Management**: Add tasks with a title and optional due date,
//!   toggle completion, edit, and delete
//! - **Board View**: One server-rendered page showing open and completed
//!   tasks side by side
//! - **Sorting**: List tasks by creation time or due date in either
//!   direction; undated tasks always sort after dated ones
//! - **Durable Storage**: Single `tasks` table with versioned schema
//!   migrations applied at startup
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::db::tasks::Tasks;
//! use taskboard::libs::config::Config;
//! use taskboard::libs::task::{SortOrder, TaskFilter};
//!
//! # fn run(config: &Config) -> Result<(), taskboard::libs::error::AppError> {
//! let tasks = Tasks::new(config)?;
//! tasks.insert("Buy milk", None)?;
//! let open = tasks.fetch(TaskFilter::Completed(false), SortOrder::CreatedNew)?;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod libs;
pub mod web;
