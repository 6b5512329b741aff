//! CRUD operations on the task table.
//!
//! `Tasks` is the only component that builds SQL for task rows. Query text
//! is assembled from fixed fragments; the sort order is selected through the
//! closed [`SortOrder`] enum, so user input never reaches the query string.

use crate::db::db::Db;
use crate::libs::config::Config;
use crate::libs::error::AppError;
use crate::libs::task::{SortOrder, Task, TaskFilter};
use chrono::{Local, NaiveDate};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const SELECT_TASKS: &str = "SELECT id, title, created_at, due_date, completed FROM tasks";
const INSERT_TASK: &str = "INSERT INTO tasks (title, created_at, due_date, completed) VALUES (?1, ?2, ?3, FALSE)";
const UPDATE_TASK: &str = "UPDATE tasks SET title = ?1, due_date = ?2 WHERE id = ?3";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
// Atomic flip; a concurrent pair of toggles on the same row cannot lose an
// update the way a fetch-then-write pair could.
const TOGGLE_TASK: &str = "UPDATE tasks SET completed = NOT completed WHERE id = ?1";
const WHERE_ID: &str = "WHERE id = ?1";
const WHERE_COMPLETED: &str = "WHERE completed = ?1";

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    /// Opens a store over the configured database.
    ///
    /// The schema must already be in place (see [`Db::init`]).
    pub fn new(config: &Config) -> Result<Tasks, AppError> {
        let db = Db::open(config)?;

        Ok(Tasks { conn: db.conn })
    }

    /// Lists tasks matching `filter`, ordered per `order`.
    pub fn fetch(&self, filter: TaskFilter, order: SortOrder) -> Result<Vec<Task>, AppError> {
        let (mut stmt, params) = match filter {
            TaskFilter::All => (self.conn.prepare(&format!("{}{}", SELECT_TASKS, order_fragment(order)))?, vec![]),
            TaskFilter::Completed(done) => (
                self.conn.prepare(&format!("{} {}{}", SELECT_TASKS, WHERE_COMPLETED, order_fragment(order)))?,
                vec![done],
            ),
        };

        let task_iter = stmt.query_map(params_from_iter(params.iter()), row_to_task)?;
        let mut tasks = Vec::new();
        for task_result in task_iter {
            tasks.push(task_result?);
        }

        Ok(tasks)
    }

    /// Inserts a new task and returns the stored row.
    ///
    /// The id and creation timestamp are assigned here; `completed` starts
    /// false. An empty title is rejected before anything is written — the
    /// handlers validate too, this is the last line of defense.
    pub fn insert(&self, title: &str, due_date: Option<NaiveDate>) -> Result<Task, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::EmptyTitle);
        }

        let created_at = Local::now().naive_local();
        self.conn.execute(INSERT_TASK, params![title, created_at, due_date])?;
        let id = self.conn.last_insert_rowid();

        let task = self.conn.query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], row_to_task)?;
        Ok(task)
    }

    /// Looks up a single task; `None` when the id does not exist.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Task>, AppError> {
        let task = self
            .conn
            .query_row(&format!("{} {}", SELECT_TASKS, WHERE_ID), params![id], row_to_task)
            .optional()?;

        Ok(task)
    }

    /// Overwrites title and due date, leaving `created_at` and `completed`
    /// untouched. Returns the number of affected rows; a missing id affects
    /// zero rows and is not an error.
    pub fn update(&self, id: i64, title: &str, due_date: Option<NaiveDate>) -> Result<usize, AppError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::EmptyTitle);
        }

        let affected = self.conn.execute(UPDATE_TASK, params![title, due_date, id])?;
        Ok(affected)
    }

    /// Removes the row if present; removing a missing id is a no-op.
    pub fn delete(&self, id: i64) -> Result<usize, AppError> {
        let affected = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(affected)
    }

    /// Flips the completion flag in a single atomic statement.
    pub fn toggle_completed(&self, id: i64) -> Result<usize, AppError> {
        let affected = self.conn.execute(TOGGLE_TASK, params![id])?;
        Ok(affected)
    }
}

/// ORDER BY fragment for a sort order. Undated tasks sort after dated ones
/// under both due-date directions.
fn order_fragment(order: SortOrder) -> &'static str {
    match order {
        SortOrder::CreatedNew => " ORDER BY created_at DESC",
        SortOrder::CreatedOld => " ORDER BY created_at ASC",
        SortOrder::DueNear => " ORDER BY (due_date IS NULL), due_date ASC",
        SortOrder::DueFar => " ORDER BY (due_date IS NULL), due_date DESC",
        SortOrder::Unsorted => "",
    }
}

/// The single mapping step from a row to the typed record.
fn row_to_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        created_at: row.get(2)?,
        due_date: row.get(3)?,
        completed: row.get(4)?,
    })
}
