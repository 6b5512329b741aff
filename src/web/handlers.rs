//! Request handlers.
//!
//! Every request is independent: the handler opens its own store from the
//! startup [`Config`], the connection drops on every exit path. Store calls
//! go through `web::block` so SQLite I/O never parks the async executor.
//! Title validation and due-date parsing happen here at the boundary; the
//! store keeps its own empty-title guard as the last line of defense.

use crate::db::tasks::Tasks;
use crate::libs::config::Config;
use crate::libs::error::AppError;
use crate::libs::task::{SortOrder, Task, TaskFilter};
use crate::libs::view::View;
use actix_web::http::header::{self, ContentType};
use actix_web::{get, post, web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct BoardQuery {
    sort: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TaskForm {
    title: String,
    #[serde(default)]
    due_date: String,
}

#[get("/")]
pub async fn board(config: web::Data<Config>, query: web::Query<BoardQuery>) -> Result<HttpResponse, AppError> {
    let sort = SortOrder::from_key(query.sort.as_deref());
    let (open, done) = fetch_board(config.get_ref().clone(), sort).await?;

    Ok(html(View::board(&open, &done, None, sort)))
}

#[post("/add")]
pub async fn add(config: web::Data<Config>, form: web::Form<TaskForm>) -> Result<HttpResponse, AppError> {
    let title = form.title.trim().to_string();
    if title.is_empty() {
        // Nothing is created; back to the board.
        return Ok(redirect("/"));
    }
    let due_date = parse_due_date(&form.due_date);

    let config = config.get_ref().clone();
    let task = web::block(move || Tasks::new(&config)?.insert(&title, due_date)).await??;
    tracing::info!(id = task.id, "task created");

    Ok(redirect("/"))
}

#[post("/delete/{id}")]
pub async fn delete(config: web::Data<Config>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let config = config.get_ref().clone();
    let affected = web::block(move || Tasks::new(&config)?.delete(id)).await??;
    if affected == 0 {
        tracing::debug!(id, "delete of missing task ignored");
    }

    Ok(redirect("/"))
}

#[post("/complete/{id}")]
pub async fn toggle(config: web::Data<Config>, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let config = config.get_ref().clone();
    let affected = web::block(move || Tasks::new(&config)?.toggle_completed(id)).await??;
    if affected == 0 {
        tracing::debug!(id, "toggle of missing task ignored");
    }

    Ok(redirect("/"))
}

#[get("/edit/{id}")]
pub async fn edit(config: web::Data<Config>, path: web::Path<i64>, query: web::Query<BoardQuery>) -> Result<HttpResponse, AppError> {
    let sort = SortOrder::from_key(query.sort.as_deref());
    let id = path.into_inner();

    let config = config.get_ref().clone();
    let (open, done, editing) = web::block(move || {
        let tasks = Tasks::new(&config)?;
        let open = tasks.fetch(TaskFilter::Completed(false), sort)?;
        let done = tasks.fetch(TaskFilter::Completed(true), sort)?;
        // A missing id renders the plain board, not an error page.
        let editing = tasks.get_by_id(id)?;
        Ok::<_, AppError>((open, done, editing))
    })
    .await??;

    Ok(html(View::board(&open, &done, editing.as_ref(), sort)))
}

#[post("/update/{id}")]
pub async fn update(config: web::Data<Config>, path: web::Path<i64>, form: web::Form<TaskForm>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let title = form.title.trim().to_string();
    if title.is_empty() {
        // Leave the row untouched and send the user back to the edit form.
        return Ok(redirect(&format!("/edit/{}", id)));
    }
    let due_date = parse_due_date(&form.due_date);

    let config = config.get_ref().clone();
    web::block(move || Tasks::new(&config)?.update(id, &title, due_date)).await??;

    Ok(redirect("/"))
}

/// Both board lists, each ordered by the same sort key.
async fn fetch_board(config: Config, sort: SortOrder) -> Result<(Vec<Task>, Vec<Task>), AppError> {
    web::block(move || {
        let tasks = Tasks::new(&config)?;
        let open = tasks.fetch(TaskFilter::Completed(false), sort)?;
        let done = tasks.fetch(TaskFilter::Completed(true), sort)?;
        Ok::<_, AppError>((open, done))
    })
    .await?
}

/// Empty or malformed input means "no deadline"; dates arrive from the
/// `<input type="date">` field in ISO format.
fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther().insert_header((header::LOCATION, location.to_string())).finish()
}
