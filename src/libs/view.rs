//! Server-rendered HTML for the board.
//!
//! One page: the add form, the sort links, the open list, the completed
//! list, and — when an edit was requested — the edit form rendered inline in
//! place of that task's row. All user-provided text passes through
//! [`escape`] before it reaches the page.

use crate::libs::task::{SortOrder, Task};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SORT_LINKS: [(SortOrder, &str); 4] = [
    (SortOrder::CreatedNew, "Newest first"),
    (SortOrder::CreatedOld, "Oldest first"),
    (SortOrder::DueNear, "Due soon"),
    (SortOrder::DueFar, "Due later"),
];

pub struct View {}

impl View {
    /// Renders the full board page.
    pub fn board(open: &[Task], done: &[Task], editing: Option<&Task>, sort: SortOrder) -> String {
        let mut page = String::new();
        page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Task Board</title>\n</head>\n<body>\n");
        page.push_str("<h1>Task Board</h1>\n");
        page.push_str(&add_form());
        page.push_str(&sort_links(sort));
        page.push_str("<h2>Open</h2>\n");
        page.push_str(&task_list(open, editing));
        page.push_str("<h2>Completed</h2>\n");
        page.push_str(&task_list(done, editing));
        page.push_str("</body>\n</html>\n");

        page
    }
}

fn add_form() -> String {
    concat!(
        "<form method=\"post\" action=\"/add\">\n",
        "<input type=\"text\" name=\"title\" placeholder=\"New task\">\n",
        "<input type=\"date\" name=\"due_date\">\n",
        "<button type=\"submit\">Add</button>\n",
        "</form>\n",
    )
    .to_string()
}

fn sort_links(current: SortOrder) -> String {
    let mut html = String::from("<nav>Sort: ");
    for (order, label) in SORT_LINKS {
        let key = order.as_key().unwrap_or_default();
        if order == current {
            html.push_str(&format!("<strong>{}</strong> ", label));
        } else {
            html.push_str(&format!("<a href=\"/?sort={}\">{}</a> ", key, label));
        }
    }
    html.push_str("</nav>\n");

    html
}

fn task_list(tasks: &[Task], editing: Option<&Task>) -> String {
    if tasks.is_empty() {
        return "<p>No tasks.</p>\n".to_string();
    }

    let mut html = String::from("<ul>\n");
    for task in tasks {
        html.push_str("<li>\n");
        match editing {
            Some(edited) if edited.id == task.id => html.push_str(&edit_form(edited)),
            _ => html.push_str(&task_row(task)),
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n");

    html
}

fn task_row(task: &Task) -> String {
    let title = if task.completed {
        format!("<s>{}</s>", escape(&task.title))
    } else {
        escape(&task.title)
    };
    let due = match task.due_date {
        Some(date) => format!(" (due {})", date.format(DATE_FORMAT)),
        None => String::new(),
    };
    let toggle_label = if task.completed { "Reopen" } else { "Done" };

    format!(
        concat!(
            "{}{}\n",
            "<form method=\"post\" action=\"/complete/{id}\"><button type=\"submit\">{}</button></form>\n",
            "<a href=\"/edit/{id}\">Edit</a>\n",
            "<form method=\"post\" action=\"/delete/{id}\"><button type=\"submit\">Delete</button></form>\n",
        ),
        title,
        due,
        toggle_label,
        id = task.id,
    )
}

fn edit_form(task: &Task) -> String {
    let due_value = task.due_date.map(|date| date.format(DATE_FORMAT).to_string()).unwrap_or_default();

    format!(
        concat!(
            "<form method=\"post\" action=\"/update/{id}\">\n",
            "<input type=\"text\" name=\"title\" value=\"{}\">\n",
            "<input type=\"date\" name=\"due_date\" value=\"{}\">\n",
            "<button type=\"submit\">Save</button>\n",
            "</form>\n",
        ),
        escape(&task.title),
        due_value,
        id = task.id,
    )
}

/// Minimal HTML escaping for text and attribute values.
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }

    out
}
