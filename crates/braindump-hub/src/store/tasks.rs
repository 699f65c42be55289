use anyhow::Result;
use braindump_shared::schemas::{ChecklistItem, NewTask, Task, TaskPatch, TaskStatus};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};

use super::{now_timestamp, parse_text_column};

/// Malformed JSON reads back as an empty checklist instead of failing the row.
fn safe_checklist_parse(value: Option<String>) -> Vec<ChecklistItem> {
    value
        .and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn non_blank(description: Option<&str>) -> Option<&str> {
    description.filter(|d| !d.trim().is_empty())
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        text: row.get("text")?,
        description: row.get("description")?,
        checklist: safe_checklist_parse(row.get("checklist")?),
        category: parse_text_column(row, "category")?,
        status: parse_text_column(row, "status")?,
        added: row.get("added")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks ORDER BY created_at DESC, id DESC")?;
    let rows = stmt.query_map([], row_to_task)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn get_task(conn: &Connection, id: i64) -> Result<Option<Task>> {
    let task = conn
        .query_row("SELECT * FROM tasks WHERE id = ?1", [id], row_to_task)
        .optional()?;
    Ok(task)
}

pub fn create_task(conn: &Connection, new: &NewTask) -> Result<Task> {
    let added = chrono::Local::now().format("%d/%m/%Y").to_string();
    conn.execute(
        "INSERT INTO tasks (text, description, checklist, category, status, added, created_at)
         VALUES (?1, ?2, '[]', ?3, ?4, ?5, ?6)",
        rusqlite::params![
            new.text,
            non_blank(new.description.as_deref()),
            new.category.as_str(),
            TaskStatus::Todo.as_str(),
            added,
            now_timestamp(),
        ],
    )?;

    let id = conn.last_insert_rowid();
    get_task(conn, id)?.ok_or_else(|| anyhow::anyhow!("failed to create task"))
}

/// Writes only the fields present in the patch. Returns `None` when no row
/// has the patch's id.
pub fn update_task(conn: &Connection, patch: &TaskPatch) -> Result<Option<Task>> {
    let mut sets: Vec<&str> = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if let Some(status) = patch.status {
        sets.push("status = ?");
        args.push(Value::Text(status.as_str().into()));
    }
    if let Some(category) = patch.category {
        sets.push("category = ?");
        args.push(Value::Text(category.as_str().into()));
    }
    if let Some(ref text) = patch.text {
        sets.push("text = ?");
        args.push(Value::Text(text.clone()));
    }
    if let Some(ref description) = patch.description {
        sets.push("description = ?");
        args.push(match non_blank(Some(description)) {
            Some(d) => Value::Text(d.to_string()),
            None => Value::Null,
        });
    }
    if let Some(ref checklist) = patch.checklist {
        sets.push("checklist = ?");
        args.push(Value::Text(serde_json::to_string(checklist)?));
    }

    if sets.is_empty() {
        return get_task(conn, patch.id);
    }

    args.push(Value::Integer(patch.id));
    let sql = format!("UPDATE tasks SET {} WHERE id = ?", sets.join(", "));
    let changed = conn.execute(&sql, rusqlite::params_from_iter(args))?;
    if changed == 0 {
        return Ok(None);
    }
    get_task(conn, patch.id)
}

pub fn delete_task(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM tasks WHERE id = ?1", [id])?;
    Ok(changed > 0)
}
