use anyhow::Result;
use braindump_shared::prompts::{self, Prompt};
use braindump_shared::schemas::{NewQuestion, Question, QuestionMode, QuestionPatch};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension};

use super::{now_timestamp, parse_text_column};

fn row_to_question(row: &rusqlite::Row) -> rusqlite::Result<Question> {
    Ok(Question {
        id: row.get("id")?,
        category: row.get("category")?,
        question: row.get("question")?,
        mode: parse_text_column(row, "mode")?,
        order_index: row.get("order_index")?,
        created_at: row.get("created_at")?,
    })
}

pub fn list_questions(conn: &Connection, mode: Option<QuestionMode>) -> Result<Vec<Question>> {
    let (sql, args): (&str, Vec<&str>) = match mode {
        Some(mode) => (
            "SELECT * FROM questions WHERE mode = ?1 ORDER BY order_index ASC, id ASC",
            vec![mode.as_str()],
        ),
        None => (
            "SELECT * FROM questions ORDER BY mode ASC, order_index ASC, id ASC",
            vec![],
        ),
    };
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(rusqlite::params_from_iter(args), row_to_question)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn get_question(conn: &Connection, id: i64) -> Result<Option<Question>> {
    let question = conn
        .query_row("SELECT * FROM questions WHERE id = ?1", [id], row_to_question)
        .optional()?;
    Ok(question)
}

/// Appends to the end of the mode's list.
pub fn create_question(conn: &Connection, new: &NewQuestion) -> Result<Question> {
    conn.execute(
        "INSERT INTO questions (category, question, mode, order_index, created_at)
         VALUES (?1, ?2, ?3,
                 (SELECT COALESCE(MAX(order_index), -1) + 1 FROM questions WHERE mode = ?3),
                 ?4)",
        rusqlite::params![new.category, new.question, new.mode.as_str(), now_timestamp()],
    )?;

    let id = conn.last_insert_rowid();
    get_question(conn, id)?.ok_or_else(|| anyhow::anyhow!("failed to create question"))
}

pub fn update_question(conn: &Connection, patch: &QuestionPatch) -> Result<Option<Question>> {
    let mut sets: Vec<&str> = Vec::new();
    let mut args: Vec<Value> = Vec::new();

    if let Some(ref category) = patch.category {
        sets.push("category = ?");
        args.push(Value::Text(category.clone()));
    }
    if let Some(ref question) = patch.question {
        sets.push("question = ?");
        args.push(Value::Text(question.clone()));
    }
    if let Some(order_index) = patch.order_index {
        sets.push("order_index = ?");
        args.push(Value::Integer(order_index));
    }

    if sets.is_empty() {
        return get_question(conn, patch.id);
    }

    args.push(Value::Integer(patch.id));
    let sql = format!("UPDATE questions SET {} WHERE id = ?", sets.join(", "));
    let changed = conn.execute(&sql, rusqlite::params_from_iter(args))?;
    if changed == 0 {
        return Ok(None);
    }
    get_question(conn, patch.id)
}

pub fn delete_question(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM questions WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

pub fn count_questions(conn: &Connection, mode: QuestionMode) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM questions WHERE mode = ?1",
        [mode.as_str()],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// Replace the whole library with the built-in prompt sets. Returns how many
/// normal and crisis questions were inserted.
pub fn seed_questions(conn: &Connection) -> Result<(usize, usize)> {
    let tx = conn.unchecked_transaction()?;
    tx.execute("DELETE FROM questions", [])?;
    let normal = insert_prompts(&tx, QuestionMode::Normal, prompts::seed(QuestionMode::Normal))?;
    let crisis = insert_prompts(&tx, QuestionMode::Crisis, prompts::seed(QuestionMode::Crisis))?;
    tx.commit()?;
    Ok((normal, crisis))
}

fn insert_prompts(conn: &Connection, mode: QuestionMode, set: &[Prompt]) -> Result<usize> {
    let now = now_timestamp();
    let mut stmt = conn.prepare(
        "INSERT INTO questions (category, question, mode, order_index, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (index, (category, question)) in set.iter().enumerate() {
        stmt.execute(rusqlite::params![category, question, mode.as_str(), index as i64, now])?;
    }
    Ok(set.len())
}
