use anyhow::Result;
use braindump_shared::schemas::{NewSession, Session, SessionAnswer};
use rusqlite::{Connection, OptionalExtension};

use super::{now_timestamp, parse_text_column};

fn row_to_session(row: &rusqlite::Row) -> rusqlite::Result<Session> {
    Ok(Session {
        id: row.get("id")?,
        mode: parse_text_column(row, "mode")?,
        created_at: row.get("created_at")?,
        exported_at: row.get("exported_at")?,
        answers: Vec::new(),
    })
}

fn row_to_answer(row: &rusqlite::Row) -> rusqlite::Result<SessionAnswer> {
    Ok(SessionAnswer {
        question_index: row.get("question_index")?,
        category: row.get("category")?,
        question: row.get("question")?,
        answer: row.get("answer")?,
    })
}

/// Inserts the session row, then one row per non-blank answer. The inserts
/// are not wrapped in a transaction: a failure part way leaves the session
/// with the answers written so far.
pub fn create_session(conn: &Connection, new: &NewSession) -> Result<Session> {
    conn.execute(
        "INSERT INTO sessions (mode, created_at) VALUES (?1, ?2)",
        rusqlite::params![new.mode.as_str(), now_timestamp()],
    )?;
    let id = conn.last_insert_rowid();

    let mut stmt = conn.prepare(
        "INSERT INTO session_answers (session_id, question_index, category, question, answer)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for answer in new.answers.iter().filter(|a| !a.is_blank()) {
        stmt.execute(rusqlite::params![
            id,
            answer.question_index,
            answer.category,
            answer.question,
            answer.answer,
        ])?;
    }

    get_session(conn, id)?.ok_or_else(|| anyhow::anyhow!("failed to create session"))
}

pub fn session_answers(conn: &Connection, session_id: i64) -> Result<Vec<SessionAnswer>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM session_answers WHERE session_id = ?1 ORDER BY question_index ASC, id ASC",
    )?;
    let rows = stmt.query_map([session_id], row_to_answer)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn get_session(conn: &Connection, id: i64) -> Result<Option<Session>> {
    let session = conn
        .query_row("SELECT * FROM sessions WHERE id = ?1", [id], row_to_session)
        .optional()?;
    match session {
        Some(mut session) => {
            session.answers = session_answers(conn, session.id)?;
            Ok(Some(session))
        }
        None => Ok(None),
    }
}

/// Newest first, each with its answers.
pub fn list_sessions(conn: &Connection) -> Result<Vec<Session>> {
    let mut stmt = conn.prepare("SELECT * FROM sessions ORDER BY created_at DESC, id DESC")?;
    let mut sessions = stmt
        .query_map([], row_to_session)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    for session in &mut sessions {
        session.answers = session_answers(conn, session.id)?;
    }
    Ok(sessions)
}

pub fn delete_session(conn: &Connection, id: i64) -> Result<bool> {
    let changed = conn.execute("DELETE FROM sessions WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

pub fn mark_exported(conn: &Connection, id: i64) -> Result<Option<Session>> {
    let changed = conn.execute(
        "UPDATE sessions SET exported_at = ?1 WHERE id = ?2",
        rusqlite::params![now_timestamp(), id],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_session(conn, id)
}
