//! Journaling session types.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::QuestionMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionAnswer {
    #[ts(type = "number")]
    pub question_index: i64,
    pub category: String,
    pub question: String,
    pub answer: String,
}

impl SessionAnswer {
    /// Blank answers are never persisted.
    pub fn is_blank(&self) -> bool {
        self.answer.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Session {
    #[ts(type = "number")]
    pub id: i64,
    pub mode: QuestionMode,
    pub created_at: String,
    #[serde(default)]
    pub exported_at: Option<String>,
    #[serde(default)]
    pub answers: Vec<SessionAnswer>,
}

/// Body of `POST /api/sessions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSession {
    pub mode: QuestionMode,
    pub answers: Vec<SessionAnswer>,
}
