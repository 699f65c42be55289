//! Prompt library types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
#[ts(rename_all = "lowercase")]
pub enum QuestionMode {
    Normal,
    Crisis,
}

impl QuestionMode {
    pub const ALL: [QuestionMode; 2] = [QuestionMode::Normal, QuestionMode::Crisis];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionMode::Normal => "normal",
            QuestionMode::Crisis => "crisis",
        }
    }
}

impl FromStr for QuestionMode {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(QuestionMode::Normal),
            "crisis" => Ok(QuestionMode::Crisis),
            other => Err(ParseEnumError::new("question mode", other)),
        }
    }
}

impl fmt::Display for QuestionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    #[ts(type = "number")]
    pub id: i64,
    /// Free text, not an enumeration.
    pub category: String,
    pub question: String,
    pub mode: QuestionMode,
    #[ts(type = "number")]
    pub order_index: i64,
    pub created_at: String,
}

/// Body of `POST /api/questions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewQuestion {
    pub category: String,
    pub question: String,
    pub mode: QuestionMode,
}

/// Body of `PATCH /api/questions`. Absent fields are left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionPatch {
    #[ts(type = "number")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub order_index: Option<i64>,
}

impl QuestionPatch {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            category: None,
            question: None,
            order_index: None,
        }
    }

    pub fn with_order_index(mut self, order_index: i64) -> Self {
        self.order_index = Some(order_index);
        self
    }

    pub fn with_text(mut self, category: impl Into<String>, question: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self.question = Some(question.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.question.is_none() && self.order_index.is_none()
    }
}
