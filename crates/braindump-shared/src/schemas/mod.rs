pub mod question;
pub mod session;
pub mod task;

pub use question::*;
pub use session::*;
pub use task::*;

/// Returned when a wire string does not name a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_enums_use_lowercase_wire_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Archived).unwrap(),
            "\"archived\""
        );
        assert_eq!(
            serde_json::to_string(&TaskCategory::Creative).unwrap(),
            "\"creative\""
        );
        assert_eq!(
            serde_json::to_string(&QuestionMode::Crisis).unwrap(),
            "\"crisis\""
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = "blocked".parse::<TaskStatus>().unwrap_err();
        assert_eq!(err.kind, "task status");
        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
        assert!(serde_json::from_str::<TaskCategory>("\"misc\"").is_err());
    }

    #[test]
    fn as_str_and_parse_agree() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
        for category in TaskCategory::ALL {
            assert_eq!(category.as_str().parse::<TaskCategory>().unwrap(), category);
        }
        for mode in QuestionMode::ALL {
            assert_eq!(mode.as_str().parse::<QuestionMode>().unwrap(), mode);
        }
    }

    #[test]
    fn task_patch_omits_unset_fields() {
        let patch = TaskPatch::new(7).with_status(TaskStatus::Todo);
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "status": "todo"}));
        assert!(TaskPatch::new(7).is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn session_answer_uses_camel_case() {
        let answer: SessionAnswer = serde_json::from_value(serde_json::json!({
            "questionIndex": 2,
            "category": "Brain",
            "question": "Q",
            "answer": "  ",
        }))
        .unwrap();
        assert_eq!(answer.question_index, 2);
        assert!(answer.is_blank());
    }
}
