//! Step-by-step questionnaire state.

use std::collections::HashMap;

use crate::ordering::sorted_for_mode;
use crate::prompts;
use crate::schemas::{NewSession, NewTask, Question, QuestionMode, SessionAnswer, TaskCategory};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptItem {
    pub category: String,
    pub question: String,
}

/// Prompts for a run: the library's questions for `mode` in display order,
/// or the built-in fallback set when the library has none for that mode.
pub fn prompts_for_mode(library: &[Question], mode: QuestionMode) -> Vec<PromptItem> {
    let stored = sorted_for_mode(library, mode);
    if !stored.is_empty() {
        return stored
            .into_iter()
            .map(|q| PromptItem {
                category: q.category.clone(),
                question: q.question.clone(),
            })
            .collect();
    }
    prompts::fallback(mode)
        .iter()
        .map(|(category, question)| PromptItem {
            category: (*category).to_string(),
            question: (*question).to_string(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Next,
    Finished(NewSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KanbanToggle {
    /// Current answer is blank; nothing to turn into a task.
    Ignored,
    /// Category was selected; only the local mark is dropped, the task stays.
    Deselected,
    /// Caller should create this task, then call [`Questionnaire::mark_added`].
    Create(NewTask),
}

#[derive(Debug, Clone)]
pub struct Questionnaire {
    mode: QuestionMode,
    prompts: Vec<PromptItem>,
    answers: Vec<String>,
    current: usize,
    kanban: HashMap<usize, Vec<TaskCategory>>,
}

impl Questionnaire {
    /// `None` when there is nothing to ask.
    pub fn new(mode: QuestionMode, prompts: Vec<PromptItem>) -> Option<Self> {
        if prompts.is_empty() {
            return None;
        }
        let answers = vec![String::new(); prompts.len()];
        Some(Self {
            mode,
            prompts,
            answers,
            current: 0,
            kanban: HashMap::new(),
        })
    }

    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    pub fn current(&self) -> &PromptItem {
        &self.prompts[self.current]
    }

    /// Zero-based index of the current prompt and the total count.
    pub fn position(&self) -> (usize, usize) {
        (self.current, self.prompts.len())
    }

    /// Percentage shown by the progress bar.
    pub fn progress(&self) -> f64 {
        (self.current + 1) as f64 / self.prompts.len() as f64 * 100.0
    }

    pub fn answer(&mut self, text: impl Into<String>) {
        self.answers[self.current] = text.into();
    }

    pub fn current_answer(&self) -> &str {
        &self.answers[self.current]
    }

    pub fn back(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move forward, or finish on the last prompt. Blank answers are dropped
    /// from the finished session but keep their position in `questionIndex`.
    pub fn advance(&mut self) -> Step {
        if self.current + 1 < self.prompts.len() {
            self.current += 1;
            return Step::Next;
        }
        let answers = self
            .prompts
            .iter()
            .zip(&self.answers)
            .enumerate()
            .map(|(index, (prompt, answer))| SessionAnswer {
                question_index: index as i64,
                category: prompt.category.clone(),
                question: prompt.question.clone(),
                answer: answer.clone(),
            })
            .filter(|a| !a.is_blank())
            .collect();
        Step::Finished(NewSession {
            mode: self.mode,
            answers,
        })
    }

    pub fn is_selected(&self, category: TaskCategory) -> bool {
        self.kanban
            .get(&self.current)
            .is_some_and(|selected| selected.contains(&category))
    }

    pub fn toggle_kanban(&mut self, category: TaskCategory) -> KanbanToggle {
        if self.current_answer().trim().is_empty() {
            return KanbanToggle::Ignored;
        }
        if self.is_selected(category) {
            if let Some(selected) = self.kanban.get_mut(&self.current) {
                selected.retain(|c| *c != category);
            }
            return KanbanToggle::Deselected;
        }
        KanbanToggle::Create(NewTask {
            text: self.current_answer().to_string(),
            category,
            description: None,
        })
    }

    pub fn mark_added(&mut self, category: TaskCategory) {
        let selected = self.kanban.entry(self.current).or_default();
        if !selected.contains(&category) {
            selected.push(category);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<PromptItem> {
        (0..n)
            .map(|i| PromptItem {
                category: "Brain".into(),
                question: format!("Q{}", i + 1),
            })
            .collect()
    }

    #[test]
    fn empty_library_falls_back_to_builtins() {
        let prompts = prompts_for_mode(&[], QuestionMode::Crisis);
        assert_eq!(prompts.len(), prompts::FALLBACK_CRISIS.len());
        assert_eq!(prompts[0].category, "Sécurité");
    }

    #[test]
    fn library_questions_win_over_builtins() {
        let library = vec![Question {
            id: 1,
            category: "Custom".into(),
            question: "Only one".into(),
            mode: QuestionMode::Normal,
            order_index: 0,
            created_at: String::new(),
        }];
        let normal = prompts_for_mode(&library, QuestionMode::Normal);
        assert_eq!(normal.len(), 1);
        assert_eq!(normal[0].question, "Only one");
        // Crisis has nothing stored, so it still falls back.
        assert_eq!(
            prompts_for_mode(&library, QuestionMode::Crisis).len(),
            prompts::FALLBACK_CRISIS.len()
        );
    }

    #[test]
    fn finishing_drops_blank_answers() {
        let mut run = Questionnaire::new(QuestionMode::Normal, items(2)).unwrap();
        run.answer("");
        assert_eq!(run.advance(), Step::Next);
        run.answer("hello");
        let Step::Finished(session) = run.advance() else {
            panic!("expected the run to finish");
        };
        assert_eq!(session.answers.len(), 1);
        assert_eq!(session.answers[0].question_index, 1);
        assert_eq!(session.answers[0].question, "Q2");
    }

    #[test]
    fn back_stops_at_first_prompt() {
        let mut run = Questionnaire::new(QuestionMode::Normal, items(3)).unwrap();
        assert!(!run.back());
        run.advance();
        assert!(run.back());
        assert_eq!(run.position(), (0, 3));
    }

    #[test]
    fn kanban_toggle_needs_an_answer() {
        let mut run = Questionnaire::new(QuestionMode::Normal, items(1)).unwrap();
        assert_eq!(run.toggle_kanban(TaskCategory::Urgent), KanbanToggle::Ignored);

        run.answer("call the bank");
        let KanbanToggle::Create(task) = run.toggle_kanban(TaskCategory::Admin) else {
            panic!("expected a task to create");
        };
        assert_eq!(task.text, "call the bank");
        run.mark_added(TaskCategory::Admin);
        assert!(run.is_selected(TaskCategory::Admin));

        assert_eq!(run.toggle_kanban(TaskCategory::Admin), KanbanToggle::Deselected);
        assert!(!run.is_selected(TaskCategory::Admin));
    }

    #[test]
    fn no_prompts_no_questionnaire() {
        assert!(Questionnaire::new(QuestionMode::Normal, vec![]).is_none());
    }
}
