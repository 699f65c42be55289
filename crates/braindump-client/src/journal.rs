use anyhow::{Result, anyhow};
use tracing::warn;

use braindump_shared::questionnaire::{KanbanToggle, Questionnaire, Step, prompts_for_mode};
use braindump_shared::schemas::{QuestionMode, Session, TaskCategory};

use crate::api::ApiClient;

/// One questionnaire run wired to the hub: answers turned into tasks are
/// created immediately, and the finished run is saved as a session.
pub struct JournalRun {
    api: ApiClient,
    questionnaire: Questionnaire,
}

impl JournalRun {
    /// Load the prompts for `mode`. If the library cannot be fetched the
    /// built-in set is used.
    pub async fn start(api: ApiClient, mode: QuestionMode) -> Result<Self> {
        let library = match api.list_questions(Some(mode)).await {
            Ok(questions) => questions,
            Err(e) => {
                warn!(error = %e, %mode, "question library unavailable, using built-in prompts");
                Vec::new()
            }
        };
        let questionnaire = Questionnaire::new(mode, prompts_for_mode(&library, mode))
            .ok_or_else(|| anyhow!("no prompts for {mode} mode"))?;
        Ok(Self { api, questionnaire })
    }

    pub fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    pub fn answer(&mut self, text: impl Into<String>) {
        self.questionnaire.answer(text);
    }

    pub fn back(&mut self) -> bool {
        self.questionnaire.back()
    }

    /// Toggle "add to board" for the current answer. Selecting creates the
    /// task right away; deselecting leaves the created task in place.
    pub async fn toggle_kanban(&mut self, category: TaskCategory) -> Result<KanbanToggle> {
        let toggle = self.questionnaire.toggle_kanban(category);
        if let KanbanToggle::Create(ref task) = toggle {
            self.api.create_task(task).await?;
            self.questionnaire.mark_added(category);
        }
        Ok(toggle)
    }

    /// Advance; on the last prompt save the session and return it.
    pub async fn next(&mut self) -> Result<Option<Session>> {
        match self.questionnaire.advance() {
            Step::Next => Ok(None),
            Step::Finished(session) => Ok(Some(self.api.create_session(&session).await?)),
        }
    }
}
