use anyhow::{Result, bail};

use braindump_shared::ordering::{Direction, plan_move, sorted_for_mode};
use braindump_shared::schemas::{NewQuestion, Question, QuestionMode, QuestionPatch};

use crate::api::ApiClient;

/// Admin view over the question library, one mode tab at a time.
pub struct QuestionDashboard {
    api: ApiClient,
    questions: Vec<Question>,
    mode: QuestionMode,
}

impl QuestionDashboard {
    pub async fn load(api: ApiClient, mode: QuestionMode) -> Result<Self> {
        let questions = api.list_questions(None).await?;
        Ok(Self {
            api,
            questions,
            mode,
        })
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.questions = self.api.list_questions(None).await?;
        Ok(())
    }

    pub fn mode(&self) -> QuestionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: QuestionMode) {
        self.mode = mode;
    }

    /// Questions of the current mode in display order.
    pub fn questions(&self) -> Vec<&Question> {
        sorted_for_mode(&self.questions, self.mode)
    }

    pub async fn add(&mut self, category: &str, question: &str) -> Result<Question> {
        if category.trim().is_empty() || question.trim().is_empty() {
            bail!("category and question are required");
        }
        let created = self
            .api
            .create_question(&NewQuestion {
                category: category.trim().to_string(),
                question: question.trim().to_string(),
                mode: self.mode,
            })
            .await?;
        self.questions.push(created.clone());
        Ok(created)
    }

    pub async fn update(&mut self, id: i64, category: &str, question: &str) -> Result<Question> {
        let updated = self
            .api
            .update_question(&QuestionPatch::new(id).with_text(category, question))
            .await?;
        if let Some(slot) = self.questions.iter_mut().find(|q| q.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.api.delete_question(id).await?;
        self.questions.retain(|q| q.id != id);
        Ok(())
    }

    /// Swap a question with its neighbour. Two separate PATCHes, then a full
    /// refetch. Returns false when there is nothing to swap with.
    pub async fn move_question(&mut self, id: i64, direction: Direction) -> Result<bool> {
        let Some(plan) = plan_move(&self.questions, id, direction) else {
            return Ok(false);
        };
        self.api.update_question(&plan.first.patch()).await?;
        self.api.update_question(&plan.second.patch()).await?;
        self.refresh().await?;
        Ok(true)
    }
}
