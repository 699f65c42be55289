use anyhow::{Result, bail};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use braindump_shared::schemas::{
    NewQuestion, NewSession, NewTask, Question, QuestionMode, QuestionPatch, Session, Task,
    TaskPatch,
};

/// Signed-in identity as reported by `GET /api/auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub discord_id: String,
    pub name: String,
    pub is_admin: bool,
}

#[derive(Deserialize)]
struct SessionResponse {
    user: Option<CurrentUser>,
}

/// Typed client for the hub's `/api` routes.
///
/// The session token, when present, is sent as a bearer token; the hub
/// accepts it the same way as its session cookie.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let req = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.token {
            Some(ref token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send and fail on any non-2xx status, carrying the hub's error text.
    async fn send(&self, req: reqwest::RequestBuilder, label: &str) -> Result<reqwest::Response> {
        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            bail!("{label} failed ({status}): {text}");
        }
        Ok(resp)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        label: &str,
    ) -> Result<T> {
        Ok(self.send(req, label).await?.json().await?)
    }

    pub async fn current_user(&self) -> Result<Option<CurrentUser>> {
        let req = self.request(reqwest::Method::GET, "/api/auth/session");
        let parsed: SessionResponse = self.send_json(req, "GET /api/auth/session").await?;
        Ok(parsed.user)
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let req = self.request(reqwest::Method::GET, "/api/tasks");
        self.send_json(req, "GET /api/tasks").await
    }

    pub async fn create_task(&self, task: &NewTask) -> Result<Task> {
        let req = self.request(reqwest::Method::POST, "/api/tasks").json(task);
        self.send_json(req, "POST /api/tasks").await
    }

    pub async fn update_task(&self, patch: &TaskPatch) -> Result<Task> {
        let req = self.request(reqwest::Method::PATCH, "/api/tasks").json(patch);
        self.send_json(req, "PATCH /api/tasks").await
    }

    pub async fn delete_task(&self, id: i64) -> Result<()> {
        let req = self.request(reqwest::Method::DELETE, &format!("/api/tasks?id={id}"));
        self.send(req, "DELETE /api/tasks").await?;
        Ok(())
    }

    pub async fn list_questions(&self, mode: Option<QuestionMode>) -> Result<Vec<Question>> {
        let path = match mode {
            Some(mode) => format!("/api/questions?mode={mode}"),
            None => "/api/questions".to_string(),
        };
        let req = self.request(reqwest::Method::GET, &path);
        self.send_json(req, "GET /api/questions").await
    }

    pub async fn create_question(&self, question: &NewQuestion) -> Result<Question> {
        let req = self
            .request(reqwest::Method::POST, "/api/questions")
            .json(question);
        self.send_json(req, "POST /api/questions").await
    }

    pub async fn update_question(&self, patch: &QuestionPatch) -> Result<Question> {
        let req = self
            .request(reqwest::Method::PATCH, "/api/questions")
            .json(patch);
        self.send_json(req, "PATCH /api/questions").await
    }

    pub async fn delete_question(&self, id: i64) -> Result<()> {
        let req = self.request(reqwest::Method::DELETE, &format!("/api/questions?id={id}"));
        self.send(req, "DELETE /api/questions").await?;
        Ok(())
    }

    pub async fn list_sessions(&self) -> Result<Vec<Session>> {
        let req = self.request(reqwest::Method::GET, "/api/sessions");
        self.send_json(req, "GET /api/sessions").await
    }

    pub async fn create_session(&self, session: &NewSession) -> Result<Session> {
        let req = self
            .request(reqwest::Method::POST, "/api/sessions")
            .json(session);
        self.send_json(req, "POST /api/sessions").await
    }

    pub async fn delete_session(&self, id: i64) -> Result<()> {
        let req = self.request(reqwest::Method::DELETE, &format!("/api/sessions?id={id}"));
        self.send(req, "DELETE /api/sessions").await?;
        Ok(())
    }

    /// Markdown transcript of a session.
    pub async fn export_session(&self, id: i64) -> Result<String> {
        let req = self.request(reqwest::Method::GET, &format!("/api/sessions/{id}/export"));
        Ok(self.send(req, "GET /api/sessions/{id}/export").await?.text().await?)
    }
}
