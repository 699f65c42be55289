mod common;

use braindump_hub::store::{questions, tasks};
use braindump_shared::schemas::{Question, Session, Task, TaskStatus};
use reqwest::StatusCode;
use serde_json::{Value, json};

use common::{ADMIN, MEMBER, TestHub};

#[tokio::test]
async fn health_endpoint() {
    let hub = TestHub::start().await;
    let body: Value = hub
        .http
        .get(hub.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn task_lifecycle() {
    let hub = TestHub::start().await;

    let resp = hub
        .http
        .post(hub.url("/api/tasks"))
        .json(&json!({"text": "call the bank", "category": "admin"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Task = resp.json().await.unwrap();
    assert_eq!(task.status, TaskStatus::Todo);
    assert_eq!(task.description, None);

    let resp = hub
        .http
        .patch(hub.url("/api/tasks"))
        .json(&json!({"id": task.id, "status": "archived"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let archived: Task = resp.json().await.unwrap();
    assert_eq!(archived.status, TaskStatus::Archived);

    // Restore goes straight back to todo.
    let restored: Task = hub
        .http
        .patch(hub.url("/api/tasks"))
        .json(&json!({"id": task.id, "status": "todo"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(restored.status, TaskStatus::Todo);
    assert_eq!(restored.text, "call the bank");

    let listed: Vec<Task> = hub
        .http
        .get(hub.url("/api/tasks"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    let resp = hub
        .http
        .delete(hub.url(&format!("/api/tasks?id={}", task.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(tasks::list_tasks(&hub.store.conn()).unwrap().is_empty());
}

#[tokio::test]
async fn task_validation_errors() {
    let hub = TestHub::start().await;

    let resp = hub
        .http
        .post(hub.url("/api/tasks"))
        .json(&json!({"text": "x", "category": "misc"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    let resp = hub
        .http
        .post(hub.url("/api/tasks"))
        .json(&json!({"text": "   ", "category": "urgent"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = hub
        .http
        .patch(hub.url("/api/tasks"))
        .json(&json!({"id": 1}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = hub
        .http
        .patch(hub.url("/api/tasks"))
        .json(&json!({"id": 404, "status": "done"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = hub
        .http
        .delete(hub.url("/api/tasks"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn question_writes_require_admin() {
    let hub = TestHub::start().await;
    let q = questions::create_question(
        &hub.store.conn(),
        &braindump_shared::schemas::NewQuestion {
            category: "Brain".into(),
            question: "original".into(),
            mode: braindump_shared::schemas::QuestionMode::Normal,
        },
    )
    .unwrap();

    let patch = json!({"id": q.id, "question": "hijacked", "category": "Brain"});

    let anonymous = hub
        .http
        .patch(hub.url("/api/questions"))
        .json(&patch)
        .send()
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::FORBIDDEN);

    let member = hub
        .http
        .patch(hub.url("/api/questions"))
        .bearer_auth(hub.token_for(MEMBER))
        .json(&patch)
        .send()
        .await
        .unwrap();
    assert_eq!(member.status(), StatusCode::FORBIDDEN);
    let body: Value = member.json().await.unwrap();
    assert_eq!(body["error"], "Unauthorized");

    let unchanged = questions::get_question(&hub.store.conn(), q.id)
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.question, "original");

    let admin = hub
        .http
        .patch(hub.url("/api/questions"))
        .header("cookie", format!("bd_session={}", hub.token_for(ADMIN)))
        .json(&patch)
        .send()
        .await
        .unwrap();
    assert_eq!(admin.status(), StatusCode::OK);
    let updated: Question = admin.json().await.unwrap();
    assert_eq!(updated.question, "hijacked");

    let delete = hub
        .http
        .delete(hub.url(&format!("/api/questions?id={}", q.id)))
        .bearer_auth(hub.token_for(MEMBER))
        .send()
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::FORBIDDEN);
    assert!(questions::get_question(&hub.store.conn(), q.id).unwrap().is_some());
}

#[tokio::test]
async fn questions_append_and_swap() {
    let hub = TestHub::start().await;
    let token = hub.token_for(ADMIN);

    let mut created = Vec::new();
    for text in ["first", "second", "third"] {
        let resp = hub
            .http
            .post(hub.url("/api/questions"))
            .bearer_auth(&token)
            .json(&json!({"category": "Brain", "question": text, "mode": "normal"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        created.push(resp.json::<Question>().await.unwrap());
    }
    assert_eq!(created[0].order_index, 0);
    assert_eq!(created[1].order_index, 1);
    assert_eq!(created[2].order_index, 2);

    let plan = braindump_shared::ordering::plan_move(
        &created,
        created[1].id,
        braindump_shared::ordering::Direction::Up,
    )
    .unwrap();
    for update in [plan.first, plan.second] {
        let resp = hub
            .http
            .patch(hub.url("/api/questions"))
            .bearer_auth(&token)
            .json(&update.patch())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let listed: Vec<Question> = hub
        .http
        .get(hub.url("/api/questions?mode=normal"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let texts: Vec<&str> = listed.iter().map(|q| q.question.as_str()).collect();
    assert_eq!(texts, vec!["second", "first", "third"]);
    let indexes: Vec<i64> = listed.iter().map(|q| q.order_index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
    let third = listed.iter().find(|q| q.id == created[2].id).unwrap();
    assert_eq!(third.order_index, created[2].order_index);

    let resp = hub
        .http
        .get(hub.url("/api/questions?mode=panic"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sessions_store_answers_and_export() {
    let hub = TestHub::start().await;

    let resp = hub
        .http
        .post(hub.url("/api/sessions"))
        .json(&json!({
            "mode": "crisis",
            "answers": [
                {"questionIndex": 0, "category": "Sécurité", "question": "Q1", "answer": ""},
                {"questionIndex": 1, "category": "Corps", "question": "Q2", "answer": "hello"}
            ]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let session: Session = resp.json().await.unwrap();
    assert_eq!(session.answers.len(), 1);
    assert_eq!(session.answers[0].question_index, 1);

    let resp = hub
        .http
        .get(hub.url(&format!("/api/sessions/{}/export", session.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains("_dump_crise.md"));
    let markdown = resp.text().await.unwrap();
    assert!(markdown.contains("CRISE"));
    assert!(markdown.contains("**R:** hello"));
    assert!(!markdown.contains("Q1"));

    let listed: Vec<Session> = hub
        .http
        .get(hub.url("/api/sessions"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed[0].exported_at.is_some());

    let resp = hub
        .http
        .get(hub.url("/api/sessions/9999/export"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = hub
        .http
        .delete(hub.url(&format!("/api/sessions?id={}", session.id)))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let orphans: i64 = hub
        .store
        .conn()
        .query_row("SELECT COUNT(*) FROM session_answers", [], |r| r.get(0))
        .unwrap();
    assert_eq!(orphans, 0);
}
