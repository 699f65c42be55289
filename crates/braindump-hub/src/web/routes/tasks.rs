use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use braindump_shared::schemas::{NewTask, TaskPatch};
use serde_json::json;

use super::{ApiResponse, IdQuery, error_response, json_body, store_failure, to_json};
use crate::store::tasks;
use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/tasks",
        get(list_tasks)
            .post(create_task)
            .patch(update_task)
            .delete(delete_task),
    )
}

async fn list_tasks(State(state): State<AppState>) -> ApiResponse {
    let result = tasks::list_tasks(&state.store.conn());
    match result {
        Ok(rows) => (StatusCode::OK, Json(to_json(&rows))),
        Err(e) => store_failure("fetch tasks", e),
    }
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<NewTask>, JsonRejection>,
) -> ApiResponse {
    let body = match json_body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if body.text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    let result = tasks::create_task(&state.store.conn(), &body);
    match result {
        Ok(task) => {
            tracing::info!(id = task.id, category = %task.category, "task created");
            (StatusCode::CREATED, Json(to_json(&task)))
        }
        Err(e) => store_failure("create task", e),
    }
}

async fn update_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskPatch>, JsonRejection>,
) -> ApiResponse {
    let patch = match json_body(payload) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if patch.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No fields to update");
    }
    if patch.text.as_deref().is_some_and(|t| t.trim().is_empty()) {
        return error_response(StatusCode::BAD_REQUEST, "Task text cannot be empty");
    }

    let result = tasks::update_task(&state.store.conn(), &patch);
    match result {
        Ok(Some(task)) => (StatusCode::OK, Json(to_json(&task))),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Task not found"),
        Err(e) => store_failure("update task", e),
    }
}

async fn delete_task(State(state): State<AppState>, Query(query): Query<IdQuery>) -> ApiResponse {
    let id = match query.parse() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = tasks::delete_task(&state.store.conn(), id);
    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => store_failure("delete task", e),
    }
}
