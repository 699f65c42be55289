use axum::{
    Extension, Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use braindump_shared::schemas::{NewQuestion, QuestionMode, QuestionPatch};
use serde::Deserialize;
use serde_json::json;

use super::{ApiResponse, IdQuery, error_response, json_body, store_failure, to_json};
use crate::store::questions;
use crate::web::AppState;
use crate::web::middleware::auth::{AuthContext, require_admin};

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/questions",
        get(list_questions)
            .post(create_question)
            .patch(update_question)
            .delete(delete_question),
    )
}

#[derive(Deserialize)]
struct ModeQuery {
    mode: Option<String>,
}

async fn list_questions(
    State(state): State<AppState>,
    Query(query): Query<ModeQuery>,
) -> ApiResponse {
    let mode = match query.mode.as_deref().map(str::parse::<QuestionMode>) {
        None => None,
        Some(Ok(mode)) => Some(mode),
        Some(Err(e)) => return error_response(StatusCode::BAD_REQUEST, &e.to_string()),
    };

    let result = questions::list_questions(&state.store.conn(), mode);
    match result {
        Ok(rows) => (StatusCode::OK, Json(to_json(&rows))),
        Err(e) => store_failure("fetch questions", e),
    }
}

async fn create_question(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    payload: Result<Json<NewQuestion>, JsonRejection>,
) -> ApiResponse {
    if let Err(resp) = require_admin(auth.as_deref()) {
        return resp;
    }
    let body = match json_body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    if body.category.trim().is_empty() || body.question.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Missing required fields");
    }

    let result = questions::create_question(&state.store.conn(), &body);
    match result {
        Ok(question) => {
            tracing::info!(id = question.id, mode = %question.mode, "question created");
            (StatusCode::CREATED, Json(to_json(&question)))
        }
        Err(e) => store_failure("create question", e),
    }
}

async fn update_question(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    payload: Result<Json<QuestionPatch>, JsonRejection>,
) -> ApiResponse {
    if let Err(resp) = require_admin(auth.as_deref()) {
        return resp;
    }
    let patch = match json_body(payload) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    if patch.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "No fields to update");
    }

    let result = questions::update_question(&state.store.conn(), &patch);
    match result {
        Ok(Some(question)) => (StatusCode::OK, Json(to_json(&question))),
        Ok(None) => error_response(StatusCode::NOT_FOUND, "Question not found"),
        Err(e) => store_failure("update question", e),
    }
}

async fn delete_question(
    State(state): State<AppState>,
    auth: Option<Extension<AuthContext>>,
    Query(query): Query<IdQuery>,
) -> ApiResponse {
    if let Err(resp) = require_admin(auth.as_deref()) {
        return resp;
    }
    let id = match query.parse() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = questions::delete_question(&state.store.conn(), id);
    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => store_failure("delete question", e),
    }
}
