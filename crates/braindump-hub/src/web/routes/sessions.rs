use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use braindump_shared::export::{export_filename, render_markdown};
use braindump_shared::schemas::NewSession;
use chrono::{DateTime, Local, NaiveDateTime};
use serde_json::json;

use super::{ApiResponse, IdQuery, error_response, json_body, store_failure, to_json};
use crate::store::sessions;
use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/sessions",
            get(list_sessions).post(create_session).delete(delete_session),
        )
        .route("/sessions/{id}/export", get(export_session))
}

async fn list_sessions(State(state): State<AppState>) -> ApiResponse {
    let result = sessions::list_sessions(&state.store.conn());
    match result {
        Ok(rows) => (StatusCode::OK, Json(to_json(&rows))),
        Err(e) => store_failure("fetch sessions", e),
    }
}

async fn create_session(
    State(state): State<AppState>,
    payload: Result<Json<NewSession>, JsonRejection>,
) -> ApiResponse {
    let body = match json_body(payload) {
        Ok(b) => b,
        Err(resp) => return resp,
    };

    let result = sessions::create_session(&state.store.conn(), &body);
    match result {
        Ok(session) => {
            tracing::info!(
                id = session.id,
                mode = %session.mode,
                answers = session.answers.len(),
                "session saved"
            );
            (StatusCode::CREATED, Json(to_json(&session)))
        }
        Err(e) => store_failure("save session", e),
    }
}

async fn delete_session(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> ApiResponse {
    let id = match query.parse() {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let result = sessions::delete_session(&state.store.conn(), id);
    match result {
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(e) => store_failure("delete session", e),
    }
}

/// Session creation time in the server's local zone, falling back to now for
/// rows whose timestamp does not parse.
fn local_time(created_at: &str) -> NaiveDateTime {
    DateTime::parse_from_rfc3339(created_at)
        .map(|t| t.with_timezone(&Local).naive_local())
        .unwrap_or_else(|_| Local::now().naive_local())
}

/// Markdown transcript of a stored session. Stamps `exported_at`.
async fn export_session(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    let result = sessions::mark_exported(&state.store.conn(), id);
    let session = match result {
        Ok(Some(session)) => session,
        Ok(None) => {
            return error_response(StatusCode::NOT_FOUND, "Session not found").into_response();
        }
        Err(e) => return store_failure("export session", e).into_response(),
    };

    let at = local_time(&session.created_at);
    let markdown = render_markdown(session.mode, &session.answers, at);
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_filename(session.mode, at)
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/markdown; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        markdown,
    )
        .into_response()
}
