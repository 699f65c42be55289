pub mod auth;
pub mod questions;
pub mod sessions;
pub mod tasks;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::web::AppState;

/// Build the /api router (session middleware applied externally).
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(tasks::router())
        .merge(questions::router())
        .merge(sessions::router())
}

pub(crate) type ApiResponse = (StatusCode, Json<Value>);

pub(crate) fn error_response(status: StatusCode, message: &str) -> ApiResponse {
    (status, Json(json!({ "error": message })))
}

/// Log the cause and answer with a message that leaks nothing about it.
pub(crate) fn store_failure(action: &str, err: anyhow::Error) -> ApiResponse {
    tracing::error!(error = ?err, "failed to {action}");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &format!("Failed to {action}"),
    )
}

/// Unwrap a JSON body, turning any rejection (bad syntax, missing field,
/// unknown enum value) into a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiResponse> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "rejected request body");
            Err(error_response(StatusCode::BAD_REQUEST, "Invalid body"))
        }
    }
}

#[derive(Deserialize)]
pub(crate) struct IdQuery {
    id: Option<String>,
}

impl IdQuery {
    pub(crate) fn parse(&self) -> Result<i64, ApiResponse> {
        self.id
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok())
            .ok_or_else(|| error_response(StatusCode::BAD_REQUEST, "Missing id"))
    }
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_query_requires_integer() {
        assert_eq!(IdQuery { id: Some("12".into()) }.parse().unwrap(), 12);
        assert!(IdQuery { id: Some("abc".into()) }.parse().is_err());
        assert!(IdQuery { id: None }.parse().is_err());
    }
}
