use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use subtle::ConstantTimeEq;

use super::error_response;
use crate::access::SignInDecision;
use crate::web::AppState;
use crate::web::middleware::auth::{
    AuthContext, SESSION_COOKIE, SESSION_TTL_SECS, STATE_COOKIE, cookie_value,
    issue_session_token,
};

const STATE_TTL_SECS: u64 = 10 * 60;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login))
        .route("/auth/callback", get(callback))
        .route("/auth/session", get(current_session))
        .route("/auth/logout", post(logout))
}

fn cookie(name: &str, value: &str, max_age: u64, secure: bool) -> String {
    let mut c = format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        c.push_str("; Secure");
    }
    c
}

/// 302 with any number of `Set-Cookie` headers.
fn found(location: &str, cookies: impl IntoIterator<Item = String>) -> Response {
    let mut resp = StatusCode::FOUND.into_response();
    let headers = resp.headers_mut();
    if let Ok(v) = HeaderValue::from_str(location) {
        headers.insert(header::LOCATION, v);
    }
    for c in cookies {
        if let Ok(v) = HeaderValue::from_str(&c) {
            headers.append(header::SET_COOKIE, v);
        }
    }
    resp
}

fn states_match(expected: &str, received: &str) -> bool {
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(received.as_bytes()))
}

async fn login(State(state): State<AppState>) -> Response {
    let Some(provider) = state.identity.as_ref() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Sign-in is not configured")
            .into_response();
    };

    let csrf = uuid::Uuid::new_v4().simple().to_string();
    found(
        &provider.authorize_url(&csrf),
        [cookie(STATE_COOKIE, &csrf, STATE_TTL_SECS, state.secure_cookies())],
    )
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

/// Completes sign-in. Every failure lands on `/unauthorized`; only an
/// allow-listed identity gets a session cookie.
async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let secure = state.secure_cookies();
    let clear_state = cookie(STATE_COOKIE, "", 0, secure);
    let denied = |reason: &str| {
        tracing::info!(reason, "sign-in refused");
        found("/unauthorized", [clear_state.clone()])
    };

    let Some(provider) = state.identity.as_ref() else {
        return error_response(StatusCode::SERVICE_UNAVAILABLE, "Sign-in is not configured")
            .into_response();
    };
    if let Some(ref err) = query.error {
        return denied(&format!("provider returned {err}"));
    }
    let (Some(code), Some(received)) = (query.code.as_deref(), query.state.as_deref()) else {
        return denied("missing code or state");
    };
    let expected = cookie_value(&headers, STATE_COOKIE).unwrap_or_default();
    if !states_match(&expected, received) {
        return denied("state mismatch");
    }

    let identity = match provider.exchange(code).await {
        Ok(identity) => identity,
        Err(e) => {
            tracing::warn!(error = ?e, "code exchange failed");
            return denied("code exchange failed");
        }
    };

    let is_admin = match state.access.evaluate(&identity.id) {
        SignInDecision::Granted { is_admin } => is_admin,
        SignInDecision::Denied => return denied("identity not on allow list"),
    };

    let signed = issue_session_token(&state.jwt_secret, &identity.id, &identity.name, is_admin);
    let token = match signed {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "failed to sign session token");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session")
                .into_response();
        }
    };

    tracing::info!(id = %identity.id, is_admin, "signed in");
    found(
        "/",
        [
            clear_state.clone(),
            cookie(SESSION_COOKIE, &token, SESSION_TTL_SECS, secure),
        ],
    )
}

async fn current_session(auth: Option<Extension<AuthContext>>) -> Json<serde_json::Value> {
    match auth {
        Some(Extension(ctx)) => Json(json!({
            "user": {
                "discordId": ctx.provider_id,
                "name": ctx.name,
                "isAdmin": ctx.is_admin,
            }
        })),
        None => Json(json!({ "user": null })),
    }
}

async fn logout(State(state): State<AppState>) -> Response {
    (
        AppendHeaders([(
            header::SET_COOKIE,
            cookie(SESSION_COOKIE, "", 0, state.secure_cookies()),
        )]),
        Json(json!({ "success": true })),
    )
        .into_response()
}
