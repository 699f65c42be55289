use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::access::SignInDecision;
use crate::web::AppState;

pub const SESSION_COOKIE: &str = "bd_session";
pub const STATE_COOKIE: &str = "bd_oauth_state";

/// Signed-in sessions last thirty days.
pub const SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Provider identifier.
    pub sub: String,
    pub name: String,
    /// Admin flag decided at sign-in.
    pub adm: bool,
    pub exp: u64,
}

/// Signed-in user, stored in request extensions when the session is valid.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub provider_id: String,
    pub name: String,
    pub is_admin: bool,
}

pub fn issue_session_token(
    secret: &[u8],
    provider_id: &str,
    name: &str,
    is_admin: bool,
) -> jsonwebtoken::errors::Result<String> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let claims = SessionClaims {
        sub: provider_id.to_string(),
        name: name.to_string(),
        adm: is_admin,
        exp: now + SESSION_TTL_SECS,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

/// Resolve the caller from the session cookie or a bearer token. Never
/// rejects: routes that need a user or an admin check the extension
/// themselves. Tokens for identities no longer on the allow list are ignored.
pub async fn session_auth(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = extract_bearer_token(req.headers())
        .or_else(|| cookie_value(req.headers(), SESSION_COOKIE));

    if let Some(token) = token {
        let key = DecodingKey::from_secret(&state.jwt_secret);
        match decode::<SessionClaims>(&token, &key, &Validation::new(Algorithm::HS256)) {
            Ok(data) => {
                if let SignInDecision::Granted { .. } = state.access.evaluate(&data.claims.sub) {
                    req.extensions_mut().insert(AuthContext {
                        provider_id: data.claims.sub,
                        name: data.claims.name,
                        is_admin: data.claims.adm,
                    });
                } else {
                    tracing::debug!(
                        sub = %data.claims.sub,
                        "session for identity no longer allowed"
                    );
                }
            }
            Err(e) => tracing::debug!(error = %e, "ignoring invalid session token"),
        }
    }

    next.run(req).await
}

/// Admin gate for question writes.
pub fn require_admin(auth: Option<&AuthContext>) -> Result<(), (StatusCode, Json<Value>)> {
    match auth {
        Some(ctx) if ctx.is_admin => Ok(()),
        _ => Err((
            StatusCode::FORBIDDEN,
            Json(json!({"error": "Unauthorized"})),
        )),
    }
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (k, v) = pair.trim().split_once('=')?;
            (k == name).then(|| v.to_string())
        })
}
