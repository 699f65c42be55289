pub mod identity;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::{Method, header};
use axum::response::Html;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::access::AccessPolicy;
use crate::store::Store;
use identity::IdentityProvider;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub jwt_secret: Vec<u8>,
    pub access: Arc<AccessPolicy>,
    /// `None` when no OAuth credentials are configured; sign-in then answers 503.
    pub identity: Option<Arc<dyn IdentityProvider>>,
    pub public_url: String,
    pub cors_origins: Vec<String>,
}

impl AppState {
    /// Cookies get the `Secure` attribute only when served over https.
    pub fn secure_cookies(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}

/// Build the axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let allow_origin = if state.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<axum::http::HeaderValue> = state
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(allow_origin);

    let api_routes = routes::api_router().layer(cors);

    Router::new()
        .route(
            "/health",
            get(|| async { axum::Json(serde_json::json!({ "status": "ok" })) }),
        )
        .route("/unauthorized", get(unauthorized_page))
        .nest("/api", api_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::session_auth,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn unauthorized_page() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html lang="fr">
<head><meta charset="utf-8"><title>Accès refusé</title></head>
<body>
<h1>Accès non autorisé</h1>
<p>Ce compte Discord n'a pas accès à ce journal.</p>
<p><a href="/">Retour à l'accueil</a></p>
</body>
</html>
"#,
    )
}
