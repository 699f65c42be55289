pub mod access;
pub mod commands;
pub mod config;
pub mod store;
pub mod web;

use std::sync::Arc;

use tracing::{info, warn};

use config::Configuration;
use store::Store;
use web::AppState;
use web::identity::{DiscordProvider, IdentityProvider};

/// Open the store and assemble the router state for a configuration.
pub fn build_state(config: &Configuration) -> anyhow::Result<AppState> {
    let db_path_str = config.db_path.to_string_lossy().to_string();
    let store = Arc::new(Store::new(&db_path_str)?);
    let jwt_secret = config::jwt_secret::load_or_create_signing_key(&config.data_dir)?;

    let identity: Option<Arc<dyn IdentityProvider>> = match config.discord {
        Some(ref creds) => Some(Arc::new(DiscordProvider::new(
            creds.client_id.clone(),
            creds.client_secret.clone(),
            config.oauth_redirect_uri(),
        ))),
        None => {
            warn!("DISCORD_CLIENT_ID/DISCORD_CLIENT_SECRET not set, sign-in disabled");
            None
        }
    };

    Ok(AppState {
        store,
        jwt_secret,
        access: Arc::new(config.access.clone()),
        identity,
        public_url: config.public_url.clone(),
        cors_origins: config.cors_origins.clone(),
    })
}

pub async fn run_hub() -> anyhow::Result<()> {
    let config = Configuration::create()?;

    info!(
        port = config.listen_port,
        host = %config.listen_host,
        public_url = %config.public_url,
        allowed = config.access.allowed_count(),
        admins = config.access.admin_count(),
        "starting hub"
    );
    if config.access.allowed_count() == 0 {
        warn!("ALLOWED_DISCORD_IDS is empty, nobody can sign in");
    }

    let app = web::build_router(build_state(&config)?);

    let addr = format!("{}:{}", config.listen_host, config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "listening");
    info!(url = %config.public_url, "hub ready");

    let shutdown_notify = Arc::new(tokio::sync::Notify::new());
    let shutdown_notify_srv = shutdown_notify.clone();

    let server_task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_notify_srv.notified().await;
            })
            .await
    });

    shutdown_signal().await;
    shutdown_notify.notify_one();

    // Give axum up to 5s to drain in-flight requests.
    if tokio::time::timeout(std::time::Duration::from_secs(5), server_task)
        .await
        .is_err()
    {
        info!("graceful shutdown timed out, forcing exit");
    }

    info!("hub stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
