pub mod jwt_secret;
pub mod server_settings;
pub mod settings;

use anyhow::Result;
use std::path::PathBuf;

use crate::access::AccessPolicy;

/// Discord OAuth2 application credentials. Sign-in is disabled unless both
/// halves are configured.
#[derive(Debug, Clone)]
pub struct DiscordCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub struct Configuration {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub settings_file: PathBuf,
    pub listen_host: String,
    pub listen_port: u16,
    pub public_url: String,
    pub cors_origins: Vec<String>,
    pub discord: Option<DiscordCredentials>,
    pub access: AccessPolicy,
}

impl Configuration {
    pub fn create() -> Result<Self> {
        // BRAINDUMP_HOME env or ~/.braindump
        let data_dir = if let Ok(home) = std::env::var("BRAINDUMP_HOME") {
            PathBuf::from(home)
        } else {
            let home = dirs_next::home_dir()
                .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
            home.join(".braindump")
        };
        std::fs::create_dir_all(&data_dir)?;

        let db_path = if let Ok(p) = std::env::var("DB_PATH") {
            PathBuf::from(p)
        } else {
            data_dir.join("braindump.db")
        };

        let settings_file = settings::settings_file_path(&data_dir);
        let ss = server_settings::load_server_settings(&data_dir)?.settings;

        let discord = match (ss.discord_client_id, ss.discord_client_secret) {
            (Some(client_id), Some(client_secret)) => Some(DiscordCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Ok(Configuration {
            data_dir,
            db_path,
            settings_file,
            listen_host: ss.listen_host,
            listen_port: ss.listen_port,
            public_url: ss.public_url,
            cors_origins: ss.cors_origins,
            discord,
            access: AccessPolicy::new(ss.allowed_ids, ss.admin_ids),
        })
    }

    /// Where the identity provider sends the browser back to.
    pub fn oauth_redirect_uri(&self) -> String {
        format!(
            "{}/api/auth/callback",
            self.public_url.trim_end_matches('/')
        )
    }
}
