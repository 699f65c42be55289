use super::settings::{read_settings, settings_file_path, write_settings};
use crate::access::parse_id_list;
use anyhow::Result;
use std::path::Path;

pub struct ServerSettings {
    pub listen_host: String,
    pub listen_port: u16,
    pub public_url: String,
    pub cors_origins: Vec<String>,
    pub discord_client_id: Option<String>,
    pub discord_client_secret: Option<String>,
    pub allowed_ids: Vec<String>,
    pub admin_ids: Vec<String>,
}

pub struct ServerSettingsResult {
    pub settings: ServerSettings,
    pub saved_to_file: bool,
}

fn parse_cors_origins(s: &str) -> Vec<String> {
    let entries: Vec<String> = s
        .split(',')
        .map(|o| o.trim().to_string())
        .filter(|o| !o.is_empty())
        .collect();
    if entries.iter().any(|e| e == "*") {
        return vec!["*".into()];
    }
    entries
}

fn derive_cors_origins(public_url: &str) -> Vec<String> {
    url::Url::parse(public_url)
        .ok()
        .map(|u| vec![u.origin().ascii_serialization()])
        .unwrap_or_default()
}

/// Resolve server settings from the process environment, then the settings
/// file, then defaults.
pub fn load_server_settings(data_dir: &Path) -> Result<ServerSettingsResult> {
    load_server_settings_with(data_dir, |key| std::env::var(key).ok())
}

/// Same as [`load_server_settings`] with an injectable environment lookup.
/// Env values missing from the file are written back so the next start does
/// not depend on the environment.
pub fn load_server_settings_with(
    data_dir: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ServerSettingsResult> {
    let settings_path = settings_file_path(data_dir);
    let mut settings = read_settings(&settings_path)?;
    let mut needs_save = false;

    let listen_host = if let Some(v) = env("BRAINDUMP_LISTEN_HOST") {
        if settings.listen_host.is_none() {
            settings.listen_host = Some(v.clone());
            needs_save = true;
        }
        v
    } else if let Some(ref v) = settings.listen_host {
        v.clone()
    } else {
        "127.0.0.1".into()
    };

    let listen_port = if let Some(v) = env("BRAINDUMP_LISTEN_PORT") {
        let port: u16 = v
            .parse()
            .map_err(|_| anyhow::anyhow!("BRAINDUMP_LISTEN_PORT must be a valid port"))?;
        if settings.listen_port.is_none() {
            settings.listen_port = Some(port);
            needs_save = true;
        }
        port
    } else if let Some(v) = settings.listen_port {
        v
    } else {
        3007
    };

    let public_url = if let Some(v) = env("BRAINDUMP_PUBLIC_URL") {
        if settings.public_url.is_none() {
            settings.public_url = Some(v.clone());
            needs_save = true;
        }
        v
    } else if let Some(ref v) = settings.public_url {
        v.clone()
    } else {
        format!("http://localhost:{listen_port}")
    };

    let cors_origins = if let Some(v) = env("CORS_ORIGINS") {
        let origins = parse_cors_origins(&v);
        if settings.cors_origins.is_none() {
            settings.cors_origins = Some(origins.clone());
            needs_save = true;
        }
        origins
    } else if let Some(ref v) = settings.cors_origins {
        v.clone()
    } else {
        derive_cors_origins(&public_url)
    };

    let discord_client_id = if let Some(v) = env("DISCORD_CLIENT_ID") {
        if settings.discord_client_id.is_none() {
            settings.discord_client_id = Some(v.clone());
            needs_save = true;
        }
        Some(v)
    } else {
        settings.discord_client_id.clone()
    };

    // Secrets and access lists come from the environment only.
    let discord_client_secret = env("DISCORD_CLIENT_SECRET").filter(|s| !s.is_empty());
    let allowed_ids = env("ALLOWED_DISCORD_IDS")
        .map(|v| parse_id_list(&v))
        .unwrap_or_default();
    let admin_ids = env("ADMIN_DISCORD_IDS")
        .map(|v| parse_id_list(&v))
        .unwrap_or_default();

    if needs_save {
        write_settings(&settings_path, &settings)?;
    }

    Ok(ServerSettingsResult {
        settings: ServerSettings {
            listen_host,
            listen_port,
            public_url,
            cors_origins,
            discord_client_id,
            discord_client_secret,
            allowed_ids,
            admin_ids,
        },
        saved_to_file: needs_save,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env_or_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_server_settings_with(dir.path(), env_of(&[])).unwrap();
        let s = result.settings;
        assert_eq!(s.listen_host, "127.0.0.1");
        assert_eq!(s.listen_port, 3007);
        assert_eq!(s.public_url, "http://localhost:3007");
        assert_eq!(s.cors_origins, vec!["http://localhost:3007".to_string()]);
        assert!(s.allowed_ids.is_empty());
        assert!(!result.saved_to_file);
    }

    #[test]
    fn env_overrides_and_is_persisted_once() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_of(&[
            ("BRAINDUMP_LISTEN_PORT", "4100"),
            ("DISCORD_CLIENT_ID", "client-1"),
            ("DISCORD_CLIENT_SECRET", "shh"),
        ]);
        let result = load_server_settings_with(dir.path(), env).unwrap();
        assert!(result.saved_to_file);
        assert_eq!(result.settings.listen_port, 4100);

        let stored = read_settings(&settings_file_path(dir.path())).unwrap();
        assert_eq!(stored.listen_port, Some(4100));
        assert_eq!(stored.discord_client_id.as_deref(), Some("client-1"));
        let raw = std::fs::read_to_string(settings_file_path(dir.path())).unwrap();
        assert!(!raw.contains("shh"));

        let again = load_server_settings_with(dir.path(), env_of(&[])).unwrap();
        assert!(!again.saved_to_file);
        assert_eq!(again.settings.listen_port, 4100);
        assert!(again.settings.discord_client_secret.is_none());
    }

    #[test]
    fn file_values_used_when_env_absent() {
        let dir = tempfile::tempdir().unwrap();
        write_settings(
            &settings_file_path(dir.path()),
            &Settings {
                public_url: Some("https://journal.example.com".into()),
                ..Default::default()
            },
        )
        .unwrap();
        let s = load_server_settings_with(dir.path(), env_of(&[]))
            .unwrap()
            .settings;
        assert_eq!(s.public_url, "https://journal.example.com");
        assert_eq!(s.cors_origins, vec!["https://journal.example.com".to_string()]);
    }

    #[test]
    fn access_lists_are_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_of(&[
            ("ALLOWED_DISCORD_IDS", " 111, 222 ,,"),
            ("ADMIN_DISCORD_IDS", "111"),
        ]);
        let s = load_server_settings_with(dir.path(), env).unwrap().settings;
        assert_eq!(s.allowed_ids, vec!["111".to_string(), "222".to_string()]);
        assert_eq!(s.admin_ids, vec!["111".to_string()]);
    }

    #[test]
    fn bad_port_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_of(&[("BRAINDUMP_LISTEN_PORT", "not-a-port")]);
        assert!(load_server_settings_with(dir.path(), env).is_err());
    }

    #[test]
    fn wildcard_cors_collapses() {
        assert_eq!(parse_cors_origins("https://a, *"), vec!["*".to_string()]);
        assert_eq!(
            parse_cors_origins("https://a, https://b"),
            vec!["https://a".to_string(), "https://b".to_string()]
        );
    }
}
