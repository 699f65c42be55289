use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::settings::write_json_atomic;

const KEY_LEN: usize = 32;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SigningKeyFile {
    secret_base64: String,
    #[serde(default)]
    created_at: Option<String>,
}

fn key_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("jwt-secret.json")
}

fn read_key(path: &Path) -> Result<Option<Vec<u8>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let file: SigningKeyFile = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    let key = STANDARD
        .decode(&file.secret_base64)
        .with_context(|| format!("decoding key in {}", path.display()))?;
    if key.len() != KEY_LEN {
        anyhow::bail!(
            "signing key in {} is {} bytes, expected {KEY_LEN}",
            path.display(),
            key.len()
        );
    }
    Ok(Some(key))
}

fn write_key(path: &Path, key: &[u8]) -> Result<()> {
    let file = SigningKeyFile {
        secret_base64: STANDARD.encode(key),
        created_at: Some(chrono::Utc::now().to_rfc3339()),
    };
    write_json_atomic(path, &file, Some(0o600))
}

/// HS256 key for session tokens, kept in `{data_dir}/jwt-secret.json`.
/// Rotating it (deleting the file) signs everyone out.
pub fn load_or_create_signing_key(data_dir: &Path) -> Result<Vec<u8>> {
    let path = key_file_path(data_dir);
    if let Some(key) = read_key(&path)? {
        return Ok(key);
    }

    let mut key = [0u8; KEY_LEN];
    getrandom::fill(&mut key).map_err(|e| anyhow::anyhow!("no system randomness: {e}"))?;
    write_key(&path, &key)?;
    tracing::info!(path = %path.display(), "generated session signing key");
    Ok(key.to_vec())
}
