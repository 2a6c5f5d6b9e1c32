//! Session state and privilege derivation.
//!
//! One bearer token per login session, kept in a single JSON file under
//! the config directory and read once per command invocation. Privilege
//! is derived locally by decoding (never verifying) the token payload -
//! it only gates which controls are rendered. The backend re-checks every
//! privileged request, so nothing here is a security boundary.

use std::fs;
use std::path::PathBuf;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload field that marks a faculty token.
const FACULTY_CLAIM: &str = "facultyId";

const SESSION_FILE: &str = "session.json";

/// Persisted session state: the single well-known `token` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub token: Option<String>,
}

/// Session snapshot for one command invocation.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: Option<String>,
    pub is_privileged: bool,
}

impl Session {
    /// Read the stored token and derive the privilege flag once. Store
    /// errors are logged and treated as "not logged in".
    pub fn load() -> Self {
        let token = match load_session_config() {
            Ok(config) => config.token,
            Err(err) => {
                tracing::warn!("failed to read session store: {err}");
                None
            }
        };

        let is_privileged = token.as_deref().map(derive_privilege).unwrap_or(false);

        Self {
            token,
            is_privileged,
        }
    }
}

/// Decide whether a token belongs to a faculty member, without touching
/// the network. Fail-closed: anything unexpected yields `false`.
pub fn derive_privilege(token: &str) -> bool {
    match payload_claims(token) {
        Ok(claims) => claims
            .get(FACULTY_CLAIM)
            .map(|v| !v.is_null())
            .unwrap_or(false),
        Err(err) => {
            tracing::warn!("invalid token: {err}");
            false
        }
    }
}

/// Decode the payload segment of a bearer token as JSON. No signature
/// check - the server is the sole authority on token validity.
fn payload_claims(token: &str) -> anyhow::Result<Value> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("token has no payload segment"))?;

    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    let claims: Value = serde_json::from_slice(&bytes)?;
    Ok(claims)
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("CAMPUS_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME")
            .map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("campus").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_session_config() -> anyhow::Result<SessionConfig> {
    let config_dir = get_config_dir()?;
    let session_file = config_dir.join(SESSION_FILE);

    if !session_file.exists() {
        return Ok(SessionConfig::default());
    }

    let content = fs::read_to_string(session_file)?;
    let config: SessionConfig = serde_json::from_str(&content)?;
    Ok(config)
}

pub fn save_session_config(config: &SessionConfig) -> anyhow::Result<()> {
    let config_dir = get_config_dir()?;
    let session_file = config_dir.join(SESSION_FILE);

    let content = serde_json::to_string_pretty(config)?;
    fs::write(session_file, content)?;
    Ok(())
}

/// Drop the stored token. Subsequent loads derive an unprivileged session.
pub fn clear_session() -> anyhow::Result<()> {
    let config_dir = get_config_dir()?;
    let session_file = config_dir.join(SESSION_FILE);

    if session_file.exists() {
        fs::remove_file(session_file)?;
    }
    Ok(())
}
