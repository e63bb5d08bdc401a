use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mindscreen_session::event::PresentationMode;
use mindscreen_speech::SpeechPreference;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const CONFIG_FILE: &str = "config.json";

const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Overrides `bind` when set.
pub const BIND_ENV: &str = "MINDSCREEN_BIND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub bind: String,
    /// Presentation mode for new sessions. Added in v1.
    #[serde(default)]
    pub default_mode: PresentationMode,
    #[serde(default)]
    pub narration: NarrationConfig,
    #[serde(default)]
    pub json_logs: bool,
    /// Sessions untouched for this long are discarded.
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

fn default_session_idle_secs() -> u64 {
    DEFAULT_SESSION_IDLE_SECS
}

impl ServerConfig {
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs.max(1))
    }

    /// Whether new sessions start narrated. Always false when narration is
    /// switched off entirely.
    pub fn narration_by_default(&self) -> bool {
        self.narration.enabled_by_default && self.narration.backend != SpeechPreference::Off
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrationConfig {
    /// Whether new sessions start with narration on.
    pub enabled_by_default: bool,
    pub backend: SpeechPreference,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            enabled_by_default: false,
            backend: SpeechPreference::Auto,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            bind: "127.0.0.1:8501".to_string(),
            default_mode: PresentationMode::default(),
            narration: NarrationConfig::default(),
            json_logs: false,
            session_idle_secs: DEFAULT_SESSION_IDLE_SECS,
        }
    }
}

pub fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.mindscreen.server"))
}

/// Load the config from `dir`, writing defaults there on first run.
///
/// `MINDSCREEN_BIND` overrides the bind address after loading.
pub fn load_or_init(dir: &Path) -> eyre::Result<ServerConfig> {
    let path = dir.join(CONFIG_FILE);
    let mut config = if path.exists() {
        load_config(&path)?
    } else {
        let config = ServerConfig::default();
        save_config(dir, &config)?;
        config
    };

    if let Ok(bind) = std::env::var(BIND_ENV)
        && !bind.trim().is_empty()
    {
        config.bind = bind.trim().to_string();
    }
    Ok(config)
}

pub fn load_config(path: &Path) -> eyre::Result<ServerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse config JSON, running migrations before deserializing.
pub fn parse_config(contents: &str) -> eyre::Result<ServerConfig> {
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: ServerConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update Mindscreen."
        ));
    }

    // v0 → v1: `step_by_step: bool` became `default_mode`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let step = obj
            .remove("step_by_step")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let mode = if step { "step_by_step" } else { "all_at_once" };
        obj.entry("default_mode")
            .or_insert(serde_json::Value::String(mode.to_string()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (step_by_step → default_mode)");
    }

    Ok(json)
}

pub fn save_config(dir: &Path, config: &ServerConfig) -> eyre::Result<()> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;
    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
