use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GerifitConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// JSON file holding saved assessments.
    pub data_file: PathBuf,
    /// PNG printed at the top of exported reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
    pub clinic_name: String,
    pub clinic_subtitle: String,
    pub narrative: NarrativeConfig,
    pub created_at: jiff::Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    pub model: String,
    /// Name of the environment variable holding the API key. The key itself
    /// is never written to disk.
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            model: gerifit_narrative::gemini::DEFAULT_MODEL.to_string(),
            api_key_env: "API_KEY".to_string(),
            base_url: gerifit_narrative::gemini::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GerifitConfig {
    /// Defaults, with the record store under the platform data directory.
    pub fn with_defaults() -> eyre::Result<Self> {
        let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
        Ok(Self {
            config_version: CURRENT_VERSION,
            data_file: base.join("gerifit").join("records.json"),
            logo_path: None,
            clinic_name: "SENHORAS & SENHORES".to_string(),
            clinic_subtitle: "PHYSICAL-FUNCTIONAL AND GERIATRIC ASSESSMENT".to_string(),
            narrative: NarrativeConfig::default(),
            created_at: jiff::Timestamp::now(),
        })
    }
}

impl GerifitConfig {
    /// Keys accepted by [`GerifitConfig::set`].
    pub const KEYS: [&'static str; 7] = [
        "data_file",
        "logo_path",
        "clinic_name",
        "clinic_subtitle",
        "model",
        "api_key_env",
        "base_url",
    ];

    /// Change one setting by key. An empty `logo_path` removes the logo.
    pub fn set(&mut self, key: &str, value: &str) -> eyre::Result<()> {
        let value = value.trim();
        match key {
            "data_file" if value.is_empty() => {
                return Err(eyre::eyre!("data_file cannot be empty"));
            }
            "data_file" => self.data_file = PathBuf::from(value),
            "logo_path" if value.is_empty() => self.logo_path = None,
            "logo_path" => self.logo_path = Some(PathBuf::from(value)),
            "clinic_name" => self.clinic_name = value.to_string(),
            "clinic_subtitle" => self.clinic_subtitle = value.to_string(),
            "model" => self.narrative.model = value.to_string(),
            "api_key_env" => self.narrative.api_key_env = value.to_string(),
            "base_url" => self.narrative.base_url = value.to_string(),
            _ => {
                return Err(eyre::eyre!(
                    "unknown config key '{key}' (expected one of: {})",
                    Self::KEYS.join(", ")
                ));
            }
        }
        Ok(())
    }
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub config_path: String,
    pub data_file: String,
    pub logo_path: Option<String>,
    pub clinic_name: String,
    pub model: String,
    pub api_key_env: String,
    pub api_key_hint: Option<String>,
    pub created_at: String,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("gerifit"))
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

/// Load the config at `path`, or defaults when no file exists yet.
pub fn load_or_default(path: &Path) -> eyre::Result<GerifitConfig> {
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        GerifitConfig::with_defaults()
    }
}

pub fn load_config(path: &Path) -> eyre::Result<GerifitConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: GerifitConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update gerifit."
        ));
    }

    // v0 → v1: top-level `model` moves into a `narrative` block that also
    // names the API key variable and endpoint.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        let defaults = NarrativeConfig::default();
        let model = obj
            .remove("model")
            .and_then(|m| m.as_str().map(str::to_string))
            .unwrap_or(defaults.model.clone());
        obj.entry("narrative").or_insert(serde_json::to_value(NarrativeConfig {
            model,
            ..defaults
        })?);
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added narrative block)");
    }

    // Future migrations go here:
    // if from_version < 2 { ... }

    Ok(json)
}

pub fn save_config(path: &Path, config: &GerifitConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

pub fn config_info(path: &Path, config: &GerifitConfig) -> ConfigInfo {
    let api_key_hint = std::env::var(&config.narrative.api_key_env)
        .ok()
        .filter(|k| !k.trim().is_empty())
        .map(|k| redact_key(k.trim()));

    ConfigInfo {
        config_path: path.display().to_string(),
        data_file: config.data_file.display().to_string(),
        logo_path: config.logo_path.as_ref().map(|p| p.display().to_string()),
        clinic_name: config.clinic_name.clone(),
        model: config.narrative.model.clone(),
        api_key_env: config.narrative.api_key_env.clone(),
        api_key_hint,
        created_at: config.created_at.to_string(),
    }
}

pub fn redact_key(key: &str) -> String {
    if key.len() <= 8 || !key.is_ascii() {
        return "****".to_string();
    }
    let prefix = &key[..4];
    let suffix = &key[key.len() - 4..];
    format!("{prefix}...{suffix}")
}
