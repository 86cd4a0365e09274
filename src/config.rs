//! Runtime configuration.
//!
//! Settings come from an optional JSON file, then `MESSO_*` environment
//! variables on top, and are validated before use.
use crate::phone::CallingCodePolicy;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

pub const ENV_COUNTRY_CODE: &str = "MESSO_COUNTRY_CODE";
pub const ENV_RECOGNIZED_CODES: &str = "MESSO_RECOGNIZED_CODES";
pub const ENV_OUTBOX: &str = "MESSO_OUTBOX";
pub const ENV_DATA_CSV: &str = "MESSO_DATA_CSV";
pub const ENV_SENDER_ID: &str = "MESSO_SENDER_ID";

const DEFAULT_OUTBOX_REL: &str = "messo-outbox.jsonl";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub schema_version: u32,
    /// Calling code prepended to local numbers when dialing.
    pub country_code: String,
    /// Prefixes that mark a number as already carrying a calling code.
    pub recognized_codes: Vec<String>,
    pub outbox_path: PathBuf,
    /// CSV loaded into the row store when no `--file` is given.
    pub data_csv: Option<PathBuf>,
    pub sender_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        default_config()
    }
}

impl Config {
    pub fn policy(&self) -> CallingCodePolicy {
        CallingCodePolicy::new(
            self.country_code.clone(),
            self.recognized_codes.iter().cloned(),
        )
    }
}

pub fn default_config() -> Config {
    Config {
        schema_version: CONFIG_SCHEMA_VERSION,
        country_code: "255".to_string(),
        recognized_codes: vec!["255".to_string(), "27".to_string()],
        outbox_path: PathBuf::from(DEFAULT_OUTBOX_REL),
        data_csv: None,
        sender_id: None,
    }
}

/// Load config from `path` (or defaults), apply environment overrides, and
/// validate the result.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => read_config(path)?,
        None => default_config(),
    };
    let config = apply_env_overrides(config, |name| std::env::var(name).ok());
    validate_config(&config)?;
    tracing::debug!(
        source = %path.map(|p| p.display().to_string()).unwrap_or_else(|| "defaults".to_string()),
        country_code = %config.country_code,
        "config loaded"
    );
    Ok(config)
}

pub fn read_config(path: &Path) -> Result<Config> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: Config = serde_json::from_slice(&bytes).context("parse messo config JSON")?;
    Ok(config)
}

/// Persist a config in stable JSON form.
pub fn write_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(config).context("serialize messo config")?;
    fs::write(path, text.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Overlay non-empty environment values onto `config`.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(code) = lookup(ENV_COUNTRY_CODE) {
        config.country_code = code;
    }
    if let Some(codes) = lookup(ENV_RECOGNIZED_CODES) {
        config.recognized_codes = codes
            .split(',')
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();
    }
    if let Some(outbox) = lookup(ENV_OUTBOX) {
        config.outbox_path = PathBuf::from(outbox);
    }
    if let Some(data_csv) = lookup(ENV_DATA_CSV) {
        config.data_csv = Some(PathBuf::from(data_csv));
    }
    if let Some(sender_id) = lookup(ENV_SENDER_ID) {
        config.sender_id = Some(sender_id);
    }
    config
}

pub fn validate_config(config: &Config) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported messo config schema_version {}",
            config.schema_version
        ));
    }
    validate_code(&config.country_code, "country_code")?;
    for code in &config.recognized_codes {
        validate_code(code, "recognized_codes")?;
    }
    if config.outbox_path.as_os_str().is_empty() {
        return Err(anyhow!("outbox_path must be non-empty"));
    }
    Ok(())
}

fn validate_code(code: &str, label: &str) -> Result<()> {
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(anyhow!("{label} must be a non-empty digit string (got {code:?})"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
