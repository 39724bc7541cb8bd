use std::path::{Path, PathBuf};

use crate::models::Settings;

const ENV_CONFIG_PATH: &str = "WORKTRACKER_CONFIG";
const ENV_API_URL: &str = "WORKTRACKER_API_URL";
const ENV_TZ_OFFSET: &str = "WORKTRACKER_TZ_OFFSET_MINUTES";
const ENV_LOG_LEVEL: &str = "WORKTRACKER_LOG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid value for {name}: {value}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("invalid settings: {0}")]
    Invalid(String),
}

pub fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Path from `--config` if given, else from the environment.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| env_value(ENV_CONFIG_PATH).map(PathBuf::from))
}

/// Loads settings from an optional JSON file, then applies environment
/// overrides and validates the result.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut settings = match path {
        Some(path) => read_settings_file(path)?,
        None => Settings::default(),
    };
    apply_env_overrides(&mut settings)?;
    validate(&settings)?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn apply_env_overrides(settings: &mut Settings) -> Result<(), ConfigError> {
    if let Some(url) = env_value(ENV_API_URL) {
        settings.api.base_url = url;
    }
    if let Some(raw) = env_value(ENV_TZ_OFFSET) {
        let offset = raw.parse::<i32>().map_err(|_| ConfigError::InvalidEnv {
            name: ENV_TZ_OFFSET,
            value: raw.clone(),
        })?;
        settings.api.tz_offset_minutes = Some(offset);
    }
    if let Some(level) = env_value(ENV_LOG_LEVEL) {
        settings.logging.level = level;
    }
    Ok(())
}

pub fn validate(settings: &Settings) -> Result<(), ConfigError> {
    if settings.api.base_url.trim().is_empty() {
        return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
    }
    if settings.api.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid("api.request_timeout_secs must be positive".to_string()));
    }
    let polling = &settings.polling;
    let intervals = [
        ("polling.team_summary_ms", polling.team_summary_ms),
        ("polling.member_dashboard_ms", polling.member_dashboard_ms),
        ("polling.weekly_summary_ms", polling.weekly_summary_ms),
        ("polling.clock_ms", polling.clock_ms),
    ];
    for (name, value) in intervals {
        if value == 0 {
            return Err(ConfigError::Invalid(format!("{} must be positive", name)));
        }
    }
    if let Some(offset) = settings.api.tz_offset_minutes {
        // UTC-12:00 .. UTC+14:00
        if !(-720..=840).contains(&offset) {
            return Err(ConfigError::Invalid(format!(
                "api.tz_offset_minutes out of range: {}",
                offset
            )));
        }
    }
    Ok(())
}
