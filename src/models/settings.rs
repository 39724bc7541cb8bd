use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    /// Root of the backend API; activity and session endpoints hang off it.
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Pins the offset sent as `tzOffsetMinutes` instead of using the local zone.
    #[serde(default)]
    pub tz_offset_minutes: Option<i32>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            tz_offset_minutes: None,
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl ApiSettings {
    pub fn activity_url(&self) -> String {
        format!("{}/activity", self.base_url.trim_end_matches('/'))
    }

    pub fn sessions_url(&self) -> String {
        format!("{}/sessions", self.base_url.trim_end_matches('/'))
    }
}

/// Refresh intervals, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollingSettings {
    pub team_summary_ms: u64,
    pub member_dashboard_ms: u64,
    pub weekly_summary_ms: u64,
    pub clock_ms: u64,
    /// Off by default; nothing on screen reads the weekly summary.
    #[serde(default)]
    pub weekly_summary_enabled: bool,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            team_summary_ms: 5_000,
            member_dashboard_ms: 5_000,
            weekly_summary_ms: 30_000,
            clock_ms: 1_000,
            weekly_summary_enabled: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
