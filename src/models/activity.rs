use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Body of `POST /activity`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogRequest {
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    /// UTC wall time without an offset (`2026-10-19T10:08:29.610`). Server time
    /// is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_idle: bool,
}

impl ActivityLogRequest {
    pub fn new(username: impl Into<String>, application_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            application_name: Some(application_name.into()),
            window_title: None,
            timestamp: None,
            is_idle: false,
        }
    }

    pub fn with_window_title(mut self, title: impl Into<String>) -> Self {
        self.window_title = Some(title.into());
        self
    }

    pub fn stamped_now(mut self) -> Self {
        self.timestamp = Some(chrono::Utc::now().naive_utc().format(TIMESTAMP_FORMAT).to_string());
        self
    }

    pub fn idle(mut self, is_idle: bool) -> Self {
        self.is_idle = is_idle;
        self
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionEventType {
    Start,
    End,
    Heartbeat,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    Normal,
    Killed,
    Timeout,
}

/// Body of `POST /sessions`: an application session starting, ending or
/// staying alive on a member's machine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionEventRequest {
    pub username: String,
    pub application_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_name: Option<String>,
    pub event_type: SessionEventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<EndReason>,
}
