//! HTTP client for the WorkTracker backend.
//!
//! Every call is a single best-effort round trip. The backend answers either
//! with the bare payload or with a `{success, data, message}` envelope; both
//! shapes are folded into one `Result<T, RemoteError>` here so callers never
//! look at raw responses.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{ActivityLogRequest, ApiSettings, MemberDashboard, MemberSummary, SessionEventRequest};

const GENERIC_HTTP_ERROR: &str = "An error occurred";
const GENERIC_LOGICAL_ERROR: &str = "Request failed";

/// Failure of a single backend call.
///
/// `Http` and `Decode` carry the status code; `Logical` failures arrive with
/// a 2xx status and carry none. `Display` is the text shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RemoteError {
    #[error("Failed to connect to server: {message}")]
    Network { message: String },
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: String,
    },
    #[error("{message}")]
    Logical { message: String, body: String },
    #[error("Unexpected response from server: {message}")]
    Decode {
        status: u16,
        message: String,
        body: String,
    },
}

impl RemoteError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RemoteError::Http { status, .. } | RemoteError::Decode { status, .. } => Some(*status),
            RemoteError::Network { .. } | RemoteError::Logical { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            RemoteError::Http { body, .. }
            | RemoteError::Logical { body, .. }
            | RemoteError::Decode { body, .. } => Some(body),
            RemoteError::Network { .. } => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientInitError {
    #[error("invalid API url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Deserialize)]
struct Envelope {
    success: bool,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// The two shapes a response body can take.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerResponse {
    Envelope {
        success: bool,
        data: Value,
        message: Option<String>,
    },
    Raw(Value),
}

impl ServerResponse {
    /// Bodies carrying a `success` field that decode as an envelope are
    /// envelopes; everything else is a raw payload.
    pub fn from_value(value: Value) -> Self {
        if value.get("success").is_some() {
            if let Ok(envelope) = serde_json::from_value::<Envelope>(value.clone()) {
                return ServerResponse::Envelope {
                    success: envelope.success,
                    data: envelope.data.unwrap_or(Value::Null),
                    message: envelope.message,
                };
            }
        }
        ServerResponse::Raw(value)
    }
}

fn message_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

/// Turns a status code and body into the unwrapped payload or a `RemoteError`.
pub fn normalize_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RemoteError> {
    let parsed: Option<Value> = if body.trim().is_empty() {
        Some(Value::Null)
    } else {
        serde_json::from_str(body).ok()
    };

    if !(200..300).contains(&status) {
        return Err(RemoteError::Http {
            status,
            message: message_field(parsed.as_ref()).unwrap_or_else(|| GENERIC_HTTP_ERROR.to_string()),
            body: body.to_string(),
        });
    }

    let value = parsed.ok_or_else(|| RemoteError::Decode {
        status,
        message: "response body is not valid JSON".to_string(),
        body: body.to_string(),
    })?;

    let payload = match ServerResponse::from_value(value) {
        ServerResponse::Envelope {
            success: false,
            message,
            ..
        } => {
            return Err(RemoteError::Logical {
                message: message
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| GENERIC_LOGICAL_ERROR.to_string()),
                body: body.to_string(),
            });
        }
        ServerResponse::Envelope { data, .. } => data,
        ServerResponse::Raw(value) => value,
    };

    serde_json::from_value(payload).map_err(|e| RemoteError::Decode {
        status,
        message: e.to_string(),
        body: body.to_string(),
    })
}

/// Local offset from UTC in minutes, positive east (IST is +330).
pub fn local_tz_offset_minutes() -> i32 {
    chrono::Local::now().offset().local_minus_utc() / 60
}

fn parse_base(url: &str) -> Result<Url, ClientInitError> {
    let parsed = Url::parse(url).map_err(|e| ClientInitError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.cannot_be_a_base() {
        return Err(ClientInitError::InvalidUrl {
            url: url.to_string(),
            reason: "not a base url".to_string(),
        });
    }
    Ok(parsed)
}

fn join(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    activity_url: Url,
    sessions_url: Url,
    tz_offset_minutes: Option<i32>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ClientInitError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            activity_url: parse_base(&settings.activity_url())?,
            sessions_url: parse_base(&settings.sessions_url())?,
            tz_offset_minutes: settings.tz_offset_minutes,
        })
    }

    pub fn tz_offset_minutes(&self) -> i32 {
        self.tz_offset_minutes.unwrap_or_else(local_tz_offset_minutes)
    }

    fn date_query(&self, date: NaiveDate) -> [(&'static str, String); 2] {
        [
            ("date", date.format("%Y-%m-%d").to_string()),
            ("tzOffsetMinutes", self.tz_offset_minutes().to_string()),
        ]
    }

    pub async fn get_summary(&self, date: NaiveDate) -> Result<Vec<MemberSummary>, RemoteError> {
        let url = join(&self.activity_url, &["summary"]);
        self.get(url, &self.date_query(date)).await
    }

    pub async fn get_dashboard(&self, username: &str, date: NaiveDate) -> Result<MemberDashboard, RemoteError> {
        let url = join(&self.activity_url, &["dashboard", username]);
        self.get(url, &self.date_query(date)).await
    }

    pub async fn get_weekly_summary(&self, date: NaiveDate) -> Result<Value, RemoteError> {
        let url = join(&self.activity_url, &["weekly-summary"]);
        self.get(url, &self.date_query(date)).await
    }

    pub async fn get_resources(&self, username: &str) -> Result<Value, RemoteError> {
        let url = join(&self.activity_url, &["resources", username]);
        self.get(url, &[]).await
    }

    pub async fn log_activity(&self, entry: &ActivityLogRequest) -> Result<Value, RemoteError> {
        self.post(self.activity_url.clone(), entry).await
    }

    pub async fn send_session_event(&self, event: &SessionEventRequest) -> Result<Value, RemoteError> {
        self.post(self.sessions_url.clone(), event).await
    }

    pub async fn send_heartbeat(&self, username: &str, application_name: &str) -> Result<Value, RemoteError> {
        let url = join(&self.sessions_url, &["heartbeat"]);
        let payload = serde_json::json!({
            "username": username,
            "applicationName": application_name,
        });
        self.post(url, &payload).await
    }

    pub async fn logout(&self, username: &str) -> Result<Value, RemoteError> {
        let url = join(&self.sessions_url, &["logout"]);
        self.post(url, &serde_json::json!({ "username": username })).await
    }

    pub async fn get_active_sessions(&self) -> Result<Value, RemoteError> {
        let url = join(&self.sessions_url, &["active"]);
        self.get(url, &[]).await
    }

    pub async fn get_session_members(&self) -> Result<Value, RemoteError> {
        let url = join(&self.sessions_url, &["members"]);
        self.get(url, &[]).await
    }

    async fn get<T: DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> Result<T, RemoteError> {
        log::debug!("GET {}", url);
        let request = self.http.get(url).query(query);
        Self::execute(request).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, url: Url, body: &B) -> Result<T, RemoteError> {
        log::debug!("POST {}", url);
        let request = self.http.post(url).json(body);
        Self::execute(request).await
    }

    async fn execute<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, RemoteError> {
        let response = request.send().await.map_err(|e| RemoteError::Network {
            message: e.to_string(),
        })?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| RemoteError::Network {
            message: e.to_string(),
        })?;
        normalize_response(status, &body)
    }
}
