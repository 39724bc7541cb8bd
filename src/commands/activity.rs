use serde_json::Value;

use crate::models::{ActivityLogRequest, SessionEventRequest};
use crate::services::api_client::{ApiClient, RemoteError};

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

fn require(field: &str, value: &str) -> Result<(), CommandError> {
    if value.trim().is_empty() {
        return Err(CommandError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

pub async fn log_activity(client: &ApiClient, entry: &ActivityLogRequest) -> Result<Value, CommandError> {
    require("Username", &entry.username)?;
    let result = client.log_activity(entry).await?;
    log::info!(
        "Logged activity for {} ({})",
        entry.username,
        entry.application_name.as_deref().unwrap_or("no application")
    );
    Ok(result)
}

pub async fn send_session_event(client: &ApiClient, event: &SessionEventRequest) -> Result<Value, CommandError> {
    require("Username", &event.username)?;
    require("Application name", &event.application_name)?;
    let result = client.send_session_event(event).await?;
    log::info!(
        "Sent {:?} session event for {} ({})",
        event.event_type,
        event.username,
        event.application_name
    );
    Ok(result)
}

pub async fn send_heartbeat(client: &ApiClient, username: &str, application_name: &str) -> Result<Value, CommandError> {
    require("Username", username)?;
    Ok(client.send_heartbeat(username, application_name).await?)
}

pub async fn logout(client: &ApiClient, username: &str) -> Result<Value, CommandError> {
    require("Username", username)?;
    let result = client.logout(username).await?;
    log::info!("Logged out {}", username);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiSettings;

    #[tokio::test]
    async fn blank_username_is_rejected_before_any_request() {
        // Nothing listens on port 9; a request would fail as a network error.
        let settings = ApiSettings {
            base_url: "http://127.0.0.1:9/api".to_string(),
            ..ApiSettings::default()
        };
        let client = ApiClient::new(&settings).unwrap();

        let err = log_activity(&client, &ActivityLogRequest::new("  ", "Code"))
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::Validation(_)));
        assert_eq!(err.to_string(), "Username is required");

        let err = logout(&client, "").await.unwrap_err();
        assert!(matches!(err, CommandError::Validation(_)));
    }
}
