use serde::{Deserialize, Serialize};

/// One row of the team summary feed.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub total_active_minutes: Option<f64>,
    #[serde(default)]
    pub total_active_hours: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub current_application: Option<String>,
    #[serde(default)]
    pub top_app: Option<String>,
}

impl MemberSummary {
    /// Active minutes with a missing value counted as zero.
    pub fn active_minutes(&self) -> f64 {
        self.total_active_minutes
            .filter(|m| m.is_finite())
            .unwrap_or(0.0)
    }

    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_row() {
        let json = r#"{
            "username": "tanmay",
            "fullName": "Tanmay",
            "totalActiveMinutes": 95,
            "totalActiveHours": "1h 35m",
            "isActive": true,
            "currentApplication": "Code",
            "topApp": "Chrome"
        }"#;
        let member: MemberSummary = serde_json::from_str(json).unwrap();
        assert_eq!(member.username, "tanmay");
        assert_eq!(member.active_minutes(), 95.0);
        assert!(member.is_active);
        assert_eq!(member.current_application.as_deref(), Some("Code"));
    }

    #[test]
    fn missing_fields_fall_back() {
        let member: MemberSummary =
            serde_json::from_str(r#"{"username":"yash","totalActiveMinutes":null}"#).unwrap();
        assert_eq!(member.active_minutes(), 0.0);
        assert!(!member.is_active);
        assert_eq!(member.display_name(), "yash");
    }

    #[test]
    fn null_full_name_uses_username() {
        let members: Vec<MemberSummary> = serde_json::from_str(
            r#"[{"username":"dev","fullName":null,"isActive":true},{"username":"parth","fullName":"Parth"}]"#,
        )
        .unwrap();
        assert_eq!(members[0].full_name, None);
        assert_eq!(members[0].display_name(), "dev");
        assert_eq!(members[1].display_name(), "Parth");
    }
}
