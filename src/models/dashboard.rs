use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppUsage {
    pub name: String,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub seconds: f64,
    #[serde(default)]
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourlyBucket {
    pub hour: u32,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub active: bool,
}

impl HourlyBucket {
    pub fn empty(hour: u32) -> Self {
        Self {
            hour,
            label: format!("{:02}:00", hour),
            minutes: 0.0,
            active: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    pub name: String,
    #[serde(default)]
    pub minutes: f64,
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TreeApp {
    pub name: String,
    #[serde(default)]
    pub minutes: f64,
}

/// A category with the applications that make it up.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub category: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub total_minutes: f64,
    #[serde(default)]
    pub applications: Vec<TreeApp>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    #[serde(default)]
    pub categories: Vec<CategoryUsage>,
    #[serde(default)]
    pub tree: Vec<CategoryNode>,
}

/// Per-member detail for one date, as served by `/dashboard/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberDashboard {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_active_minutes: Option<f64>,
    #[serde(default)]
    pub hourly_activity: Vec<HourlyBucket>,
    #[serde(default)]
    pub top_applications: Vec<AppUsage>,
    #[serde(default)]
    pub categories: CategoryBreakdown,
}

impl MemberDashboard {
    /// Hourly activity laid out over exactly 24 slots, indexed by hour.
    ///
    /// Buckets the backend omitted are filled with empty ones; buckets with an
    /// out-of-range hour are ignored.
    pub fn hourly_slots(&self) -> Vec<HourlyBucket> {
        let mut slots: Vec<HourlyBucket> = (0..HOURS_PER_DAY as u32).map(HourlyBucket::empty).collect();
        for bucket in &self.hourly_activity {
            if let Some(slot) = slots.get_mut(bucket.hour as usize) {
                *slot = bucket.clone();
                if slot.label.is_empty() {
                    slot.label = format!("{:02}:00", bucket.hour);
                }
            }
        }
        slots
    }

    pub fn total_percentage(&self) -> f64 {
        self.top_applications.iter().map(|a| a.percentage).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD_JSON: &str = r##"{
        "username": "nidhish",
        "fullName": "Nidhish",
        "date": "2026-10-19",
        "totalActiveMinutes": 130,
        "topApplications": [
            {"name": "Code", "minutes": 80, "seconds": 15, "percentage": 61.5},
            {"name": "Chrome", "minutes": 50, "seconds": 0, "percentage": 38.5}
        ],
        "hourlyActivity": [
            {"hour": 9, "label": "09:00", "minutes": 45, "active": true},
            {"hour": 10, "label": "10:00", "minutes": 60, "active": true}
        ],
        "categories": {
            "categories": [
                {"name": "Programming", "minutes": 80, "percentage": 61.5, "color": "#10b981"}
            ],
            "tree": [
                {"category": "Programming", "color": "#10b981", "totalMinutes": 80,
                 "applications": [{"name": "Code", "minutes": 80}]}
            ]
        }
    }"##;

    #[test]
    fn decodes_full_dashboard() {
        let dashboard: MemberDashboard = serde_json::from_str(DASHBOARD_JSON).unwrap();
        assert_eq!(dashboard.full_name.as_deref(), Some("Nidhish"));
        assert_eq!(dashboard.top_applications.len(), 2);
        assert_eq!(dashboard.categories.tree[0].applications[0].name, "Code");
        assert!((dashboard.total_percentage() - 100.0).abs() < 0.01);
    }

    #[test]
    fn hourly_slots_always_has_24_entries() {
        let dashboard: MemberDashboard = serde_json::from_str(DASHBOARD_JSON).unwrap();
        let slots = dashboard.hourly_slots();
        assert_eq!(slots.len(), HOURS_PER_DAY);
        assert_eq!(slots[0].label, "00:00");
        assert_eq!(slots[9].minutes, 45.0);
        assert!(slots[10].active);
        assert!(!slots[23].active);
    }

    #[test]
    fn empty_body_decodes_to_defaults() {
        let dashboard: MemberDashboard = serde_json::from_str("{}").unwrap();
        assert!(dashboard.top_applications.is_empty());
        assert!(dashboard.categories.categories.is_empty());
        assert_eq!(dashboard.hourly_slots().len(), HOURS_PER_DAY);
    }
}
