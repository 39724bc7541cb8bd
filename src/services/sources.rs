use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;

use super::api_client::{ApiClient, RemoteError};
use super::feed::{FeedController, FeedSource};
use crate::models::{MemberDashboard, MemberSummary, PollingSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    TeamSummary,
    MemberDashboard,
    WeeklySummary,
}

impl FeedKind {
    pub fn interval(self, polling: &PollingSettings) -> Duration {
        let ms = match self {
            FeedKind::TeamSummary => polling.team_summary_ms,
            FeedKind::MemberDashboard => polling.member_dashboard_ms,
            FeedKind::WeeklySummary => polling.weekly_summary_ms,
        };
        Duration::from_millis(ms)
    }

    pub fn name(self) -> &'static str {
        match self {
            FeedKind::TeamSummary => "team-summary",
            FeedKind::MemberDashboard => "member-dashboard",
            FeedKind::WeeklySummary => "weekly-summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberKey {
    pub username: String,
    pub date: NaiveDate,
}

pub struct TeamSummaryFeed {
    client: Arc<ApiClient>,
}

#[async_trait]
impl FeedSource for TeamSummaryFeed {
    type Key = NaiveDate;
    type Payload = Vec<MemberSummary>;

    fn name(&self) -> &'static str {
        FeedKind::TeamSummary.name()
    }

    async fn fetch(&self, date: &NaiveDate) -> Result<Vec<MemberSummary>, RemoteError> {
        self.client.get_summary(*date).await
    }
}

pub struct MemberDashboardFeed {
    client: Arc<ApiClient>,
}

#[async_trait]
impl FeedSource for MemberDashboardFeed {
    type Key = MemberKey;
    type Payload = MemberDashboard;

    fn name(&self) -> &'static str {
        FeedKind::MemberDashboard.name()
    }

    async fn fetch(&self, key: &MemberKey) -> Result<MemberDashboard, RemoteError> {
        self.client.get_dashboard(&key.username, key.date).await
    }
}

pub struct WeeklySummaryFeed {
    client: Arc<ApiClient>,
}

#[async_trait]
impl FeedSource for WeeklySummaryFeed {
    type Key = NaiveDate;
    type Payload = Value;

    fn name(&self) -> &'static str {
        FeedKind::WeeklySummary.name()
    }

    async fn fetch(&self, date: &NaiveDate) -> Result<Value, RemoteError> {
        self.client.get_weekly_summary(*date).await
    }
}

pub type TeamSummaryController = FeedController<TeamSummaryFeed>;
pub type MemberDashboardController = FeedController<MemberDashboardFeed>;
pub type WeeklySummaryController = FeedController<WeeklySummaryFeed>;

pub fn team_summary_feed(client: Arc<ApiClient>, polling: &PollingSettings) -> TeamSummaryController {
    FeedController::new(TeamSummaryFeed { client }, FeedKind::TeamSummary.interval(polling))
}

pub fn member_dashboard_feed(client: Arc<ApiClient>, polling: &PollingSettings) -> MemberDashboardController {
    FeedController::new(MemberDashboardFeed { client }, FeedKind::MemberDashboard.interval(polling))
}

pub fn weekly_summary_feed(client: Arc<ApiClient>, polling: &PollingSettings) -> WeeklySummaryController {
    FeedController::new(WeeklySummaryFeed { client }, FeedKind::WeeklySummary.interval(polling))
}
