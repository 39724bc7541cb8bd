use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate};
use serde_json::Value;
use tokio::sync::watch;

use crate::models::{MemberDashboard, MemberSummary, PollingSettings};
use crate::services::api_client::ApiClient;
use crate::services::feed::FeedState;
use crate::services::projection::{self, MemberView, TeamOverview, TimelineView};
use crate::services::sources::{
    self, MemberDashboardController, MemberKey, TeamSummaryController, WeeklySummaryController,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Summary,
    Timeline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    Team(TeamOverview),
    Member(MemberView),
    Timeline(TimelineView),
}

/// One viewer's dashboard: the feeds it polls and what it has selected.
pub struct DashboardSession {
    team: TeamSummaryController,
    member: MemberDashboardController,
    weekly: Option<WeeklySummaryController>,
    selected_date: NaiveDate,
    selected_member: Option<String>,
    active_tab: Tab,
    syncing: AtomicBool,
}

impl DashboardSession {
    /// Starts polling the team summary for `date`. The weekly summary is only
    /// polled when `weekly_summary_enabled` is set.
    pub fn start(client: Arc<ApiClient>, polling: &PollingSettings, date: NaiveDate) -> Self {
        let mut team = sources::team_summary_feed(client.clone(), polling);
        team.set_key(Some(date));

        let weekly = if polling.weekly_summary_enabled {
            let mut weekly = sources::weekly_summary_feed(client.clone(), polling);
            weekly.set_key(Some(date));
            Some(weekly)
        } else {
            None
        };

        Self {
            team,
            member: sources::member_dashboard_feed(client, polling),
            weekly,
            selected_date: date,
            selected_member: None,
            active_tab: Tab::Summary,
            syncing: AtomicBool::new(false),
        }
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_member(&self) -> Option<&str> {
        self.selected_member.as_deref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing.load(Ordering::Relaxed)
    }

    fn member_key(&self) -> Option<MemberKey> {
        self.selected_member.as_ref().map(|username| MemberKey {
            username: username.clone(),
            date: self.selected_date,
        })
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        if date == self.selected_date {
            return;
        }
        log::info!("Switching dashboard date to {}", date);
        self.selected_date = date;
        self.team.set_key(Some(date));
        if let Some(weekly) = self.weekly.as_mut() {
            weekly.set_key(Some(date));
        }
        let key = self.member_key();
        self.member.set_key(key);
    }

    pub fn select_member(&mut self, username: Option<String>) {
        self.selected_member = username
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        let key = self.member_key();
        self.member.set_key(key);
    }

    /// The summary tab always shows the whole team, so entering it drops the
    /// member selection.
    pub fn set_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
        if tab == Tab::Summary {
            self.select_member(None);
        }
    }

    /// Refreshes the selected member's dashboard, or the team summary when no
    /// member is selected. The active tab does not matter.
    pub async fn sync(&self) {
        self.syncing.store(true, Ordering::Relaxed);
        if self.selected_member.is_some() {
            self.member.refresh().await;
        } else {
            self.team.refresh().await;
        }
        self.syncing.store(false, Ordering::Relaxed);
    }

    pub fn team_state(&self) -> FeedState<NaiveDate, Vec<MemberSummary>> {
        self.team.snapshot()
    }

    pub fn member_state(&self) -> FeedState<MemberKey, MemberDashboard> {
        self.member.snapshot()
    }

    pub fn weekly_summary(&self) -> Option<Value> {
        self.weekly.as_ref().and_then(|w| w.snapshot().payload)
    }

    pub fn subscribe_team(&self) -> watch::Receiver<FeedState<NaiveDate, Vec<MemberSummary>>> {
        self.team.subscribe()
    }

    pub fn subscribe_member(&self) -> watch::Receiver<FeedState<MemberKey, MemberDashboard>> {
        self.member.subscribe()
    }

    pub fn view(&self, now: DateTime<Local>) -> DashboardView {
        match (self.active_tab, self.selected_member.as_deref()) {
            (Tab::Timeline, _) => DashboardView::Timeline(projection::timeline(&self.team_state(), self.selected_date)),
            (Tab::Summary, Some(username)) => DashboardView::Member(projection::member_view(
                &self.member_state(),
                username,
                self.selected_date,
            )),
            (Tab::Summary, None) => {
                DashboardView::Team(projection::team_overview(&self.team_state(), self.selected_date, now))
            }
        }
    }
}
