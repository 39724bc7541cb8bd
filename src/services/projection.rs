//! Read-only projections from feed state to what the screens show.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDate, Timelike};

use super::feed::{FeedState, FeedStatus};
use super::sources::MemberKey;
use crate::models::{HourlyBucket, MemberDashboard, MemberSummary};
use crate::utils::format::{format_minutes, format_minutes_detailed};

pub const TOP_APPS_SHOWN: usize = 6;
pub const TREE_APPS_SHOWN: usize = 5;

pub type TeamFeedState = FeedState<NaiveDate, Vec<MemberSummary>>;
pub type MemberFeedState = FeedState<MemberKey, MemberDashboard>;

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

pub fn date_label(date: NaiveDate) -> String {
    date.format("%A, %B %-d").to_string()
}

pub fn active_count(members: &[MemberSummary]) -> usize {
    members.iter().filter(|m| m.is_active).count()
}

/// Members ordered by descending active time; equal times keep input order.
pub fn rank_members(members: &[MemberSummary]) -> Vec<&MemberSummary> {
    let mut ranked: Vec<&MemberSummary> = members.iter().collect();
    ranked.sort_by(|a, b| {
        b.active_minutes()
            .partial_cmp(&a.active_minutes())
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

pub fn team_total_minutes(members: &[MemberSummary]) -> f64 {
    members.iter().map(MemberSummary::active_minutes).sum()
}

pub fn average_minutes(members: &[MemberSummary]) -> f64 {
    team_total_minutes(members) / members.len().max(1) as f64
}

/// Bar fill for the timeline: ten percent per hour, capped at full.
pub fn progress_percent(minutes: f64) -> f64 {
    (minutes / 60.0 * 10.0).min(100.0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberCard {
    pub username: String,
    pub name: String,
    pub is_active: bool,
    pub display_time: String,
    /// Only set while the member is active.
    pub current_application: Option<String>,
    /// Only set while the member is inactive.
    pub top_app: Option<String>,
}

impl MemberCard {
    fn from_summary(member: &MemberSummary) -> Self {
        Self {
            username: member.username.clone(),
            name: member.display_name().to_string(),
            is_active: member.is_active,
            display_time: format_minutes_detailed(member.total_active_minutes, None),
            current_application: member
                .current_application
                .clone()
                .filter(|_| member.is_active),
            top_app: member.top_app.clone().filter(|_| !member.is_active),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamOverview {
    pub greeting: &'static str,
    pub date_label: String,
    pub loading: bool,
    pub error: Option<String>,
    pub active_count: usize,
    pub member_count: usize,
    pub cards: Vec<MemberCard>,
}

impl TeamOverview {
    /// `"2 of 5 team members active"`, hidden while loading.
    pub fn status_line(&self) -> Option<String> {
        if self.loading {
            return None;
        }
        Some(format!(
            "{} of {} team members active",
            self.active_count, self.member_count
        ))
    }
}

pub fn team_overview(state: &TeamFeedState, date: NaiveDate, now: DateTime<Local>) -> TeamOverview {
    let members = state.payload.as_deref().unwrap_or_default();
    TeamOverview {
        greeting: greeting(now.hour()),
        date_label: date_label(date),
        loading: state.status == FeedStatus::Loading && state.payload.is_none(),
        error: state.error.clone(),
        active_count: active_count(members),
        member_count: members.len(),
        cards: members.iter().map(MemberCard::from_summary).collect(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEntry {
    pub rank: usize,
    pub username: String,
    pub name: String,
    pub is_active: bool,
    pub active_minutes: f64,
    pub display_time: String,
    pub progress_percent: f64,
    pub current_application: Option<String>,
    pub top_app: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStats {
    pub member_count: usize,
    pub active_now: usize,
    pub total_minutes: f64,
    pub total_display: String,
    pub average_minutes: f64,
    pub average_display: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineView {
    pub date_label: String,
    pub loading: bool,
    pub error: Option<String>,
    pub stats: TimelineStats,
    pub entries: Vec<TimelineEntry>,
}

pub fn timeline_stats(members: &[MemberSummary]) -> TimelineStats {
    let total = team_total_minutes(members);
    let average = average_minutes(members);
    TimelineStats {
        member_count: members.len(),
        active_now: active_count(members),
        total_minutes: total,
        total_display: format_minutes_detailed(Some(total), None),
        average_minutes: average,
        average_display: format_minutes_detailed(Some(average), None),
    }
}

pub fn timeline_entries(members: &[MemberSummary]) -> Vec<TimelineEntry> {
    rank_members(members)
        .into_iter()
        .enumerate()
        .map(|(idx, member)| TimelineEntry {
            rank: idx + 1,
            username: member.username.clone(),
            name: member.display_name().to_string(),
            is_active: member.is_active,
            active_minutes: member.active_minutes(),
            display_time: format_minutes_detailed(member.total_active_minutes, None),
            progress_percent: progress_percent(member.active_minutes()),
            current_application: member
                .current_application
                .clone()
                .filter(|_| member.is_active),
            top_app: member.top_app.clone(),
        })
        .collect()
}

pub fn timeline(state: &TeamFeedState, date: NaiveDate) -> TimelineView {
    let members = state.payload.as_deref().unwrap_or_default();
    TimelineView {
        date_label: date_label(date),
        loading: state.status == FeedStatus::Loading && state.payload.is_none(),
        error: state.error.clone(),
        stats: timeline_stats(members),
        entries: timeline_entries(members),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageLine {
    pub name: String,
    pub time: String,
    pub percentage: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTreeView {
    pub category: String,
    pub color: String,
    pub time: String,
    pub applications: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberView {
    pub username: String,
    pub title: String,
    pub date_label: String,
    pub total_display: String,
    pub loading: bool,
    pub error: Option<String>,
    pub hourly: Vec<HourlyBucket>,
    pub top_applications: Vec<UsageLine>,
    pub categories: Vec<UsageLine>,
    pub tree: Vec<CategoryTreeView>,
}

pub fn member_view(state: &MemberFeedState, username: &str, date: NaiveDate) -> MemberView {
    let dashboard = state.payload.as_ref();
    let title = dashboard
        .and_then(|d| d.full_name.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| username.to_string());

    let mut view = MemberView {
        username: username.to_string(),
        title,
        date_label: date_label(date),
        total_display: format_minutes(dashboard.and_then(|d| d.total_active_minutes)),
        loading: state.status == FeedStatus::Loading && state.payload.is_none(),
        error: state.error.clone(),
        hourly: Vec::new(),
        top_applications: Vec::new(),
        categories: Vec::new(),
        tree: Vec::new(),
    };

    let Some(dashboard) = dashboard else {
        return view;
    };

    view.hourly = dashboard.hourly_slots();
    view.top_applications = dashboard
        .top_applications
        .iter()
        .take(TOP_APPS_SHOWN)
        .map(|app| UsageLine {
            name: app.name.clone(),
            time: format_minutes_detailed(Some(app.minutes), Some(app.seconds)),
            percentage: app.percentage,
            color: None,
        })
        .collect();
    view.categories = dashboard
        .categories
        .categories
        .iter()
        .map(|cat| UsageLine {
            name: cat.name.clone(),
            time: format_minutes_detailed(Some(cat.minutes), None),
            percentage: cat.percentage,
            color: Some(cat.color.clone()),
        })
        .collect();
    view.tree = dashboard
        .categories
        .tree
        .iter()
        .map(|node| CategoryTreeView {
            category: node.category.clone(),
            color: node.color.clone(),
            time: format_minutes_detailed(Some(node.total_minutes), None),
            applications: node
                .applications
                .iter()
                .take(TREE_APPS_SHOWN)
                .map(|app| (app.name.clone(), format_minutes_detailed(Some(app.minutes), None)))
                .collect(),
        })
        .collect();
    view
}
