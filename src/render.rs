//! Plain-text rendering of dashboard views for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Local};

use crate::commands::DashboardView;
use crate::services::projection::{MemberView, TeamOverview, TimelineView};
use crate::utils::format::format_percentage;

const BAR_WIDTH: usize = 20;

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn render(view: &DashboardView, now: DateTime<Local>, syncing: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "WorkTracker  {}{}",
        now.format("%H:%M:%S"),
        if syncing { "  (syncing...)" } else { "" }
    );
    match view {
        DashboardView::Team(team) => render_team(&mut out, team),
        DashboardView::Member(member) => render_member(&mut out, member),
        DashboardView::Timeline(timeline) => render_timeline(&mut out, timeline),
    }
    out
}

fn render_team(out: &mut String, team: &TeamOverview) {
    let _ = writeln!(out, "{}", team.greeting);
    match team.status_line() {
        Some(status) => {
            let _ = writeln!(out, "{} - {}", team.date_label, status);
        }
        None => {
            let _ = writeln!(out, "{}", team.date_label);
        }
    }
    if let Some(error) = &team.error {
        let _ = writeln!(out, "! {}", error);
    }
    if team.loading {
        let _ = writeln!(out, "Loading team activity...");
        return;
    }
    if team.cards.is_empty() {
        let _ = writeln!(out, "No team members found");
        return;
    }
    for card in &team.cards {
        let marker = if card.is_active { "●" } else { "○" };
        let _ = write!(out, "{} {:<20} {:>12}", marker, card.name, card.display_time);
        if let Some(app) = &card.current_application {
            let _ = write!(out, "  now: {}", app);
        }
        if let Some(app) = &card.top_app {
            let _ = write!(out, "  top: {}", app);
        }
        out.push('\n');
    }
}

fn render_member(out: &mut String, member: &MemberView) {
    let _ = writeln!(out, "{} - {} - total {}", member.title, member.date_label, member.total_display);
    if let Some(error) = &member.error {
        let _ = writeln!(out, "! {}", error);
    }
    if member.loading {
        let _ = writeln!(out, "Loading dashboard...");
        return;
    }

    let peak = member.hourly.iter().map(|h| h.minutes).fold(0.0_f64, f64::max);
    if peak > 0.0 {
        let _ = writeln!(out, "\nHourly activity");
        for bucket in member.hourly.iter().filter(|h| h.minutes > 0.0) {
            let _ = writeln!(out, "  {} {} {}m", bucket.label, bar(bucket.minutes / peak * 100.0), bucket.minutes);
        }
    }

    let _ = writeln!(out, "\nTop applications");
    if member.top_applications.is_empty() {
        let _ = writeln!(out, "  No applications recorded yet");
    }
    for app in &member.top_applications {
        let _ = writeln!(
            out,
            "  {:<24} {:>12} {:>7}",
            app.name,
            app.time,
            format_percentage(app.percentage)
        );
    }

    let _ = writeln!(out, "\nCategories");
    if member.categories.is_empty() {
        let _ = writeln!(out, "  No categories");
    }
    for cat in &member.categories {
        let _ = writeln!(
            out,
            "  {:<24} {:>12} {:>7}",
            cat.name,
            cat.time,
            format_percentage(cat.percentage)
        );
    }

    for node in &member.tree {
        let _ = writeln!(out, "\n{} ({})", node.category, node.time);
        for (name, time) in &node.applications {
            let _ = writeln!(out, "  └ {:<22} {:>12}", name, time);
        }
    }
}

fn render_timeline(out: &mut String, timeline: &TimelineView) {
    let stats = &timeline.stats;
    let _ = writeln!(out, "Team timeline - {}", timeline.date_label);
    if let Some(error) = &timeline.error {
        let _ = writeln!(out, "! {}", error);
        return;
    }
    if timeline.loading {
        let _ = writeln!(out, "Loading timeline data...");
        return;
    }
    if timeline.entries.is_empty() {
        let _ = writeln!(out, "No timeline data available");
        return;
    }
    let _ = writeln!(
        out,
        "Members {}  Active now {}  Total {}  Avg {}",
        stats.member_count, stats.active_now, stats.total_display, stats.average_display
    );
    for entry in &timeline.entries {
        let _ = write!(
            out,
            "#{:<2} {:<20} {:>12} {}",
            entry.rank,
            entry.name,
            entry.display_time,
            bar(entry.progress_percent)
        );
        if let Some(app) = &entry.current_application {
            let _ = write!(out, "  now: {}", app);
        }
        if let Some(app) = &entry.top_app {
            let _ = write!(out, "  most used: {}", app);
        }
        out.push('\n');
    }
}
