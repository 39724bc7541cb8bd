use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::ArgMatches;

use worktracker::cli;
use worktracker::commands::{self, DashboardSession, DashboardView, Tab};
use worktracker::models::{ActivityLogRequest, EndReason, SessionEventRequest, SessionEventType, Settings};
use worktracker::render::render;
use worktracker::services::api_client::ApiClient;
use worktracker::services::clock::WallClock;
use worktracker::services::feed::FeedStatus;
use worktracker::utils::config;

fn init_logging(settings: &Settings) {
    let env = env_logger::Env::default().default_filter_or(settings.logging.level.clone());
    let _ = env_logger::Builder::from_env(env).format_timestamp_millis().try_init();
}

fn parse_date(raw: Option<&String>) -> Result<NaiveDate> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", raw)),
        None => Ok(Local::now().date_naive()),
    }
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches.get_one::<String>(name).map(String::as_str).unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();
    let matches = cli::get_matches();

    let config_path = config::resolve_config_path(matches.get_one::<String>("config").map(PathBuf::from).as_deref());
    let settings = config::load_settings(config_path.as_deref())?;
    init_logging(&settings);

    let client = Arc::new(ApiClient::new(&settings.api)?);
    log::debug!("Using API at {}", settings.api.base_url);

    match matches.subcommand() {
        Some(("watch", sub)) => watch(client, &settings, sub).await,
        Some(("log-activity", sub)) => {
            let entry = ActivityLogRequest::new(arg(sub, "username"), arg(sub, "app"))
                .idle(sub.get_flag("idle"))
                .stamped_now();
            let entry = match sub.get_one::<String>("title") {
                Some(title) => entry.with_window_title(title.as_str()),
                None => entry,
            };
            let response = commands::activity::log_activity(&client, &entry).await?;
            println!("{}", response);
            Ok(())
        }
        Some(("session-event", sub)) => {
            let event_type = match arg(sub, "event") {
                "start" => SessionEventType::Start,
                "end" => SessionEventType::End,
                _ => SessionEventType::Heartbeat,
            };
            let end_reason = sub.get_one::<String>("reason").map(|r| match r.as_str() {
                "killed" => EndReason::Killed,
                "timeout" => EndReason::Timeout,
                _ => EndReason::Normal,
            });
            let event = SessionEventRequest {
                username: arg(sub, "username").to_string(),
                application_name: arg(sub, "app").to_string(),
                process_name: sub.get_one::<String>("process").cloned(),
                event_type,
                end_reason,
            };
            let response = commands::activity::send_session_event(&client, &event).await?;
            println!("{}", response);
            Ok(())
        }
        Some(("heartbeat", sub)) => {
            let response = commands::activity::send_heartbeat(&client, arg(sub, "username"), arg(sub, "app")).await?;
            println!("{}", response);
            Ok(())
        }
        Some(("logout", sub)) => {
            let response = commands::activity::logout(&client, arg(sub, "username")).await?;
            println!("{}", response);
            Ok(())
        }
        Some((other, _)) => bail!("unknown command '{}'", other),
        None => bail!("no command given"),
    }
}

async fn watch(client: Arc<ApiClient>, settings: &Settings, matches: &ArgMatches) -> Result<()> {
    let date = parse_date(matches.get_one::<String>("date"))?;
    let once = matches.get_flag("once");

    let mut session = DashboardSession::start(client, &settings.polling, date);
    if matches.get_flag("timeline") {
        session.set_tab(Tab::Timeline);
    }
    session.select_member(matches.get_one::<String>("member").cloned());

    let clock = WallClock::start(std::time::Duration::from_millis(settings.polling.clock_ms));
    let mut team_rx = session.subscribe_team();
    let mut member_rx = session.subscribe_member();

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    log::info!("Watching activity for {} (Ctrl-C to quit)", date);
    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                log::info!("Stopping");
                break;
            }
            changed = team_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            changed = member_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }

        let view = session.view(clock.now());
        let settled = match &view {
            DashboardView::Member(_) => !matches!(session.member_state().status, FeedStatus::Loading | FeedStatus::Idle),
            _ => !matches!(session.team_state().status, FeedStatus::Loading | FeedStatus::Idle),
        };
        if !settled {
            continue;
        }
        println!("{}", render(&view, clock.now(), session.is_syncing()));
        if once {
            break;
        }
    }
    Ok(())
}
