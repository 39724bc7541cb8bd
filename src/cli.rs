use clap::{Arg, ArgAction, ArgMatches, Command};

pub fn build_cli() -> Command {
    Command::new("worktracker")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Live team activity dashboard for the WorkTracker API")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .help("Path to a JSON settings file")
        )
        .subcommand(
            Command::new("watch")
                .about("Poll the team summary and print the dashboard as it changes")
                .arg(
                    Arg::new("date")
                        .long("date")
                        .short('d')
                        .help("Day to show as YYYY-MM-DD (default: today)")
                )
                .arg(
                    Arg::new("member")
                        .long("member")
                        .short('m')
                        .help("Show one member's dashboard instead of the team")
                )
                .arg(
                    Arg::new("timeline")
                        .long("timeline")
                        .help("Show the ranked team timeline")
                        .action(ArgAction::SetTrue)
                )
                .arg(
                    Arg::new("once")
                        .long("once")
                        .help("Print the first loaded view and exit")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("log-activity")
                .about("Submit one activity log entry")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .required(true)
                )
                .arg(
                    Arg::new("app")
                        .long("app")
                        .short('a')
                        .required(true)
                        .help("Application name")
                )
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Window title")
                )
                .arg(
                    Arg::new("idle")
                        .long("idle")
                        .action(ArgAction::SetTrue)
                )
        )
        .subcommand(
            Command::new("session-event")
                .about("Report an application session starting or ending")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .required(true)
                )
                .arg(
                    Arg::new("app")
                        .long("app")
                        .short('a')
                        .required(true)
                )
                .arg(
                    Arg::new("process")
                        .long("process")
                        .help("Process name, e.g. code.exe")
                )
                .arg(
                    Arg::new("event")
                        .long("event")
                        .short('e')
                        .required(true)
                        .value_parser(["start", "end", "heartbeat"])
                )
                .arg(
                    Arg::new("reason")
                        .long("reason")
                        .value_parser(["normal", "killed", "timeout"])
                        .help("Why the session ended")
                )
        )
        .subcommand(
            Command::new("heartbeat")
                .about("Keep a member's work session alive")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .required(true)
                )
                .arg(
                    Arg::new("app")
                        .long("app")
                        .short('a')
                        .required(true)
                )
        )
        .subcommand(
            Command::new("logout")
                .about("Close a member's work session")
                .arg(
                    Arg::new("username")
                        .long("username")
                        .short('u')
                        .required(true)
                )
        )
}

pub fn get_matches() -> ArgMatches {
    build_cli().get_matches()
}
