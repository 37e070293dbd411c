mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{
    assistant::AssistantSubcommand, board::BoardSubcommand, calendar::CalendarSubcommand,
    prefs::PrefsSubcommand, task::TaskSubcommand,
};

#[derive(Parser)]
#[command(
    name = "taskdeck",
    about = "Task-management client: kanban board, calendar, week and list views over a remote task API",
    version,
    propagate_version = true
)]
struct Cli {
    /// Task API base URL (default: from ~/.taskdeck/config.yaml)
    #[arg(long, global = true, env = "TASKDECK_API")]
    api_url: Option<String>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, inspect, and edit tasks
    Task {
        #[command(subcommand)]
        subcommand: TaskSubcommand,
    },

    /// Kanban board: view columns, move and reorder cards
    Board {
        #[command(subcommand)]
        subcommand: Option<BoardSubcommand>,
    },

    /// Calendar views (day and month)
    Calendar {
        #[command(subcommand)]
        subcommand: Option<CalendarSubcommand>,

        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Week view: hour-by-day occupancy
    Week {
        /// Any day within the week to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Status/priority counts, due-soon window, and recent activity
    Dashboard,

    /// Apply a structured chat-assistant command
    Assistant {
        #[command(subcommand)]
        subcommand: AssistantSubcommand,
    },

    /// Local preferences (theme, background, API endpoint)
    Prefs {
        #[command(subcommand)]
        subcommand: PrefsSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let api_url = cli.api_url.as_deref();

    let result = match cli.command {
        Commands::Task { subcommand } => cmd::task::run(api_url, subcommand, cli.json),
        Commands::Board { subcommand } => cmd::board::run(api_url, subcommand, cli.json),
        Commands::Calendar { subcommand, date } => {
            cmd::calendar::run(api_url, subcommand, date.as_deref(), cli.json)
        }
        Commands::Week { date } => cmd::week::run(api_url, date.as_deref(), cli.json),
        Commands::Dashboard => cmd::dashboard::run(api_url, cli.json),
        Commands::Assistant { subcommand } => cmd::assistant::run(api_url, subcommand, cli.json),
        Commands::Prefs { subcommand } => cmd::prefs::run(subcommand, cli.json),
    };

    if let Err(e) = result {
        // Alternate Display walks the whole context chain.
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
