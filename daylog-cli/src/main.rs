mod commands;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use daylog_core::config::DaylogConfig;
use daylog_core::storage::FileStorage;
use daylog_core::{App, DateKey};
use tracing_subscriber::EnvFilter;

use crate::render::Render;

#[derive(Parser)]
#[command(name = "daylog")]
#[command(about = "Log what you did, day by day, on a month calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid and the selected day's activities
    Show {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Move this many months forward (negative for back)
        #[arg(short, long, allow_hyphen_values = true, default_value_t = 0)]
        offset: i32,

        /// Day to select (YYYY-MM-DD, "today", "fri", ...)
        #[arg(short, long)]
        select: Option<String>,
    },
    /// Log an activity on a day
    Add {
        /// Day (YYYY-MM-DD, "today", "yesterday", ...)
        date: String,

        /// What you did; prompted for when omitted
        description: Option<String>,

        #[arg(long, default_value_t = 0)]
        hours: u32,

        #[arg(long, default_value_t = 0)]
        minutes: u32,

        /// Duration such as "1h 30m" (instead of --hours/--minutes)
        #[arg(short, long, conflicts_with_all = ["hours", "minutes"])]
        duration: Option<String>,
    },
    /// List a day's activities, newest first
    List { date: String },
    /// Delete an activity by its list number or id
    Delete {
        date: String,

        /// Number shown by `list`, or an id prefix
        target: String,
    },
    /// Write all activities to a JSON file
    Export {
        /// Output file, defaults to the configured export file name
        path: Option<PathBuf>,
    },
    /// Read activities from a JSON export
    Import {
        path: PathBuf,

        /// Append to existing activities
        #[arg(long, conflicts_with = "replace")]
        merge: bool,

        /// Replace all existing activities
        #[arg(long)]
        replace: bool,
    },
    /// Delete all activities
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Interactive calendar
    Browse,
    /// Show config and data paths
    Config {
        /// Change where the activity log is stored
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "daylog=warn,daylog_core=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DaylogConfig::load()?;

    match cli.command {
        Commands::Config { data_dir } => commands::config::run(config, data_dir),
        command => run_with_app(command, &config),
    }
}

fn run_with_app(command: Commands, config: &DaylogConfig) -> Result<()> {
    let mut app = open_app(config);

    match command {
        Commands::Show { month, offset, select } => {
            commands::show::run(&mut app, month.as_deref(), offset, select.as_deref())
        }
        Commands::Add {
            date,
            description,
            hours,
            minutes,
            duration,
        } => commands::add::run(&mut app, &date, description, hours, minutes, duration.as_deref()),
        Commands::List { date } => commands::list::run(&app, &date),
        Commands::Delete { date, target } => commands::delete::run(&mut app, &date, &target),
        Commands::Export { path } => {
            let path = path.unwrap_or_else(|| PathBuf::from(&config.export_file));
            commands::export::run(&app, &path)
        }
        Commands::Import { path, merge, replace } => {
            commands::import::run(&mut app, &path, merge, replace)
        }
        Commands::Clear { force } => commands::clear::run(&mut app, force),
        Commands::Browse => commands::browse::run(&mut app),
        Commands::Config { data_dir } => commands::config::run(config.clone(), data_dir),
    }
}

/// Open the log from the configured data directory, reporting any fallback.
fn open_app(config: &DaylogConfig) -> App {
    let storage = FileStorage::new(config.data_path());
    tracing::debug!(dir = %storage.dir().display(), key = %config.storage_key, "opening activity log");
    let (app, notices) = App::open(Box::new(storage), &config.storage_key, DateKey::today());

    for notice in &notices {
        eprintln!("{}", notice.render());
    }

    app
}
